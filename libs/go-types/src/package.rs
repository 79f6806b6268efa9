//! Package scope and the type catalog abstraction

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::{InterfaceType, Method, PackageRef, Param, Signature, Type};

/// Kind of a package-level object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    /// `type Name T` or, with `alias`, `type Name = T`
    TypeName { ty: Type, alias: bool },
    /// A type declaration the model can't express, such as a generic type
    Unsupported { reason: String },
    Func,
    Var,
    Const,
}

/// A declared package-level object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
}

impl Object {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Read-only view of a package's declarations.
///
/// Consumers only perform structural queries; how the catalog was built
/// (parsed sources, a toolchain, hand-built fixtures) is not their concern.
pub trait TypeCatalog {
    /// The package this catalog describes
    fn package(&self) -> &PackageRef;

    /// Look up a package-level object by name
    fn lookup(&self, name: &str) -> Option<&Object>;

    /// Resolve a type to its underlying type.
    ///
    /// Named types of this package are followed through their declarations;
    /// the predeclared `error` and `any` resolve to their interfaces.
    fn underlying(&self, ty: &Type) -> Result<Type> {
        let mut current = ty.clone();
        let mut seen: Vec<String> = Vec::new();

        loop {
            let next = match &current {
                Type::Named { package, name } if package == self.package() => {
                    if seen.contains(name) {
                        return Err(Error::RecursiveType { name: name.clone() });
                    }
                    seen.push(name.clone());

                    match self.lookup(name).map(|object| &object.kind) {
                        Some(ObjectKind::TypeName { ty, .. }) => ty.clone(),
                        Some(ObjectKind::Unsupported { reason }) => {
                            return Err(Error::Unsupported {
                                name: name.clone(),
                                reason: reason.clone(),
                            })
                        }
                        _ => return Err(Error::Unresolved { name: name.clone() }),
                    }
                }
                Type::Named { .. } => {
                    return Err(Error::Unresolved {
                        name: current.canonical_string(),
                    })
                }
                Type::Basic(name) if name == "error" => {
                    return Ok(Type::Interface(error_interface()))
                }
                Type::Basic(name) if name == "any" => {
                    return Ok(Type::Interface(InterfaceType::default()))
                }
                _ => return Ok(current.clone()),
            };
            current = next;
        }
    }

    /// The complete method set of an interface, embedded interfaces included
    fn method_set(&self, iface: &InterfaceType) -> Result<Vec<Method>> {
        let mut methods = Vec::new();
        collect_methods(self, iface, &mut Vec::new(), &mut methods)?;
        Ok(methods)
    }
}

/// The predeclared `error` interface
pub fn error_interface() -> InterfaceType {
    InterfaceType {
        methods: vec![Method {
            name: "Error".to_string(),
            signature: Signature {
                params: Vec::new(),
                results: vec![Param::new("", Type::basic("string"))],
                variadic: false,
            },
        }],
        embeds: Vec::new(),
    }
}

fn collect_methods<C: TypeCatalog + ?Sized>(
    catalog: &C,
    iface: &InterfaceType,
    visiting: &mut Vec<String>,
    out: &mut Vec<Method>,
) -> Result<()> {
    for method in &iface.methods {
        // Identical methods reached through several embeddings collapse
        if !out.iter().any(|m| m.name == method.name) {
            out.push(method.clone());
        }
    }

    for embedded in &iface.embeds {
        let name = match embedded {
            Type::Named { package, name } if package == catalog.package() => name.clone(),
            Type::Named { .. } => {
                return Err(Error::UnresolvedEmbed {
                    name: embedded.canonical_string(),
                })
            }
            Type::Basic(name) if name == "error" || name == "any" => name.clone(),
            Type::Interface(inner) => {
                collect_methods(catalog, inner, visiting, out)?;
                continue;
            }
            other => {
                return Err(Error::Unresolved {
                    name: format!("{other} (embedded type is not an interface)"),
                })
            }
        };

        if visiting.contains(&name) {
            return Err(Error::RecursiveType { name });
        }

        match catalog.underlying(embedded)? {
            Type::Interface(inner) => {
                visiting.push(name);
                collect_methods(catalog, &inner, visiting, out)?;
                visiting.pop();
            }
            _ => {
                return Err(Error::Unresolved {
                    name: format!("{name} (embedded type is not an interface)"),
                })
            }
        }
    }

    Ok(())
}

/// The package-level scope of a loaded package
#[derive(Debug, Clone)]
pub struct Package {
    reference: PackageRef,
    objects: BTreeMap<String, Object>,
}

impl Package {
    pub fn new(reference: PackageRef) -> Self {
        Self {
            reference,
            objects: BTreeMap::new(),
        }
    }

    /// Declare an object, returning the previous declaration with that name
    pub fn insert(&mut self, object: Object) -> Option<Object> {
        self.objects.insert(object.name.clone(), object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl TypeCatalog for Package {
    fn package(&self) -> &PackageRef {
        &self.reference
    }

    fn lookup(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg() -> PackageRef {
        PackageRef::new("example.com/p", "p")
    }

    fn method(name: &str) -> Method {
        Method {
            name: name.to_string(),
            signature: Signature::default(),
        }
    }

    fn interface(methods: &[&str], embeds: Vec<Type>) -> Type {
        Type::Interface(InterfaceType {
            methods: methods.iter().map(|m| method(m)).collect(),
            embeds,
        })
    }

    fn declare(package: &mut Package, name: &str, ty: Type) {
        package.insert(Object::new(
            name,
            ObjectKind::TypeName { ty, alias: false },
        ));
    }

    #[test]
    fn test_underlying_follows_local_definitions() {
        let mut package = Package::new(pkg());
        declare(&mut package, "Base", interface(&["Run"], Vec::new()));
        declare(&mut package, "Derived", Type::named(pkg(), "Base"));

        let underlying = package.underlying(&Type::named(pkg(), "Derived")).unwrap();
        assert!(matches!(underlying, Type::Interface(_)));
    }

    #[test]
    fn test_underlying_of_foreign_type_is_unresolved() {
        let package = Package::new(pkg());
        let foreign = Type::named(PackageRef::new("io", "io"), "Writer");
        assert!(matches!(
            package.underlying(&foreign),
            Err(Error::Unresolved { .. })
        ));
    }

    #[test]
    fn test_underlying_detects_cycles() {
        let mut package = Package::new(pkg());
        declare(&mut package, "A", Type::named(pkg(), "B"));
        declare(&mut package, "B", Type::named(pkg(), "A"));

        assert!(matches!(
            package.underlying(&Type::named(pkg(), "A")),
            Err(Error::RecursiveType { .. })
        ));
    }

    #[test]
    fn test_method_set_includes_embedded() {
        let mut package = Package::new(pkg());
        declare(&mut package, "Closer", interface(&["Close"], Vec::new()));
        let Type::Interface(iface) = interface(
            &["Run", "Close"],
            vec![Type::named(pkg(), "Closer"), Type::basic("error")],
        ) else {
            unreachable!()
        };

        let names: Vec<_> = package
            .method_set(&iface)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Run", "Close", "Error"]);
    }

    #[test]
    fn test_method_set_rejects_foreign_embedding() {
        let package = Package::new(pkg());
        let iface = InterfaceType {
            methods: Vec::new(),
            embeds: vec![Type::named(PackageRef::new("io", "io"), "Reader")],
        };
        assert!(matches!(
            package.method_set(&iface),
            Err(Error::UnresolvedEmbed { .. })
        ));
    }

    #[test]
    fn test_method_set_detects_recursive_embedding() {
        let mut package = Package::new(pkg());
        declare(&mut package, "A", interface(&[], vec![Type::named(pkg(), "B")]));
        declare(&mut package, "B", interface(&[], vec![Type::named(pkg(), "A")]));

        let iface = InterfaceType {
            methods: Vec::new(),
            embeds: vec![Type::named(pkg(), "A")],
        };
        assert!(matches!(
            package.method_set(&iface),
            Err(Error::RecursiveType { .. })
        ));
    }

    #[test]
    fn test_embedding_an_unsupported_type_fails_when_resolved() {
        let mut package = Package::new(pkg());
        package.insert(Object::new(
            "Number",
            ObjectKind::Unsupported {
                reason: "type constraint elements are not supported".to_string(),
            },
        ));
        declare(&mut package, "Sum", interface(&["Add"], vec![Type::named(pkg(), "Number")]));

        let Type::Interface(iface) = interface(&[], vec![Type::named(pkg(), "Sum")]) else {
            unreachable!()
        };
        let err = package.method_set(&iface).unwrap_err();
        assert!(matches!(err, Error::Unsupported { ref name, .. } if name == "Number"));
        assert!(err.to_string().contains("constraint"));
    }
}
