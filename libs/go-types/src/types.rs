//! Go type model
//!
//! A resolved, language-level description of the types that appear in
//! declarations. Named types carry the package that owns them so callers can
//! decide how to qualify them when rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a Go package: its import path and declared name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageRef {
    /// Import path (e.g., "github.com/acme/widgets/instance")
    pub path: String,
    /// Declared package name (e.g., "instance")
    pub name: String,
}

impl PackageRef {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Build a reference for an imported path, guessing the declared name
    /// from the last path element.
    pub fn from_import_path(path: &str) -> Self {
        Self::new(path, guess_package_name(path))
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Guess the declared name of an imported package from its path.
///
/// Follows the module conventions: a trailing `/vN` major-version element is
/// skipped, a `.vN` suffix (gopkg.in) and a `go-` prefix are dropped.
pub fn guess_package_name(path: &str) -> String {
    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let mut last = segments.next().unwrap_or(path);

    if is_major_version(last) {
        if let Some(prev) = segments.next() {
            last = prev;
        }
    }

    if let Some((stem, suffix)) = last.rsplit_once('.') {
        if is_major_version(suffix) {
            last = stem;
        }
    }

    let last = last.strip_prefix("go-").unwrap_or(last);

    last.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A Go type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// Predeclared type (`int`, `string`, `error`, `any`, ...)
    Basic(String),
    /// Type declared in a package
    Named { package: PackageRef, name: String },
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array { len: String, elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    Chan { dir: ChanDir, elem: Box<Type> },
    Func(Signature),
    Interface(InterfaceType),
    Struct(Vec<Field>),
}

/// Function signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
    /// The last parameter was declared `...T`; its type is stored as `[]T`
    pub variadic: bool,
}

/// A function parameter or result; the name may be empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An interface method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub signature: Signature,
}

/// Interface type as written: explicit methods plus embedded types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceType {
    pub methods: Vec<Method>,
    pub embeds: Vec<Type>,
}

impl InterfaceType {
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.embeds.is_empty()
    }
}

/// Struct field; embedded fields have no name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: Option<String>,
    pub ty: Type,
    pub tag: Option<String>,
}

/// Callback deciding how a package is written in front of its named types.
/// An empty string leaves the type unqualified.
pub type Qualifier<'a> = dyn FnMut(&PackageRef) -> String + 'a;

impl Type {
    pub fn basic(name: impl Into<String>) -> Self {
        Type::Basic(name.into())
    }

    pub fn named(package: PackageRef, name: impl Into<String>) -> Self {
        Type::Named {
            package,
            name: name.into(),
        }
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer(Box::new(elem))
    }

    /// Render the type, asking `qualifier` for the prefix of every named type
    pub fn type_string(&self, qualifier: &mut Qualifier<'_>) -> String {
        let mut out = String::new();
        write_type(&mut out, self, qualifier);
        out
    }

    /// Render the type with every named type qualified by its full import path
    pub fn canonical_string(&self) -> String {
        self.type_string(&mut |package: &PackageRef| package.path.clone())
    }

    /// Visit every named type nested in this one, letting `f` rewrite its package
    pub fn requalify(&mut self, f: &mut dyn FnMut(&mut PackageRef, &str)) {
        match self {
            Type::Basic(_) => {}
            Type::Named { package, name } => f(package, name.as_str()),
            Type::Pointer(elem)
            | Type::Slice(elem)
            | Type::Array { elem, .. }
            | Type::Chan { elem, .. } => elem.requalify(f),
            Type::Map { key, value } => {
                key.requalify(f);
                value.requalify(f);
            }
            Type::Func(sig) => sig.requalify(f),
            Type::Interface(iface) => {
                for method in &mut iface.methods {
                    method.signature.requalify(f);
                }
                for embed in &mut iface.embeds {
                    embed.requalify(f);
                }
            }
            Type::Struct(fields) => {
                for field in fields {
                    field.ty.requalify(f);
                }
            }
        }
    }
}

impl Signature {
    fn requalify(&mut self, f: &mut dyn FnMut(&mut PackageRef, &str)) {
        for param in self.params.iter_mut().chain(self.results.iter_mut()) {
            param.ty.requalify(f);
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

fn write_type(out: &mut String, ty: &Type, q: &mut Qualifier<'_>) {
    match ty {
        Type::Basic(name) => out.push_str(name),
        Type::Named { package, name } => {
            let prefix = q(package);
            if !prefix.is_empty() {
                out.push_str(&prefix);
                out.push('.');
            }
            out.push_str(name);
        }
        Type::Pointer(elem) => {
            out.push('*');
            write_type(out, elem, q);
        }
        Type::Slice(elem) => {
            out.push_str("[]");
            write_type(out, elem, q);
        }
        Type::Array { len, elem } => {
            out.push('[');
            out.push_str(len);
            out.push(']');
            write_type(out, elem, q);
        }
        Type::Map { key, value } => {
            out.push_str("map[");
            write_type(out, key, q);
            out.push(']');
            write_type(out, value, q);
        }
        Type::Chan { dir, elem } => {
            let mut parens = false;
            match dir {
                ChanDir::Both => {
                    out.push_str("chan ");
                    // chan (<-chan T) needs parentheses to stay unambiguous
                    parens = matches!(
                        elem.as_ref(),
                        Type::Chan {
                            dir: ChanDir::Recv,
                            ..
                        }
                    );
                }
                ChanDir::Send => out.push_str("chan<- "),
                ChanDir::Recv => out.push_str("<-chan "),
            }
            if parens {
                out.push('(');
            }
            write_type(out, elem, q);
            if parens {
                out.push(')');
            }
        }
        Type::Func(sig) => {
            out.push_str("func");
            write_signature(out, sig, q);
        }
        Type::Interface(iface) => {
            out.push_str("interface{");
            let mut first = true;
            for method in &iface.methods {
                if !first {
                    out.push_str("; ");
                }
                first = false;
                out.push_str(&method.name);
                write_signature(out, &method.signature, q);
            }
            for embed in &iface.embeds {
                if !first {
                    out.push_str("; ");
                }
                first = false;
                write_type(out, embed, q);
            }
            out.push('}');
        }
        Type::Struct(fields) => {
            out.push_str("struct{");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                if let Some(name) = &field.name {
                    out.push_str(name);
                    out.push(' ');
                }
                write_type(out, &field.ty, q);
                if let Some(tag) = &field.tag {
                    out.push(' ');
                    out.push_str(tag);
                }
            }
            out.push('}');
        }
    }
}

fn write_signature(out: &mut String, sig: &Signature, q: &mut Qualifier<'_>) {
    write_params(out, &sig.params, sig.variadic, q);

    match sig.results.as_slice() {
        [] => {}
        [single] if single.name.is_empty() => {
            out.push(' ');
            write_type(out, &single.ty, q);
        }
        results => {
            out.push(' ');
            write_params(out, results, false, q);
        }
    }
}

fn write_params(out: &mut String, params: &[Param], variadic: bool, q: &mut Qualifier<'_>) {
    out.push('(');
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if !param.name.is_empty() {
            out.push_str(&param.name);
            out.push(' ');
        }
        match &param.ty {
            Type::Slice(elem) if variadic && i == params.len() - 1 => {
                out.push_str("...");
                write_type(out, elem, q);
            }
            ty => write_type(out, ty, q),
        }
    }
    out.push(')');
}
