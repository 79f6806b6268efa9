//! Intermediate Representation (IR)
//!
//! The single method of a hookable interface, reduced to what the Go
//! generator needs: the method name and an ordered parameter list.

use hoog_types::Type;
use serde::{Deserialize, Serialize};

/// The method a hook forwards to every registered listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureModel {
    pub method_name: String,
    /// Parameters in declaration order; only the last may be a variadic tail
    pub params: Vec<ParamSignature>,
}

impl SignatureModel {
    pub fn new(method_name: impl Into<String>, params: Vec<ParamSignature>) -> Self {
        Self {
            method_name: method_name.into(),
            params,
        }
    }

    /// The trailing `...T` parameter, if the method has one
    pub fn variadic_tail(&self) -> Option<&ParamSignature> {
        self.params.last().filter(|param| param.is_variadic_tail)
    }
}

/// One parameter as declared in the interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSignature {
    /// Declared name; empty or `_` when the parameter is unnamed
    pub name: String,
    /// Parameter type; a variadic tail is stored as its slice type
    pub ty: Type,
    pub is_variadic_tail: bool,
}

impl ParamSignature {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_variadic_tail: false,
        }
    }

    pub fn variadic(name: impl Into<String>, ty: Type) -> Self {
        Self {
            is_variadic_tail: true,
            ..Self::new(name, ty)
        }
    }

    /// Fully qualified textual type, e.g. `[]example.com/m/instance.Struct`
    pub fn type_name(&self) -> String {
        self.ty.canonical_string()
    }

    /// Whether the declared name can't be referenced in a call
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty() || self.name == "_"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variadic_tail() {
        let model = SignatureModel::new(
            "Method",
            vec![
                ParamSignature::new("s", Type::basic("string")),
                ParamSignature::variadic("rest", Type::slice(Type::basic("int"))),
            ],
        );
        assert_eq!(model.variadic_tail().map(|p| p.name.as_str()), Some("rest"));
        assert_eq!(model.params[1].type_name(), "[]int");
    }

    #[test]
    fn test_no_variadic_tail() {
        let model = SignatureModel::new("Method", vec![ParamSignature::new("_", Type::basic("int"))]);
        assert!(model.variadic_tail().is_none());
        assert!(model.params[0].is_unnamed());
    }
}
