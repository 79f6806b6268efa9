//! Argument lists of the generated forwarding method

use std::collections::BTreeSet;

use hoog_types::{PackageRef, Type};
use serde::{Deserialize, Serialize};

use super::names::param_name;
use crate::ir::SignatureModel;

/// Parameter declarations and the matching forwarding arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments {
    /// `name type` pairs, e.g. `s string`, `arg1 ...interface{}`
    pub declaration: Vec<String>,
    /// Forwarded arguments, e.g. `s`, `arg1...`
    pub call: Vec<String>,
    /// Bare parameter names in declaration order
    pub names: Vec<String>,
}

/// Renders parameter types relative to the destination package and records
/// every package a rendered type refers to
pub struct ArgumentSynthesizer<'a> {
    destination: &'a str,
    referenced: BTreeSet<String>,
}

impl<'a> ArgumentSynthesizer<'a> {
    /// `destination` is the import path of the package the hook is written to
    pub fn new(destination: &'a str) -> Self {
        Self {
            destination,
            referenced: BTreeSet::new(),
        }
    }

    pub fn synthesize(&mut self, model: &SignatureModel) -> Arguments {
        let mut args = Arguments::default();

        for (idx, param) in model.params.iter().enumerate() {
            let name = param_name(param, idx);

            match (&param.ty, param.is_variadic_tail) {
                (Type::Slice(elem), true) => {
                    let elem = self.type_string(elem);
                    args.declaration.push(format!("{name} ...{elem}"));
                    args.call.push(format!("{name}..."));
                }
                (ty, _) => {
                    let ty = self.type_string(ty);
                    args.declaration.push(format!("{name} {ty}"));
                    args.call.push(name.clone());
                }
            }

            args.names.push(name);
        }

        args
    }

    /// Import paths of every package seen while rendering, the destination
    /// included
    pub fn referenced(&self) -> &BTreeSet<String> {
        &self.referenced
    }

    fn type_string(&mut self, ty: &Type) -> String {
        let destination = self.destination;
        let referenced = &mut self.referenced;

        ty.type_string(&mut |package: &PackageRef| {
            referenced.insert(package.path.clone());
            if package.path == destination {
                String::new()
            } else {
                package.name.clone()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ParamSignature;

    const INSTANCE: &str = "example.com/m/instance";

    fn instance() -> PackageRef {
        PackageRef::new(INSTANCE, "instance")
    }

    fn empty_interface() -> Type {
        Type::Interface(Default::default())
    }

    #[test]
    fn test_anonymous_parameter() {
        let model = SignatureModel::new("Method", vec![ParamSignature::new("", empty_interface())]);
        let args = ArgumentSynthesizer::new("example.com/m/cbhook").synthesize(&model);
        assert_eq!(args.declaration, vec!["arg0 interface{}"]);
        assert_eq!(args.call, vec!["arg0"]);
    }

    #[test]
    fn test_variadic_parameter() {
        let model = SignatureModel::new(
            "Method",
            vec![ParamSignature::variadic("", Type::slice(empty_interface()))],
        );
        let args = ArgumentSynthesizer::new("example.com/m/cbhook").synthesize(&model);
        assert_eq!(args.declaration, vec!["arg0 ...interface{}"]);
        assert_eq!(args.call, vec!["arg0..."]);
    }

    #[test]
    fn test_discarded_parameter_keeps_position() {
        let model = SignatureModel::new(
            "Method",
            vec![
                ParamSignature::new("s", Type::basic("string")),
                ParamSignature::new("_", empty_interface()),
            ],
        );
        let args = ArgumentSynthesizer::new("example.com/m/cbhook").synthesize(&model);
        assert_eq!(args.declaration, vec!["s string", "arg1 interface{}"]);
        assert_eq!(args.call, vec!["s", "arg1"]);
        assert_eq!(args.names, vec!["s", "arg1"]);
    }

    #[test]
    fn test_non_tail_slice_is_not_rewritten() {
        let model = SignatureModel::new(
            "Method",
            vec![
                ParamSignature::new("xs", Type::slice(Type::basic("int"))),
                ParamSignature::variadic("rest", Type::slice(Type::basic("int"))),
            ],
        );
        let args = ArgumentSynthesizer::new("example.com/m/cbhook").synthesize(&model);
        assert_eq!(args.declaration, vec!["xs []int", "rest ...int"]);
        assert_eq!(args.call, vec!["xs", "rest..."]);
    }

    #[test]
    fn test_foreign_types_are_qualified_and_recorded() {
        let model = SignatureModel::new(
            "Method",
            vec![
                ParamSignature::new("i", Type::basic("int")),
                ParamSignature::new("s", Type::named(instance(), "Struct")),
            ],
        );
        let mut synthesizer = ArgumentSynthesizer::new("example.com/m/cbhook");
        let args = synthesizer.synthesize(&model);
        assert_eq!(args.declaration, vec!["i int", "s instance.Struct"]);
        assert_eq!(args.call, vec!["i", "s"]);
        assert_eq!(
            synthesizer.referenced().iter().collect::<Vec<_>>(),
            vec![INSTANCE]
        );
    }

    #[test]
    fn test_destination_types_are_unqualified_but_recorded() {
        let model = SignatureModel::new(
            "Method",
            vec![ParamSignature::new("s", Type::pointer(Type::named(instance(), "Struct")))],
        );
        let mut synthesizer = ArgumentSynthesizer::new(INSTANCE);
        let args = synthesizer.synthesize(&model);
        assert_eq!(args.declaration, vec!["s *Struct"]);
        assert!(synthesizer.referenced().contains(INSTANCE));
    }

    #[test]
    fn test_no_parameters() {
        let model = SignatureModel::new("Fire", Vec::new());
        let args = ArgumentSynthesizer::new(INSTANCE).synthesize(&model);
        assert!(args.declaration.is_empty());
        assert!(args.call.is_empty());
    }
}
