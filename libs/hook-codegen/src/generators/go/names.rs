//! Naming rules for generated hooks

use hoog_types::PackageRef;

use crate::ir::ParamSignature;
use crate::location::Location;

/// Hook type name used when the destination names none
pub const DEFAULT_HOOK_NAME: &str = "Hook";

/// Name of the generated hook type: the destination's object, or `Hook`
pub fn hook_type_name(destination: &Location) -> String {
    match destination.object() {
        "" => DEFAULT_HOOK_NAME.to_string(),
        name => name.to_string(),
    }
}

/// How the hooked interface is written inside the generated file
pub fn interface_type_ref(interface: &str, source: &PackageRef, same_package: bool) -> String {
    if same_package {
        interface.to_string()
    } else {
        format!("{}.{}", source.name, interface)
    }
}

/// Package clause of the generated file.
///
/// A hook generated next to its interface joins the interface's package.
/// Otherwise the destination's short name is used: differing names resolve
/// to it, a `main` source never leaks into another package, and `main` is
/// kept only when the destination is `main` as well.
pub fn package_name(source: &str, destination: &str, same_package: bool) -> String {
    if same_package {
        source.to_string()
    } else {
        destination.to_string()
    }
}

/// Parameter name used in the generated method: declared names are kept,
/// empty and `_` become `arg<index>`
pub fn param_name(param: &ParamSignature, index: usize) -> String {
    if param.is_unnamed() {
        format!("arg{index}")
    } else {
        param.name.clone()
    }
}

/// Pick `preferred`, or the first `preferred<N>` no parameter already uses
pub fn local_name(preferred: &str, taken: &[String]) -> String {
    if !taken.iter().any(|name| name == preferred) {
        return preferred.to_string();
    }
    (1..)
        .map(|n| format!("{preferred}{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| preferred.to_string())
}
