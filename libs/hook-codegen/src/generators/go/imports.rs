//! Import set of the generated file

use std::collections::BTreeSet;

use tracing::warn;

use crate::generators::GenerationTarget;

/// Sorted, de-duplicated import paths the generated file needs.
///
/// `referenced` is what the argument synthesizer saw; the destination is
/// never imported into itself and the interface's package is imported
/// whenever the hook lives elsewhere.
pub fn resolve_imports(referenced: &BTreeSet<String>, target: &GenerationTarget) -> Vec<String> {
    let mut imports: BTreeSet<String> = referenced
        .iter()
        .filter(|path| **path != target.destination.path)
        .cloned()
        .collect();

    if !target.same_package() {
        if target.source.name == "main" {
            warn!(
                package = %target.source.path,
                "Hooking an interface of a main package; the generated code can't import it"
            );
        }
        imports.insert(target.source.path.clone());
    }

    imports.into_iter().collect()
}
