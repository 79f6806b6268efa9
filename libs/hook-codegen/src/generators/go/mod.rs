//! Go hook generator
//!
//! Resolves names, argument lists and imports for a [`SignatureModel`] and
//! renders them into the hook template.

pub mod args;
pub mod imports;
pub mod names;
pub mod template;

use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::generators::{GenerationTarget, Generator};
use crate::ir::SignatureModel;

pub use args::{ArgumentSynthesizer, Arguments};
pub use imports::resolve_imports;
pub use template::HookTemplate;

/// Declarations the template itself adds to the hook's method set
const RESERVED_METHODS: &[&str] = &["Append", "remove", "list", "mu"];

/// Type names the template declares next to the hook
const RESERVED_TYPES: &[&str] = &["hooked", "Cancel"];

/// Output of the Go generator
#[derive(Debug, Clone)]
pub struct GoHookOutput {
    /// The resolved template slots
    pub template: HookTemplate,
    /// Rendered, unformatted source
    pub source: String,
}

/// Go hook generator
pub struct GoHookGenerator {
    interface: String,
    config: GenerationConfig,
}

impl GoHookGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            interface: config.source.object().to_string(),
            config,
        }
    }

    /// Resolve every template slot without rendering
    pub fn plan(&self, signature: &SignatureModel, target: &GenerationTarget) -> Result<HookTemplate> {
        let same_package = target.same_package();
        let hook_name = names::hook_type_name(&self.config.destination);

        if RESERVED_METHODS.contains(&signature.method_name.as_str()) {
            return Err(Error::Reserved {
                name: signature.method_name.clone(),
                role: "hooked method name",
            });
        }
        if RESERVED_TYPES.contains(&hook_name.as_str()) || (same_package && hook_name == self.interface) {
            return Err(Error::Reserved {
                name: hook_name,
                role: "hook type name",
            });
        }

        let mut synthesizer = ArgumentSynthesizer::new(&target.destination.path);
        let args = synthesizer.synthesize(signature);
        let imports = resolve_imports(synthesizer.referenced(), target);

        let mut taken = args.names.clone();
        taken.extend(["item".to_string(), "entry".to_string()]);
        let receiver = names::local_name("h", &taken);

        let mut taken = args.names.clone();
        taken.push(receiver.clone());
        let entry = names::local_name("entry", &taken);

        let template = HookTemplate {
            package_name: names::package_name(
                &target.source.name,
                &target.destination.name,
                same_package,
            ),
            imports,
            hook_name,
            interface_ref: names::interface_type_ref(&self.interface, &target.source, same_package),
            method_name: signature.method_name.clone(),
            declaration_args: args.declaration,
            call_args: args.call,
            thread_safe: self.config.thread_safe,
            receiver,
            entry,
        };

        debug!(
            package = %template.package_name,
            hook = %template.hook_name,
            interface = %template.interface_ref,
            imports = template.imports.len(),
            thread_safe = template.thread_safe,
            "Resolved hook template"
        );

        Ok(template)
    }
}

impl Generator for GoHookGenerator {
    type Output = GoHookOutput;

    fn generate(&self, signature: &SignatureModel, target: &GenerationTarget) -> Result<Self::Output> {
        let template = self.plan(signature, target)?;
        let source = template.render();
        Ok(GoHookOutput { template, source })
    }
}
