//! Multicast hook generator
//!
//! Generates, for a Go interface with exactly one result-less method, a
//! "hook" type that holds any number of implementations and forwards every
//! call to all of them in registration order.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Extractor**: validates the interface in a loaded package and pulls out its method
//! 2. **IR (Intermediate Representation)**: the method name and its typed parameters
//! 3. **Generators**: resolve names, argument lists and imports, then render the template
//!
//! Loading, formatting and writing are done by collaborators: [`hoog_types`]
//! parses the source package, [`hoog_format`] runs the Go pretty-printer and
//! [`utils::write_artifact`] puts the result on disk.

pub mod config;
pub mod error;
pub mod extractor;
pub mod generators;
pub mod ir;
pub mod location;
pub mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use hoog_format::formatter_for;
use hoog_types::types::guess_package_name;
use hoog_types::{load_package, resolve_import_path, PackageRef, TypeCatalog};
use tracing::{debug, info};

pub use config::{GenerationConfig, DEFAULT_FILE_NAME};
pub use error::{ConfigError, Error, ExtractError};
pub use extractor::{extract_signature, SignatureExtractor};
pub use generators::go::{GoHookGenerator, GoHookOutput, HookTemplate};
pub use generators::{GenerationTarget, Generator};
pub use ir::{ParamSignature, SignatureModel};
pub use location::Location;

/// Main entry point for code generation
pub struct HookGenerator {
    signature: SignatureModel,
    target: GenerationTarget,
}

impl HookGenerator {
    /// Extract `interface` from a package catalog, to be generated into
    /// `destination`
    pub fn from_catalog(
        catalog: &dyn TypeCatalog,
        interface: &str,
        destination: PackageRef,
    ) -> error::Result<Self> {
        let signature = extract_signature(catalog, interface)?;
        let target = GenerationTarget::new(catalog.package().clone(), destination);
        Ok(Self { signature, target })
    }

    /// Get the extracted method
    pub fn signature(&self) -> &SignatureModel {
        &self.signature
    }

    pub fn target(&self) -> &GenerationTarget {
        &self.target
    }

    /// Generate code with a specific generator
    pub fn generate<G: Generator>(&self, generator: G) -> error::Result<G::Output> {
        generator.generate(&self.signature, &self.target)
    }
}

/// Validate `config`, load the source package and extract the interface.
///
/// The destination's short name is guessed from its resolved import path
/// with `guess_package_name`, which drops a `go-` prefix and a `vN` suffix.
fn prepare(config: &GenerationConfig) -> Result<HookGenerator> {
    config.validate().map_err(Error::from)?;

    let source_dir = config.source.dir();
    let package = load_package(&source_dir)
        .with_context(|| format!("loading source package {}", source_dir.display()))?;

    let destination_dir = config.destination.dir();
    let destination_path = resolve_import_path(&destination_dir).with_context(|| {
        format!("resolving import path of {}", destination_dir.display())
    })?;
    let destination = PackageRef::new(
        destination_path.clone(),
        guess_package_name(&destination_path),
    );

    debug!(
        source = %package.package().path,
        destination = %destination.path,
        interface = config.source.object(),
        "Loaded source package"
    );

    let generator = HookGenerator::from_catalog(&package, config.source.object(), destination)?;
    Ok(generator)
}

/// Resolve every template slot for `config` without rendering or writing
pub fn plan_hook(config: &GenerationConfig) -> Result<HookTemplate> {
    let codegen = prepare(config)?;
    let template = GoHookGenerator::new(config.clone())
        .plan(codegen.signature(), codegen.target())
        .context("resolving hook template")?;
    Ok(template)
}

/// Render and format the hook for `config`, returning the file contents
pub fn render_hook(config: &GenerationConfig) -> Result<Vec<u8>> {
    let codegen = prepare(config)?;
    let output = codegen
        .generate(GoHookGenerator::new(config.clone()))
        .context("running Go hook generator")?;

    let formatted = formatter_for(config.formatter)
        .format(output.source.as_bytes())
        .map_err(Error::from)?;

    Ok(formatted)
}

/// Run the whole pipeline and write the hook into the destination directory.
///
/// Returns the path of the generated file.
pub fn generate_hook(config: &GenerationConfig) -> Result<PathBuf> {
    let contents = render_hook(config)?;
    let path = utils::write_artifact(&config.destination.dir(), &config.file_name, &contents)?;

    info!(
        path = %path.display(),
        bytes = contents.len(),
        "Generated hook"
    );

    Ok(path)
}
