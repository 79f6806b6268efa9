//! Code generators for hook types
//!
//! A generator turns an extracted [`SignatureModel`] plus the packages
//! involved into source text. Only Go is produced today.

pub mod go;

use hoog_types::PackageRef;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ir::SignatureModel;

/// Trait that all hook generators implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate code for one hookable method
    fn generate(&self, signature: &SignatureModel, target: &GenerationTarget)
        -> Result<Self::Output>;
}

/// The package the interface lives in and the package the hook goes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationTarget {
    /// Import path and declared name of the interface's package
    pub source: PackageRef,
    /// Import path and directory short name of the destination
    pub destination: PackageRef,
}

impl GenerationTarget {
    pub fn new(source: PackageRef, destination: PackageRef) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Whether the hook is generated next to the interface
    pub fn same_package(&self) -> bool {
        self.source.path == self.destination.path
    }
}
