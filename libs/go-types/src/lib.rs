//! Go package loading and type model
//!
//! Resolves the declarations of a Go package well enough to describe
//! interfaces and the types their methods mention:
//!
//! 1. **Lexer**: tokens with automatic semicolon insertion
//! 2. **Parser**: package clause, imports and package-level declarations
//! 3. **Loader**: one package per directory, import path from `go.mod`
//!
//! Consumers query the result through the [`TypeCatalog`] trait.

pub mod error;
pub mod lexer;
pub mod loader;
pub mod package;
pub mod parser;
pub mod token;
pub mod types;

pub use error::{Error, Result, SourceError};
pub use loader::{load_package, load_sources, resolve_import_path};
pub use package::{Object, ObjectKind, Package, TypeCatalog};
pub use types::{ChanDir, Field, InterfaceType, Method, PackageRef, Param, Qualifier, Signature, Type};
