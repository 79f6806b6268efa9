//! Signature extraction
//!
//! Turns a named interface of a loaded package into a [`SignatureModel`],
//! rejecting anything that can't be hooked: the interface must have exactly
//! one method and that method must not return anything.

use hoog_types::{ObjectKind, Type, TypeCatalog};
use tracing::debug;

use crate::error::ExtractError;
use crate::ir::{ParamSignature, SignatureModel};

/// Looks up interfaces in one package catalog
pub struct SignatureExtractor<'a> {
    catalog: &'a dyn TypeCatalog,
}

impl<'a> SignatureExtractor<'a> {
    pub fn new(catalog: &'a dyn TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Extract the single method of the interface called `name`
    pub fn extract(&self, name: &str) -> Result<SignatureModel, ExtractError> {
        if name.is_empty() {
            return Err(ExtractError::EmptyName);
        }

        let object = self
            .catalog
            .lookup(name)
            .ok_or_else(|| ExtractError::NotFound {
                name: name.to_string(),
            })?;

        let declared = match &object.kind {
            ObjectKind::TypeName { ty, .. } => ty,
            ObjectKind::Unsupported { reason } => {
                return Err(ExtractError::Catalog(hoog_types::Error::Unsupported {
                    name: name.to_string(),
                    reason: reason.clone(),
                }))
            }
            ObjectKind::Func => return Err(not_interface(name, "func")),
            ObjectKind::Var => return Err(not_interface(name, "var")),
            ObjectKind::Const => return Err(not_interface(name, "const")),
        };

        let iface = match self.catalog.underlying(declared)? {
            Type::Interface(iface) => iface,
            other => return Err(not_interface(name, &other.canonical_string())),
        };

        let mut methods = self.catalog.method_set(&iface)?;
        let method = match methods.len() {
            0 => {
                return Err(ExtractError::EmptyInterface {
                    name: name.to_string(),
                })
            }
            1 => methods.remove(0),
            count => {
                return Err(ExtractError::TooManyMethods {
                    name: name.to_string(),
                    count,
                })
            }
        };

        if !method.signature.results.is_empty() {
            return Err(ExtractError::HasResults {
                name: name.to_string(),
                method: method.name,
            });
        }

        let last = method.signature.params.len().saturating_sub(1);
        let variadic = method.signature.variadic;
        let params = method
            .signature
            .params
            .into_iter()
            .enumerate()
            .map(|(idx, param)| {
                if variadic && idx == last && matches!(param.ty, Type::Slice(_)) {
                    ParamSignature::variadic(param.name, param.ty)
                } else {
                    ParamSignature::new(param.name, param.ty)
                }
            })
            .collect::<Vec<_>>();

        debug!(
            interface = name,
            method = %method.name,
            params = params.len(),
            variadic,
            "Extracted hook signature"
        );

        Ok(SignatureModel::new(method.name, params))
    }
}

/// Extract the hookable signature of `name` from `catalog`
pub fn extract_signature(
    catalog: &dyn TypeCatalog,
    name: &str,
) -> Result<SignatureModel, ExtractError> {
    SignatureExtractor::new(catalog).extract(name)
}

fn not_interface(name: &str, kind: &str) -> ExtractError {
    ExtractError::NotInterface {
        name: name.to_string(),
        kind: kind.to_string(),
    }
}
