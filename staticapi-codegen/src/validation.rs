//! Checks run on an annotated declaration before anything is generated

use crate::error::ValidationError;
use crate::model::InterfaceDeclaration;

/// Reject declarations that cannot back a facade. Runs before naming, so a
/// non-interface never gets a name computed.
pub fn validate(decl: &InterfaceDeclaration) -> Result<(), ValidationError> {
    if !decl.is_interface() {
        return Err(ValidationError::NotAnInterface {
            name: decl.simple_name.clone(),
            kind: decl.kind,
        });
    }

    if !decl.type_parameters.is_empty() {
        let parameters: Vec<&str> = decl
            .type_parameters
            .iter()
            .map(|tp| tp.name.as_str())
            .collect();
        return Err(ValidationError::GenericInterface {
            name: decl.simple_name.clone(),
            parameters: parameters.join(", "),
        });
    }

    Ok(())
}
