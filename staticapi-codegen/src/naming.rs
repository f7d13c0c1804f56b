//! Facade name resolution

use crate::error::NamingError;

/// Prefix stripped from conventionally named interfaces
pub const INTERFACE_PREFIX: char = 'I';

/// Compute the facade name for an interface.
///
/// A non-blank `override_name` wins verbatim. Otherwise `IFoo` becomes `Foo`.
/// A blank or whitespace-only override counts as no override.
pub fn resolve(interface_name: &str, override_name: &str) -> Result<String, NamingError> {
    if !override_name.trim().is_empty() {
        return Ok(override_name.to_string());
    }

    match interface_name.strip_prefix(INTERFACE_PREFIX) {
        Some(rest) if !rest.is_empty() => Ok(rest.to_string()),
        _ => Err(NamingError::MissingConvention {
            interface: interface_name.to_string(),
        }),
    }
}
