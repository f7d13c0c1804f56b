//! Runtime errors for generated facades

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DelegateError {
    #[error("{facade}.delegate has not been initialized")]
    #[diagnostic(
        code(staticapi::runtime::uninitialized),
        help("Call {facade}::initialize before using the facade")
    )]
    Uninitialized { facade: &'static str },
}
