//! staticapi runtime
//!
//! Generated Rust facades keep their implementation in a `static`
//! [`DelegateCell`]. The cell starts empty; `initialize` on the facade
//! installs the delegate and every forwarding function reads it back.

pub mod cell;
pub mod error;

pub use cell::DelegateCell;
pub use error::DelegateError;

#[cfg(test)]
mod tests;
