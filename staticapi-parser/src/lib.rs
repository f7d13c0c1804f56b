// staticapi Parser Library
// Pest-based parser for staticapi interface definition files

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::StaticApiParser;

// Re-export parser rule for manual testing
pub use parser::Rule;

/// Parse a definition file
pub fn parse_file(input: &str) -> Result<DefinitionFile, ParseError> {
    parser::StaticApiParser::parse_file(input)
}

/// Parse a definition file, recording its path for diagnostics
pub fn parse_file_with_source(
    input: &str,
    source_file: Option<String>,
) -> Result<DefinitionFile, ParseError> {
    parser::StaticApiParser::parse_file_with_source(input, source_file)
}

/// Parse a single type reference
pub fn parse_type(input: &str) -> Result<TypeAnnotation, ParseError> {
    parser::StaticApiParser::parse_type(input)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests;
