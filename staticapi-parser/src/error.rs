// staticapi Parser Error Handling
// Parse failures reported through miette

use crate::ast::Span;
use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum ParseError {
    #[error("Parse error")]
    #[diagnostic(
        code(staticapi::parse::pest_error),
        help("Check the syntax near the highlighted location")
    )]
    PestError {
        #[source_code]
        src: String,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid string escape sequence")]
    #[diagnostic(
        code(staticapi::parse::invalid_string_escape),
        help("Valid escape sequences: \\n, \\t, \\r, \\\\, \\\"")
    )]
    InvalidStringEscape {
        #[source_code]
        src: String,
        #[label("invalid escape sequence")]
        span: SourceSpan,
        found: String,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(
        code(staticapi::parse::unexpected_rule),
        help("Expected rule: {expected}")
    )]
    UnexpectedRule {
        expected: String,
        found: Option<Rule>,
        span: Span,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                let mut message_parts = Vec::new();

                let expected: Vec<String> = positives
                    .iter()
                    .map(rule_to_user_friendly_description)
                    .collect();
                match expected.as_slice() {
                    [] => message_parts.push("unexpected input".to_string()),
                    [single] => message_parts.push(format!("expected {single}")),
                    many => message_parts.push(format!("expected one of: {}", many.join(", "))),
                }

                let context = get_parsing_context(&src, &error.location);
                if !context.is_empty() {
                    message_parts.push(format!("({context})"));
                }

                let suggestions = get_suggestions_for_rules(positives);
                if !suggestions.is_empty() {
                    message_parts.push(suggestions);
                }

                message_parts.join(" ")
            }
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError::PestError { src, span, message }
    }

    /// Create an invalid string escape error
    pub fn invalid_string_escape(src: String, span: Span, found: String) -> Self {
        ParseError::InvalidStringEscape {
            src,
            span: span.into(),
            found,
        }
    }

    /// Create an unexpected rule error for a malformed parse tree
    pub fn unexpected_rule(expected: impl Into<String>, found: Option<Rule>, span: Span) -> Self {
        ParseError::UnexpectedRule {
            expected: expected.into(),
            found,
            span,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> String {
    match rule {
        Rule::identifier => "an identifier (like greet or IGreeter)".to_string(),
        Rule::qualified_name => "a name (like com.example.IGreeter)".to_string(),
        Rule::string_literal => "a string (like \"Greeter\")".to_string(),
        Rule::doc_comment => "a doc comment (/// text)".to_string(),

        Rule::type_ref => "a type (like String or List<Int>?)".to_string(),
        Rule::type_arguments => "type arguments (like <String>)".to_string(),
        Rule::type_parameters => "type parameters (like <T : Bound>)".to_string(),
        Rule::type_parameter => "a type parameter".to_string(),
        Rule::nullable => "a nullable marker (?)".to_string(),

        Rule::annotation => "an annotation (like @StaticApi)".to_string(),
        Rule::annotation_arguments => "annotation arguments".to_string(),
        Rule::annotation_argument => "an annotation argument (name = \"value\")".to_string(),

        Rule::method => "a method (fun name(param: Type): Type)".to_string(),
        Rule::async_modifier => "an async modifier (suspend or async)".to_string(),
        Rule::parameter_list => "a parameter list".to_string(),
        Rule::parameter => "a parameter (name: Type)".to_string(),
        Rule::return_type => "a return type (: Type)".to_string(),

        Rule::declaration => "a declaration (interface, class or object)".to_string(),
        Rule::declaration_kind => "interface, class or object".to_string(),
        Rule::declaration_body => "a declaration body ({ ... })".to_string(),
        Rule::supertypes => "a supertype list (: IBase, IOther)".to_string(),
        Rule::package_clause => "a package clause (package com.example)".to_string(),

        Rule::kw_package => "the 'package' keyword".to_string(),
        Rule::kw_interface => "the 'interface' keyword".to_string(),
        Rule::kw_class => "the 'class' keyword".to_string(),
        Rule::kw_object => "the 'object' keyword".to_string(),
        Rule::kw_fun => "the 'fun' keyword".to_string(),
        Rule::kw_suspend => "the 'suspend' keyword".to_string(),
        Rule::kw_async => "the 'async' keyword".to_string(),
        Rule::kw_vararg => "the 'vararg' keyword".to_string(),

        Rule::file => "a definition file".to_string(),
        Rule::EOI => "end of input".to_string(),

        _ => format!("{rule:?}").replace('_', " "),
    }
}

/// Describe where in the source an error occurred
fn get_parsing_context(source: &str, location: &pest::error::InputLocation) -> String {
    let position = match location {
        pest::error::InputLocation::Pos(pos) => *pos,
        pest::error::InputLocation::Span((start, _)) => *start,
    };

    let mut current_pos = 0;
    for (line_num, line) in source.lines().enumerate() {
        let line_end = current_pos + line.len();

        if position >= current_pos && position <= line_end {
            let trimmed = line.trim();
            return if trimmed.is_empty() {
                format!("line {}, on empty line", line_num + 1)
            } else {
                format!("line {}, in: {}", line_num + 1, trimmed)
            };
        }

        current_pos = line_end + 1;
    }

    String::new()
}

/// Generate helpful suggestions based on the expected rules
fn get_suggestions_for_rules(rules: &[Rule]) -> String {
    let mut suggestions = Vec::new();

    if rules.contains(&Rule::method) || rules.contains(&Rule::kw_fun) {
        suggestions.push("methods look like: fun name(param: Type): ReturnType");
    }

    if rules.contains(&Rule::declaration_kind) || rules.contains(&Rule::declaration) {
        suggestions.push("declarations start with interface, class or object");
    }

    if rules.contains(&Rule::type_ref) {
        suggestions.push("types are written as Name, Name<Arg> or Name?");
    }

    if rules.contains(&Rule::string_literal) {
        suggestions.push("annotation arguments are strings: @StaticApi(objectName = \"Name\")");
    }

    suggestions.join("; ")
}
