// staticapi Parser
// Builds the definition-file AST from the pest parse tree

use crate::ast::*;
use crate::error::*;
use pest::iterators::{Pair, Pairs};
use pest::Parser;

mod declarations;
mod types;

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
pub struct StaticApiParser;

impl StaticApiParser {
    /// Parse a complete definition file
    pub fn parse_file(input: &str) -> ParseResult<DefinitionFile> {
        Self::parse_file_with_source(input, None)
    }

    /// Parse a complete definition file, remembering where it came from
    pub fn parse_file_with_source(
        input: &str,
        source_file: Option<String>,
    ) -> ParseResult<DefinitionFile> {
        let mut pairs = <Self as Parser<Rule>>::parse(Rule::file, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;
        let file_pair = Self::expect_pair(&mut pairs, Rule::file, Span::new(0, input.len()))?;
        let span = Self::span_from_pair(&file_pair);

        let mut package = None;
        let mut declarations = Vec::new();

        for pair in file_pair.into_inner() {
            match pair.as_rule() {
                Rule::package_clause => {
                    let clause_span = Self::span_from_pair(&pair);
                    let mut inner = pair.into_inner();
                    Self::expect_pair(&mut inner, Rule::kw_package, clause_span)?;
                    let name = Self::expect_pair(&mut inner, Rule::qualified_name, clause_span)?;
                    package = Some(Self::parse_qualified_name(name)?);
                }
                Rule::declaration => {
                    declarations.push(Self::parse_declaration(pair, input)?);
                }
                Rule::EOI => {}
                other => {
                    return Err(ParseError::unexpected_rule(
                        "package clause or declaration",
                        Some(other),
                        Self::span_from_pair(&pair),
                    ))
                }
            }
        }

        Ok(DefinitionFile {
            package,
            declarations,
            source_file,
            span,
        })
    }

    /// Parse a standalone type reference (`List<String>?`)
    pub fn parse_type(input: &str) -> ParseResult<TypeAnnotation> {
        let whole = Span::new(0, input.len());
        let mut pairs = <Self as Parser<Rule>>::parse(Rule::standalone_type, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;
        let mut inner = Self::expect_pair(&mut pairs, Rule::standalone_type, whole)?.into_inner();
        let pair = Self::expect_pair(&mut inner, Rule::type_ref, whole)?;
        Self::parse_type_annotation(pair)
    }

    /// Extract span information from a pest pair
    pub(crate) fn span_from_pair(pair: &Pair<Rule>) -> Span {
        let span = pair.as_span();
        Span::with_line_col(
            span.start(),
            span.end(),
            span.start_pos().line_col(),
            span.end_pos().line_col(),
        )
    }

    /// Take the next pair, which the grammar guarantees to be `rule`
    pub(crate) fn expect_pair<'i>(
        pairs: &mut Pairs<'i, Rule>,
        rule: Rule,
        parent: Span,
    ) -> ParseResult<Pair<'i, Rule>> {
        match pairs.next() {
            Some(pair) if pair.as_rule() == rule => Ok(pair),
            Some(pair) => Err(ParseError::unexpected_rule(
                format!("{rule:?}"),
                Some(pair.as_rule()),
                Self::span_from_pair(&pair),
            )),
            None => Err(ParseError::unexpected_rule(format!("{rule:?}"), None, parent)),
        }
    }

    /// Parse an identifier
    pub(crate) fn parse_identifier(pair: Pair<Rule>) -> ParseResult<Identifier> {
        if pair.as_rule() != Rule::identifier {
            return Err(ParseError::unexpected_rule(
                "identifier",
                Some(pair.as_rule()),
                Self::span_from_pair(&pair),
            ));
        }
        Ok(Identifier {
            name: pair.as_str().to_string(),
            span: Self::span_from_pair(&pair),
        })
    }

    /// Parse a dotted name
    pub(crate) fn parse_qualified_name(pair: Pair<Rule>) -> ParseResult<QualifiedName> {
        let span = Self::span_from_pair(&pair);
        let segments = pair
            .into_inner()
            .map(Self::parse_identifier)
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(QualifiedName { segments, span })
    }

    /// Collapse consecutive `///` pairs into one doc comment
    pub(crate) fn parse_doc_comments(pairs: Vec<Pair<Rule>>) -> Option<DocComment> {
        let first = pairs.first().map(Self::span_from_pair)?;
        let last = pairs.last().map(Self::span_from_pair).unwrap_or(first);

        let lines = pairs
            .into_iter()
            .map(|pair| {
                pair.into_inner()
                    .next()
                    .map(|text| text.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect();

        Some(DocComment {
            lines,
            span: Span {
                start: first.start,
                end: last.end,
                start_line_col: first.start_line_col,
                end_line_col: last.end_line_col,
            },
        })
    }

    /// Unescape the body of a string literal
    pub(crate) fn parse_string_literal(pair: Pair<Rule>, src: &str) -> ParseResult<StringLiteral> {
        let span = Self::span_from_pair(&pair);
        let raw = pair
            .into_inner()
            .next()
            .map(|content| content.as_str())
            .unwrap_or_default();

        let mut value = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                value.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('\\') => value.push('\\'),
                Some('"') => value.push('"'),
                Some(other) => {
                    return Err(ParseError::invalid_string_escape(
                        src.to_string(),
                        span,
                        format!("\\{other}"),
                    ))
                }
                None => {
                    return Err(ParseError::invalid_string_escape(
                        src.to_string(),
                        span,
                        "\\".to_string(),
                    ))
                }
            }
        }

        Ok(StringLiteral { value, span })
    }
}
