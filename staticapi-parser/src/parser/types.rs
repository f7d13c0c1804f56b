// Type parsing module
// Handles type references and generic parameter lists

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, StaticApiParser};
use pest::iterators::Pair;

impl StaticApiParser {
    /// Parse a type reference (name with optional arguments and nullable marker)
    pub(crate) fn parse_type_annotation(pair: Pair<Rule>) -> ParseResult<TypeAnnotation> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let path_pair = Self::expect_pair(&mut inner, Rule::qualified_name, span)?;
        let path = Self::parse_qualified_name(path_pair)?;

        let mut arguments = Vec::new();
        let mut nullable = false;

        for rest in inner {
            match rest.as_rule() {
                Rule::type_arguments => {
                    arguments = rest
                        .into_inner()
                        .map(Self::parse_type_annotation)
                        .collect::<ParseResult<Vec<_>>>()?;
                }
                Rule::nullable => nullable = true,
                other => {
                    return Err(ParseError::unexpected_rule(
                        "type arguments or '?'",
                        Some(other),
                        Self::span_from_pair(&rest),
                    ))
                }
            }
        }

        Ok(TypeAnnotation {
            path,
            arguments,
            nullable,
            span,
        })
    }

    /// Parse `<T : A + B, U>`
    pub(crate) fn parse_type_parameters(pair: Pair<Rule>) -> ParseResult<Vec<TypeParameter>> {
        pair.into_inner()
            .map(|param_pair| {
                let span = Self::span_from_pair(&param_pair);
                let mut inner = param_pair.into_inner();

                let name_pair = Self::expect_pair(&mut inner, Rule::identifier, span)?;
                let name = Self::parse_identifier(name_pair)?;
                let bounds = inner
                    .map(Self::parse_type_annotation)
                    .collect::<ParseResult<Vec<_>>>()?;

                Ok(TypeParameter { name, bounds, span })
            })
            .collect()
    }
}
