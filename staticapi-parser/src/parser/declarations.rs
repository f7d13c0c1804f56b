// Declaration parsing module
// Handles interface/class/object declarations, annotations and method signatures

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, StaticApiParser};
use pest::iterators::Pair;

impl StaticApiParser {
    /// Parse an interface, class or object declaration
    pub(crate) fn parse_declaration(pair: Pair<Rule>, src: &str) -> ParseResult<Declaration> {
        let span = Self::span_from_pair(&pair);

        let mut doc_pairs = Vec::new();
        let mut annotations = Vec::new();
        let mut keyword = None;
        let mut name = None;
        let mut type_parameters = Vec::new();
        let mut supertypes = Vec::new();
        let mut methods = Vec::new();

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::doc_comment => doc_pairs.push(inner),
                Rule::annotation => annotations.push(Self::parse_annotation(inner, src)?),
                Rule::declaration_kind => keyword = Some(Self::parse_declaration_kind(inner)?),
                Rule::identifier => name = Some(Self::parse_identifier(inner)?),
                Rule::type_parameters => type_parameters = Self::parse_type_parameters(inner)?,
                Rule::supertypes => {
                    supertypes = inner
                        .into_inner()
                        .map(Self::parse_type_annotation)
                        .collect::<ParseResult<Vec<_>>>()?;
                }
                Rule::declaration_body => {
                    for method_pair in inner.into_inner() {
                        methods.push(Self::parse_method(method_pair)?);
                    }
                }
                other => {
                    return Err(ParseError::unexpected_rule(
                        "declaration part",
                        Some(other),
                        Self::span_from_pair(&inner),
                    ))
                }
            }
        }

        let keyword = keyword
            .ok_or_else(|| ParseError::unexpected_rule("declaration_kind", None, span))?;
        let name = name.ok_or_else(|| ParseError::unexpected_rule("identifier", None, span))?;

        Ok(Declaration {
            documentation: Self::parse_doc_comments(doc_pairs),
            annotations,
            keyword,
            name,
            type_parameters,
            supertypes,
            methods,
            span,
        })
    }

    fn parse_declaration_kind(pair: Pair<Rule>) -> ParseResult<DeclarationKeyword> {
        let span = Self::span_from_pair(&pair);
        let keyword = pair
            .into_inner()
            .next()
            .ok_or_else(|| ParseError::unexpected_rule("declaration keyword", None, span))?;

        match keyword.as_rule() {
            Rule::kw_interface => Ok(DeclarationKeyword::Interface),
            Rule::kw_class => Ok(DeclarationKeyword::Class),
            Rule::kw_object => Ok(DeclarationKeyword::Object),
            other => Err(ParseError::unexpected_rule(
                "interface, class or object",
                Some(other),
                span,
            )),
        }
    }

    /// Parse `@Name` with optional string arguments
    pub(crate) fn parse_annotation(pair: Pair<Rule>, src: &str) -> ParseResult<Annotation> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let name_pair = Self::expect_pair(&mut inner, Rule::qualified_name, span)?;
        let name = Self::parse_qualified_name(name_pair)?;

        let mut arguments = Vec::new();
        if let Some(args_pair) = inner.next() {
            for arg_pair in args_pair.into_inner() {
                let arg_span = Self::span_from_pair(&arg_pair);
                let mut arg_name = None;
                let mut value = None;

                for part in arg_pair.into_inner() {
                    match part.as_rule() {
                        Rule::identifier => arg_name = Some(Self::parse_identifier(part)?),
                        Rule::string_literal => {
                            value = Some(Self::parse_string_literal(part, src)?)
                        }
                        other => {
                            return Err(ParseError::unexpected_rule(
                                "annotation argument",
                                Some(other),
                                arg_span,
                            ))
                        }
                    }
                }

                let value = value
                    .ok_or_else(|| ParseError::unexpected_rule("string_literal", None, arg_span))?;
                arguments.push(AnnotationArgument {
                    name: arg_name,
                    value,
                    span: arg_span,
                });
            }
        }

        Ok(Annotation {
            name,
            arguments,
            span,
        })
    }

    /// Parse a method signature
    pub(crate) fn parse_method(pair: Pair<Rule>) -> ParseResult<MethodDeclaration> {
        let span = Self::span_from_pair(&pair);

        let mut doc_pairs = Vec::new();
        let mut is_async = false;
        let mut type_parameters = Vec::new();
        let mut name = None;
        let mut parameters = Vec::new();
        let mut return_type = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::doc_comment => doc_pairs.push(inner),
                Rule::async_modifier => is_async = true,
                Rule::kw_fun => {}
                Rule::type_parameters => type_parameters = Self::parse_type_parameters(inner)?,
                Rule::identifier => name = Some(Self::parse_identifier(inner)?),
                Rule::parameter_list => {
                    parameters = inner
                        .into_inner()
                        .map(Self::parse_parameter)
                        .collect::<ParseResult<Vec<_>>>()?;
                }
                Rule::return_type => {
                    let return_span = Self::span_from_pair(&inner);
                    let mut type_pairs = inner.into_inner();
                    let type_pair = Self::expect_pair(&mut type_pairs, Rule::type_ref, return_span)?;
                    return_type = Some(Self::parse_type_annotation(type_pair)?);
                }
                other => {
                    return Err(ParseError::unexpected_rule(
                        "method part",
                        Some(other),
                        Self::span_from_pair(&inner),
                    ))
                }
            }
        }

        let name = name.ok_or_else(|| ParseError::unexpected_rule("identifier", None, span))?;

        Ok(MethodDeclaration {
            documentation: Self::parse_doc_comments(doc_pairs),
            is_async,
            type_parameters,
            name,
            parameters,
            return_type,
            span,
        })
    }

    /// Parse `vararg name: Type`
    fn parse_parameter(pair: Pair<Rule>) -> ParseResult<Parameter> {
        let span = Self::span_from_pair(&pair);
        let mut is_variadic = false;
        let mut name = None;
        let mut type_annotation = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::kw_vararg => is_variadic = true,
                Rule::identifier => name = Some(Self::parse_identifier(inner)?),
                Rule::type_ref => type_annotation = Some(Self::parse_type_annotation(inner)?),
                other => {
                    return Err(ParseError::unexpected_rule(
                        "parameter part",
                        Some(other),
                        Self::span_from_pair(&inner),
                    ))
                }
            }
        }

        Ok(Parameter {
            name: name.ok_or_else(|| ParseError::unexpected_rule("identifier", None, span))?,
            type_annotation: type_annotation
                .ok_or_else(|| ParseError::unexpected_rule("type_ref", None, span))?,
            is_variadic,
            span,
        })
    }
}
