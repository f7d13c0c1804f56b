// staticapi AST Definitions
// Syntax tree for interface definition files with source spans

use std::fmt;

/// Source position information for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub start_line_col: Option<(usize, usize)>,
    pub end_line_col: Option<(usize, usize)>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            start_line_col: None,
            end_line_col: None,
        }
    }

    pub fn with_line_col(
        start: usize,
        end: usize,
        start_line_col: (usize, usize),
        end_line_col: (usize, usize),
    ) -> Self {
        Self {
            start,
            end,
            start_line_col: Some(start_line_col),
            end_line_col: Some(end_line_col),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// A parsed definition file
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionFile {
    pub package: Option<QualifiedName>,
    pub declarations: Vec<Declaration>,
    pub source_file: Option<String>,
    pub span: Span,
}

impl DefinitionFile {
    /// Dotted package name, empty when the file has no package clause
    pub fn package_name(&self) -> String {
        self.package
            .as_ref()
            .map(QualifiedName::to_string)
            .unwrap_or_default()
    }
}

/// Plain identifier with its source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Dotted name such as `com.example.IGreeter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub segments: Vec<Identifier>,
    pub span: Span,
}

impl QualifiedName {
    /// The final segment
    pub fn simple_name(&self) -> &str {
        self.segments
            .last()
            .map(|segment| segment.name.as_str())
            .unwrap_or_default()
    }

    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment.name)?;
        }
        Ok(())
    }
}

/// Consecutive `///` lines attached to the following item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    pub lines: Vec<String>,
    pub span: Span,
}

impl DocComment {
    /// Joined text with the conventional single leading space removed
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKeyword {
    Interface,
    Class,
    Object,
}

impl fmt::Display for DeclarationKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKeyword::Interface => write!(f, "interface"),
            DeclarationKeyword::Class => write!(f, "class"),
            DeclarationKeyword::Object => write!(f, "object"),
        }
    }
}

/// An interface, class or object declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub documentation: Option<DocComment>,
    pub annotations: Vec<Annotation>,
    pub keyword: DeclarationKeyword,
    pub name: Identifier,
    pub type_parameters: Vec<TypeParameter>,
    pub supertypes: Vec<TypeAnnotation>,
    pub methods: Vec<MethodDeclaration>,
    pub span: Span,
}

impl Declaration {
    /// Find an annotation by simple or qualified name
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.matches(name))
    }
}

/// `@Name` or `@Name(arg = "value", ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: QualifiedName,
    pub arguments: Vec<AnnotationArgument>,
    pub span: Span,
}

impl Annotation {
    /// True when this annotation refers to `name`, a possibly qualified
    /// annotation name. A qualified usage must spell out `name` exactly; a
    /// bare usage only has to match its last segment.
    pub fn matches(&self, name: &str) -> bool {
        if self.name.is_qualified() {
            self.name.to_string() == name
        } else {
            let simple = name.rsplit('.').next().unwrap_or(name);
            self.name.simple_name() == simple
        }
    }

    /// Look up an argument by name, falling back to the first positional one
    pub fn argument(&self, name: &str) -> Option<&StringLiteral> {
        self.arguments
            .iter()
            .find(|arg| arg.name.as_ref().is_some_and(|n| n.name == name))
            .or_else(|| self.arguments.iter().find(|arg| arg.name.is_none()))
            .map(|arg| &arg.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationArgument {
    pub name: Option<Identifier>,
    pub value: StringLiteral,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

/// Generic parameter with optional bounds (`T : A + B`)
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: Identifier,
    pub bounds: Vec<TypeAnnotation>,
    pub span: Span,
}

/// Type reference such as `Map<String, List<Int>>?`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub path: QualifiedName,
    pub arguments: Vec<TypeAnnotation>,
    pub nullable: bool,
    pub span: Span,
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if !self.arguments.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Method signature inside a declaration body
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub documentation: Option<DocComment>,
    pub is_async: bool,
    pub type_parameters: Vec<TypeParameter>,
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub type_annotation: TypeAnnotation,
    pub is_variadic: bool,
    pub span: Span,
}
