//! Declaration model
//!
//! Read-only snapshot of the interfaces handed over by discovery. Supertype
//! links are ids into a [`DeclarationGraph`] rather than owned children, so
//! diamonds share one node and cycles can be represented (and survived).

use indexmap::IndexMap;
use staticapi_parser::Span;
use std::fmt;

/// What kind of declaration a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Interface,
    Class,
    Object,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Interface => write!(f, "interface"),
            DeclarationKind::Class => write!(f, "class"),
            DeclarationKind::Object => write!(f, "object"),
        }
    }
}

impl From<staticapi_parser::DeclarationKeyword> for DeclarationKind {
    fn from(keyword: staticapi_parser::DeclarationKeyword) -> Self {
        match keyword {
            staticapi_parser::DeclarationKeyword::Interface => DeclarationKind::Interface,
            staticapi_parser::DeclarationKeyword::Class => DeclarationKind::Class,
            staticapi_parser::DeclarationKeyword::Object => DeclarationKind::Object,
        }
    }
}

/// Type parameter name -> concrete type, applied when inheriting through
/// `IRepo<String>`-style supertype references
pub type Substitution = IndexMap<String, TypeRef>;

/// A reference to a type as written in a signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub path: Vec<String>,
    pub args: Vec<TypeRef>,
    pub nullable: bool,
}

impl TypeRef {
    /// Type from a dotted name (`String`, `com.example.User`)
    pub fn named(name: &str) -> Self {
        Self {
            path: name.split('.').map(str::to_string).collect(),
            args: Vec::new(),
            nullable: false,
        }
    }

    pub fn generic(name: &str, args: Vec<TypeRef>) -> Self {
        Self {
            args,
            ..Self::named(name)
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn simple_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    pub fn qualified_name(&self) -> String {
        self.path.join(".")
    }

    /// `Unit` (or `kotlin.Unit`) means "no value"
    pub fn is_unit(&self) -> bool {
        !self.nullable
            && self.args.is_empty()
            && matches!(self.qualified_name().as_str(), "Unit" | "kotlin.Unit")
    }

    /// Replace type parameter references according to `substitution`.
    /// Nullability of the reference site is kept (`T?` with `T = String`
    /// becomes `String?`).
    pub fn substitute(&self, substitution: &Substitution) -> TypeRef {
        if self.path.len() == 1 && self.args.is_empty() {
            if let Some(replacement) = substitution.get(&self.path[0]) {
                let mut replaced = replacement.clone();
                replaced.nullable |= self.nullable;
                return replaced;
            }
        }

        TypeRef {
            path: self.path.clone(),
            args: self.args.iter().map(|arg| arg.substitute(substitution)).collect(),
            nullable: self.nullable,
        }
    }
}

impl From<&staticapi_parser::TypeAnnotation> for TypeRef {
    fn from(annotation: &staticapi_parser::TypeAnnotation) -> Self {
        TypeRef {
            path: annotation
                .path
                .segments
                .iter()
                .map(|segment| segment.name.clone())
                .collect(),
            args: annotation.arguments.iter().map(TypeRef::from).collect(),
            nullable: annotation.nullable,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
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

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameter {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bounds: Vec::new(),
        }
    }

    pub fn bounded(name: &str, bounds: Vec<TypeRef>) -> Self {
        Self {
            name: name.to_string(),
            bounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
    pub is_variadic: bool,
}

impl Parameter {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_variadic: false,
        }
    }

    pub fn variadic(name: &str, ty: TypeRef) -> Self {
        Self {
            is_variadic: true,
            ..Self::new(name, ty)
        }
    }
}

/// Deduplication key: name plus parameter types, nothing else
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    pub name: String,
    pub parameter_types: Vec<TypeRef>,
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<String> = self.parameter_types.iter().map(|t| t.to_string()).collect();
        write!(f, "{}({})", self.name, types.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub type_parameters: Vec<TypeParameter>,
    /// `None` means the method produces no value
    pub return_type: Option<TypeRef>,
    pub is_async: bool,
    pub documentation: Option<String>,
}

impl MethodSignature {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            return_type: None,
            is_async: false,
            documentation: None,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn documented(mut self, documentation: &str) -> Self {
        self.documentation = Some(documentation.to_string());
        self
    }

    pub fn identity_key(&self) -> MethodKey {
        MethodKey {
            name: self.name.clone(),
            parameter_types: self.parameters.iter().map(|p| p.ty.clone()).collect(),
        }
    }

    /// Apply an inherited substitution. The method's own type parameters
    /// shadow interface-level ones of the same name.
    pub fn substitute(&self, substitution: &Substitution) -> MethodSignature {
        if substitution.is_empty() {
            return self.clone();
        }

        let mut visible = substitution.clone();
        for own in &self.type_parameters {
            visible.shift_remove(&own.name);
        }

        MethodSignature {
            name: self.name.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|p| Parameter {
                    name: p.name.clone(),
                    ty: p.ty.substitute(&visible),
                    is_variadic: p.is_variadic,
                })
                .collect(),
            type_parameters: self
                .type_parameters
                .iter()
                .map(|tp| TypeParameter {
                    name: tp.name.clone(),
                    bounds: tp.bounds.iter().map(|b| b.substitute(&visible)).collect(),
                })
                .collect(),
            return_type: self.return_type.as_ref().map(|t| t.substitute(&visible)),
            is_async: self.is_async,
            documentation: self.documentation.clone(),
        }
    }
}

/// Index of a declaration inside its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub usize);

/// Supertype edge, with the type arguments written at the reference site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupertypeRef {
    pub target: DeclId,
    pub args: Vec<TypeRef>,
}

/// Where a declaration was written, for diagnostics only
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Origin {
    pub source_file: Option<String>,
    pub span: Span,
}

impl Origin {
    pub fn new(source_file: Option<String>, span: Span) -> Self {
        Self { source_file, span }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDeclaration {
    pub kind: DeclarationKind,
    pub simple_name: String,
    pub qualified_name: String,
    pub package: String,
    pub documentation: Option<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub super_interfaces: Vec<SupertypeRef>,
    pub own_methods: Vec<MethodSignature>,
    pub origin: Origin,
}

impl InterfaceDeclaration {
    pub fn new(kind: DeclarationKind, package: &str, simple_name: &str) -> Self {
        let qualified_name = if package.is_empty() {
            simple_name.to_string()
        } else {
            format!("{package}.{simple_name}")
        };

        Self {
            kind,
            simple_name: simple_name.to_string(),
            qualified_name,
            package: package.to_string(),
            documentation: None,
            type_parameters: Vec::new(),
            super_interfaces: Vec::new(),
            own_methods: Vec::new(),
            origin: Origin::default(),
        }
    }

    pub fn interface(package: &str, simple_name: &str) -> Self {
        Self::new(DeclarationKind::Interface, package, simple_name)
    }

    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.own_methods.push(method);
        self
    }

    pub fn with_supertype(mut self, target: DeclId, args: Vec<TypeRef>) -> Self {
        self.super_interfaces.push(SupertypeRef { target, args });
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DeclarationKind::Interface
    }

    /// The type a facade's delegate field holds. Uses the simple name since
    /// the facade is generated into the interface's own package.
    pub fn as_type(&self) -> TypeRef {
        TypeRef {
            path: vec![self.simple_name.clone()],
            args: self
                .type_parameters
                .iter()
                .map(|tp| TypeRef::named(&tp.name))
                .collect(),
            nullable: false,
        }
    }

    /// Bind this declaration's type parameters to the arguments of a
    /// supertype reference, resolved in the referencing scope
    pub fn bind(&self, args: &[TypeRef], outer: &Substitution) -> Substitution {
        self.type_parameters
            .iter()
            .zip(args)
            .map(|(param, arg)| (param.name.clone(), arg.substitute(outer)))
            .collect()
    }
}

/// Arena of declarations keyed by qualified name, in registration order
#[derive(Debug, Clone, Default)]
pub struct DeclarationGraph {
    declarations: IndexMap<String, InterfaceDeclaration>,
}

impl DeclarationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration. A clashing qualified name is refused and the
    /// id of the declaration already holding it is returned.
    pub fn insert(&mut self, declaration: InterfaceDeclaration) -> Result<DeclId, DeclId> {
        if let Some(existing) = self.declarations.get_index_of(&declaration.qualified_name) {
            return Err(DeclId(existing));
        }
        let (index, _) = self
            .declarations
            .insert_full(declaration.qualified_name.clone(), declaration);
        Ok(DeclId(index))
    }

    /// Look up by id. Ids only come from this graph, so a miss is a bug in
    /// the caller and yields `None`.
    pub fn get(&self, id: DeclId) -> Option<&InterfaceDeclaration> {
        self.declarations.get_index(id.0).map(|(_, decl)| decl)
    }

    pub(crate) fn get_mut(&mut self, id: DeclId) -> Option<&mut InterfaceDeclaration> {
        self.declarations.get_index_mut(id.0).map(|(_, decl)| decl)
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<DeclId> {
        self.declarations.get_index_of(qualified_name).map(DeclId)
    }

    /// All declarations whose simple name matches
    pub fn lookup_simple(&self, simple_name: &str) -> Vec<DeclId> {
        self.declarations
            .values()
            .enumerate()
            .filter(|(_, decl)| decl.simple_name == simple_name)
            .map(|(index, _)| DeclId(index))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &InterfaceDeclaration)> {
        self.declarations
            .values()
            .enumerate()
            .map(|(index, decl)| (DeclId(index), decl))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
