//! Owned concrete syntax tree for the client-document subset.
//!
//! Nodes are plain tagged variants with `Option`-typed absence. Names carry
//! their source [`Location`] and definitions carry a byte [`Span`] so later
//! stages can report positions and slice verbatim source text.

use std::fmt;

/// A point in a document: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

/// A half-open byte range in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A name token with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub text: String,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDefinition {
    pub operation_type: Name,
    pub name: Option<Name>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: Span,
}

/// A fragment definition. The leading keyword is kept as written; the walker
/// checks it is literally `fragment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentDefinition {
    pub keyword: Name,
    pub name: Name,
    pub type_condition: Name,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<Value>,
}

/// A type reference as written in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Named { name: String },
    List { ty: Box<Type> },
    NonNull { ty: Box<Type> },
}

impl Type {
    /// The innermost named type, with list and non-null wrappers stripped.
    pub fn name(&self) -> &str {
        match self {
            Type::Named { name } => name,
            Type::List { ty } | Type::NonNull { ty } => ty.name(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named { name } => write!(f, "{name}"),
            Type::List { ty } => write!(f, "[{ty}]"),
            Type::NonNull { ty } => write!(f, "{ty}!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    pub loc: Location,
}

impl SelectionSet {
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.selections.iter().filter_map(|selection| match selection {
            Selection::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn fragment_spreads(&self) -> impl Iterator<Item = &FragmentSpread> {
        self.selections.iter().filter_map(|selection| match selection {
            Selection::FragmentSpread(spread) => Some(spread),
            _ => None,
        })
    }

    pub fn inline_fragments(&self) -> impl Iterator<Item = &InlineFragment> {
        self.selections.iter().filter_map(|selection| match selection {
            Selection::InlineFragment(inline) => Some(inline),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
}

impl Field {
    /// The key this field appears under in the response: the alias when one
    /// is written, the field name otherwise.
    pub fn response_name(&self) -> &str {
        match &self.alias {
            Some(alias) => &alias.text,
            None => &self.name.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpread {
    pub name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFragment {
    pub type_condition: Name,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: Name,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: Name,
    pub arguments: Vec<Argument>,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|argument| argument.name.text == name)
            .map(|argument| &argument.value)
    }
}

/// A literal or variable value as written in a document. Numeric and string
/// values keep their raw token text; conversion happens during IR building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Variable(Name),
    Int { raw: String, loc: Location },
    Float { raw: String, loc: Location },
    String { raw: String, loc: Location },
    Boolean { value: bool, loc: Location },
    Enum(Name),
    List { values: Vec<Value>, loc: Location },
    Object { fields: Vec<(Name, Value)>, loc: Location },
}

impl Value {
    pub fn loc(&self) -> Location {
        match self {
            Value::Variable(name) | Value::Enum(name) => name.loc,
            Value::Int { loc, .. }
            | Value::Float { loc, .. }
            | Value::String { loc, .. }
            | Value::Boolean { loc, .. }
            | Value::List { loc, .. }
            | Value::Object { loc, .. } => *loc,
        }
    }
}
