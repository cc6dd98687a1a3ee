//! The code-generation IR.
//!
//! Every record here is immutable once the build pipeline returns. The
//! aggregate serializes to the camelCase JSON shape the downstream code
//! emitter consumes, so field renames follow that wire format.

pub(crate) mod from_cst;
pub(crate) mod linker;
pub(crate) mod used_types;

use std::fmt;

use ordered_float::OrderedFloat;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The final aggregate handed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGenerationIr {
    pub operations: Vec<Operation>,
    pub fragments: Vec<Fragment>,
    pub types_used: Vec<TypeDeclaration>,
}

impl CodeGenerationIr {
    /// The JSON document the code emitter reads.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(OperationType::Query),
            "mutation" => Some(OperationType::Mutation),
            "subscription" => Some(OperationType::Subscription),
            _ => None,
        }
    }

    /// Returns `true` if the operation type is [`Query`].
    ///
    /// [`Query`]: OperationType::Query
    #[must_use]
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query)
    }

    /// Returns `true` if the operation type is [`Mutation`].
    ///
    /// [`Mutation`]: OperationType::Mutation
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Mutation)
    }

    /// Returns `true` if the operation type is [`Subscription`].
    ///
    /// [`Subscription`]: OperationType::Subscription
    #[must_use]
    pub fn is_subscription(&self) -> bool {
        matches!(self, Self::Subscription)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        };
        f.write_str(keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_name: String,
    pub operation_type: OperationType,
    pub variables: Vec<Variable>,
    /// The verbatim document text of this operation alone.
    pub source: String,
    /// `source` plus the sources of every transitively referenced fragment;
    /// attached by the linker.
    pub source_with_fragments: String,
    pub fields: Vec<Field>,
    /// Direct references when the walker finishes, augmented to the full
    /// transitive closure by the linker.
    pub fragments_referenced: Vec<String>,
    pub file_path: String,
    /// Reserved for the persisted-query hasher downstream; always empty here.
    pub operation_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub fragment_name: String,
    pub type_condition: String,
    pub possible_types: Vec<String>,
    pub source: String,
    pub fields: Vec<Field>,
    pub fragment_spreads: Vec<String>,
    pub inline_fragments: Vec<InlineFragment>,
    pub fragments_referenced: Vec<String>,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub response_name: String,
    pub field_name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub args: Vec<Argument>,
    pub is_conditional: bool,
    pub fields: Vec<Field>,
    pub fragment_spreads: Vec<String>,
    pub inline_fragments: Vec<InlineFragment>,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
    pub conditions: Vec<Condition>,
}

impl Field {
    /// The synthetic `__typename` selection injected at the head of every
    /// non-empty selection set.
    pub fn typename() -> Self {
        Self {
            response_name: "__typename".to_string(),
            field_name: "__typename".to_string(),
            ty: "String!".to_string(),
            args: Vec::new(),
            is_conditional: false,
            fields: Vec::new(),
            fragment_spreads: Vec::new(),
            inline_fragments: Vec::new(),
            description: None,
            is_deprecated: false,
            deprecation_reason: None,
            conditions: Vec::new(),
        }
    }

    pub fn is_typename(&self) -> bool {
        self.field_name == "__typename"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineFragment {
    pub type_condition: String,
    pub possible_types: Vec<String>,
    pub fields: Vec<Field>,
    pub fragment_spreads: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub kind: ConditionKind,
    pub variable_name: String,
    pub inverted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConditionKind {
    BooleanCondition,
}

/// A float that supports `Eq`/`Hash` through [`OrderedFloat`].
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct Float {
    inner: OrderedFloat<f64>,
}

impl Float {
    pub fn new(float: f64) -> Self {
        Self {
            inner: OrderedFloat(float),
        }
    }

    pub fn get(self) -> f64 {
        self.inner.0
    }
}

/// An argument or default value: a literal, or a variable reference.
///
/// Numbers written in argument position always carry double precision;
/// [`Value::Int`] appears only in normalized input-object default values,
/// where the scalar kind is known.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Variable(String),
    Int(i64),
    Float(Float),
    Boolean(bool),
    String(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Variable(_) => "Variable",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Object(_) => "Object",
        }
    }

    /// Returns `true` if the value is [`Variable`].
    ///
    /// [`Variable`]: Value::Variable
    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Variable(name) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("kind", "Variable")?;
                map.serialize_entry("variableName", name)?;
                map.end()
            }
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(value.get()),
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::List(values) => values.serialize(serializer),
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// A schema type the parsed documents actually reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TypeDeclaration {
    #[serde(rename = "ScalarType")]
    Scalar {
        name: String,
        description: Option<String>,
    },
    #[serde(rename = "EnumType")]
    Enum {
        name: String,
        description: Option<String>,
        values: Vec<EnumValue>,
    },
    #[serde(rename = "InputObjectType")]
    InputObject {
        name: String,
        description: Option<String>,
        fields: Vec<InputField>,
    },
}

impl TypeDeclaration {
    pub fn name(&self) -> &str {
        match self {
            TypeDeclaration::Scalar { name, .. }
            | TypeDeclaration::Enum { name, .. }
            | TypeDeclaration::InputObject { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
    pub default_value: Option<Value>,
}
