//! Read-only oracle over a previously introspected schema.
//!
//! The data model mirrors the standard `__schema` introspection JSON and is
//! polymorphic over type kinds as a tagged variant, not a hierarchy. The
//! oracle is borrowed read-only by every later stage; nothing here mutates.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Scalars every GraphQL schema provides; they never appear in the IR's
/// type declarations.
pub const BUILT_IN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

pub fn is_built_in_scalar(name: &str) -> bool {
    BUILT_IN_SCALARS.contains(&name)
}

/// The schema oracle: root operation types plus a by-name type table.
#[derive(Debug, Clone)]
pub struct Schema {
    query_type: String,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    types: IndexMap<String, TypeDefinition>,
}

impl Schema {
    pub fn new(
        query_type: impl Into<String>,
        mutation_type: Option<String>,
        subscription_type: Option<String>,
        types: Vec<TypeDefinition>,
    ) -> Self {
        Self {
            query_type: query_type.into(),
            mutation_type,
            subscription_type,
            types: types
                .into_iter()
                .map(|ty| (ty.name().to_string(), ty))
                .collect(),
        }
    }

    /// Load a schema from introspection JSON. Accepts the raw `__schema`
    /// object as well as the `{"__schema": …}` and `{"data": {"__schema": …}}`
    /// envelopes an introspection response comes in.
    pub fn from_introspection_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(inner) = value.get_mut("data").map(serde_json::Value::take) {
            value = inner;
        }
        if let Some(inner) = value.get_mut("__schema").map(serde_json::Value::take) {
            value = inner;
        }

        let introspection: IntrospectionSchema = serde_json::from_value(value)?;
        Ok(Self::new(
            introspection.query_type.name,
            introspection.mutation_type.map(|root| root.name),
            introspection.subscription_type.map(|root| root.name),
            introspection.types,
        ))
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: RootType,
    #[serde(default)]
    mutation_type: Option<RootType>,
    #[serde(default)]
    subscription_type: Option<RootType>,
    types: Vec<TypeDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootType {
    name: String,
}

/// A schema type, tagged by its introspection `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeDefinition {
    #[serde(rename = "SCALAR")]
    Scalar(ScalarType),
    #[serde(rename = "OBJECT")]
    Object(ObjectType),
    #[serde(rename = "INTERFACE")]
    Interface(InterfaceType),
    #[serde(rename = "UNION")]
    Union(UnionType),
    #[serde(rename = "ENUM")]
    Enum(EnumType),
    #[serde(rename = "INPUT_OBJECT")]
    InputObject(InputObjectType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(ty) => &ty.name,
            TypeDefinition::Object(ty) => &ty.name,
            TypeDefinition::Interface(ty) => &ty.name,
            TypeDefinition::Union(ty) => &ty.name,
            TypeDefinition::Enum(ty) => &ty.name,
            TypeDefinition::InputObject(ty) => &ty.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDefinition::Scalar(ty) => ty.description.as_deref(),
            TypeDefinition::Object(ty) => ty.description.as_deref(),
            TypeDefinition::Interface(ty) => ty.description.as_deref(),
            TypeDefinition::Union(ty) => ty.description.as_deref(),
            TypeDefinition::Enum(ty) => ty.description.as_deref(),
            TypeDefinition::InputObject(ty) => ty.description.as_deref(),
        }
    }

    /// Selectable field definitions. `Some` only for the kinds a field can
    /// be queried on; unions expose just whatever introspection put there.
    pub fn fields(&self) -> Option<&[FieldDefinition]> {
        match self {
            TypeDefinition::Object(ty) => Some(&ty.fields),
            TypeDefinition::Interface(ty) => Some(&ty.fields),
            TypeDefinition::Union(ty) => Some(&ty.fields),
            _ => None,
        }
    }

    /// Look up a field by schema name. Total only on object, interface, and
    /// union types.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields()?.iter().find(|field| field.name == name)
    }

    /// The concrete object types a selection on this type may resolve to:
    /// the introspected `possibleTypes` for interfaces and unions, the type
    /// itself otherwise.
    pub fn possible_types(&self) -> Vec<String> {
        match self {
            TypeDefinition::Interface(ty) => {
                ty.possible_types.iter().map(TypeRef::display_name).collect()
            }
            TypeDefinition::Union(ty) => {
                ty.possible_types.iter().map(TypeRef::display_name).collect()
            }
            other => vec![other.name().to_string()],
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_)
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, deserialize_with = "null_default")]
    pub possible_types: Vec<TypeRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, deserialize_with = "null_default")]
    pub possible_types: Vec<TypeRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub enum_values: Vec<EnumValueDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputObjectType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub input_fields: Vec<InputValueDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub args: Vec<InputValueDefinition>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValueDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// A possibly wrapped reference to a named type, in introspection shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeRefKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(kind: TypeRefKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn list(of_type: TypeRef) -> Self {
        Self {
            kind: TypeRefKind::List,
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }

    pub fn non_null(of_type: TypeRef) -> Self {
        Self {
            kind: TypeRefKind::NonNull,
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }

    /// The compact IR encoding of this reference: `[]` for lists, a
    /// trailing `!` for non-null wrappers, the type name otherwise.
    pub fn ir_type(&self) -> String {
        match self.kind {
            TypeRefKind::List => format!("[{}]", self.inner_ir_type()),
            TypeRefKind::NonNull => format!("{}!", self.inner_ir_type()),
            _ => self.name.clone().unwrap_or_default(),
        }
    }

    fn inner_ir_type(&self) -> String {
        self.of_type
            .as_ref()
            .map(|inner| inner.ir_type())
            .unwrap_or_default()
    }

    /// The innermost named type, with all wrappers stripped.
    pub fn leaf_name(&self) -> &str {
        match (self.kind, &self.of_type) {
            (TypeRefKind::List | TypeRefKind::NonNull, Some(inner)) => inner.leaf_name(),
            _ => self.name.as_deref().unwrap_or_default(),
        }
    }

    /// The innermost kind, with list and non-null wrappers stripped.
    pub fn leaf_kind(&self) -> TypeRefKind {
        match (self.kind, &self.of_type) {
            (TypeRefKind::List | TypeRefKind::NonNull, Some(inner)) => inner.leaf_kind(),
            (kind, _) => kind,
        }
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeRefKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

/// Introspection responses use `null` where this model uses an empty list.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
