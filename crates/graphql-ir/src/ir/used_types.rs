//! Turns the walker's used-type names into scalar, enum, and input-object
//! type declarations, expanding input-object field types to a fixpoint.

use indexmap::IndexSet;

use crate::ir::{EnumValue, Float, InputField, TypeDeclaration, Value};
use crate::schema::{
    is_built_in_scalar, InputObjectType, Schema, TypeDefinition, TypeRef, TypeRefKind,
};

pub(crate) fn collect_type_declarations(
    used_types: &IndexSet<String>,
    schema: &Schema,
) -> Vec<TypeDeclaration> {
    let mut worklist: Vec<String> = used_types
        .iter()
        .filter(|name| !is_built_in_scalar(name.as_str()))
        .cloned()
        .collect();

    let mut declarations = Vec::new();
    let mut next = 0;
    while next < worklist.len() {
        let name = worklist[next].clone();
        next += 1;

        match schema.get(&name) {
            Some(TypeDefinition::Scalar(scalar)) => declarations.push(TypeDeclaration::Scalar {
                name: scalar.name.clone(),
                description: scalar.description.clone(),
            }),
            Some(TypeDefinition::Enum(enum_type)) => declarations.push(TypeDeclaration::Enum {
                name: enum_type.name.clone(),
                description: enum_type.description.clone(),
                values: enum_type
                    .enum_values
                    .iter()
                    .map(|value| EnumValue {
                        name: value.name.clone(),
                        description: value.description.clone(),
                        is_deprecated: value.is_deprecated,
                        deprecation_reason: value.deprecation_reason.clone(),
                    })
                    .collect(),
            }),
            Some(TypeDefinition::InputObject(input)) => {
                // Input-object fields pull their own types into the working
                // set until no new names appear.
                for field in &input.input_fields {
                    let field_type = field.ty.leaf_name().to_string();
                    if !is_built_in_scalar(&field_type) && !worklist.contains(&field_type) {
                        worklist.push(field_type);
                    }
                }
                declarations.push(input_object_declaration(input));
            }
            _ => {}
        }
    }

    declarations
}

fn input_object_declaration(input: &InputObjectType) -> TypeDeclaration {
    TypeDeclaration::InputObject {
        name: input.name.clone(),
        description: input.description.clone(),
        fields: input
            .input_fields
            .iter()
            .map(|field| InputField {
                name: field.name.clone(),
                description: field.description.clone(),
                ty: field.ty.ir_type(),
                default_value: field
                    .default_value
                    .as_deref()
                    .and_then(|raw| normalize_default_value(&field.ty, raw)),
            })
            .collect(),
    }
}

/// Normalize an introspection default value from its textual form into a
/// typed IR value, following the declared type.
fn normalize_default_value(ty: &TypeRef, raw: &str) -> Option<Value> {
    match ty.kind {
        TypeRefKind::NonNull => normalize_default_value(ty.of_type.as_ref()?, raw),
        TypeRefKind::List => {
            let element_type = ty.of_type.as_ref()?;
            // TODO: lists of enums have no stable textual form yet; the
            // emitter treats the missing value as null.
            if element_type.leaf_kind() == TypeRefKind::Enum {
                return None;
            }
            raw.trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(',')
                .map(|element| element.trim().trim_matches('"'))
                .filter(|element| !element.is_empty())
                .map(|element| normalize_default_value(element_type, element))
                .collect::<Option<Vec<_>>>()
                .map(Value::List)
        }
        TypeRefKind::Scalar => Some(normalize_scalar_text(ty.leaf_name(), raw)),
        _ => Some(Value::String(raw.to_string())),
    }
}

fn normalize_scalar_text(scalar_name: &str, raw: &str) -> Value {
    let text = raw.trim();
    match scalar_name {
        "Int" => text
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::String(text.to_string())),
        "Float" => text
            .parse::<f64>()
            .map(|float| Value::Float(Float::new(float)))
            .unwrap_or_else(|_| Value::String(text.to_string())),
        "Boolean" => match text {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => Value::String(text.to_string()),
        },
        _ => Value::String(text.trim_matches('"').to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::from_introspection_json(include_str!("../../tests/fixtures/schema.json")).unwrap()
    }

    fn collect(names: &[&str]) -> Vec<TypeDeclaration> {
        let used: IndexSet<String> = names.iter().map(ToString::to_string).collect();
        collect_type_declarations(&used, &schema())
    }

    fn declaration_names(declarations: &[TypeDeclaration]) -> Vec<&str> {
        declarations.iter().map(TypeDeclaration::name).collect()
    }

    #[test]
    fn it_filters_built_ins_and_composite_types() {
        let declarations = collect(&["Int", "String", "Boolean", "ID", "User", "Node", "Date"]);
        assert_eq!(declaration_names(&declarations), vec!["Date"]);
        assert!(matches!(declarations[0], TypeDeclaration::Scalar { .. }));
    }

    #[test]
    fn it_emits_enum_values_with_deprecation() {
        let declarations = collect(&["Role"]);
        let TypeDeclaration::Enum { values, .. } = &declarations[0] else {
            panic!("expected an enum declaration");
        };
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].name, "ADMIN");
        assert!(!values[0].is_deprecated);
        assert!(values[1].is_deprecated);
        assert_eq!(values[1].deprecation_reason.as_deref(), Some("Use ADMIN."));
    }

    #[test]
    fn it_expands_input_objects_to_a_fixpoint() {
        let declarations = collect(&["SearchInput"]);
        assert_eq!(
            declaration_names(&declarations),
            vec!["SearchInput", "Role", "NestedInput"]
        );
    }

    #[test]
    fn it_normalizes_scalar_default_values() {
        let declarations = collect(&["SearchInput"]);
        let TypeDeclaration::InputObject { fields, .. } = &declarations[0] else {
            panic!("expected an input object declaration");
        };
        let default = |name: &str| {
            fields
                .iter()
                .find(|field| field.name == name)
                .unwrap()
                .default_value
                .clone()
        };

        assert_eq!(default("term"), None);
        assert_eq!(default("limit"), Some(Value::Int(10)));
        assert_eq!(default("threshold"), Some(Value::Float(Float::new(1.5))));
        assert_eq!(default("exact"), Some(Value::Boolean(true)));
        assert_eq!(default("role"), Some(Value::String("ADMIN".to_string())));
    }

    #[test]
    fn it_normalizes_list_default_values() {
        let declarations = collect(&["SearchInput"]);
        let TypeDeclaration::InputObject { fields, .. } = &declarations[0] else {
            panic!("expected an input object declaration");
        };
        let default = |name: &str| {
            fields
                .iter()
                .find(|field| field.name == name)
                .unwrap()
                .default_value
                .clone()
        };

        assert_eq!(
            default("tags"),
            Some(Value::List(vec![
                Value::String("a".to_string()),
                Value::String("b".to_string()),
            ]))
        );
        assert_eq!(
            default("scores"),
            Some(Value::List(vec![Value::Int(1), Value::Int(2)]))
        );
        // Lists of enums keep the documented gap: no value at all.
        assert_eq!(default("roles"), None);
    }
}
