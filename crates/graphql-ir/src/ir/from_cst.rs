//! Walks one parsed document into IR records, validating against the schema.
//!
//! The walker owns all per-document rules: field and argument resolution,
//! variable typing, `__typename` injection, directive interpretation, inline
//! fragment forwarding, and the field conflict rule. Cross-document rules
//! live in the linker.

use indexmap::IndexSet;

use crate::cst;
use crate::error::{ConflictReason, FieldConflict, ParseError};
use crate::ir::{
    Argument, Condition, ConditionKind, Field, Float, Fragment, InlineFragment, Operation,
    OperationType, Value, Variable,
};
use crate::schema::{FieldDefinition, Schema};

/// Everything one walked file contributes to the corpus.
#[derive(Debug, Default)]
pub(crate) struct DocumentParseResult {
    pub(crate) operations: Vec<Operation>,
    pub(crate) fragments: Vec<Fragment>,
    pub(crate) used_types: IndexSet<String>,
}

pub(crate) struct DocumentWalker<'a> {
    schema: &'a Schema,
    source: &'a str,
    file_path: &'a str,
}

impl<'a> DocumentWalker<'a> {
    pub(crate) fn new(schema: &'a Schema, source: &'a str, file_path: &'a str) -> Self {
        Self {
            schema,
            source,
            file_path,
        }
    }

    pub(crate) fn walk(&self, document: &cst::Document) -> Result<DocumentParseResult, ParseError> {
        let mut result = DocumentParseResult::default();

        for definition in &document.definitions {
            match definition {
                cst::Definition::Operation(operation) => {
                    let operation = self.parse_operation(operation, &mut result.used_types)?;
                    result.operations.push(operation);
                }
                cst::Definition::Fragment(fragment) => {
                    let fragment = self.parse_fragment(fragment, &mut result.used_types)?;
                    result.fragments.push(fragment);
                }
            }
        }

        Ok(result)
    }

    fn parse_operation(
        &self,
        operation: &cst::OperationDefinition,
        used_types: &mut IndexSet<String>,
    ) -> Result<Operation, ParseError> {
        let keyword = &operation.operation_type;
        let operation_type = OperationType::from_keyword(&keyword.text).ok_or_else(|| {
            error_at(
                keyword.loc,
                format!("Unsupported operation type '{}'", keyword.text),
            )
        })?;

        let root_type = match operation_type {
            OperationType::Query => Some(self.schema.query_type()),
            OperationType::Mutation => self.schema.mutation_type(),
            OperationType::Subscription => self.schema.subscription_type(),
        }
        .ok_or_else(|| {
            error_at(
                keyword.loc,
                format!("Unsupported operation type '{}'", keyword.text),
            )
        })?;

        let operation_name = operation
            .name
            .as_ref()
            .ok_or_else(|| error_at(keyword.loc, "Anonymous operations are not supported"))?;

        let mut variables = Vec::with_capacity(operation.variable_definitions.len());
        for definition in &operation.variable_definitions {
            let base_type = definition.ty.name();
            let schema_type = self.schema.get(base_type).ok_or_else(|| {
                error_at(
                    definition.name.loc,
                    format!("Unknown variable type '{base_type}'"),
                )
            })?;
            used_types.insert(schema_type.name().to_string());
            variables.push(Variable {
                name: definition.name.text.clone(),
                ty: definition.ty.to_string(),
            });
        }

        let mut fields = self.parse_selection_set(
            Some(&operation.selection_set),
            root_type,
            &variables,
            used_types,
        )?;
        if fields.is_empty() {
            return Err(error_at(
                operation.selection_set.loc,
                format!(
                    "Operation '{}' of type '{}' must have a selection of sub-fields",
                    operation_name.text, operation_type
                ),
            ));
        }

        // The operation root never keeps the bare __typename selection; the
        // linker re-adds it through sub-selections as needed.
        let typename = Field::typename();
        fields.retain(|field| field != &typename);

        Ok(Operation {
            operation_name: operation_name.text.clone(),
            operation_type,
            variables,
            source: self.source[operation.span.start..operation.span.end].to_string(),
            source_with_fragments: String::new(),
            fields,
            fragments_referenced: collect_spread_names(&operation.selection_set),
            file_path: self.file_path.to_string(),
            operation_id: String::new(),
        })
    }

    fn parse_fragment(
        &self,
        fragment: &cst::FragmentDefinition,
        used_types: &mut IndexSet<String>,
    ) -> Result<Fragment, ParseError> {
        let keyword = &fragment.keyword;
        if keyword.text != "fragment" {
            return Err(error_at(
                keyword.loc,
                format!("Expected 'fragment', found '{}'", keyword.text),
            ));
        }

        let condition = &fragment.type_condition;
        let type_condition = self
            .schema
            .get(&condition.text)
            .ok_or_else(|| error_at(condition.loc, format!("Unknown type '{}'", condition.text)))?;

        let mut fields = self.parse_selection_set(
            Some(&fragment.selection_set),
            type_condition.name(),
            &[],
            used_types,
        )?;
        if fields.is_empty() {
            return Err(error_at(
                fragment.selection_set.loc,
                format!(
                    "Fragment '{}' must have a selection of sub-fields",
                    fragment.name.text
                ),
            ));
        }

        let mut fragment_spreads = direct_spread_names(&fragment.selection_set);
        let mut inline_fragments = Vec::new();
        for inline in fragment.selection_set.inline_fragments() {
            let parsed =
                self.parse_inline_fragment(&fragment.selection_set, inline, &[], used_types)?;
            if parsed.type_condition == type_condition.name() {
                merge_field_list(&mut fields, parsed.fields)
                    .map_err(|conflict| error_at(inline.loc, conflict.to_string()))?;
                extend_unique(&mut fragment_spreads, parsed.fragment_spreads);
            } else {
                inline_fragments.push(parsed);
            }
        }

        Ok(Fragment {
            fragment_name: fragment.name.text.clone(),
            type_condition: type_condition.name().to_string(),
            possible_types: type_condition.possible_types(),
            source: self.source[fragment.span.start..fragment.span.end].to_string(),
            fields,
            fragment_spreads,
            inline_fragments,
            fragments_referenced: collect_spread_names(&fragment.selection_set),
            file_path: self.file_path.to_string(),
        })
    }

    /// The central routine: parse the plain fields of a selection set
    /// against `parent_type`, then prepend the synthetic `__typename` unless
    /// one is already selected.
    fn parse_selection_set(
        &self,
        selection_set: Option<&cst::SelectionSet>,
        parent_type: &str,
        variables: &[Variable],
        used_types: &mut IndexSet<String>,
    ) -> Result<Vec<Field>, ParseError> {
        let Some(selection_set) = selection_set else {
            return Ok(Vec::new());
        };

        let mut fields: Vec<Field> = Vec::new();
        for selection in &selection_set.selections {
            if let cst::Selection::Field(cst_field) = selection {
                let field = self.parse_field(cst_field, parent_type, variables, used_types)?;
                merge_into(&mut fields, field)
                    .map_err(|conflict| error_at(cst_field.name.loc, conflict.to_string()))?;
            }
        }

        if !selection_set.selections.is_empty() && !fields.iter().any(Field::is_typename) {
            fields.insert(0, Field::typename());
        }

        Ok(fields)
    }

    fn parse_field(
        &self,
        field: &cst::Field,
        parent_type: &str,
        variables: &[Variable],
        used_types: &mut IndexSet<String>,
    ) -> Result<Field, ParseError> {
        let field_name = &field.name.text;
        if field_name == "__typename" {
            return Ok(Field::typename());
        }

        let parent = self
            .schema
            .get(parent_type)
            .ok_or_else(|| error_at(field.name.loc, format!("Unknown type '{parent_type}'")))?;
        if !parent.is_composite() {
            return Err(error_at(
                field.name.loc,
                format!(
                    "Can't query '{field_name}' on type '{parent_type}'. '{parent_type}' is \
                     not one of the expected types: 'OBJECT', 'INTERFACE', 'UNION'."
                ),
            ));
        }
        let field_def = parent.field(field_name).ok_or_else(|| {
            error_at(
                field.name.loc,
                format!("Can't query '{field_name}' on type '{parent_type}'"),
            )
        })?;

        let raw_type_name = field_def.ty.leaf_name().to_string();
        used_types.insert(raw_type_name.clone());

        let args = self.parse_arguments(field, field_def, variables, used_types)?;

        let mut fields = self.parse_selection_set(
            field.selection_set.as_ref(),
            &raw_type_name,
            variables,
            used_types,
        )?;

        let mut fragment_spreads = field
            .selection_set
            .as_ref()
            .map(direct_spread_names)
            .unwrap_or_default();

        let mut inline_fragments = Vec::new();
        if let Some(selection_set) = &field.selection_set {
            for inline in selection_set.inline_fragments() {
                let parsed =
                    self.parse_inline_fragment(selection_set, inline, variables, used_types)?;
                if parsed.type_condition == raw_type_name {
                    // Narrowing to the field's own type is redundant; fold it
                    // into the field's selection instead.
                    merge_field_list(&mut fields, parsed.fields)
                        .map_err(|conflict| error_at(inline.loc, conflict.to_string()))?;
                    extend_unique(&mut fragment_spreads, parsed.fragment_spreads);
                } else {
                    inline_fragments.push(parsed);
                }
            }
        }

        let conditions = parse_conditions(&field.directives);

        Ok(Field {
            response_name: field.response_name().to_string(),
            field_name: field_name.clone(),
            ty: field_def.ty.ir_type(),
            args,
            is_conditional: !conditions.is_empty(),
            fields,
            fragment_spreads,
            inline_fragments,
            description: field_def.description.clone(),
            is_deprecated: field_def.is_deprecated,
            deprecation_reason: field_def.deprecation_reason.clone(),
            conditions,
        })
    }

    /// Parse an inline fragment. The parent selection set's plain fields are
    /// forwarded into the narrowed type first, so shared selections appear
    /// inside each narrowing, then the fragment's own selections are added
    /// by field union.
    fn parse_inline_fragment(
        &self,
        parent_selection_set: &cst::SelectionSet,
        inline: &cst::InlineFragment,
        variables: &[Variable],
        used_types: &mut IndexSet<String>,
    ) -> Result<InlineFragment, ParseError> {
        let condition = &inline.type_condition;
        let ty = self
            .schema
            .get(&condition.text)
            .ok_or_else(|| error_at(condition.loc, format!("Unknown type '{}'", condition.text)))?;

        let parent_fields =
            self.parse_selection_set(Some(parent_selection_set), ty.name(), variables, used_types)?;
        let own_fields =
            self.parse_selection_set(Some(&inline.selection_set), ty.name(), variables, used_types)?;
        let fields = union_fields(parent_fields, own_fields);
        if fields.is_empty() {
            return Err(error_at(
                inline.loc,
                format!(
                    "Inline fragment on '{}' must have a selection of sub-fields",
                    ty.name()
                ),
            ));
        }

        Ok(InlineFragment {
            type_condition: ty.name().to_string(),
            possible_types: ty.possible_types(),
            fields,
            fragment_spreads: direct_spread_names(&inline.selection_set),
        })
    }

    fn parse_arguments(
        &self,
        field: &cst::Field,
        field_def: &FieldDefinition,
        variables: &[Variable],
        used_types: &mut IndexSet<String>,
    ) -> Result<Vec<Argument>, ParseError> {
        field
            .arguments
            .iter()
            .map(|argument| {
                let definition = field_def
                    .args
                    .iter()
                    .find(|definition| definition.name == argument.name.text)
                    .ok_or_else(|| {
                        error_at(
                            argument.name.loc,
                            format!(
                                "Unknown argument '{}' on field '{}'",
                                argument.name.text, field.name.text
                            ),
                        )
                    })?;
                used_types.insert(definition.ty.leaf_name().to_string());

                let ty = definition.ty.ir_type();
                let value = self.parse_value(&argument.value, Some(&ty), variables)?;
                Ok(Argument {
                    name: argument.name.text.clone(),
                    ty,
                    value,
                })
            })
            .collect()
    }

    /// Convert a literal, or resolve a variable reference. The expected type
    /// is known only at argument position; variables nested inside list and
    /// object literals are resolved but not type-checked.
    fn parse_value(
        &self,
        value: &cst::Value,
        expected_type: Option<&str>,
        variables: &[Variable],
    ) -> Result<Value, ParseError> {
        match value {
            cst::Value::Variable(name) => {
                let variable = variables
                    .iter()
                    .find(|variable| variable.name == name.text)
                    .ok_or_else(|| {
                        error_at(name.loc, format!("Undefined variable '{}'", name.text))
                    })?;
                if let Some(expected) = expected_type {
                    if !variable_type_compatible(&variable.ty, expected) {
                        return Err(error_at(
                            name.loc,
                            format!(
                                "Variable '{}' of type '{}' used in position expecting type '{}'",
                                name.text, variable.ty, expected
                            ),
                        ));
                    }
                }
                Ok(Value::Variable(name.text.clone()))
            }
            cst::Value::Int { raw, loc } | cst::Value::Float { raw, loc } => {
                let number: f64 = raw
                    .parse()
                    .map_err(|_| error_at(*loc, format!("Invalid number literal '{raw}'")))?;
                Ok(Value::Float(Float::new(number)))
            }
            cst::Value::String { raw, .. } => Ok(Value::String(strip_quotes(raw))),
            cst::Value::Boolean { value, .. } => Ok(Value::Boolean(*value)),
            cst::Value::Enum(name) => Ok(Value::String(name.text.clone())),
            cst::Value::List { values, .. } => values
                .iter()
                .map(|value| self.parse_value(value, None, variables))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            cst::Value::Object { fields, .. } => fields
                .iter()
                .map(|(name, value)| {
                    Ok((name.text.clone(), self.parse_value(value, None, variables)?))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Object),
        }
    }
}

/// A variable may be used where its exact type is expected, or where the
/// same type without the trailing non-null marker is expected.
fn variable_type_compatible(variable_type: &str, expected: &str) -> bool {
    variable_type == expected || variable_type.strip_suffix('!') == Some(expected)
}

fn parse_conditions(directives: &[cst::Directive]) -> Vec<Condition> {
    directives
        .iter()
        .filter_map(|directive| {
            let inverted = match directive.name.text.as_str() {
                "skip" => true,
                "include" => false,
                _ => return None,
            };
            match directive.argument("if") {
                Some(cst::Value::Variable(variable)) => Some(Condition {
                    kind: ConditionKind::BooleanCondition,
                    variable_name: variable.text.clone(),
                    inverted,
                }),
                _ => None,
            }
        })
        .collect()
}

/// Merge `incoming` into `fields`: a field with a fresh response name is
/// appended, one that collides must pass the conflict rule and contributes
/// its fragment spreads.
fn merge_into(fields: &mut Vec<Field>, incoming: Field) -> Result<(), FieldConflict> {
    match fields
        .iter_mut()
        .find(|field| field.response_name == incoming.response_name)
    {
        Some(existing) => {
            check_merge(existing, &incoming)?;
            for spread in incoming.fragment_spreads {
                if !existing.fragment_spreads.contains(&spread) {
                    existing.fragment_spreads.push(spread);
                }
            }
            Ok(())
        }
        None => {
            fields.push(incoming);
            Ok(())
        }
    }
}

fn merge_field_list(fields: &mut Vec<Field>, incoming: Vec<Field>) -> Result<(), FieldConflict> {
    for field in incoming {
        merge_into(fields, field)?;
    }
    Ok(())
}

/// The conflict rule for two selections sharing a response name: same schema
/// field, same type, and the primary selection must subsume the other's
/// arguments, sub-selections, and inline fragments.
fn check_merge(primary: &Field, other: &Field) -> Result<(), FieldConflict> {
    let conflict = |reason| FieldConflict {
        response_name: primary.response_name.clone(),
        reason,
    };

    if primary.field_name != other.field_name {
        return Err(conflict(ConflictReason::FieldName));
    }
    if primary.ty != other.ty {
        return Err(conflict(ConflictReason::Type));
    }
    if !other.args.iter().all(|arg| primary.args.contains(arg)) {
        return Err(conflict(ConflictReason::Arguments));
    }
    if !other.fields.iter().all(|field| primary.fields.contains(field)) {
        return Err(conflict(ConflictReason::SelectionSets));
    }
    if !other
        .inline_fragments
        .iter()
        .all(|inline| primary.inline_fragments.contains(inline))
    {
        return Err(conflict(ConflictReason::InlineFragments));
    }
    Ok(())
}

/// Field union for inline fragment forwarding: keep every left field with
/// its sub-selection unioned against the matching right field, then append
/// the right-only fields. Keys pair response name with field name so
/// differently aliased selections coexist.
fn union_fields(left: Vec<Field>, right: Vec<Field>) -> Vec<Field> {
    let left_keys: Vec<(String, String)> = left
        .iter()
        .map(|field| (field.response_name.clone(), field.field_name.clone()))
        .collect();

    let mut result = Vec::with_capacity(left.len() + right.len());
    for mut field in left {
        if let Some(other) = right.iter().find(|other| {
            other.response_name == field.response_name && other.field_name == field.field_name
        }) {
            let own = std::mem::take(&mut field.fields);
            field.fields = union_fields(own, other.fields.clone());
        }
        result.push(field);
    }

    for field in right {
        let key = (field.response_name.clone(), field.field_name.clone());
        if !left_keys.contains(&key) {
            result.push(field);
        }
    }
    result
}

/// Spread names directly inside one selection set, first occurrence wins.
fn direct_spread_names(selection_set: &cst::SelectionSet) -> Vec<String> {
    let mut names = Vec::new();
    for spread in selection_set.fragment_spreads() {
        if !names.contains(&spread.name.text) {
            names.push(spread.name.text.clone());
        }
    }
    names
}

/// Every spread name reachable in a definition's selection tree, without
/// following into the spread fragments themselves.
fn collect_spread_names(selection_set: &cst::SelectionSet) -> Vec<String> {
    fn collect(selection_set: &cst::SelectionSet, out: &mut Vec<String>) {
        for selection in &selection_set.selections {
            match selection {
                cst::Selection::Field(field) => {
                    if let Some(nested) = &field.selection_set {
                        collect(nested, out);
                    }
                }
                cst::Selection::FragmentSpread(spread) => {
                    if !out.contains(&spread.name.text) {
                        out.push(spread.name.text.clone());
                    }
                }
                cst::Selection::InlineFragment(inline) => collect(&inline.selection_set, out),
            }
        }
    }

    let mut names = Vec::new();
    collect(selection_set, &mut names);
    names
}

fn extend_unique(target: &mut Vec<String>, additions: Vec<String>) {
    for addition in additions {
        if !target.contains(&addition) {
            target.push(addition);
        }
    }
}

fn strip_quotes(raw: &str) -> String {
    raw.trim_start_matches('"').trim_end_matches('"').to_string()
}

fn error_at(loc: cst::Location, message: impl Into<String>) -> ParseError {
    ParseError::new(message, loc.line, loc.column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;

    fn schema() -> Schema {
        Schema::from_introspection_json(include_str!("../../tests/fixtures/schema.json")).unwrap()
    }

    fn walk(input: &str) -> Result<DocumentParseResult, ParseError> {
        let document = Parser::new(input).and_then(Parser::parse)?;
        DocumentWalker::new(&schema(), input, "com/example/Test.graphql").walk(&document)
    }

    fn response_names(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|field| field.response_name.as_str()).collect()
    }

    #[test]
    fn it_injects_typename_into_sub_selections_but_not_the_root() {
        let result = walk("query Hello { me { name } }").unwrap();
        let operation = &result.operations[0];

        assert_eq!(response_names(&operation.fields), vec!["me"]);
        let me = &operation.fields[0];
        assert_eq!(response_names(&me.fields), vec!["__typename", "name"]);
        assert_eq!(me.fields[0].ty, "String!");
        assert_eq!(me.ty, "User!");
    }

    #[test]
    fn it_keeps_an_explicit_typename_exactly_once() {
        let result = walk("query Hello { me { __typename name } }").unwrap();
        let me = &result.operations[0].fields[0];
        assert_eq!(response_names(&me.fields), vec!["__typename", "name"]);
    }

    #[test]
    fn it_records_aliases_and_argument_values() {
        let result = walk(r#"query Q { aliased: user(id: "42") { id } }"#).unwrap();
        let field = &result.operations[0].fields[0];

        assert_eq!(field.response_name, "aliased");
        assert_eq!(field.field_name, "user");
        assert_eq!(field.args.len(), 1);
        assert_eq!(field.args[0].name, "id");
        assert_eq!(field.args[0].ty, "ID!");
        assert_eq!(field.args[0].value, Value::String("42".to_string()));
    }

    #[test]
    fn it_resolves_variables_in_argument_position() {
        let result = walk("query Q($id: ID!) { user(id: $id) { id } }").unwrap();
        let operation = &result.operations[0];

        assert_eq!(operation.variables.len(), 1);
        assert_eq!(operation.variables[0].ty, "ID!");
        assert_eq!(
            operation.fields[0].args[0].value,
            Value::Variable("id".to_string())
        );
    }

    #[test]
    fn it_rejects_incompatible_variable_types() {
        let err = walk("query Q($id: String!) { user(id: $id) { id } }").unwrap_err();
        assert_eq!(
            err.message,
            "Variable 'id' of type 'String!' used in position expecting type 'ID!'"
        );
    }

    #[test]
    fn it_allows_non_null_variables_at_nullable_positions() {
        let result = walk("query Q($first: Int!) { feed(first: $first) { id } }").unwrap();
        assert_eq!(result.operations[0].fields[0].args[0].ty, "Int");
    }

    #[test]
    fn it_rejects_undefined_variables() {
        let err = walk("query Q { user(id: $mystery) { id } }").unwrap_err();
        assert_eq!(err.message, "Undefined variable 'mystery'");
    }

    #[test]
    fn it_rejects_unknown_fields_and_arguments() {
        let err = walk("query Q { me { age } }").unwrap_err();
        assert_eq!(err.message, "Can't query 'age' on type 'User'");

        let err = walk("query Q($id: ID!) { user(handle: $id) { id } }").unwrap_err();
        assert_eq!(err.message, "Unknown argument 'handle' on field 'user'");
    }

    #[test]
    fn it_rejects_sub_selections_on_scalars() {
        let err = walk("query Q { me { name { length } } }").unwrap_err();
        assert_eq!(
            err.message,
            "Can't query 'length' on type 'String'. 'String' is not one of the expected \
             types: 'OBJECT', 'INTERFACE', 'UNION'."
        );
    }

    #[test]
    fn it_rejects_unknown_variable_types() {
        let err = walk("query Q($id: Mystery!) { me { id } }").unwrap_err();
        assert_eq!(err.message, "Unknown variable type 'Mystery'");
    }

    #[test]
    fn it_rejects_conflicting_aliases() {
        let err = walk(r#"query Q { a: user(id: "1") { id } a: user(id: "2") { id } }"#)
            .unwrap_err();
        assert_eq!(
            err.message,
            "Fields 'a' conflict because they have different arguments. \
             Use different aliases on the fields."
        );
    }

    #[test]
    fn it_merges_identical_duplicate_fields() {
        let result = walk("query Q { me { name } me { name } }").unwrap();
        assert_eq!(response_names(&result.operations[0].fields), vec!["me"]);
    }

    #[test]
    fn it_merges_same_type_inline_fragments() {
        let result = walk("query Q { node { id ... on Node { name } } }").unwrap();
        let node = &result.operations[0].fields[0];

        assert_eq!(response_names(&node.fields), vec!["__typename", "id", "name"]);
        assert!(node.inline_fragments.is_empty());
    }

    #[test]
    fn it_forwards_parent_fields_into_narrowing_inline_fragments() {
        let result = walk("query Q { node { id ... on User { name } } }").unwrap();
        let node = &result.operations[0].fields[0];

        assert_eq!(response_names(&node.fields), vec!["__typename", "id"]);
        assert_eq!(node.inline_fragments.len(), 1);
        let narrowed = &node.inline_fragments[0];
        assert_eq!(narrowed.type_condition, "User");
        assert_eq!(
            response_names(&narrowed.fields),
            vec!["__typename", "id", "name"]
        );
        assert_eq!(narrowed.possible_types, vec!["User"]);
    }

    #[test]
    fn it_builds_conditions_from_skip_and_include() {
        let result = walk(
            "query Q($a: Boolean!, $b: Boolean!) {\n\
             \x20 me { name @skip(if: $a) id @include(if: $b) handle @deprecated }\n\
             }",
        )
        .unwrap();
        let me = &result.operations[0].fields[0];
        let name = &me.fields[1];
        assert!(name.is_conditional);
        assert_eq!(name.conditions[0].variable_name, "a");
        assert!(name.conditions[0].inverted);

        let id = &me.fields[2];
        assert!(id.is_conditional);
        assert!(!id.conditions[0].inverted);

        let handle = &me.fields[3];
        assert!(!handle.is_conditional);
        assert!(handle.conditions.is_empty());
    }

    #[test]
    fn it_collects_fragment_spreads_and_references() {
        let result = walk(
            "query Q { me { ...userDetails friends { ...userDetails } } }\n\
             fragment userDetails on User { id name }",
        )
        .unwrap();
        let operation = &result.operations[0];
        assert_eq!(operation.fragments_referenced, vec!["userDetails"]);

        let me = &operation.fields[0];
        assert_eq!(me.fragment_spreads, vec!["userDetails"]);
        assert_eq!(response_names(&me.fields), vec!["__typename", "friends"]);

        let fragment = &result.fragments[0];
        assert_eq!(fragment.fragment_name, "userDetails");
        assert_eq!(fragment.type_condition, "User");
        assert_eq!(fragment.possible_types, vec!["User"]);
        assert_eq!(fragment.source, "fragment userDetails on User { id name }");
    }

    #[test]
    fn it_parses_fragments_on_interfaces_and_unions() {
        let result = walk(
            "fragment entry on Node { id }\n\
             fragment found on SearchResult { ... on User { name } }",
        )
        .unwrap();
        let node_fragment = &result.fragments[0];
        assert_eq!(node_fragment.possible_types, vec!["User", "Entry"]);

        let union_fragment = &result.fragments[1];
        assert_eq!(union_fragment.possible_types, vec!["User", "Entry"]);
        assert_eq!(response_names(&union_fragment.fields), vec!["__typename"]);
        assert_eq!(union_fragment.inline_fragments.len(), 1);
    }

    #[test]
    fn it_rejects_anonymous_operations() {
        let err = walk("query { me { id } }").unwrap_err();
        assert_eq!(err.message, "Anonymous operations are not supported");
    }

    #[test]
    fn it_rejects_wrong_fragment_keywords() {
        let err = walk("fragmnt userDetails on User { id }").unwrap_err();
        assert_eq!(err.message, "Expected 'fragment', found 'fragmnt'");
    }

    #[test]
    fn it_rejects_unknown_type_conditions() {
        let err = walk("fragment f on Mystery { id }").unwrap_err();
        assert_eq!(err.message, "Unknown type 'Mystery'");
    }

    #[test]
    fn it_rejects_unsupported_root_operations() {
        let err = walk("subscription S { me { id } }").unwrap_err();
        assert_eq!(err.message, "Unsupported operation type 'subscription'");
    }

    #[test]
    fn it_records_used_types() {
        let result = walk(
            "query Q($input: SearchInput!, $role: Role) {\n\
             \x20 search(input: $input) { id role }\n\
             }",
        )
        .unwrap();
        let used: Vec<&str> = result.used_types.iter().map(String::as_str).collect();
        assert!(used.contains(&"SearchInput"));
        assert!(used.contains(&"Role"));
        assert!(used.contains(&"User"));
        assert!(used.contains(&"ID"));
    }
}
