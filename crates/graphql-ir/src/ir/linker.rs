//! Cross-document phase: duplicate-name detection, fragment reference
//! resolution, and source attachment, run after every file has been walked.

use indexmap::{IndexMap, IndexSet};

use crate::error::GraphQLParseError;
use crate::ir::{Fragment, Operation};

pub(crate) fn link(
    operations: &mut [Operation],
    fragments: &[Fragment],
) -> Result<(), GraphQLParseError> {
    check_duplicate_operations(operations)?;
    check_duplicate_fragments(fragments)?;

    let by_name: IndexMap<&str, &Fragment> = fragments
        .iter()
        .map(|fragment| (fragment.fragment_name.as_str(), fragment))
        .collect();

    for fragment in fragments {
        for name in &fragment.fragments_referenced {
            if !by_name.contains_key(name.as_str()) {
                return Err(undefined_fragment(name, &fragment.file_path));
            }
        }
    }

    for operation in operations {
        attach_fragment_sources(operation, &by_name)?;
    }

    Ok(())
}

/// Operation names must be unique within the package derived from their file
/// path; the code emitter folds paths the same way.
fn check_duplicate_operations(operations: &[Operation]) -> Result<(), GraphQLParseError> {
    let mut seen: IndexSet<(String, String)> = IndexSet::new();
    for operation in operations {
        let key = (
            formatted_package_name(&operation.file_path),
            operation.operation_name.clone(),
        );
        if !seen.insert(key) {
            return Err(GraphQLParseError::new(format!(
                "There can be only one operation named '{}'",
                operation.operation_name
            )));
        }
    }
    Ok(())
}

fn check_duplicate_fragments(fragments: &[Fragment]) -> Result<(), GraphQLParseError> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for fragment in fragments {
        if !seen.insert(&fragment.fragment_name) {
            return Err(GraphQLParseError::new(format!(
                "There can be only one fragment named '{}'",
                fragment.fragment_name
            )));
        }
    }
    Ok(())
}

/// Expand the operation's direct references to their transitive closure,
/// then concatenate the closure's sources under the operation's own text.
fn attach_fragment_sources(
    operation: &mut Operation,
    fragments: &IndexMap<&str, &Fragment>,
) -> Result<(), GraphQLParseError> {
    let mut closure = operation.fragments_referenced.clone();
    let mut next = 0;
    while next < closure.len() {
        let fragment = fragments
            .get(closure[next].as_str())
            .copied()
            .ok_or_else(|| undefined_fragment(&closure[next], &operation.file_path))?;
        for name in &fragment.fragments_referenced {
            if !closure.contains(name) {
                closure.push(name.clone());
            }
        }
        next += 1;
    }

    let fragment_source = closure
        .iter()
        .filter_map(|name| fragments.get(name.as_str()))
        .map(|fragment| fragment.source.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    operation.source_with_fragments = if fragment_source.trim().is_empty() {
        operation.source.clone()
    } else {
        format!("{}\n{}", operation.source, fragment_source)
    };
    operation.fragments_referenced = closure;
    Ok(())
}

fn undefined_fragment(name: &str, file_path: &str) -> GraphQLParseError {
    GraphQLParseError::new(format!("Undefined fragment '{name}' in {file_path}"))
}

/// Fold a project-relative file path into the package name the emitter
/// uses: separators become dots, the file name is dropped, and anything
/// outside identifier characters is mapped to an underscore.
pub(crate) fn formatted_package_name(file_path: &str) -> String {
    let segments: Vec<&str> = file_path.split(['/', '\\']).collect();
    let directories = &segments[..segments.len().saturating_sub(1)];
    directories
        .join(".")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::OperationType;

    fn operation(name: &str, file_path: &str, references: &[&str]) -> Operation {
        Operation {
            operation_name: name.to_string(),
            operation_type: OperationType::Query,
            variables: Vec::new(),
            source: format!("query {name} {{ stub }}"),
            source_with_fragments: String::new(),
            fields: Vec::new(),
            fragments_referenced: references.iter().map(ToString::to_string).collect(),
            file_path: file_path.to_string(),
            operation_id: String::new(),
        }
    }

    fn fragment(name: &str, references: &[&str]) -> Fragment {
        Fragment {
            fragment_name: name.to_string(),
            type_condition: "User".to_string(),
            possible_types: vec!["User".to_string()],
            source: format!("fragment {name} on User {{ stub }}"),
            fields: Vec::new(),
            fragment_spreads: references.iter().map(ToString::to_string).collect(),
            inline_fragments: Vec::new(),
            fragments_referenced: references.iter().map(ToString::to_string).collect(),
            file_path: "com/example/Fragments.graphql".to_string(),
        }
    }

    #[test]
    fn it_folds_file_paths_into_package_names() {
        assert_eq!(
            formatted_package_name("src/main/graphql/com/example/FeedQuery.graphql"),
            "src.main.graphql.com.example"
        );
        assert_eq!(
            formatted_package_name("com/sample-app/Query.graphql"),
            "com.sample_app"
        );
        assert_eq!(formatted_package_name("Query.graphql"), "");
    }

    #[test]
    fn it_rejects_duplicate_operations_in_one_package() {
        let mut operations = vec![
            operation("Feed", "com/example/Feed.graphql", &[]),
            operation("Feed", "com/example/FeedCopy.graphql", &[]),
        ];
        let err = link(&mut operations, &[]).unwrap_err();
        assert_eq!(err.message, "There can be only one operation named 'Feed'");
    }

    #[test]
    fn it_allows_same_operation_names_in_different_packages() {
        let mut operations = vec![
            operation("Feed", "com/example/Feed.graphql", &[]),
            operation("Feed", "com/other/Feed.graphql", &[]),
        ];
        link(&mut operations, &[]).unwrap();
    }

    #[test]
    fn it_rejects_duplicate_fragments() {
        let fragments = vec![fragment("userDetails", &[]), fragment("userDetails", &[])];
        let err = link(&mut [], &fragments).unwrap_err();
        assert_eq!(
            err.message,
            "There can be only one fragment named 'userDetails'"
        );
    }

    #[test]
    fn it_rejects_undefined_fragment_references() {
        let mut operations = vec![operation("Feed", "com/example/Feed.graphql", &["Missing"])];
        let err = link(&mut operations, &[]).unwrap_err();
        assert_eq!(
            err.message,
            "Undefined fragment 'Missing' in com/example/Feed.graphql"
        );
    }

    #[test]
    fn it_attaches_transitive_fragment_sources() {
        let mut operations = vec![operation("Feed", "com/example/Feed.graphql", &["outer"])];
        let fragments = vec![
            fragment("outer", &["inner"]),
            fragment("inner", &["innermost"]),
            fragment("innermost", &[]),
            fragment("unrelated", &[]),
        ];
        link(&mut operations, &fragments).unwrap();

        let operation = &operations[0];
        assert_eq!(
            operation.fragments_referenced,
            vec!["outer", "inner", "innermost"]
        );
        assert_eq!(
            operation.source_with_fragments,
            "query Feed { stub }\n\
             fragment outer on User { stub }\n\
             fragment inner on User { stub }\n\
             fragment innermost on User { stub }"
        );
    }

    #[test]
    fn it_leaves_fragmentless_sources_unchanged() {
        let mut operations = vec![operation("Feed", "com/example/Feed.graphql", &[])];
        link(&mut operations, &[]).unwrap();
        assert_eq!(operations[0].source_with_fragments, "query Feed { stub }");
    }
}
