use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const RULE: &str = "----------------------------------------------------";

/// An error bound to a single location in one GraphQL document.
///
/// Lexer, parser, and per-document validation failures all surface as a
/// `ParseError`. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize, position: usize) -> Self {
        Self {
            message: message.into(),
            line,
            position,
        }
    }
}

/// A [`ParseError`] wrapped with the path of the offending file and a
/// preview of the offending line flanked by its two neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentParseError {
    pub file_path: PathBuf,
    pub error: ParseError,
    preview: String,
}

impl DocumentParseError {
    pub(crate) fn new(file_path: impl Into<PathBuf>, source: &str, error: ParseError) -> Self {
        let preview = render_preview(source, error.line);
        Self {
            file_path: file_path.into(),
            error,
            preview,
        }
    }

    /// The framed source preview shown under the message.
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

impl fmt::Display for DocumentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Failed to parse GraphQL file {} ({}:{})",
            self.file_path.display(),
            self.error.line,
            self.error.position,
        )?;
        writeln!(f, "{}", self.error.message)?;
        write!(f, "{}", self.preview)
    }
}

impl std::error::Error for DocumentParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

fn render_preview(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let mut out = String::from(RULE);
    let first = line.saturating_sub(1).max(1);
    for number in first..=line + 1 {
        if let Some(text) = lines.get(number - 1) {
            out.push('\n');
            out.push_str(&format!("[{number}]:{text}"));
        }
    }
    out.push('\n');
    out.push_str(RULE);
    out
}

/// A whole-corpus error raised after every file has been walked: duplicate
/// operation or fragment names, or an unresolved fragment reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GraphQLParseError {
    pub message: String,
}

impl GraphQLParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Any failure of the IR build pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentParseError),
    #[error(transparent)]
    Corpus(#[from] GraphQLParseError),
    #[error("failed to read GraphQL file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why two selections that collapse to the same response key cannot merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConflictReason {
    FieldName,
    Type,
    Arguments,
    SelectionSets,
    InlineFragments,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ConflictReason::FieldName => "they are different fields",
            ConflictReason::Type => "they have different types",
            ConflictReason::Arguments => "they have different arguments",
            ConflictReason::SelectionSets => "they have different selection sets",
            ConflictReason::InlineFragments => "they have different inline fragments",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Fields '{response_name}' conflict because {reason}. Use different aliases on the fields.")]
pub(crate) struct FieldConflict {
    pub(crate) response_name: String,
    pub(crate) reason: ConflictReason,
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn it_renders_a_preview_with_both_neighbours() {
        let source = "query Hello {\n  me {\n    nam\n  }\n}\n";
        let error = ParseError::new("Can't query 'nam' on type 'User'", 3, 5);
        let wrapped = DocumentParseError::new("com/example/Hello.graphql", source, error);

        expect![[r#"
            Failed to parse GraphQL file com/example/Hello.graphql (3:5)
            Can't query 'nam' on type 'User'
            ----------------------------------------------------
            [2]:  me {
            [3]:    nam
            [4]:  }
            ----------------------------------------------------"#]]
        .assert_eq(&wrapped.to_string());
    }

    #[test]
    fn it_clamps_the_preview_at_document_edges() {
        let source = "query {";
        let error = ParseError::new("expected a Selection Set", 1, 8);
        let wrapped = DocumentParseError::new("Short.graphql", source, error);

        expect![[r#"
            Failed to parse GraphQL file Short.graphql (1:8)
            expected a Selection Set
            ----------------------------------------------------
            [1]:query {
            ----------------------------------------------------"#]]
        .assert_eq(&wrapped.to_string());
    }

    #[test]
    fn it_formats_conflicts() {
        let conflict = FieldConflict {
            response_name: "a".into(),
            reason: ConflictReason::Arguments,
        };
        assert_eq!(
            conflict.to_string(),
            "Fields 'a' conflict because they have different arguments. \
             Use different aliases on the fields."
        );
    }
}
