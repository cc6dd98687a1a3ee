#![doc = include_str!("../README.md")]

pub mod cst;
mod error;
mod lexer;
mod parser;

pub mod ir;
pub mod schema;

pub use crate::error::{DocumentParseError, Error, GraphQLParseError, ParseError};
pub use crate::ir::CodeGenerationIr;
pub use crate::lexer::{Token, TokenKind};
pub use crate::parser::Parser;
pub use crate::schema::Schema;

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::ir::from_cst::DocumentWalker;
use crate::ir::{linker, used_types};

/// A GraphQL document paired with its project-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

/// Build the code-generation IR for a set of GraphQL documents.
///
/// Each file is lexed, parsed, and walked against `schema`; the first error
/// aborts the build, wrapped with the file's path and a source preview.
/// Once every file has been walked, the linker checks names across files and
/// attaches fragment sources, and the referenced schema types are collected
/// into type declarations.
pub fn build_ir(files: &[SourceFile], schema: &Schema) -> Result<CodeGenerationIr, Error> {
    let mut operations = Vec::new();
    let mut fragments = Vec::new();
    let mut used_type_names = IndexSet::new();

    for file in files {
        let file_path = file.path.display().to_string();
        let result = Parser::new(&file.text)
            .and_then(Parser::parse)
            .and_then(|document| {
                DocumentWalker::new(schema, &file.text, &file_path).walk(&document)
            })
            .map_err(|error| DocumentParseError::new(&file.path, &file.text, error))?;

        operations.extend(result.operations);
        fragments.extend(result.fragments);
        used_type_names.extend(result.used_types);
    }

    linker::link(&mut operations, &fragments)?;
    let types_used = used_types::collect_type_declarations(&used_type_names, schema);

    Ok(CodeGenerationIr {
        operations,
        fragments,
        types_used,
    })
}

/// [`build_ir`] over files read from disk; an unreadable file fails the
/// build with [`Error::Io`].
pub fn build_ir_from_paths<P: AsRef<Path>>(
    paths: &[P],
    schema: &Schema,
) -> Result<CodeGenerationIr, Error> {
    let files = paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            std::fs::read_to_string(path)
                .map(|text| SourceFile {
                    path: path.to_path_buf(),
                    text,
                })
                .map_err(|source| Error::Io {
                    path: path.to_path_buf(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    build_ir(&files, schema)
}
