use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::grammar::{fragment, operation};
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#Document
///
/// *Document*:
///    Definition+
///
/// The loop stops at the first token that cannot start a definition; the
/// post-parse EOF hook in [`Parser::parse`] reports anything left over.
pub(crate) fn document(p: &mut Parser) -> Result<cst::Document, ParseError> {
    let mut definitions = Vec::new();

    loop {
        match p.peek() {
            TokenKind::Name => match p.peek_data() {
                "query" | "mutation" | "subscription" => definitions.push(
                    cst::Definition::Operation(operation::operation_definition(p)?),
                ),
                _ => definitions.push(cst::Definition::Fragment(
                    fragment::fragment_definition(p)?,
                )),
            },
            _ if definitions.is_empty() => {
                return Err(Parser::unexpected(
                    p.current(),
                    "an Operation Definition or a Fragment Definition",
                ))
            }
            _ => break,
        }
    }

    Ok(cst::Document { definitions })
}
