use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::grammar::{argument, name};
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#Directives
///
/// *Directives*:
///    Directive+
///
/// *Directive*:
///    @ Name Arguments?
pub(crate) fn directives(p: &mut Parser) -> Result<Vec<cst::Directive>, ParseError> {
    let mut directives = Vec::new();

    while p.peek() == TokenKind::At {
        p.bump();
        let directive_name = name::name(p, "a Directive Name")?;
        let arguments = match p.peek() {
            TokenKind::LParen => argument::arguments(p)?,
            _ => Vec::new(),
        };
        directives.push(cst::Directive {
            name: directive_name,
            arguments,
        });
    }

    Ok(directives)
}
