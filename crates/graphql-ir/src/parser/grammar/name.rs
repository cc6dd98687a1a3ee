use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#Name
///
/// *Name*:
///    [_A-Za-z][_0-9A-Za-z]*
pub(crate) fn name(p: &mut Parser, expected: &str) -> Result<cst::Name, ParseError> {
    let token = p.expect(TokenKind::Name, expected)?;
    Ok(cst::Name {
        text: token.data().to_string(),
        loc: Parser::loc(&token),
    })
}
