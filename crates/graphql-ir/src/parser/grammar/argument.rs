use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::grammar::{name, value};
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#Arguments
///
/// *Arguments*:
///    ( Argument+ )
pub(crate) fn arguments(p: &mut Parser) -> Result<Vec<cst::Argument>, ParseError> {
    p.expect(TokenKind::LParen, "'('")?;

    let mut arguments = Vec::new();
    loop {
        match p.peek() {
            TokenKind::RParen if !arguments.is_empty() => {
                p.bump();
                break;
            }
            TokenKind::Name => arguments.push(argument(p)?),
            _ => return Err(Parser::unexpected(p.current(), "an Argument")),
        }
    }

    Ok(arguments)
}

/// See: https://spec.graphql.org/October2021/#Argument
///
/// *Argument*:
///    Name : Value
fn argument(p: &mut Parser) -> Result<cst::Argument, ParseError> {
    let argument_name = name::name(p, "an Argument Name")?;
    p.expect(TokenKind::Colon, "':'")?;
    let argument_value = value::value(p)?;
    Ok(cst::Argument {
        name: argument_name,
        value: argument_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_arguments() {
        let mut p = Parser::new("(id: $id, first: 10)").unwrap();
        let arguments = arguments(&mut p).unwrap();
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].name.text, "id");
        assert!(matches!(arguments[0].value, cst::Value::Variable(_)));
        assert!(matches!(arguments[1].value, cst::Value::Int { .. }));
    }

    #[test]
    fn it_rejects_empty_argument_lists() {
        let mut p = Parser::new("()").unwrap();
        let err = arguments(&mut p).unwrap_err();
        assert_eq!(err.message, "expected an Argument, found ')'");
    }
}
