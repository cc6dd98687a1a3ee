use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::grammar::name;
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#Type
///
/// *Type*:
///    NamedType
///    ListType
///    NonNullType
pub(crate) fn ty(p: &mut Parser) -> Result<cst::Type, ParseError> {
    let inner = match p.peek() {
        TokenKind::LBracket => {
            p.bump();
            let item = ty(p)?;
            p.expect(TokenKind::RBracket, "']'")?;
            cst::Type::List { ty: Box::new(item) }
        }
        TokenKind::Name => {
            let named = name::name(p, "a Named Type")?;
            cst::Type::Named { name: named.text }
        }
        _ => return Err(Parser::unexpected(p.current(), "a Type")),
    };

    match p.peek() {
        TokenKind::Bang => {
            p.bump();
            Ok(cst::Type::NonNull {
                ty: Box::new(inner),
            })
        }
        _ => Ok(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> cst::Type {
        ty(&mut Parser::new(input).unwrap()).unwrap()
    }

    #[test]
    fn it_parses_wrapped_types() {
        assert_eq!(parse("ID").to_string(), "ID");
        assert_eq!(parse("ID!").to_string(), "ID!");
        assert_eq!(parse("[ID!]").to_string(), "[ID!]");
        assert_eq!(parse("[[Int]!]!").to_string(), "[[Int]!]!");
    }

    #[test]
    fn it_rejects_unclosed_lists() {
        let err = ty(&mut Parser::new("[ID").unwrap()).unwrap_err();
        assert_eq!(err.message, "expected ']', found EOF");
    }
}
