use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::grammar::{name, ty, value};
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#VariableDefinitions
///
/// *VariableDefinitions*:
///    ( VariableDefinition+ )
pub(crate) fn variable_definitions(
    p: &mut Parser,
) -> Result<Vec<cst::VariableDefinition>, ParseError> {
    p.expect(TokenKind::LParen, "'('")?;

    let mut definitions = Vec::new();
    loop {
        match p.peek() {
            TokenKind::RParen if !definitions.is_empty() => {
                p.bump();
                break;
            }
            TokenKind::Dollar => definitions.push(variable_definition(p)?),
            _ => return Err(Parser::unexpected(p.current(), "a Variable Definition")),
        }
    }

    Ok(definitions)
}

/// See: https://spec.graphql.org/October2021/#VariableDefinition
///
/// *VariableDefinition*:
///    Variable : Type DefaultValue?
fn variable_definition(p: &mut Parser) -> Result<cst::VariableDefinition, ParseError> {
    p.expect(TokenKind::Dollar, "'$'")?;
    let variable_name = name::name(p, "a Variable Name")?;
    p.expect(TokenKind::Colon, "':'")?;
    let variable_ty = ty::ty(p)?;

    let default_value = match p.peek() {
        TokenKind::Eq => {
            p.bump();
            Some(value::value(p)?)
        }
        _ => None,
    };

    Ok(cst::VariableDefinition {
        name: variable_name,
        ty: variable_ty,
        default_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_variable_definitions_with_defaults() {
        let mut p = Parser::new("($first: Int = 10, $episodes: [Episode!]!)").unwrap();
        let definitions = variable_definitions(&mut p).unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name.text, "first");
        assert_eq!(definitions[0].ty.to_string(), "Int");
        assert!(definitions[0].default_value.is_some());
        assert_eq!(definitions[1].ty.to_string(), "[Episode!]!");
        assert!(definitions[1].default_value.is_none());
    }

    #[test]
    fn it_rejects_empty_variable_definitions() {
        let mut p = Parser::new("()").unwrap();
        let err = variable_definitions(&mut p).unwrap_err();
        assert_eq!(err.message, "expected a Variable Definition, found ')'");
    }
}
