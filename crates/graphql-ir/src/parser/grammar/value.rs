use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::grammar::name;
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#Value
///
/// *Value*:
///    Variable
///    IntValue
///    FloatValue
///    StringValue
///    BooleanValue
///    EnumValue
///    ListValue
///    ObjectValue
///
/// `null` and enum values both lex as names and are kept as enum/literal
/// values; numeric and string values keep their raw token text.
pub(crate) fn value(p: &mut Parser) -> Result<cst::Value, ParseError> {
    match p.peek() {
        TokenKind::Dollar => {
            p.bump();
            let variable = name::name(p, "a Variable Name")?;
            Ok(cst::Value::Variable(variable))
        }
        TokenKind::Int => {
            let token = p.bump();
            Ok(cst::Value::Int {
                raw: token.data().to_string(),
                loc: Parser::loc(&token),
            })
        }
        TokenKind::Float => {
            let token = p.bump();
            Ok(cst::Value::Float {
                raw: token.data().to_string(),
                loc: Parser::loc(&token),
            })
        }
        TokenKind::StringValue => {
            let token = p.bump();
            Ok(cst::Value::String {
                raw: token.data().to_string(),
                loc: Parser::loc(&token),
            })
        }
        TokenKind::Name => {
            let token = p.bump();
            let loc = Parser::loc(&token);
            match token.data() {
                "true" => Ok(cst::Value::Boolean { value: true, loc }),
                "false" => Ok(cst::Value::Boolean { value: false, loc }),
                _ => Ok(cst::Value::Enum(cst::Name {
                    text: token.data().to_string(),
                    loc,
                })),
            }
        }
        TokenKind::LBracket => {
            let bracket = p.bump();
            let loc = Parser::loc(&bracket);
            let mut values = Vec::new();
            loop {
                match p.peek() {
                    TokenKind::RBracket => {
                        p.bump();
                        break;
                    }
                    TokenKind::Eof => {
                        return Err(Parser::unexpected(p.current(), "a Value or ']'"))
                    }
                    _ => values.push(value(p)?),
                }
            }
            Ok(cst::Value::List { values, loc })
        }
        TokenKind::LCurly => {
            let curly = p.bump();
            let loc = Parser::loc(&curly);
            let mut fields = Vec::new();
            loop {
                match p.peek() {
                    TokenKind::RCurly => {
                        p.bump();
                        break;
                    }
                    TokenKind::Name => {
                        let field_name = name::name(p, "an Object Field Name")?;
                        p.expect(TokenKind::Colon, "':'")?;
                        fields.push((field_name, value(p)?));
                    }
                    _ => return Err(Parser::unexpected(p.current(), "an Object Field or '}'")),
                }
            }
            Ok(cst::Value::Object { fields, loc })
        }
        _ => Err(Parser::unexpected(p.current(), "a Value")),
    }
}
