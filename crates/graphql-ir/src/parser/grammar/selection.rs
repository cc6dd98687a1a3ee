use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::grammar::{argument, directive, fragment, name};
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#SelectionSet
///
/// *SelectionSet*:
///    { Selection+ }
pub(crate) fn selection_set(p: &mut Parser) -> Result<cst::SelectionSet, ParseError> {
    let l_curly = p.expect(TokenKind::LCurly, "a Selection Set")?;
    let loc = Parser::loc(&l_curly);

    if p.peek() == TokenKind::RCurly {
        return Err(Parser::unexpected(p.current(), "a Selection"));
    }

    let mut selections = Vec::new();
    loop {
        match p.peek() {
            TokenKind::RCurly => {
                p.bump();
                break;
            }
            TokenKind::Name => selections.push(cst::Selection::Field(field(p)?)),
            TokenKind::Spread => selections.push(fragment_selection(p)?),
            _ => return Err(Parser::unexpected(p.current(), "a Selection")),
        }
    }

    Ok(cst::SelectionSet { selections, loc })
}

/// See: https://spec.graphql.org/October2021/#Field
///
/// *Field*:
///    Alias? Name Arguments? Directives? SelectionSet?
pub(crate) fn field(p: &mut Parser) -> Result<cst::Field, ParseError> {
    let first = name::name(p, "a Field Name")?;

    let (alias, field_name) = match p.peek() {
        TokenKind::Colon => {
            p.bump();
            (Some(first), name::name(p, "a Field Name")?)
        }
        _ => (None, first),
    };

    let arguments = match p.peek() {
        TokenKind::LParen => argument::arguments(p)?,
        _ => Vec::new(),
    };

    let directives = directive::directives(p)?;

    let selection_set = match p.peek() {
        TokenKind::LCurly => Some(selection_set(p)?),
        _ => None,
    };

    Ok(cst::Field {
        alias,
        name: field_name,
        arguments,
        directives,
        selection_set,
    })
}

/// See: https://spec.graphql.org/October2021/#FragmentSpread
/// See: https://spec.graphql.org/October2021/#InlineFragment
///
/// *FragmentSpread*:
///    ... FragmentName Directives?
/// *InlineFragment*:
///    ... TypeCondition Directives? SelectionSet
pub(crate) fn fragment_selection(p: &mut Parser) -> Result<cst::Selection, ParseError> {
    let spread = p.expect(TokenKind::Spread, "'...'")?;

    match p.peek() {
        TokenKind::Name if p.peek_data() == "on" => {
            p.bump();
            let type_condition = name::name(p, "a Named Type")?;
            let directives = directive::directives(p)?;
            let selection_set = selection_set(p)?;
            Ok(cst::Selection::InlineFragment(cst::InlineFragment {
                type_condition,
                directives,
                selection_set,
                loc: Parser::loc(&spread),
            }))
        }
        TokenKind::Name => {
            let spread_name = fragment::fragment_name(p)?;
            let directives = directive::directives(p)?;
            Ok(cst::Selection::FragmentSpread(cst::FragmentSpread {
                name: spread_name,
                directives,
            }))
        }
        _ => Err(Parser::unexpected(
            p.current(),
            "an Inline Fragment or a Fragment Spread",
        )),
    }
}
