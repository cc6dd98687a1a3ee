use crate::cst;
use crate::error::ParseError;
use crate::parser::grammar::{directive, name, selection};
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#FragmentDefinition
///
/// *FragmentDefinition*:
///    **fragment** FragmentName TypeCondition Directives? SelectionSet
///
/// The leading keyword is accepted as any name and kept in the CST; the
/// document walker rejects anything other than the literal `fragment`, which
/// gives that error a precise location.
pub(crate) fn fragment_definition(p: &mut Parser) -> Result<cst::FragmentDefinition, ParseError> {
    let start = p.current().index();

    let keyword = name::name(p, "the 'fragment' keyword")?;
    let fragment_name = fragment_name(p)?;
    let type_condition = type_condition(p)?;
    let directives = directive::directives(p)?;
    let selection_set = selection::selection_set(p)?;

    Ok(cst::FragmentDefinition {
        keyword,
        name: fragment_name,
        type_condition,
        directives,
        selection_set,
        span: cst::Span {
            start,
            end: p.last_consumed_end(),
        },
    })
}

/// See: https://spec.graphql.org/October2021/#FragmentName
///
/// *FragmentName*:
///    Name *but not* **on**
pub(crate) fn fragment_name(p: &mut Parser) -> Result<cst::Name, ParseError> {
    let name = name::name(p, "a Fragment Name")?;
    if name.text == "on" {
        return Err(ParseError::new(
            "Fragment Name cannot be 'on'",
            name.loc.line,
            name.loc.column,
        ));
    }
    Ok(name)
}

/// See: https://spec.graphql.org/October2021/#TypeCondition
///
/// *TypeCondition*:
///    **on** NamedType
pub(crate) fn type_condition(p: &mut Parser) -> Result<cst::Name, ParseError> {
    let on = name::name(p, "'on'")?;
    if on.text != "on" {
        return Err(ParseError::new(
            format!("expected 'on', found '{}'", on.text),
            on.loc.line,
            on.loc.column,
        ));
    }
    name::name(p, "a Named Type")
}
