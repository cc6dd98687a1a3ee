use crate::cst;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::grammar::{directive, name, selection, variable};
use crate::Parser;

/// See: https://spec.graphql.org/October2021/#OperationDefinition
///
/// *OperationDefinition*:
///    OperationType Name? VariableDefinitions? Directives? SelectionSet
///
/// The caller has already checked that the leading name is one of `query`,
/// `mutation`, or `subscription`.
pub(crate) fn operation_definition(p: &mut Parser) -> Result<cst::OperationDefinition, ParseError> {
    let start = p.current().index();

    let operation_type = name::name(p, "an Operation Type")?;

    let operation_name = match p.peek() {
        TokenKind::Name => Some(name::name(p, "an Operation Name")?),
        _ => None,
    };

    let variable_definitions = match p.peek() {
        TokenKind::LParen => variable::variable_definitions(p)?,
        _ => Vec::new(),
    };

    let directives = directive::directives(p)?;
    let selection_set = selection::selection_set(p)?;

    Ok(cst::OperationDefinition {
        operation_type,
        name: operation_name,
        variable_definitions,
        directives,
        selection_set,
        span: cst::Span {
            start,
            end: p.last_consumed_end(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_named_operations_with_variables() {
        let mut p = Parser::new("query Hero($episode: Episode = JEDI) @cached { hero }").unwrap();
        let operation = operation_definition(&mut p).unwrap();

        assert_eq!(operation.operation_type.text, "query");
        assert_eq!(operation.name.as_ref().unwrap().text, "Hero");
        assert_eq!(operation.variable_definitions.len(), 1);
        assert_eq!(operation.variable_definitions[0].name.text, "episode");
        assert_eq!(operation.directives.len(), 1);
        assert_eq!(operation.selection_set.selections.len(), 1);
    }

    #[test]
    fn it_parses_anonymous_operations() {
        let mut p = Parser::new("mutation { like }").unwrap();
        let operation = operation_definition(&mut p).unwrap();
        assert_eq!(operation.operation_type.text, "mutation");
        assert!(operation.name.is_none());
    }

    #[test]
    fn it_requires_a_selection_set() {
        let mut p = Parser::new("query Hero").unwrap();
        let err = operation_definition(&mut p).unwrap_err();
        assert_eq!(err.message, "expected a Selection Set, found EOF");
    }
}
