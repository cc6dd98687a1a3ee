pub(crate) mod grammar;

use crate::cst;
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Recursive-descent parser over a lexed token stream.
///
/// Grammar productions live in [`grammar`]; each one takes `&mut Parser` and
/// returns an owned [`cst`] node or fails with the first [`ParseError`].
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    /// Lex `input`. Fails on the first lexical error.
    pub fn new(input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: Lexer::new(input).tokenize()?,
            index: 0,
        })
    }

    /// Parse a document, then verify that nothing but EOF remains in the
    /// token stream.
    pub fn parse(mut self) -> Result<cst::Document, ParseError> {
        let document = grammar::document::document(&mut self)?;

        let trailing = self.current();
        if trailing.kind() != TokenKind::Eof {
            return Err(Self::error_at(
                trailing,
                format!("Unsupported token '{}'", trailing.data()),
            ));
        }
        Ok(document)
    }

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    pub(crate) fn peek(&self) -> TokenKind {
        self.current().kind()
    }

    pub(crate) fn peek_data(&self) -> &str {
        self.current().data()
    }

    /// Consume and return the current token. The trailing EOF token is never
    /// consumed, so `current` stays valid.
    pub(crate) fn bump(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if token.kind() != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.peek() == kind {
            Ok(self.bump())
        } else {
            Err(Self::unexpected(self.current(), expected))
        }
    }

    /// Byte offset one past the most recently consumed token.
    pub(crate) fn last_consumed_end(&self) -> usize {
        match self.index {
            0 => 0,
            index => self.tokens[index - 1].end(),
        }
    }

    pub(crate) fn unexpected(token: &Token, expected: &str) -> ParseError {
        let found = match token.kind() {
            TokenKind::Eof => "EOF".to_string(),
            _ => format!("'{}'", token.data()),
        };
        Self::error_at(token, format!("expected {expected}, found {found}"))
    }

    pub(crate) fn error_at(token: &Token, message: impl Into<String>) -> ParseError {
        ParseError::new(message, token.line(), token.column())
    }

    pub(crate) fn loc(token: &Token) -> cst::Location {
        cst::Location {
            index: token.index(),
            line: token.line(),
            column: token.column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst;

    fn parse(input: &str) -> Result<cst::Document, ParseError> {
        Parser::new(input)?.parse()
    }

    #[test]
    fn it_parses_a_document_with_operations_and_fragments() {
        let document = parse(
            "query Hero { hero { ...heroDetails } }\n\
             fragment heroDetails on Character { name }",
        )
        .unwrap();

        assert_eq!(document.definitions.len(), 2);
        assert!(matches!(
            document.definitions[0],
            cst::Definition::Operation(_)
        ));
        assert!(matches!(
            document.definitions[1],
            cst::Definition::Fragment(_)
        ));
    }

    #[test]
    fn it_rejects_trailing_tokens_after_the_document() {
        let err = parse("query Hero { hero { name } } }").unwrap_err();
        assert_eq!(err.message, "Unsupported token '}'");
        assert_eq!(err.line, 1);
        assert_eq!(err.position, 30);
    }

    #[test]
    fn it_rejects_an_empty_document() {
        let err = parse("   ").unwrap_err();
        assert_eq!(
            err.message,
            "expected an Operation Definition or a Fragment Definition, found EOF"
        );
    }

    #[test]
    fn it_records_definition_spans() {
        let input = "query A { a }  query B { b }";
        let document = parse(input).unwrap();
        let spans: Vec<&str> = document
            .definitions
            .iter()
            .map(|definition| match definition {
                cst::Definition::Operation(operation) => {
                    &input[operation.span.start..operation.span.end]
                }
                cst::Definition::Fragment(fragment) => {
                    &input[fragment.span.start..fragment.span.end]
                }
            })
            .collect();
        assert_eq!(spans, vec!["query A { a }", "query B { b }"]);
    }
}
