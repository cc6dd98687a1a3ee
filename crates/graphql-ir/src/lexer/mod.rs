mod cursor;
mod token;
mod token_kind;

use crate::error::ParseError;

use cursor::Cursor;

pub use token::Token;
pub use token_kind::TokenKind;

/// Turns a GraphQL document into a stream of [`Token`]s.
///
/// Whitespace, commas, and comments are skipped; the stream always ends with
/// a single [`TokenKind::Eof`] token. The first lexical error aborts the
/// document.
pub(crate) struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_ignored();

            let index = self.cursor.index();
            let line = self.cursor.line();
            let column = self.cursor.column();

            let Some(first) = self.cursor.bump() else {
                tokens.push(Token::new(TokenKind::Eof, String::new(), index, line, column));
                return Ok(tokens);
            };

            let token = match first {
                '"' => self.string_value(index, line, column)?,
                '.' => self.spread(index, line, column)?,
                c if is_name_start(c) => self.name(c, index, line, column),
                c if c == '-' || is_digit_char(c) => self.number(c, index, line, column)?,
                '!' => self.punctuator(TokenKind::Bang, first, index, line, column),
                '$' => self.punctuator(TokenKind::Dollar, first, index, line, column),
                '(' => self.punctuator(TokenKind::LParen, first, index, line, column),
                ')' => self.punctuator(TokenKind::RParen, first, index, line, column),
                ':' => self.punctuator(TokenKind::Colon, first, index, line, column),
                '=' => self.punctuator(TokenKind::Eq, first, index, line, column),
                '@' => self.punctuator(TokenKind::At, first, index, line, column),
                '[' => self.punctuator(TokenKind::LBracket, first, index, line, column),
                ']' => self.punctuator(TokenKind::RBracket, first, index, line, column),
                '{' => self.punctuator(TokenKind::LCurly, first, index, line, column),
                '}' => self.punctuator(TokenKind::RCurly, first, index, line, column),
                '|' => self.punctuator(TokenKind::Pipe, first, index, line, column),
                c => {
                    return Err(ParseError::new(
                        format!("Unexpected character '{c}'"),
                        line,
                        column,
                    ))
                }
            };
            tokens.push(token);
        }
    }

    fn punctuator(
        &self,
        kind: TokenKind,
        c: char,
        index: usize,
        line: usize,
        column: usize,
    ) -> Token {
        Token::new(kind, c.to_string(), index, line, column)
    }

    fn string_value(
        &mut self,
        index: usize,
        line: usize,
        column: usize,
    ) -> Result<Token, ParseError> {
        let mut buf = String::from('"');

        loop {
            match self.cursor.bump() {
                Some('"') => {
                    buf.push('"');
                    return Ok(Token::new(TokenKind::StringValue, buf, index, line, column));
                }
                Some('\\') => {
                    buf.push('\\');
                    match self.cursor.bump() {
                        Some(escaped) => buf.push(escaped),
                        None => {
                            return Err(ParseError::new("Unterminated string value", line, column))
                        }
                    }
                }
                Some(c) if is_line_terminator(c) => {
                    return Err(ParseError::new("Unterminated string value", line, column))
                }
                Some(c) => buf.push(c),
                None => return Err(ParseError::new("Unterminated string value", line, column)),
            }
        }
    }

    fn spread(&mut self, index: usize, line: usize, column: usize) -> Result<Token, ParseError> {
        match (self.cursor.first(), self.cursor.second()) {
            (Some('.'), Some('.')) => {
                self.cursor.bump();
                self.cursor.bump();
                Ok(Token::new(
                    TokenKind::Spread,
                    "...".to_string(),
                    index,
                    line,
                    column,
                ))
            }
            _ => Err(ParseError::new(
                "Unterminated spread operator, expected `...`",
                line,
                column,
            )),
        }
    }

    fn name(&mut self, first: char, index: usize, line: usize, column: usize) -> Token {
        let mut buf = String::new();
        buf.push(first);

        while let Some(c) = self.cursor.first() {
            if is_name_start(c) || is_digit_char(c) {
                buf.push(c);
                self.cursor.bump();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Name, buf, index, line, column)
    }

    fn number(
        &mut self,
        first: char,
        index: usize,
        line: usize,
        column: usize,
    ) -> Result<Token, ParseError> {
        let mut buf = String::new();
        buf.push(first);

        let mut has_exponent = false;
        let mut has_fractional = false;
        let mut has_digit = is_digit_char(first);

        while let Some(c) = self.cursor.first() {
            match c {
                'e' | 'E' => {
                    if !has_digit || has_exponent {
                        return Err(ParseError::new(
                            format!("Unexpected character '{c}' in number literal"),
                            line,
                            column,
                        ));
                    }
                    buf.push(c);
                    self.cursor.bump();
                    has_exponent = true;
                    if matches!(self.cursor.first(), Some('+') | Some('-')) {
                        if let Some(sign) = self.cursor.bump() {
                            buf.push(sign);
                        }
                    }
                }
                '.' => {
                    if !has_digit || has_fractional || has_exponent {
                        return Err(ParseError::new(
                            format!("Unexpected character '{c}' in number literal"),
                            line,
                            column,
                        ));
                    }
                    buf.push(c);
                    self.cursor.bump();
                    has_fractional = true;
                }
                c if is_digit_char(c) => {
                    buf.push(c);
                    self.cursor.bump();
                    has_digit = true;
                }
                _ => break,
            }
        }

        if !has_digit {
            return Err(ParseError::new(
                format!("Unexpected character '{first}'"),
                line,
                column,
            ));
        }

        let kind = if has_exponent || has_fractional {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Ok(Token::new(kind, buf, index, line, column))
    }

    fn skip_ignored(&mut self) {
        loop {
            match self.cursor.first() {
                Some(c) if is_ignored_char(c) => {
                    self.cursor.bump();
                }
                Some('#') => {
                    while !self.cursor.is_eof() {
                        if let Some(c) = self.cursor.first() {
                            if is_line_terminator(c) {
                                break;
                            }
                        }
                        self.cursor.bump();
                    }
                }
                _ => break,
            }
        }
    }
}

// Insignificant characters: whitespace, line terminators, commas, and the
// Unicode byte order mark.
fn is_ignored_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | ',' | '\u{FEFF}')
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_name_start(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_')
}

fn is_digit_char(c: char) -> bool {
    c.is_ascii_digit()
}
