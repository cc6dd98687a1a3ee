use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Bang,     // !
    Dollar,   // $
    LParen,   // (
    RParen,   // )
    Spread,   // ...
    Colon,    // :
    Eq,       // =
    At,       // @
    LBracket, // [
    RBracket, // ]
    LCurly,   // {
    RCurly,   // }
    Pipe,     // |
    Name,
    Int,
    Float,
    StringValue,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = match self {
            TokenKind::Bang => "'!'",
            TokenKind::Dollar => "'$'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Spread => "'...'",
            TokenKind::Colon => "':'",
            TokenKind::Eq => "'='",
            TokenKind::At => "'@'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LCurly => "'{'",
            TokenKind::RCurly => "'}'",
            TokenKind::Pipe => "'|'",
            TokenKind::Name => "a Name",
            TokenKind::Int => "an Int",
            TokenKind::Float => "a Float",
            TokenKind::StringValue => "a String",
            TokenKind::Eof => "EOF",
        };
        f.write_str(display)
    }
}
