use std::fmt::{self, Display, Formatter};
use strum_macros::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,

    Identifier,
    Operator,
    Symbol,
    Keyword,
    Number,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub row: usize,
    pub col: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

pub fn is_keyword(text: &str) -> bool {
    matches!(
        text,
        "if" | "elif" | "else" | "while" | "for" | "repeat" | "def" | "ret" | "break" | "continue"
    )
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, row: usize, col: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.to_owned(),
            row,
            col,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Matches on both kind and lexeme, so an identifier spelled `if` can
    /// never pass for the keyword.
    pub fn is_exactly(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }

    pub fn is_symbol(&self, lexeme: &str) -> bool {
        self.is_exactly(TokenKind::Symbol, lexeme)
    }

    pub fn is_keyword(&self, lexeme: &str) -> bool {
        self.is_exactly(TokenKind::Keyword, lexeme)
    }
}
