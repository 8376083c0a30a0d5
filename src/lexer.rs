use crate::token::{self, Token, TokenKind};

pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
    row: usize,
    col: usize,
}

static TWO_CHAR_OPERATORS: [&str; 14] = [
    "==", "!=", ">=", "<=", "&&", "||", "+=", "-=", "*=", "/=", "%=", "^=", "++", "--",
];

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'@'
}

fn is_single_operator(c: u8) -> bool {
    matches!(
        c,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'^' | b'=' | b'<' | b'>' | b'!' | b'.'
    )
}

fn is_symbol(c: u8) -> bool {
    matches!(
        c,
        b'{' | b'}' | b'(' | b')' | b'[' | b']' | b';' | b':' | b','
    )
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl Lexer {
    pub fn new(input: String) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            row: 1,
            col: 1,
        };
        lexer.read_char();
        lexer
    }

    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn read_char(&mut self) {
        if self.ch == b'\n' {
            self.row += 1;
            self.col = 1;
        } else if self.read_position > 0 {
            self.col += 1;
        }
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        if self.at_end() {
            return None;
        }

        let (row, col) = (self.row, self.col);
        let start = self.position;

        let kind = match self.ch {
            b'"' => {
                self.read_char();
                while !self.at_end() && self.ch != b'"' {
                    self.read_char();
                }
                if self.at_end() {
                    // An unterminated literal is reported at its opening quote.
                    return Some(Token::new(TokenKind::Illegal, "\"", row, col));
                }
                self.read_char();
                TokenKind::Text
            }
            c if is_letter(c) => {
                while is_letter(self.ch) && !self.at_end() {
                    self.read_char();
                }
                if token::is_keyword(&self.input[start..self.position]) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                }
            }
            c if c.is_ascii_digit() => {
                self.read_number();
                TokenKind::Number
            }
            c => {
                let pair = [c, self.peek_char()];
                if TWO_CHAR_OPERATORS.iter().any(|op| op.as_bytes() == pair) {
                    self.read_char();
                    self.read_char();
                    TokenKind::Operator
                } else if is_single_operator(c) {
                    self.read_char();
                    TokenKind::Operator
                } else if is_symbol(c) {
                    self.read_char();
                    TokenKind::Symbol
                } else {
                    let width = self.input[start..].chars().next().map_or(1, char::len_utf8);
                    for _ in 0..width {
                        self.read_char();
                    }
                    TokenKind::Illegal
                }
            }
        };

        Some(Token::new(kind, &self.input[start..self.position], row, col))
    }

    fn read_number(&mut self) {
        while self.ch.is_ascii_digit() && !self.at_end() {
            self.read_char();
        }
        if self.ch == b'.' && !self.at_end() {
            self.read_char();
            while self.ch.is_ascii_digit() && !self.at_end() {
                self.read_char();
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_ascii_whitespace() && !self.at_end() {
            self.read_char();
        }
    }
}
