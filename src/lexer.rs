use crate::error::CalcError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    Integer(String),
    Decimal(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}

pub(crate) struct Lexer<'a> {
    src: &'a str,
    i: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        Self { src: s, i: 0 }
    }
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.i).copied()
    }
    fn bump(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.i += 1;
        }
        ch
    }
    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.i += 1;
            } else {
                break;
            }
        }
    }
    pub(crate) fn next_token(&mut self) -> Result<Token, CalcError> {
        self.skip_ws();
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };
        match c {
            b'(' => {
                self.bump();
                Ok(Token::LParen)
            }
            b')' => {
                self.bump();
                Ok(Token::RParen)
            }
            b'+' => {
                self.bump();
                Ok(Token::Plus)
            }
            b'-' => {
                self.bump();
                Ok(Token::Minus)
            }
            b'*' => {
                self.bump();
                Ok(Token::Star)
            }
            b'/' => {
                self.bump();
                Ok(Token::Slash)
            }
            c if c.is_ascii_digit() || c == b'.' => Ok(self.lex_number()),
            c if c.is_ascii_alphabetic() || c == b'_' => Ok(self.lex_ident()),
            _ => {
                // Skip the whole (possibly multi-byte) character so lexing can resume.
                let start = self.i;
                let ch = self.src[start..].chars().next().unwrap_or('\u{fffd}');
                self.i += ch.len_utf8();
                Err(CalcError::Parser(format!(
                    "unexpected character '{}' at offset {}",
                    ch, start
                )))
            }
        }
    }
    fn lex_number(&mut self) -> Token {
        let start = self.i;
        let mut seen_dot = false;
        let mut seen_exp = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.i += 1;
            } else if c == b'.' && !seen_dot && !seen_exp {
                seen_dot = true;
                self.i += 1;
            } else if (c == b'e' || c == b'E') && !seen_exp {
                seen_exp = true;
                self.i += 1;
                if let Some(sign) = self.peek() {
                    if sign == b'+' || sign == b'-' {
                        self.i += 1;
                    }
                }
                // Missing exponent digits are left for decoding to reject.
                while let Some(d) = self.peek() {
                    if d.is_ascii_digit() {
                        self.i += 1;
                    } else {
                        break;
                    }
                }
            } else {
                break;
            }
        }
        let text = self.src[start..self.i].to_string();
        if seen_dot || seen_exp {
            Token::Decimal(text)
        } else {
            Token::Integer(text)
        }
    }
    fn lex_ident(&mut self) -> Token {
        let start = self.i;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' {
                self.i += 1;
            } else {
                break;
            }
        }
        Token::Ident(self.src[start..self.i].to_string())
    }
}

/// Lexes the whole input. Every unexpected character is reported, not just
/// the first one.
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, Vec<CalcError>> {
    let mut lex = Lexer::new(src);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    loop {
        match lex.next_token() {
            Ok(Token::Eof) => {
                tokens.push(Token::Eof);
                break;
            }
            Ok(tok) => tokens.push(tok),
            Err(e) => errors.push(e),
        }
    }
    if errors.is_empty() { Ok(tokens) } else { Err(errors) }
}
