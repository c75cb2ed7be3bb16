use std::fmt::Display;

use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Comma,
    Colon,
    OpenBrace,
    CloseBrace,
    Arrow,
    Ident(String)
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Equals => write!(f, "="),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::OpenBrace => write!(f, "{{"),
            Token::CloseBrace => write!(f, "}}"),
            Token::Arrow => write!(f, "->"),
            Token::Ident(text) => write!(f, "{}", text),
        }
    }
}

fn is_special(c: char) -> bool {
    matches!(c, '=' | ',' | ':' | '{' | '}' | '-')
}

pub fn lex_arrow(line: &mut impl Iterator<Item = char>) -> Result<Token> {
    line.next(); // Consume the dash
    if line.next() != Some('>') {
        return Err(CompileErrorType::StrayDash);
    }

    Ok(Token::Arrow)
}

pub fn lex_ident(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    Ok(Token::Ident(line.peeking_take_while(|&c| !c.is_whitespace() && !is_special(c)).collect()))
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        let single = match c {
            '=' => Some(Token::Equals),
            ',' => Some(Token::Comma),
            ':' => Some(Token::Colon),
            '{' => Some(Token::OpenBrace),
            '}' => Some(Token::CloseBrace),
            _ => None
        };

        if let Some(token) = single {
            line_chars.next();
            tokens.push(token);
        } else if c == '-' {
            tokens.push(lex_arrow(&mut line_chars)?);
        } else if !c.is_whitespace() {
            tokens.push(lex_ident(&mut line_chars)?);
        } else {
            line_chars.next();
        }
    }

    Ok(tokens)
}
