use std::str::Chars;
use crate::ScriptError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    /// Bare token: a key, number, date, `@variable`, `yes`/`no`, ...
    Word(String),
    /// Quoted string literal, quotes stripped.
    String(String),
    /// A `#` comment, kept as a token so the parser can retain it.
    Comment(String),

    // --- structure ---
    LBrace,
    RBrace,

    // --- operators ---
    Equals,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    NotEq,

    Eof,
}

impl Token {
    /// True for every operator that separates a key from its value.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Equals
                | Token::Less
                | Token::Greater
                | Token::LessEq
                | Token::GreaterEq
                | Token::NotEq
        )
    }
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn next_token(&mut self) -> Result<Token, ScriptError> {
        tokenizer::next_token(self)
    }
}

#[cfg(test)]
mod tests;
