use super::*;
use super::scanner::{bump, is_word_char, skip_whitespace};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, ScriptError> {
    skip_whitespace(lexer);

    match lexer.peek {
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some('=') => tokenize_equals(lexer),
        Some('<') => tokenize_comparison(lexer, Token::Less, Token::LessEq),
        Some('>') => tokenize_comparison(lexer, Token::Greater, Token::GreaterEq),
        Some('!') => tokenize_not_equals(lexer),
        Some('#') => tokenize_comment(lexer),
        Some('"') => tokenize_string(lexer),
        Some(c) if is_word_char(c) => tokenize_word(lexer),
        Some(ch) => {
            bump(lexer);
            Err(ScriptError::InvalidToken {
                token: ch.to_string(),
                line: lexer.line,
                column: lexer.column,
                hint: Some("Unexpected character in input".into()),
                code: Some(104),
            })
        }
        None => Ok(Token::Eof),
    }
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, ScriptError> {
    bump(lexer);
    Ok(token)
}

/// `=` and `==` both lex as Equals; newer game scripts use `==` for
/// comparison but the document model stores pairs either way.
fn tokenize_equals(lexer: &mut Lexer) -> Result<Token, ScriptError> {
    bump(lexer);
    if lexer.peek == Some('=') {
        bump(lexer);
    }
    Ok(Token::Equals)
}

fn tokenize_comparison(lexer: &mut Lexer, bare: Token, with_eq: Token) -> Result<Token, ScriptError> {
    bump(lexer);
    if lexer.peek == Some('=') {
        bump(lexer);
        Ok(with_eq)
    } else {
        Ok(bare)
    }
}

fn tokenize_not_equals(lexer: &mut Lexer) -> Result<Token, ScriptError> {
    bump(lexer);
    if lexer.peek == Some('=') {
        bump(lexer);
        Ok(Token::NotEq)
    } else {
        Err(ScriptError::InvalidToken {
            token: "!".into(),
            line: lexer.line,
            column: lexer.column,
            hint: Some("Expected '=' after '!'".into()),
            code: Some(105),
        })
    }
}

/// Comment runs to end of line. The leading '#' is kept and trailing
/// whitespace trimmed, matching how the source text reads.
fn tokenize_comment(lexer: &mut Lexer) -> Result<Token, ScriptError> {
    let mut text = String::new();
    while let Some(ch) = lexer.peek {
        if ch == '\n' {
            break;
        }
        text.push(ch);
        bump(lexer);
    }
    Ok(Token::Comment(text.trim_end().to_string()))
}

fn tokenize_string(lexer: &mut Lexer) -> Result<Token, ScriptError> {
    bump(lexer); // consume opening quote
    let mut content = String::new();

    loop {
        match lexer.peek {
            Some('"') => {
                bump(lexer); // consume the closing quote
                return Ok(Token::String(content));
            }
            Some('\\') => {
                bump(lexer); // consume '\'
                match bump(lexer) {
                    Some('"') => content.push('"'),
                    Some('\\') => content.push('\\'),
                    Some(other) => {
                        // Not a recognised escape, keep it literally.
                        content.push('\\');
                        content.push(other);
                    }
                    None => {
                        return Err(ScriptError::UnclosedString {
                            line: lexer.line,
                            column: lexer.column,
                            hint: Some("Trailing backslash in string".into()),
                            code: Some(103),
                        });
                    }
                }
            }
            Some(ch) => {
                content.push(ch);
                bump(lexer);
            }
            None => {
                return Err(ScriptError::UnclosedString {
                    line: lexer.line,
                    column: lexer.column,
                    hint: Some("String literal not closed".into()),
                    code: Some(103),
                });
            }
        }
    }
}

fn tokenize_word(lexer: &mut Lexer) -> Result<Token, ScriptError> {
    let mut word = String::new();

    while let Some(ch) = lexer.peek {
        if is_word_char(ch) {
            word.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    Ok(Token::Word(word))
}
