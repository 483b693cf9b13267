use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip whitespace, newlines included. Newlines carry no meaning in this
/// dialect; blocks are delimited by braces alone. Comments are NOT skipped
/// here, they are tokenized so the parser can keep them as values.
pub(super) fn skip_whitespace(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                bump(lexer);
            }
            _ => break,
        }
    }
}

/// True for characters that may appear in a bare word. Paradox script words
/// are generous: numbers, dates (`2200.01.01`), variables (`@tier1cost`),
/// event ids (`action.23`) and negative numbers all lex as one word.
pub(super) fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '{' | '}' | '=' | '<' | '>' | '!' | '#' | '"')
}
