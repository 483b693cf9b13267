use super::*;

pub(super) fn parse_file(parser: &mut Parser) -> Result<Block, ScriptError> {
    parse_block_body(parser, true)
}

/// Parse statements until `}` (nested block) or end of input (top level).
fn parse_block_body(parser: &mut Parser, top_level: bool) -> Result<Block, ScriptError> {
    let mut block = Block::default();

    loop {
        match parser.peek() {
            Some(Token::Eof) | None => {
                if top_level {
                    break;
                }
                return Err(ScriptError::UnexpectedEof {
                    message: "Block not closed before end of file".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Missing '}'".into()),
                    code: Some(202),
                });
            }
            Some(Token::RBrace) => {
                if top_level {
                    return Err(ScriptError::InvalidToken {
                        token: "}".into(),
                        line: parser.line(),
                        column: parser.column(),
                        hint: Some("'}' with no matching '{'".into()),
                        code: Some(203),
                    });
                }
                parser.bump()?; // consume the closing brace
                break;
            }
            Some(Token::Comment(_)) => {
                // Comments are kept as scalar values for fidelity.
                if let Token::Comment(text) = parser.bump()? {
                    block.values.push(text);
                }
            }
            Some(Token::String(_)) => {
                if let Token::String(value) = parser.bump()? {
                    block.values.push(value);
                }
            }
            Some(Token::LBrace) => {
                // Anonymous block; rare but legal in game files.
                parser.bump()?;
                let child = parse_block_body(parser, false)?;
                block.children.push((String::new(), child));
            }
            Some(Token::Word(_)) => {
                parse_statement(parser, &mut block)?;
            }
            Some(tok) => {
                return Err(ScriptError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Expected key, value or '}'".into()),
                    code: Some(204),
                });
            }
        }
    }

    Ok(block)
}

/// A word either opens `key <op> value` / `key <op> { ... }`, or stands alone
/// as a scalar list entry.
fn parse_statement(parser: &mut Parser, block: &mut Block) -> Result<(), ScriptError> {
    let key = match parser.bump()? {
        Token::Word(w) => w,
        _ => unreachable!(),
    };

    if !parser.peek().is_some_and(Token::is_operator) {
        block.values.push(key);
        return Ok(());
    }
    // Comparison operators pair up exactly like '='; the operator itself is
    // not part of the document model.
    parser.bump()?;

    match parser.peek() {
        Some(Token::LBrace) => {
            parser.bump()?;
            let child = parse_block_body(parser, false)?;
            block.children.push((key, child));
        }
        Some(Token::Word(_)) => {
            if let Token::Word(value) = parser.bump()? {
                block.pairs.push((key, value));
            }
        }
        Some(Token::String(_)) => {
            if let Token::String(value) = parser.bump()? {
                block.pairs.push((key, value));
            }
        }
        _ => {
            return Err(ScriptError::SyntaxError {
                message: format!("Expected value or block after operator for key '{}'", key),
                line: parser.line(),
                column: parser.column(),
                hint: None,
                code: Some(205),
            });
        }
    }

    Ok(())
}
