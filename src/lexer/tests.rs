use super::*;

fn lex_all(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token().expect("lexing failed");
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}

#[test]
fn test_simple_pair() {
    let tokens = lex_all("cost = 200");
    assert_eq!(
        tokens,
        vec![
            Token::Word("cost".into()),
            Token::Equals,
            Token::Word("200".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_braces_and_nesting() {
    let tokens = lex_all("ai_weight = { weight = 0 }");
    assert_eq!(
        tokens,
        vec![
            Token::Word("ai_weight".into()),
            Token::Equals,
            Token::LBrace,
            Token::Word("weight".into()),
            Token::Equals,
            Token::Word("0".into()),
            Token::RBrace,
            Token::Eof,
        ]
    );
}

#[test]
fn test_variable_and_date_words() {
    let tokens = lex_all("@tier1cost 2200.01.01 -0.5 action.23");
    assert_eq!(
        tokens,
        vec![
            Token::Word("@tier1cost".into()),
            Token::Word("2200.01.01".into()),
            Token::Word("-0.5".into()),
            Token::Word("action.23".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_quoted_string() {
    let tokens = lex_all(r#"name = "Prime Species""#);
    assert_eq!(
        tokens,
        vec![
            Token::Word("name".into()),
            Token::Equals,
            Token::String("Prime Species".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_comment_is_a_token() {
    let tokens = lex_all("# vanilla traits\ncost = 1");
    assert_eq!(tokens[0], Token::Comment("# vanilla traits".into()));
    assert_eq!(tokens[1], Token::Word("cost".into()));
}

#[test]
fn test_comparison_operators() {
    let tokens = lex_all("num_pops > 10 planet_size <= 25 count != 0 value == 1");
    let ops: Vec<&Token> = tokens.iter().filter(|t| t.is_operator()).collect();
    assert_eq!(
        ops,
        vec![&Token::Greater, &Token::LessEq, &Token::NotEq, &Token::Equals]
    );
}

#[test]
fn test_newlines_are_insignificant() {
    let tokens = lex_all("a = 1\nb = 2\n");
    assert_eq!(tokens.len(), 7); // three tokens per pair plus Eof
}

#[test]
fn test_unclosed_string() {
    let mut lexer = Lexer::new("name = \"oops");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    let err = lexer.next_token().unwrap_err();
    match err {
        ScriptError::UnclosedString { code, .. } => assert_eq!(code, Some(103)),
        other => panic!("Expected UnclosedString, got {:?}", other),
    }
}

#[test]
fn test_bare_bang_is_invalid() {
    let mut lexer = Lexer::new("!");
    let err = lexer.next_token().unwrap_err();
    match err {
        ScriptError::InvalidToken { token, .. } => assert_eq!(token, "!"),
        other => panic!("Expected InvalidToken, got {:?}", other),
    }
}
