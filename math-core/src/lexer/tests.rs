use super::prelude::{tokenize, Operator, Token, TokenKind};

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_numbers() {
    let input = "10 3.14 .25 5. 1e10 2.5E-3 7e+2";

    let values = tokenize(input)
        .into_iter()
        .filter_map(|token| token.value)
        .collect::<Vec<f64>>();

    assert_eq!(values, vec![10.0, 3.14, 0.25, 5.0, 1e10, 2.5e-3, 700.0]);
}

#[test]
fn test_number_text_and_position() {
    let tokens = tokenize("  42.5 ");

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].text, "42.5");
    assert_eq!(tokens[0].position(), 2);
    assert_eq!(tokens[0].location.end, 6);
}

#[test]
fn test_exponent_without_digits_is_not_consumed() {
    let tokens = tokenize("2e");

    assert_eq!(kinds(&tokens), vec![TokenKind::Number, TokenKind::Ident, TokenKind::Eol]);
    assert_eq!(tokens[0].value, Some(2.0));
    assert_eq!(tokens[1].text, "e");

    let tokens = tokenize("2e+x");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Number,
            TokenKind::Ident,
            TokenKind::Operator(Operator::Plus),
            TokenKind::Ident,
            TokenKind::Eol
        ]
    );
}

#[test]
fn test_second_period_starts_new_number() {
    let tokens = tokenize("1.2.3");

    assert_eq!(kinds(&tokens), vec![TokenKind::Number, TokenKind::Number, TokenKind::Eol]);
    assert_eq!(tokens[1].value, Some(0.3));
}

#[test]
fn test_identifiers() {
    let tokens = tokenize("x _tmp y_1 exit Sin2");

    let idents = tokens.iter()
        .filter(|token| token.kind == TokenKind::Ident)
        .map(|token| token.text.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(idents, vec!["x", "_tmp", "y_1", "exit", "Sin2"]);
}

#[test]
fn test_operators_and_punctuation() {
    let tokens = tokenize("a=sin(x,2)+1-2*3/4%5^6");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Ident,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::Number,
            TokenKind::RParen,
            TokenKind::Operator(Operator::Plus),
            TokenKind::Number,
            TokenKind::Operator(Operator::Minus),
            TokenKind::Number,
            TokenKind::Operator(Operator::Star),
            TokenKind::Number,
            TokenKind::Operator(Operator::Slash),
            TokenKind::Number,
            TokenKind::Operator(Operator::Percent),
            TokenKind::Number,
            TokenKind::Operator(Operator::Caret),
            TokenKind::Number,
            TokenKind::Eol,
        ]
    );
}

#[test]
fn test_whitespace_is_not_emitted() {
    for input in ["2+2", "2 + 2", "  2   +   2  ", "\t2\t+\t2\r"] {
        let tokens = tokenize(input);

        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Number,
                TokenKind::Operator(Operator::Plus),
                TokenKind::Number,
                TokenKind::Eol
            ],
            "input {input:?}"
        );
    }
}

#[test]
fn test_invalid_characters_do_not_stop_scanning() {
    let tokens = tokenize("2 @ 3 $");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Number,
            TokenKind::Invalid,
            TokenKind::Number,
            TokenKind::Invalid,
            TokenKind::Eol
        ]
    );
    assert_eq!(tokens[1].text, "@");
    assert_eq!(tokens[1].position(), 2);
    assert_eq!(tokens[3].text, "$");
    assert_eq!(tokens[3].position(), 6);
}

#[test]
fn test_lone_period_is_invalid() {
    let tokens = tokenize(". 1");

    assert_eq!(tokens[0].kind, TokenKind::Invalid);
    assert_eq!(tokens[0].text, ".");
}

#[test]
fn test_always_ends_with_single_eol() {
    for input in ["", "   ", "1 + 2", "@@@"] {
        let tokens = tokenize(input);

        assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::Eol));
        assert_eq!(
            tokens.iter().filter(|token| token.kind == TokenKind::Eol).count(),
            1
        );
    }

    assert_eq!(tokenize("").len(), 1);
    assert_eq!(tokenize("").last().map(|token| token.position()), Some(0));
    assert_eq!(tokenize("1 + 2").last().map(|token| token.position()), Some(5));
}
