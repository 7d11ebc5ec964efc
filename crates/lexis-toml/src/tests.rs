use expect_test::{Expect, expect};
use lexis_store::{CountOptions, SkipOptions};

use crate::SyntaxKind::{self, *};
use crate::{Node, Parse, SyntaxSet, Token, parse};

fn check(text: &str, expect: Expect) {
    let parse = parse(text);
    let mut actual = parse.root().debug_dump(text);
    for diagnostic in parse.diagnostics() {
        actual += &format!(
            "{}@{:?}: {}\n",
            diagnostic.severity(),
            diagnostic.range(),
            diagnostic.message()
        );
    }
    expect.assert_eq(&actual);
}

fn nth_node(parse: &Parse, kind: SyntaxKind, n: usize) -> &Node {
    parse.root().descendants().filter(|node| node.kind() == kind).nth(n).unwrap()
}

fn texts<'a>(text: &'a str, tokens: impl IntoIterator<Item = &'a Token>) -> Vec<&'a str> {
    tokens.into_iter().map(|token| token.text(text)).collect()
}

#[test]
fn key_value_tree() {
    check(
        r#"key = "value""#,
        expect![[r#"
            DOCUMENT@0..13
              KEY_VALUE@0..13
                KEY@0..3 "key"
                VALUE@6..13 "\"value\""
        "#]],
    );
}

#[test]
fn array_with_comment_tree() {
    check(
        "arr = [1, # comment\n2]",
        expect![[r#"
            DOCUMENT@0..22
              KEY_VALUE@0..22
                KEY@0..3 "arr"
                ARRAY@6..22
                  VALUE@7..8 "1"
                  VALUE@20..21 "2"
        "#]],
    );
}

#[test]
fn tables_and_array_tables() {
    check(
        "[server]\nport = 8080 # main\n\n[[peers]]\nname = 'a'\n",
        expect![[r#"
            DOCUMENT@0..50
              TABLE@0..20
                KEY@1..7 "server"
                KEY_VALUE@9..20
                  KEY@9..13 "port"
                  VALUE@16..20 "8080"
              ARRAY_TABLE@29..49
                KEY@31..36 "peers"
                KEY_VALUE@39..49
                  KEY@39..43 "name"
                  VALUE@46..49 "'a'"
        "#]],
    );
}

#[test]
fn inline_table_recovers_from_stray_comma() {
    check(
        "point = { x.y = 1, , z = [true,] }",
        expect![[r#"
            DOCUMENT@0..34
              KEY_VALUE@0..34
                KEY@0..5 "point"
                INLINE_TABLE@8..34
                  KEY_VALUE@10..17
                    KEY@10..13 "x.y"
                    VALUE@16..17 "1"
                  ERROR@19..20 ","
                  KEY_VALUE@21..32
                    KEY@21..22 "z"
                    ARRAY@25..32
                      VALUE@26..30 "true"
            error@19..20: expected a key, found `,`
        "#]],
    );
}

#[test]
fn missing_value() {
    check(
        "a = \nb = 1",
        expect![[r#"
            DOCUMENT@0..10
              KEY_VALUE@0..3
                KEY@0..1 "a"
              KEY_VALUE@5..10
                KEY@5..6 "b"
                VALUE@9..10 "1"
            error@5..6: expected a value
        "#]],
    );
}

#[test]
fn unclosed_array() {
    check(
        "a = [1 2",
        expect![[r#"
            DOCUMENT@0..8
              KEY_VALUE@0..8
                KEY@0..1 "a"
                ARRAY@4..8
                  VALUE@5..6 "1"
                  VALUE@7..8 "2"
            error@7..8: expected `,`
            error@8..8: expected `]`
        "#]],
    );
}

#[test]
fn stray_tokens() {
    check(
        "= 1",
        expect![[r#"
            DOCUMENT@0..3
              ERROR@0..1 "="
              KEY_VALUE@2..3
                KEY@2..3 "1"
            error@0..1: expected a key
            error@3..3: expected `=`
        "#]],
    );
}

#[test]
fn multiline_string_inside_array() {
    check(
        "a = ['''x''', 1]",
        expect![[r#"
            DOCUMENT@0..16
              KEY_VALUE@0..16
                KEY@0..1 "a"
                ARRAY@4..16
                  VALUE@5..12 "'''x'''"
                  VALUE@14..15 "1"
        "#]],
    );
}

#[test]
fn leading_zero_integer_value() {
    check(
        "007 = 0080",
        expect![[r#"
            DOCUMENT@0..10
              KEY_VALUE@0..10
                KEY@0..3 "007"
                VALUE@6..10 "0080"
            warning@6..10: leading zeros are not allowed in integers
        "#]],
    );
}

#[test]
fn key_value_navigation() {
    let text = r#"key = "value""#;
    let parse = parse(text);
    let store = parse.token_store();
    let pair = nth_node(&parse, KEY_VALUE, 0);
    let key = nth_node(&parse, KEY, 0);
    let value = nth_node(&parse, VALUE, 0);

    assert_eq!(store.first_token_of(pair, ()).map(|token| token.text(text)), Some("key"));
    assert_eq!(store.last_token_of(pair, ()).map(|token| token.text(text)), Some("\"value\""));
    assert_eq!(store.token_before(value, ()).map(|token| token.kind), Some(EQ));
    assert_eq!(store.token_after(key, ()).map(|token| token.kind), Some(EQ));
    assert_eq!(texts(text, store.tokens_of(pair, ())), ["key", "=", "\"value\""]);
    assert!(store.all_comments().next().is_none());
}

#[test]
fn comment_inside_array() {
    let text = "arr = [1, # comment\n2]";
    let parse = parse(text);
    let store = parse.token_store();
    let array = nth_node(&parse, ARRAY, 0);
    let one = nth_node(&parse, VALUE, 0);
    let two = nth_node(&parse, VALUE, 1);

    assert_eq!(texts(text, store.tokens_of(array, ())), ["[", "1", ",", "2", "]"]);
    assert_eq!(
        texts(text, store.tokens_of(array, CountOptions::new().include_comments())),
        ["[", "1", ",", "# comment", "2", "]"]
    );
    assert_eq!(texts(text, store.comments_directly_before(two)), ["# comment"]);
    assert!(store.comments_directly_after(one).is_empty());
    assert!(store.any_comments_between(one, two));
    assert!(store.is_space_between(one, two));

    let comma = store.token_after(one, ()).unwrap();
    assert_eq!(comma.kind, COMMA);
    assert_eq!(store.token_after(comma, ()).map(|token| token.text(text)), Some("2"));
    assert_eq!(
        store.token_after(comma, SkipOptions::new().include_comments()).map(|token| token.kind),
        Some(COMMENT)
    );
    assert_eq!(
        texts(text, store.tokens_between(one, two, CountOptions::new().include_comments())),
        [",", "# comment"]
    );
}

#[test]
fn trailing_comment_after_table_entry() {
    let text = "[server]\nport = 8080 # main\n\n[[peers]]\nname = 'a'\n";
    let parse = parse(text);
    let store = parse.token_store();
    let port = nth_node(&parse, KEY_VALUE, 0);
    let server = nth_node(&parse, TABLE, 0);

    assert_eq!(texts(text, store.comments_directly_after(port)), ["# main"]);
    assert_eq!(texts(text, store.comments_inside(server)), Vec::<&str>::new());
    assert_eq!(store.token_after(server, 1usize).map(|token| token.kind), Some(LEFT_BRACKET));
    assert_eq!(
        texts(text, store.tokens_around(port, 1, 1)),
        ["]", "port", "=", "8080", "["]
    );
}

#[test]
fn filter_by_kind_set() {
    const SCALARS: SyntaxSet = SyntaxSet::new([INTEGER, BOOLEAN, BASIC_STRING]);

    let text = "point = { x.y = 1, , z = [true,] }";
    let parse = parse(text);
    let store = parse.token_store();
    let table = nth_node(&parse, INLINE_TABLE, 0);

    let is_scalar = |token: &Token| SCALARS.contains(token.kind);
    assert_eq!(texts(text, store.tokens_of(table, &is_scalar)), ["1", "true"]);
    assert_eq!(store.last_token_of(table, &is_scalar).map(|token| token.text(text)), Some("true"));
    assert_eq!(
        texts(text, store.last_tokens_of(table, CountOptions::new().count(2))),
        ["]", "}"]
    );
}

#[test]
fn diagnostics_include_lexical_errors() {
    let parse = parse("a = \"open\n");
    let messages: Vec<&str> =
        parse.diagnostics().iter().map(|diagnostic| diagnostic.message()).collect();
    assert_eq!(messages, ["unterminated string"]);
    assert_eq!(parse.tokens().len(), 3);
}
