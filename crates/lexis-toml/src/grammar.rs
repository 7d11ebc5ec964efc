use crate::SyntaxKind::{self, *};
use crate::SyntaxSet;
use crate::parser::Parser;

pub(crate) const KEY_FIRST: SyntaxSet =
    SyntaxSet::new([BARE, BASIC_STRING, LITERAL_STRING, INTEGER, FLOAT, BOOLEAN]);

pub(crate) const SCALAR_FIRST: SyntaxSet = SyntaxSet::new([
    BASIC_STRING,
    LITERAL_STRING,
    MULTILINE_BASIC_STRING,
    MULTILINE_LITERAL_STRING,
    INTEGER,
    FLOAT,
    BOOLEAN,
]);

pub(crate) const VALUE_FIRST: SyntaxSet =
    SCALAR_FIRST.union(&SyntaxSet::new([LEFT_BRACKET, LEFT_BRACE]));

const ITEM_RECOVERY: SyntaxSet = KEY_FIRST.with(LEFT_BRACKET);

pub(crate) fn document(p: &mut Parser<'_>) {
    while !p.at(EOF) {
        if p.at(LEFT_BRACKET) {
            table(p);
        } else {
            item(p);
        }
    }
}

/// `[a.b]` or `[[a.b]]` header followed by its key/value pairs.
fn table(p: &mut Parser<'_>) {
    let m = p.start();
    let array_table = p.nth_at(1, LEFT_BRACKET);

    p.advance();
    if array_table {
        p.advance();
    }

    key(p, &ITEM_RECOVERY);

    p.expect(RIGHT_BRACKET);
    if array_table {
        p.expect(RIGHT_BRACKET);
    }

    while !p.at(EOF) && !p.at(LEFT_BRACKET) {
        item(p);
    }

    m.complete(p, if array_table { ARRAY_TABLE } else { TABLE });
}

fn item(p: &mut Parser<'_>) {
    if p.at_set(&KEY_FIRST) {
        key_value(p);
    } else {
        p.error_recover("expected a key", &SyntaxSet::new([LEFT_BRACKET]));
    }
}

fn key_value(p: &mut Parser<'_>) {
    let m = p.start();
    key(p, &VALUE_FIRST);
    if p.expect(EQ) || p.at_set(&VALUE_FIRST) {
        value(p, &ITEM_RECOVERY);
    }
    m.complete(p, KEY_VALUE);
}

/// Dotted key; each segment is a bare or quoted key.
fn key(p: &mut Parser<'_>, recovery: &SyntaxSet) {
    let m = p.start();
    loop {
        if p.at_set(&KEY_FIRST) {
            p.advance();
        } else {
            p.error_recover("expected a key", recovery);
            break;
        }

        if !p.eat(DOT) {
            break;
        }
    }
    m.complete(p, KEY);
}

fn value(p: &mut Parser<'_>, recovery: &SyntaxSet) -> bool {
    match p.peek_kind() {
        LEFT_BRACKET => array(p),
        LEFT_BRACE => inline_table(p),
        kind if SCALAR_FIRST.contains(kind) => {
            if kind == INTEGER && has_leading_zero(p.current_text()) {
                p.warning("leading zeros are not allowed in integers");
            }

            let m = p.start();
            p.advance();
            m.complete(p, VALUE);
        }
        _ => {
            p.error_recover("expected a value", recovery);
            return false;
        }
    }

    true
}

/// `007` and `-01`, but not `0`, `0x1f` or `0.5`.
fn has_leading_zero(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut chars = digits.chars();
    chars.next() == Some('0') && chars.next().is_some_and(|c| c.is_ascii_digit() || c == '_')
}

fn array(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        LEFT_BRACKET,
        RIGHT_BRACKET,
        COMMA,
        "expected a value, found `,`",
        &VALUE_FIRST,
        |p| value(p, &SyntaxSet::new([COMMA, RIGHT_BRACKET])),
    );
    m.complete(p, ARRAY);
}

fn inline_table(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        LEFT_BRACE,
        RIGHT_BRACE,
        COMMA,
        "expected a key, found `,`",
        &KEY_FIRST,
        |p| {
            if !p.at_set(&KEY_FIRST) {
                p.error_recover("expected a key", &SyntaxSet::new([COMMA, RIGHT_BRACE]));
                return false;
            }
            key_value(p);
            true
        },
    );
    m.complete(p, INLINE_TABLE);
}

pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    unexpected_delim_message: &'static str,
    first_set: &SyntaxSet,
    mut parser: impl FnMut(&mut Parser<'_>) -> bool,
) {
    debug_assert_eq!(p.peek_kind(), bra);
    p.advance();

    while !p.at(ket) && !p.at(EOF) {
        if p.at(delim) {
            let m = p.start();
            p.error(unexpected_delim_message);
            p.advance();
            m.complete(p, ERROR);
            continue;
        }

        if !parser(p) {
            break;
        }

        if !p.eat(delim) {
            if p.at_set(first_set) {
                p.expect(delim);
            } else {
                break;
            }
        }
    }

    p.expect(ket);
}
