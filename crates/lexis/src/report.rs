use lexis_store::{SkipOptions, TokenStore};
use lexis_toml::{Parse, Token};
use line_index::LineIndex;
use serde::Serialize;
use text_size::TextRange;

#[derive(Serialize)]
struct TokenRecord<'a> {
    #[serde(rename = "type")]
    category: &'static str,
    kind: String,
    start: u32,
    end: u32,
    line: u32,
    column: u32,
    text: &'a str,
}

fn records<'a>(text: &'a str, parse: &Parse) -> Vec<TokenRecord<'a>> {
    let line_index = LineIndex::new(text);

    parse
        .tokens()
        .iter()
        .map(|token| {
            let position = line_index.line_col(token.range.start());
            TokenRecord {
                category: token.kind.category(),
                kind: format!("{:?}", token.kind),
                start: token.range.start().into(),
                end: token.range.end().into(),
                line: position.line + 1,
                column: position.col + 1,
                text: token.text(text),
            }
        })
        .collect()
}

/// One `line:column KIND@range "text"` line per token and comment.
pub(crate) fn tokens(text: &str, parse: &Parse) -> String {
    records(text, parse)
        .iter()
        .map(|record| {
            format!(
                "{}:{} {}@{}..{} {:?}\n",
                record.line, record.column, record.kind, record.start, record.end, record.text
            )
        })
        .collect()
}

pub(crate) fn tokens_json(text: &str, parse: &Parse) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(&records(text, parse))?;
    json.push('\n');
    Ok(json)
}

fn describe(text: &str, token: Option<&Token>) -> String {
    match token {
        Some(token) => format!("{:?}@{:?} {:?}", token.kind, token.range, token.text(text)),
        None => "none".to_owned(),
    }
}

fn describe_all(text: &str, tokens: &[&Token]) -> String {
    if tokens.is_empty() {
        return "none".to_owned();
    }

    let described: Vec<String> = tokens.iter().map(|&token| describe(text, Some(token))).collect();
    described.join(", ")
}

/// Neighbourhood of `range`: adjacent tokens, boundary tokens, adjacent
/// comments and whether whitespace separates it from its neighbours.
pub(crate) fn around(
    text: &str,
    store: &TokenStore<Token>,
    range: TextRange,
    skip: usize,
    include_comments: bool,
) -> String {
    let options = SkipOptions::new().skip(skip);
    let options = if include_comments { options.include_comments() } else { options };

    let before = store.token_before(&range, options);
    let after = store.token_after(&range, options);
    let space_before =
        store.token_before(&range, ()).map(|token| store.is_space_between(token, &range));
    let space_after =
        store.token_after(&range, ()).map(|token| store.is_space_between(&range, token));

    let describe_space = |space: Option<bool>| match space {
        Some(space) => space.to_string(),
        None => "none".to_owned(),
    };

    let lines = [
        format!("range: {range:?} {:?}", &text[range]),
        format!("token before: {}", describe(text, before)),
        format!("token after: {}", describe(text, after)),
        format!("first token: {}", describe(text, store.first_token_of(&range, options))),
        format!("last token: {}", describe(text, store.last_token_of(&range, options))),
        format!("comments before: {}", describe_all(text, &store.comments_directly_before(&range))),
        format!("comments after: {}", describe_all(text, &store.comments_directly_after(&range))),
        format!("comments inside: {}", describe_all(text, &store.comments_inside(&range))),
        format!("space before: {}", describe_space(space_before)),
        format!("space after: {}", describe_space(space_after)),
    ];

    let mut buf = String::new();
    for line in lines {
        buf.push_str(&line);
        buf.push('\n');
    }
    buf
}
