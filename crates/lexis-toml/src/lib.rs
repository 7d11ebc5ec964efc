//! Tokenizer and parser for a subset of TOML.
//!
//! Parsing produces three things: the flat list of tokens and comments, a
//! tree of [`Node`]s that only records ranges, and diagnostics. The flat list
//! feeds a [`TokenStore`] so tools can ask for the tokens around any node.

mod cursor;
mod grammar;
mod node;
mod parser;
mod syntax_kind;
mod syntax_set;
#[cfg(test)]
mod tests;
mod tokenizer;

use lexis_errors::Diagnostic;
use lexis_store::TokenStore;

pub use node::{Node, Preorder, WalkEvent};
pub use syntax_kind::SyntaxKind;
pub use syntax_set::SyntaxSet;
pub use tokenizer::{Token, Tokenizer, tokenize};

#[derive(Debug, Clone)]
pub struct Parse {
    tokens: Vec<Token>,
    root: Node,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    /// Tokens and comments in document order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Lexical diagnostics first, then syntax diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn token_store(&self) -> TokenStore<Token> {
        TokenStore::new(self.tokens.iter().copied(), |token: &Token| token.kind.is_trivia())
    }
}

pub fn parse(text: &str) -> Parse {
    let mut parser = parser::Parser::new(text);
    grammar::document(&mut parser);
    let (tokens, root, diagnostics) = parser.finish();

    log::debug!(
        "parsed {} tokens into {} nodes with {} diagnostics",
        tokens.len(),
        root.descendants().count(),
        diagnostics.len()
    );

    Parse { tokens, root, diagnostics }
}
