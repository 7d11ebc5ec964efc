use drop_bomb::DropBomb;
use lexis_errors::Diagnostic;
use text_size::{TextLen, TextRange, TextSize};

use crate::SyntaxKind::{self, *};
use crate::tokenizer::{Token, tokenize};
use crate::{Node, SyntaxSet};

pub(crate) struct Parser<'text> {
    text: &'text str,
    tokens: Vec<Token>,
    significant: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
}

impl<'text> Parser<'text> {
    pub(crate) fn new(text: &'text str) -> Self {
        let (tokens, diagnostics) = tokenize(text);
        let significant = tokens.iter().filter(|token| !token.kind.is_trivia()).copied().collect();

        Self { text, tokens, significant, pos: 0, events: Vec::new(), diagnostics }
    }

    fn current(&self) -> Token {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> Token {
        self.significant
            .get(self.pos + n)
            .copied()
            .unwrap_or(Token { kind: EOF, range: TextRange::empty(self.text.text_len()) })
    }

    pub(crate) fn current_text(&self) -> &'text str {
        &self.text[self.current().range]
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.current().kind
    }

    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n).kind == kind
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn advance(&mut self) {
        if self.at(EOF) {
            return;
        }

        let token = self.current();
        self.pos += 1;
        self.events.push(Event::Token(token));
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }

        self.advance();
        true
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }

        self.error(&format!("expected {}", kind.describe()));
        false
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn error(&mut self, message: &str) {
        let range = self.current().range;
        log::trace!("parse error at {range:?}: {message}");
        self.diagnostics.push(Diagnostic::error(message, range));
    }

    pub(crate) fn warning(&mut self, message: &str) {
        let range = self.current().range;
        log::trace!("parse warning at {range:?}: {message}");
        self.diagnostics.push(Diagnostic::warning(message, range));
    }

    /// Reports an error and wraps the offending token in an `ERROR` node,
    /// unless it belongs to `recovery`.
    pub(crate) fn error_recover(&mut self, message: &str, recovery: &SyntaxSet) {
        if self.at_set(recovery) || self.at(EOF) {
            self.error(message);
            return;
        }

        let m = self.start();
        self.error(message);
        self.advance();
        m.complete(self, ERROR);
    }

    pub(crate) fn finish(self) -> (Vec<Token>, Node, Vec<Diagnostic>) {
        let Parser { text, tokens, significant: _, pos: _, events, diagnostics } = self;
        let mut builder = Builder::default();

        for event in events {
            match event {
                Event::Start { kind: TOMBSTONE } => {}
                Event::Start { kind } => builder.start_node(kind),
                Event::Token(token) => builder.token(token),
                Event::Finish => builder.finish_node(),
            }
        }

        let children = builder.finish();
        let root = Node::new(DOCUMENT, TextRange::up_to(text.text_len()), children);
        (tokens, root, diagnostics)
    }
}

enum Event {
    Start { kind: SyntaxKind },
    Token(Token),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: TOMBSTONE };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be completed"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) {
        self.bomb.defuse();

        if let Event::Start { kind: slot } = &mut p.events[self.position as usize] {
            *slot = kind;
        }

        p.events.push(Event::Finish);
    }
}

/// Folds parser events into nodes. A node spans its first to its last
/// token; a node without tokens is empty at the end of the last token seen.
#[derive(Default)]
struct Builder {
    stack: Vec<Frame>,
    roots: Vec<Node>,
    last_end: TextSize,
}

struct Frame {
    kind: SyntaxKind,
    range: Option<TextRange>,
    children: Vec<Node>,
}

impl Builder {
    fn start_node(&mut self, kind: SyntaxKind) {
        self.stack.push(Frame { kind, range: None, children: Vec::new() });
    }

    fn token(&mut self, token: Token) {
        self.last_end = token.range.end();
        if let Some(frame) = self.stack.last_mut() {
            frame.range = Some(frame.range.map_or(token.range, |range| range.cover(token.range)));
        }
    }

    fn finish_node(&mut self) {
        let Some(Frame { kind, range, children }) = self.stack.pop() else {
            return;
        };

        let range = range.unwrap_or_else(|| TextRange::empty(self.last_end));
        let node = Node::new(kind, range, children);

        match self.stack.last_mut() {
            Some(parent) => {
                parent.range = Some(parent.range.map_or(range, |outer| outer.cover(range)));
                parent.children.push(node);
            }
            None => self.roots.push(node),
        }
    }

    fn finish(self) -> Vec<Node> {
        debug_assert!(self.stack.is_empty(), "unbalanced parser events");
        self.roots
    }
}
