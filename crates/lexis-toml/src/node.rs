use lexis_store::Ranged;
use text_size::TextRange;

use crate::SyntaxKind;

/// A syntax node. Nodes own their child nodes but not their tokens; tokens
/// and comments live in the flat list of the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: SyntaxKind,
    range: TextRange,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn new(kind: SyntaxKind, range: TextRange, children: Vec<Node>) -> Self {
        Self { kind, range, children }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self)
    }

    /// This node and every node below it, parents before children.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    pub fn debug_dump(&self, text: &str) -> String {
        let mut buf = String::new();
        let mut indent = 0;

        for event in self.preorder() {
            match event {
                WalkEvent::Enter(node) => {
                    let line = if node.children.is_empty() {
                        format!("{:indent$}{:?}@{:?} {:?}\n", "", node.kind, node.range, &text[node.range])
                    } else {
                        format!("{:indent$}{:?}@{:?}\n", "", node.kind, node.range)
                    };
                    buf.push_str(&line);
                    indent += 2;
                }
                WalkEvent::Leave(_) => indent -= 2,
            }
        }

        buf
    }
}

impl Ranged for Node {
    fn range(&self) -> TextRange {
        self.range
    }
}

pub struct Preorder<'a> {
    pending: Option<&'a Node>,
    stack: Vec<(&'a Node, usize)>,
    skip_subtree: bool,
}

impl<'a> Preorder<'a> {
    fn new(start: &'a Node) -> Self {
        Self { pending: Some(start), stack: Vec::new(), skip_subtree: false }
    }

    /// Leaves the node entered last without visiting its children.
    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.pending.take() {
            self.stack.push((node, 0));
            return Some(WalkEvent::Enter(node));
        }

        let top = self.stack.last_mut()?;
        let node = top.0;

        if self.skip_subtree {
            top.1 = node.children.len();
            self.skip_subtree = false;
        }

        match node.children.get(top.1) {
            Some(child) => {
                top.1 += 1;
                self.stack.push((child, 0));
                Some(WalkEvent::Enter(child))
            }
            None => {
                self.stack.pop();
                Some(WalkEvent::Leave(node))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent<'a> {
    Enter(&'a Node),
    Leave(&'a Node),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    fn leaf(kind: SyntaxKind, start: u32, end: u32) -> Node {
        Node::new(kind, TextRange::new(start.into(), end.into()), Vec::new())
    }

    fn sample() -> Node {
        let pair = Node::new(
            KEY_VALUE,
            TextRange::new(0.into(), 5.into()),
            vec![leaf(KEY, 0, 1), leaf(VALUE, 4, 5)],
        );
        Node::new(DOCUMENT, TextRange::new(0.into(), 6.into()), vec![pair])
    }

    #[test]
    fn preorder_enters_and_leaves_in_order() {
        let root = sample();
        let events: Vec<String> = root
            .preorder()
            .map(|event| match event {
                WalkEvent::Enter(node) => format!("+{:?}", node.kind()),
                WalkEvent::Leave(node) => format!("-{:?}", node.kind()),
            })
            .collect();

        assert_eq!(
            events,
            ["+DOCUMENT", "+KEY_VALUE", "+KEY", "-KEY", "+VALUE", "-VALUE", "-KEY_VALUE", "-DOCUMENT"]
        );
    }

    #[test]
    fn skip_subtree_leaves_immediately() {
        let root = sample();
        let mut preorder = root.preorder();
        let mut entered = Vec::new();

        while let Some(event) = preorder.next() {
            if let WalkEvent::Enter(node) = event {
                entered.push(node.kind());
                if node.kind() == KEY_VALUE {
                    preorder.skip_subtree();
                }
            }
        }

        assert_eq!(entered, [DOCUMENT, KEY_VALUE]);
    }

    #[test]
    fn descendants_include_self() {
        let root = sample();
        let kinds: Vec<SyntaxKind> = root.descendants().map(Node::kind).collect();
        assert_eq!(kinds, [DOCUMENT, KEY_VALUE, KEY, VALUE]);
    }
}
