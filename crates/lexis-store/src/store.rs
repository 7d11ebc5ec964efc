use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;
use std::sync::OnceLock;

use text_size::TextSize;

use crate::index::Index;
use crate::options::{CountArg, Query, SkipArg};
use crate::ranged::Ranged;

type Classifier<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Immutable, position-indexed sequence of tokens and comments.
///
/// Elements are kept sorted by start offset; elements sharing a start keep
/// their input order. Zero-width elements take part in scans but never
/// anchor the edge of a query window.
pub struct TokenStore<T> {
    tokens: Box<[T]>,
    index: Index,
    is_comment: Classifier<T>,
    comments: OnceLock<Box<[usize]>>,
}

impl<T: Ranged> TokenStore<T> {
    /// Builds the store from tokens and comments in any order.
    pub fn new<I>(elements: I, is_comment: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tokens: Vec<T> = elements.into_iter().collect();
        tokens.sort_by_key(|token| token.start());

        let index = Index::new(tokens.iter().map(Ranged::range).collect());
        log::debug!(
            "indexed {} elements ({} zero-width)",
            index.len(),
            tokens.iter().filter(|token| token.range().is_empty()).count()
        );

        Self {
            tokens: tokens.into_boxed_slice(),
            index,
            is_comment: Box::new(is_comment),
            comments: OnceLock::new(),
        }
    }
}

impl<T> TokenStore<T> {
    /// Every token and comment in document order.
    #[inline]
    pub fn all_tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Every comment in document order.
    ///
    /// The comment positions are computed on first use and kept for the
    /// lifetime of the store.
    pub fn all_comments(&self) -> Comments<'_, T> {
        let positions = self.comments.get_or_init(|| {
            let positions: Box<[usize]> = self
                .tokens
                .iter()
                .enumerate()
                .filter(|(_, token)| self.is_comment(token))
                .map(|(position, _)| position)
                .collect();
            log::debug!("cached {} comments", positions.len());
            positions
        });
        Comments { tokens: &self.tokens, positions: positions.iter() }
    }

    #[inline]
    pub fn is_comment(&self, element: &T) -> bool {
        (self.is_comment)(element)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    fn slice(&self, window: Range<usize>) -> &[T] {
        self.tokens.get(window).unwrap_or_default()
    }

    fn nth_forward(&self, window: Range<usize>, query: &Query<'_, T>) -> Option<&T> {
        self.slice(window)
            .iter()
            .filter(|token| query.accepts(token, |token| self.is_comment(token)))
            .nth(query.limit)
    }

    fn nth_backward(&self, window: Range<usize>, query: &Query<'_, T>) -> Option<&T> {
        self.slice(window)
            .iter()
            .rev()
            .filter(|token| query.accepts(token, |token| self.is_comment(token)))
            .nth(query.limit)
    }

    fn take_forward(&self, window: Range<usize>, query: &Query<'_, T>) -> Vec<&T> {
        let limit = if query.limit == 0 { usize::MAX } else { query.limit };
        self.slice(window)
            .iter()
            .filter(|token| query.accepts(token, |token| self.is_comment(token)))
            .take(limit)
            .collect()
    }

    fn take_backward(&self, window: Range<usize>, query: &Query<'_, T>) -> Vec<&T> {
        let limit = if query.limit == 0 { usize::MAX } else { query.limit };
        let mut tokens: Vec<&T> = self
            .slice(window)
            .iter()
            .rev()
            .filter(|token| query.accepts(token, |token| self.is_comment(token)))
            .take(limit)
            .collect();
        tokens.reverse();
        tokens
    }
}

/// Single element queries.
impl<T> TokenStore<T> {
    /// The first token inside `node`.
    pub fn first_token_of<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<SkipArg<'f, T>>,
    ) -> Option<&T>
    where
        T: 'f,
    {
        let window = self.index.window(node.start(), node.end());
        self.nth_forward(window, &Query::skip(options.into()))
    }

    /// The last token inside `node`.
    pub fn last_token_of<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<SkipArg<'f, T>>,
    ) -> Option<&T>
    where
        T: 'f,
    {
        let window = self.index.window(node.start(), node.end());
        self.nth_backward(window, &Query::skip(options.into()))
    }

    /// The token ending at or before the start of `node`.
    pub fn token_before<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<SkipArg<'f, T>>,
    ) -> Option<&T>
    where
        T: 'f,
    {
        let window = self.index.before(node.start());
        self.nth_backward(window, &Query::skip(options.into()))
    }

    /// The token starting at or after the end of `node`.
    pub fn token_after<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<SkipArg<'f, T>>,
    ) -> Option<&T>
    where
        T: 'f,
    {
        let window = self.index.after(node.end());
        self.nth_forward(window, &Query::skip(options.into()))
    }

    /// The first token between the end of `left` and the start of `right`.
    pub fn first_token_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<SkipArg<'f, T>>,
    ) -> Option<&T>
    where
        T: 'f,
    {
        let window = self.index.window(left.end(), right.start());
        self.nth_forward(window, &Query::skip(options.into()))
    }

    /// The last token between the end of `left` and the start of `right`.
    pub fn last_token_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<SkipArg<'f, T>>,
    ) -> Option<&T>
    where
        T: 'f,
    {
        let window = self.index.window(left.end(), right.start());
        self.nth_backward(window, &Query::skip(options.into()))
    }

    /// The non-empty element starting exactly at `offset`.
    ///
    /// Comments are only returned when `include_comments` is set.
    pub fn token_by_range_start(&self, offset: TextSize, include_comments: bool) -> Option<&T> {
        let token = &self.tokens[self.index.exact(offset)?];
        (include_comments || !self.is_comment(token)).then_some(token)
    }
}

/// Multi element queries. Results are always in document order.
impl<T> TokenStore<T> {
    /// Every token inside `node`.
    pub fn tokens_of<'f>(&self, node: &impl Ranged, options: impl Into<CountArg<'f, T>>) -> Vec<&T>
    where
        T: 'f,
    {
        self.first_tokens_of(node, options)
    }

    /// The first tokens inside `node`.
    pub fn first_tokens_of<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<CountArg<'f, T>>,
    ) -> Vec<&T>
    where
        T: 'f,
    {
        let window = self.index.window(node.start(), node.end());
        self.take_forward(window, &Query::count(options.into()))
    }

    /// The last tokens inside `node`.
    pub fn last_tokens_of<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<CountArg<'f, T>>,
    ) -> Vec<&T>
    where
        T: 'f,
    {
        let window = self.index.window(node.start(), node.end());
        self.take_backward(window, &Query::count(options.into()))
    }

    /// The tokens ending at or before the start of `node`, nearest last.
    pub fn tokens_before<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<CountArg<'f, T>>,
    ) -> Vec<&T>
    where
        T: 'f,
    {
        let window = self.index.before(node.start());
        self.take_backward(window, &Query::count(options.into()))
    }

    /// The tokens starting at or after the end of `node`, nearest first.
    pub fn tokens_after<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<CountArg<'f, T>>,
    ) -> Vec<&T>
    where
        T: 'f,
    {
        let window = self.index.after(node.end());
        self.take_forward(window, &Query::count(options.into()))
    }

    /// Every token between the end of `left` and the start of `right`.
    pub fn tokens_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<CountArg<'f, T>>,
    ) -> Vec<&T>
    where
        T: 'f,
    {
        self.first_tokens_between(left, right, options)
    }

    /// The first tokens between the end of `left` and the start of `right`.
    pub fn first_tokens_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<CountArg<'f, T>>,
    ) -> Vec<&T>
    where
        T: 'f,
    {
        let window = self.index.window(left.end(), right.start());
        self.take_forward(window, &Query::count(options.into()))
    }

    /// The last tokens between the end of `left` and the start of `right`.
    pub fn last_tokens_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<CountArg<'f, T>>,
    ) -> Vec<&T>
    where
        T: 'f,
    {
        let window = self.index.window(left.end(), right.start());
        self.take_backward(window, &Query::count(options.into()))
    }

    /// The non-comment tokens of `node` padded with up to `before` preceding
    /// and `after` following non-comment tokens.
    pub fn tokens_around(&self, node: &impl Ranged, before: usize, after: usize) -> Vec<&T> {
        let mut tokens = Vec::new();
        if before > 0 {
            tokens.extend(self.tokens_before(node, before));
        }
        tokens.extend(self.tokens_of(node, ()));
        if after > 0 {
            tokens.extend(self.tokens_after(node, after));
        }
        tokens
    }
}

/// Comment queries.
impl<T> TokenStore<T> {
    /// The run of comments immediately preceding `node` with no token in
    /// between.
    pub fn comments_directly_before(&self, node: &impl Ranged) -> Vec<&T> {
        let end = self.index.upper_bound(node.start());
        let mut comments: Vec<&T> =
            self.tokens[..end].iter().rev().take_while(|token| self.is_comment(token)).collect();
        comments.reverse();
        comments
    }

    /// The run of comments immediately following `node` with no token in
    /// between.
    pub fn comments_directly_after(&self, node: &impl Ranged) -> Vec<&T> {
        let start = self.index.lower_bound(node.end());
        self.tokens[start..].iter().take_while(|token| self.is_comment(token)).collect()
    }

    /// Every comment inside `node`.
    pub fn comments_inside(&self, node: &impl Ranged) -> Vec<&T> {
        let window = self.index.window(node.start(), node.end());
        self.slice(window).iter().filter(|token| self.is_comment(token)).collect()
    }

    /// Whether any comment lies between the end of `left` and the start of
    /// `right`.
    pub fn any_comments_between(&self, left: &impl Ranged, right: &impl Ranged) -> bool {
        let window = self.index.window(left.end(), right.start());
        self.slice(window).iter().any(|token| self.is_comment(token))
    }

    /// Whether there is any gap between `left` and `right` not covered by a
    /// token or comment.
    ///
    /// `false` when the two touch or overlap.
    pub fn is_space_between(&self, left: &impl Ranged, right: &impl Ranged) -> bool {
        if left.end() >= right.start() {
            return false;
        }

        let window = self.index.window(left.end(), right.start());
        let mut prev_end = left.end();
        for position in window {
            let range = self.index.range(position);
            if prev_end < range.start() {
                return true;
            }
            prev_end = range.end();
        }

        prev_end < right.start()
    }
}

impl<T: fmt::Debug> fmt::Debug for TokenStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore").field("tokens", &self.tokens).finish_non_exhaustive()
    }
}

/// Iterator over the cached comments of a [`TokenStore`].
pub struct Comments<'a, T> {
    tokens: &'a [T],
    positions: std::slice::Iter<'a, usize>,
}

impl<T> Clone for Comments<'_, T> {
    fn clone(&self) -> Self {
        Self { tokens: self.tokens, positions: self.positions.clone() }
    }
}

impl<'a, T> Iterator for Comments<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|&position| &self.tokens[position])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<T> DoubleEndedIterator for Comments<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.positions.next_back().map(|&position| &self.tokens[position])
    }
}

impl<T> ExactSizeIterator for Comments<'_, T> {}

impl<T> FusedIterator for Comments<'_, T> {}
