//! Query options and their normalization.
//!
//! Every query takes `impl Into<SkipArg>` or `impl Into<CountArg>`, so the
//! same method accepts `()`, a bare number, a bare predicate or an options
//! record. The argument is normalized once at the top of the query.

use std::fmt;

type Filter<'f, T> = &'f dyn Fn(&T) -> bool;

/// Options record for queries returning a single element.
pub struct SkipOptions<'f, T> {
    skip: usize,
    filter: Option<Filter<'f, T>>,
    include_comments: bool,
}

impl<'f, T> SkipOptions<'f, T> {
    pub fn new() -> Self {
        Self { skip: 0, filter: None, include_comments: false }
    }

    /// Number of matching elements to pass over before returning one.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn filter<F: Fn(&T) -> bool>(mut self, filter: &'f F) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Lets comments be returned; by default they are never matched.
    pub fn include_comments(mut self) -> Self {
        self.include_comments = true;
        self
    }
}

impl<T> Default for SkipOptions<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SkipOptions<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SkipOptions<'_, T> {}

impl<T> fmt::Debug for SkipOptions<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipOptions")
            .field("skip", &self.skip)
            .field("filter", &self.filter.is_some())
            .field("include_comments", &self.include_comments)
            .finish()
    }
}

/// Options record for queries returning several elements.
pub struct CountOptions<'f, T> {
    count: usize,
    filter: Option<Filter<'f, T>>,
    include_comments: bool,
}

impl<'f, T> CountOptions<'f, T> {
    pub fn new() -> Self {
        Self { count: 0, filter: None, include_comments: false }
    }

    /// Maximum number of elements to return; `0` means no limit.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn filter<F: Fn(&T) -> bool>(mut self, filter: &'f F) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Lets comments be returned; by default they are never matched.
    pub fn include_comments(mut self) -> Self {
        self.include_comments = true;
        self
    }
}

impl<T> Default for CountOptions<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CountOptions<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CountOptions<'_, T> {}

impl<T> fmt::Debug for CountOptions<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountOptions")
            .field("count", &self.count)
            .field("filter", &self.filter.is_some())
            .field("include_comments", &self.include_comments)
            .finish()
    }
}

/// Argument of single element queries.
pub enum SkipArg<'f, T> {
    /// First non-comment element.
    Default,
    /// Skip this many non-comment elements.
    Skip(usize),
    /// First non-comment element accepted by the predicate.
    Filter(Filter<'f, T>),
    Options(SkipOptions<'f, T>),
}

impl<T> From<()> for SkipArg<'_, T> {
    fn from((): ()) -> Self {
        SkipArg::Default
    }
}

impl<T> From<usize> for SkipArg<'_, T> {
    fn from(skip: usize) -> Self {
        SkipArg::Skip(skip)
    }
}

impl<'f, T, F: Fn(&T) -> bool> From<&'f F> for SkipArg<'f, T> {
    fn from(filter: &'f F) -> Self {
        SkipArg::Filter(filter)
    }
}

impl<'f, T> From<SkipOptions<'f, T>> for SkipArg<'f, T> {
    fn from(options: SkipOptions<'f, T>) -> Self {
        SkipArg::Options(options)
    }
}

/// Argument of multi element queries.
pub enum CountArg<'f, T> {
    /// Every non-comment element.
    Default,
    /// At most this many non-comment elements; `0` means no limit.
    Count(usize),
    /// Every non-comment element accepted by the predicate.
    Filter(Filter<'f, T>),
    Options(CountOptions<'f, T>),
}

impl<T> From<()> for CountArg<'_, T> {
    fn from((): ()) -> Self {
        CountArg::Default
    }
}

impl<T> From<usize> for CountArg<'_, T> {
    fn from(count: usize) -> Self {
        CountArg::Count(count)
    }
}

impl<'f, T, F: Fn(&T) -> bool> From<&'f F> for CountArg<'f, T> {
    fn from(filter: &'f F) -> Self {
        CountArg::Filter(filter)
    }
}

impl<'f, T> From<CountOptions<'f, T>> for CountArg<'f, T> {
    fn from(options: CountOptions<'f, T>) -> Self {
        CountArg::Options(options)
    }
}

/// Normalized form of either argument family.
///
/// `limit` is the skip for single element queries and the count for multi
/// element queries.
pub(crate) struct Query<'f, T> {
    filter: Option<Filter<'f, T>>,
    include_comments: bool,
    pub(crate) limit: usize,
}

impl<'f, T> Query<'f, T> {
    const DEFAULT: Self = Self { filter: None, include_comments: false, limit: 0 };

    pub(crate) fn skip(arg: SkipArg<'f, T>) -> Self {
        match arg {
            SkipArg::Default => Self::DEFAULT,
            SkipArg::Skip(skip) => Self { limit: skip, ..Self::DEFAULT },
            SkipArg::Filter(filter) => Self { filter: Some(filter), ..Self::DEFAULT },
            SkipArg::Options(SkipOptions { skip, filter, include_comments }) => {
                Self { filter, include_comments, limit: skip }
            }
        }
    }

    pub(crate) fn count(arg: CountArg<'f, T>) -> Self {
        match arg {
            CountArg::Default => Self::DEFAULT,
            CountArg::Count(count) => Self { limit: count, ..Self::DEFAULT },
            CountArg::Filter(filter) => Self { filter: Some(filter), ..Self::DEFAULT },
            CountArg::Options(CountOptions { count, filter, include_comments }) => {
                Self { filter, include_comments, limit: count }
            }
        }
    }

    /// Comment exclusion sits underneath any user filter unless comments were
    /// explicitly requested.
    #[inline]
    pub(crate) fn accepts(&self, element: &T, is_comment: impl Fn(&T) -> bool) -> bool {
        (self.include_comments || !is_comment(element))
            && self.filter.is_none_or(|filter| filter(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_comment(value: &i32) -> bool {
        *value < 0
    }

    fn accepted(query: &Query<'_, i32>) -> Vec<i32> {
        [-2, -1, 0, 1, 2, 3].into_iter().filter(|value| query.accepts(value, is_comment)).collect()
    }

    #[test]
    fn default_excludes_comments() {
        let query = Query::skip(().into());
        assert_eq!(query.limit, 0);
        assert_eq!(accepted(&query), [0, 1, 2, 3]);
    }

    #[test]
    fn bare_number_is_skip_or_count() {
        assert_eq!(Query::<i32>::skip(3usize.into()).limit, 3);
        assert_eq!(Query::<i32>::count(2usize.into()).limit, 2);
        assert_eq!(accepted(&Query::count(2usize.into())), [0, 1, 2, 3]);
    }

    #[test]
    fn bare_predicate_cannot_see_comments() {
        let everything = |_: &i32| true;
        let query = Query::skip((&everything).into());
        assert_eq!(accepted(&query), [0, 1, 2, 3]);
    }

    #[test]
    fn filter_is_layered_over_comment_exclusion() {
        let odd_or_negative = |value: &i32| value % 2 != 0;
        let query = Query::count(CountOptions::new().filter(&odd_or_negative).into());
        assert_eq!(accepted(&query), [1, 3]);
    }

    #[test]
    fn include_comments_without_filter_accepts_all() {
        let query = Query::skip(SkipOptions::new().skip(1).include_comments().into());
        assert_eq!(query.limit, 1);
        assert_eq!(accepted(&query), [-2, -1, 0, 1, 2, 3]);
    }

    #[test]
    fn include_comments_with_filter_uses_filter_only() {
        let odd = |value: &i32| value % 2 != 0;
        let query =
            Query::count(CountOptions::new().count(4).filter(&odd).include_comments().into());
        assert_eq!(query.limit, 4);
        assert_eq!(accepted(&query), [-1, 1, 3]);
    }
}
