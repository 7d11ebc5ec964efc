use text_size::{TextRange, TextSize};

/// A syntax element: node, token or comment.
///
/// Roles are not distinguished by type; the store decides whether an element
/// is a comment through the classifier it was built with.
pub trait Ranged {
    /// Returns the half-open range `[start, end)` covered by this element.
    fn range(&self) -> TextRange;

    #[inline]
    fn start(&self) -> TextSize {
        self.range().start()
    }

    #[inline]
    fn end(&self) -> TextSize {
        self.range().end()
    }
}

impl Ranged for TextRange {
    #[inline]
    fn range(&self) -> TextRange {
        *self
    }
}

impl<T: Ranged + ?Sized> Ranged for &T {
    #[inline]
    fn range(&self) -> TextRange {
        T::range(self)
    }
}

impl<T: Ranged + ?Sized> Ranged for Box<T> {
    #[inline]
    fn range(&self) -> TextRange {
        T::range(self)
    }
}
