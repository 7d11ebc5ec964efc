use crate::SyntaxKind;

/// Set of token kinds packed into one `u64`, usable in `const` items.
///
/// Every kind's discriminant must be below 64; this is checked at compile
/// time against the last kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet(u64);

const _: () = assert!((SyntaxKind::TOMBSTONE as u32) < u64::BITS);

impl SyntaxSet {
    pub const EMPTY: Self = Self(0);

    const fn bit(kind: SyntaxKind) -> u64 {
        1 << kind as u32
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut bits = 0;

        let mut i = 0;
        while i < N {
            bits |= Self::bit(kinds[i]);
            i += 1;
        }

        Self(bits)
    }

    pub const fn union(self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn with(self, kind: SyntaxKind) -> Self {
        Self(self.0 | Self::bit(kind))
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }
}
