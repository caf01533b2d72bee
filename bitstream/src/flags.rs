//! Packed boolean flags.

/// Maximum number of flags a flag field can carry.
pub const MAX_FLAGS: usize = 16;

/// Up to 16 booleans packed into one or two bytes.
///
/// Flag `i` occupies bit `i`. On the wire the low byte comes first, and the
/// high byte is only present when more than 8 flags are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u16);

impl Flags {
    /// Creates an empty flag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Creates flags from raw bits.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw flag bits.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns `true` if flag `index` is set. Indices past 15 are never set.
    #[must_use]
    pub const fn get(self, index: usize) -> bool {
        index < MAX_FLAGS && self.0 & (1 << index) != 0
    }

    /// Sets or clears flag `index`. Indices past 15 are ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= MAX_FLAGS {
            return;
        }
        if value {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, index: usize, value: bool) -> Self {
        self.set(index, value);
        self
    }

    /// Returns `true` if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of bytes used on the wire for `count` flags.
    #[must_use]
    pub const fn byte_len(count: usize) -> usize {
        if count > 8 {
            2
        } else {
            1
        }
    }

    /// Builds flags from a slice of booleans.
    #[must_use]
    pub fn from_bools(values: &[bool]) -> Self {
        let mut flags = Self::new();
        for (index, value) in values.iter().enumerate() {
            flags.set(index, *value);
        }
        flags
    }
}
