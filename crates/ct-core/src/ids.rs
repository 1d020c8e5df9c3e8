use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier of a thermal node.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    ///
    /// # Panics
    ///
    /// Panics if `index == u32::MAX`.
    pub fn from_index(index: u32) -> Self {
        match index.checked_add(1).and_then(NonZeroU32::new) {
            Some(raw) => Self(raw),
            None => panic!("node index {index} does not fit an Id"),
        }
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The 0-based index as a matrix offset.
    pub fn offset(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID alias for clarity (no runtime cost).
pub type NodeId = Id;
