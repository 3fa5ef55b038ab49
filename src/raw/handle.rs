use core::fmt;
use core::num::NonZero;

// Small in tests so the slot ceiling is reachable.
#[cfg(test)]
type Slot = u16;
#[cfg(not(test))]
type Slot = u32;

/// Names one node slot of the arena.
///
/// Slot `n` is stored as `n + 1`, which keeps zero free for `None` in a
/// child link.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Slot>);

impl Handle {
    /// How many distinct slots a handle can name.
    pub(crate) const SLOTS: usize = Slot::MAX as usize;

    #[inline]
    pub(crate) const fn for_slot(slot: usize) -> Self {
        assert!(slot < Self::SLOTS, "`Handle::for_slot()` - slot out of range!");
        #[allow(clippy::cast_possible_truncation)]
        let biased = slot as Slot + 1;
        match NonZero::new(biased) {
            Some(biased) => Self(biased),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot())
    }
}
