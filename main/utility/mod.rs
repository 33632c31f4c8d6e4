/// A tag embedded in long-lived structs to help catch type confusion and
/// use-after-free bugs in debug builds. Zero-sized in release builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magic<const M: u32> {
    #[cfg(debug_assertions)]
    magic: u32,
}

impl<const M: u32> Magic<M> {
    pub fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            magic: M,
        }
    }

    pub fn debug_check(&self) {
        #[cfg(debug_assertions)]
        {
            debug_assert_eq!(self.magic, M);
        }
    }
}

impl<const M: u32> Default for Magic<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// A trait we can use as a compile-time check to make sure that an object is Send.
pub trait IsSend: Send {}

/// A trait we can use as a compile-time check to make sure that an object is Sync.
pub trait IsSync: Sync {}
