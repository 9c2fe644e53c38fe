use bitflags::bitflags;

bitflags! {
    /// Which minimization tiers run for one call.
    ///
    /// The safe tier always runs; `DICTIONARY` additionally enables the
    /// collocation-gated tier on top of the safe result.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct MinimizeMode: u8 {
        const SAFE = 1;
        const DICTIONARY = 2;
    }
}

impl MinimizeMode {
    /// Safe pruning plus dictionary-gated pruning.
    pub const fn aggressive() -> Self {
        Self::SAFE.union(Self::DICTIONARY)
    }
}

impl Default for MinimizeMode {
    fn default() -> Self {
        Self::SAFE
    }
}
