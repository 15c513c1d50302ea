/// Number of operations currently holding the busy indicator.
///
/// The spinner shows while at least one holder remains, so overlapping
/// fetches cannot hide it early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusyCount {
    holders: u32,
}

impl BusyCount {
    pub fn acquire(&mut self) {
        self.holders += 1;
    }

    /// Releasing an idle counter is a no-op.
    pub fn release(&mut self) {
        self.holders = self.holders.saturating_sub(1);
    }

    pub fn is_busy(&self) -> bool {
        self.holders > 0
    }

    pub fn holders(&self) -> u32 {
        self.holders
    }
}
