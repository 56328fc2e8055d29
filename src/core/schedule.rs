//! Step-count triggers: run an action once every N steps.

/// Calls an action once each time `steps / frequency` crosses a new index.
///
/// Useful as the glue between a recording loop and rendering: feed it the
/// store's step counter and redraw only when it fires. A `frequency` of 0
/// never fires.
pub struct Every<F: FnMut(u64, u64)> {
    frequency: u64,
    previous_index: u64,
    action: F,
}

impl<F: FnMut(u64, u64)> Every<F> {
    /// The action receives `(index, steps)` when it fires.
    pub fn new(frequency: u64, action: F) -> Self {
        Self {
            frequency,
            previous_index: 0,
            action,
        }
    }

    /// Advance to `steps`; returns whether the action fired. A jump across
    /// several indices fires once, at the latest index. The index is
    /// committed before the action runs, so state read inside the action
    /// is already current.
    pub fn step(&mut self, steps: u64) -> bool {
        if self.frequency == 0 {
            return false;
        }
        let index = steps / self.frequency;
        if index > self.previous_index {
            self.previous_index = index;
            (self.action)(index, steps);
            true
        } else {
            false
        }
    }

    /// Last fired index, the only piece of state worth checkpointing.
    #[must_use]
    pub fn previous_index(&self) -> u64 {
        self.previous_index
    }

    /// Restore a checkpointed index so a resumed run does not refire.
    pub fn restore_index(&mut self, index: u64) {
        self.previous_index = index;
    }
}
