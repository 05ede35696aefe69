use crate::{Gradient, Palette};

/// Most entries kept before the oldest is evicted.
pub const MAX_ENTRIES: usize = 50;

/// Everything undo/redo can bring back.
///
/// Holds owned copies, so an entry never aliases the live state it was
/// taken from or is restored into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub palette: Palette,
    pub gradient: Gradient,
}

/// Linear undo history.
///
/// Recording while not at the newest entry drops everything after the
/// current one; there is no branching.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
    index: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the current entry, `None` before anything was recorded.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.index.map(|i| &self.entries[i])
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        match self.index {
            Some(i) => i + 1 < self.entries.len(),
            None => !self.entries.is_empty(),
        }
    }

    pub fn record(&mut self, snapshot: Snapshot) {
        let keep = self.index.map_or(0, |i| i + 1);
        if keep < self.entries.len() {
            log::debug!("Dropping {} redo entries", self.entries.len() - keep);
            self.entries.truncate(keep);
        }

        self.entries.push(snapshot);

        if self.entries.len() > MAX_ENTRIES {
            // The index stays put, which after the shift is the new entry
            self.entries.remove(0);
        } else {
            self.index = Some(keep);
        }
    }

    /// Steps back one entry. Does nothing at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                Some(&self.entries[i - 1])
            }
            _ => None,
        }
    }

    /// Steps forward one entry. Does nothing at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }

        let next = self.index.map_or(0, |i| i + 1);
        self.index = Some(next);
        Some(&self.entries[next])
    }
}
