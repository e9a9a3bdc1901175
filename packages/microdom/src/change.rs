//! Change indicator returned by mutating operations.

/// Whether a mutation had an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Change {
    /// The content was modified.
    Changed,
    /// The operation was a no-op.
    #[default]
    Unchanged,
}

impl Change {
    /// Check if the content was modified.
    pub fn is_changed(self) -> bool {
        matches!(self, Change::Changed)
    }

    /// Check if the operation was a no-op.
    pub fn is_unchanged(self) -> bool {
        matches!(self, Change::Unchanged)
    }
}

impl From<bool> for Change {
    fn from(changed: bool) -> Self {
        if changed {
            Change::Changed
        } else {
            Change::Unchanged
        }
    }
}
