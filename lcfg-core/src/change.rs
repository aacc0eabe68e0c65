//! Change and status codes returned by mutators (see spec §6).

/// Outcome of a mutating operation (merge, diff classification, ...).
///
/// Integer values are distinct but otherwise implementation-defined;
/// callers should match on the variant, not the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeCode {
    /// No semantic change occurred.
    None,
    /// A new item was added.
    Added,
    /// An existing item was removed.
    Removed,
    /// An existing item's content changed.
    Modified,
    /// An existing item was replaced wholesale (merge won outright).
    Replaced,
    /// The operation could not complete (see the returned error).
    Error,
}

impl ChangeCode {
    /// True for any variant that represents an actual change to data
    /// (i.e. everything except `None` and `Error`).
    pub fn is_change(self) -> bool {
        matches!(self, Self::Added | Self::Removed | Self::Modified | Self::Replaced)
    }
}

/// Coarse status of a batch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusCode {
    Ok,
    Warn,
    Error,
}
