//! Option flags bit-ORed into the serialisation entry points (spec §6).

use bitflags::bitflags;

bitflags! {
    /// Flags controlling how a resource, component, or diff is rendered.
    ///
    /// Modelled the same way the option bitsets in our reference core crate
    /// are: a `bitflags` set rather than a pile of boolean parameters, so
    /// combinations are explicit at call sites (`ENCODE | NEWLINE`) instead
    /// of a wall of trailing `true`/`false` arguments.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OptionFlags: u32 {
        /// Include resources regardless of priority (default: active-only).
        const ALL_PRIORITIES = 1 << 0;
        /// Include resources regardless of whether they carry a value.
        const ALL_VALUES     = 1 << 1;
        /// Emit the `%name` type/comment/template metadata line.
        const USE_META       = 1 << 2;
        /// XML-entity-encode CR/LF/& in the emitted value.
        const ENCODE         = 1 << 3;
        /// Append a trailing newline to string-producing calls.
        const NEWLINE         = 1 << 4;
        /// Suppress the `=value` block entirely.
        const NOVALUE        = 1 << 5;
        /// Suppress the `[context]` suffix.
        const NOCONTEXT      = 1 << 6;
        /// Suppress list-resource template metadata.
        const NOTEMPLATES    = 1 << 7;
        /// Tolerate a missing status directory (yield an empty set).
        const ALLOW_NOEXIST  = 1 << 8;
    }
}

impl Default for OptionFlags {
    fn default() -> Self {
        OptionFlags::empty()
    }
}
