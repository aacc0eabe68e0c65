//! Tag and tag-list types (spec §3, §4.2).

use crate::change::ChangeCode;
use crate::error::ValidationError;

/// Returns true iff `s` matches `[A-Za-z][A-Za-z0-9_]*` and is non-empty.
///
/// Shared by resource names, component names, and tag names — the spec
/// defines all three with the same grammar (§3).
pub fn validate_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A validated short identifier used inside a `TagList`.
pub type Tag = String;

fn validate_tag(name: &str) -> Result<(), ValidationError> {
    if validate_name(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTag { name: name.to_string() })
    }
}

/// An ordered, possibly-duplicate sequence of tags.
///
/// Used for list-typed resource values, and for the added/modified/removed
/// name buckets produced by `quickdiff_set` (spec §4.6).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    /// Construct an empty tag list.
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Split `s` on ASCII whitespace, validating each token as a tag name.
    pub fn from_string(s: &str) -> Result<Self, ValidationError> {
        let tokens: Vec<&str> = s.split(|c: char| c == ' ' || c == '\t' || c == '\r' || c == '\n')
            .filter(|t| !t.is_empty())
            .collect();
        Self::from_array(&tokens)
    }

    /// Build a tag list from an already-tokenised array, validating each token.
    pub fn from_array(tokens: &[&str]) -> Result<Self, ValidationError> {
        let mut tags = Vec::with_capacity(tokens.len());
        for t in tokens {
            validate_tag(t)?;
            tags.push((*t).to_string());
        }
        Ok(Self { tags })
    }

    /// Single-space-separated rendering, with an optional trailing newline.
    pub fn to_string_opt(&self, trailing_newline: bool) -> String {
        let mut s = self.tags.join(" ");
        if trailing_newline {
            s.push('\n');
        }
        s
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.as_str())
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    /// Append `name` iff not already present. Returns `Added` or `None`.
    pub fn mutate_add(&mut self, name: &str) -> Result<ChangeCode, ValidationError> {
        validate_tag(name)?;
        if self.contains(name) {
            Ok(ChangeCode::None)
        } else {
            self.tags.push(name.to_string());
            Ok(ChangeCode::Added)
        }
    }

    /// Unconditionally append `name`, duplicates allowed.
    pub fn mutate_append(&mut self, name: &str) -> Result<ChangeCode, ValidationError> {
        validate_tag(name)?;
        self.tags.push(name.to_string());
        Ok(ChangeCode::Added)
    }

    /// Replace the first (or all, if `global`) occurrences of `matched` with `replacement`.
    pub fn mutate_replace(
        &mut self,
        matched: &str,
        replacement: &str,
        global: bool,
    ) -> Result<ChangeCode, ValidationError> {
        validate_tag(replacement)?;
        let mut changed = false;
        for t in self.tags.iter_mut() {
            if t == matched {
                *t = replacement.to_string();
                changed = true;
                if !global {
                    break;
                }
            }
        }
        Ok(if changed { ChangeCode::Modified } else { ChangeCode::None })
    }

    /// A duplicate-free copy preserving first occurrences.
    pub fn unique(&self) -> Self {
        let mut out: Vec<Tag> = Vec::with_capacity(self.tags.len());
        for t in &self.tags {
            if !out.iter().any(|o| o == t) {
                out.push(t.clone());
            }
        }
        Self { tags: out }
    }

    /// `unique(x)` followed by tags of `y` not already present.
    pub fn union(x: &Self, y: &Self) -> Self {
        let mut out = x.unique();
        for t in &y.tags {
            if !out.contains(t) {
                out.tags.push(t.clone());
            }
        }
        out
    }

    /// Tags of `x` that also appear in `y`, deduplicated in `x`'s order.
    pub fn intersection(x: &Self, y: &Self) -> Self {
        let mut out = Vec::new();
        for t in &x.tags {
            if y.contains(t) && !out.iter().any(|o| o == t) {
                out.push(t.clone());
            }
        }
        Self { tags: out }
    }

    /// Tags of `x` not appearing in `y`, deduplicated.
    pub fn subtract(x: &Self, y: &Self) -> Self {
        let mut out = Vec::new();
        for t in &x.tags {
            if !y.contains(t) && !out.iter().any(|o| o == t) {
                out.push(t.clone());
            }
        }
        Self { tags: out }
    }

    /// Lexicographic sort. The algorithm is free; the final order is not —
    /// it is observable through status-file content (spec §9).
    pub fn sort(&mut self) {
        self.tags.sort();
    }
}

impl std::fmt::Display for TagList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_opt(false))
    }
}
