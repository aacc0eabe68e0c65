//! Resource-level diffs (spec §3, §4.6).

use crate::change::ChangeCode;
use crate::error::ValidationError;
use crate::options::OptionFlags;
use crate::resource::Resource;

/// A pair `(old?, new?)` of shared resources, classified by presence and
/// value equality.
#[derive(Debug, Clone)]
pub struct DiffResource {
    old: Option<Resource>,
    new: Option<Resource>,
    kind: ChangeCode,
}

impl DiffResource {
    /// Construct a diff for `(old, new)`. If both are present their names
    /// must match (spec §4.6).
    pub fn new(old: Option<Resource>, new: Option<Resource>) -> Result<Self, ValidationError> {
        let kind = match (&old, &new) {
            (None, None) => {
                return Err(ValidationError::InvalidName {
                    name: String::new(),
                })
            }
            (None, Some(_)) => ChangeCode::Added,
            (Some(_), None) => ChangeCode::Removed,
            (Some(o), Some(n)) => {
                if o.name() != n.name() {
                    return Err(ValidationError::InvalidName { name: n.name() });
                }
                if Resource::same_value(o, n) {
                    ChangeCode::None
                } else {
                    ChangeCode::Modified
                }
            }
        };
        Ok(Self { old, new, kind })
    }

    pub fn kind(&self) -> ChangeCode {
        self.kind
    }

    pub fn old(&self) -> Option<&Resource> {
        self.old.as_ref()
    }

    pub fn new_resource(&self) -> Option<&Resource> {
        self.new.as_ref()
    }

    /// The resource name shared by both sides (or whichever side is present).
    pub fn name(&self) -> String {
        self.new
            .as_ref()
            .or(self.old.as_ref())
            .map(|r| r.name())
            .unwrap_or_default()
    }

    fn rendered_value(r: &Option<Resource>, options: OptionFlags) -> String {
        r.as_ref()
            .and_then(|r| r.value())
            .map(|v| if options.contains(OptionFlags::ENCODE) {
                crate::encoding::encode(&v)
            } else {
                v
            })
            .unwrap_or_default()
    }

    /// A human-readable one-line summary, e.g. `"eth0: up -> down"`.
    pub fn describe(&self) -> String {
        match self.kind {
            ChangeCode::Added => format!("{}: added ({})", self.name(), Self::rendered_value(&self.new, OptionFlags::empty())),
            ChangeCode::Removed => format!("{}: removed ({})", self.name(), Self::rendered_value(&self.old, OptionFlags::empty())),
            ChangeCode::Modified => format!(
                "{}: {} -> {}",
                self.name(),
                Self::rendered_value(&self.old, OptionFlags::empty()),
                Self::rendered_value(&self.new, OptionFlags::empty())
            ),
            _ => format!("{}: unchanged", self.name()),
        }
    }

    /// Hold-file fragment (spec §4.6):
    ///
    /// ```text
    /// [compname.]resname:
    ///  - <old-value-or-empty>
    ///  + <new-value-or-empty>
    /// ```
    ///
    /// Emitted only when the rendered values actually differ; an ADDED
    /// diff whose new value is empty, or a REMOVED diff whose old value is
    /// empty, produces no output (these are not actionable changes).
    pub fn hold_fragment(&self, prefix: Option<&str>, options: OptionFlags) -> String {
        let old_value = Self::rendered_value(&self.old, options);
        let new_value = Self::rendered_value(&self.new, options);
        if old_value == new_value {
            return String::new();
        }
        match self.kind {
            ChangeCode::Added if new_value.is_empty() => return String::new(),
            ChangeCode::Removed if old_value.is_empty() => return String::new(),
            ChangeCode::None => return String::new(),
            _ => {}
        }
        let mut out = String::new();
        if let Some(p) = prefix {
            out.push_str(p);
            out.push('.');
        }
        out.push_str(&self.name());
        out.push_str(":\n");
        out.push_str(" - ");
        out.push_str(&old_value);
        out.push('\n');
        out.push_str(" + ");
        out.push_str(&new_value);
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(name: &str, value: Option<&str>) -> Resource {
        let r = Resource::new(name).unwrap();
        if let Some(v) = value {
            r.set_value(v).unwrap();
        }
        r
    }

    #[test]
    fn added_when_old_absent() {
        let d = DiffResource::new(None, Some(res("a", Some("1")))).unwrap();
        assert_eq!(d.kind(), ChangeCode::Added);
    }

    #[test]
    fn removed_when_new_absent() {
        let d = DiffResource::new(Some(res("a", Some("1"))), None).unwrap();
        assert_eq!(d.kind(), ChangeCode::Removed);
    }

    #[test]
    fn modified_when_values_differ() {
        let d = DiffResource::new(Some(res("a", Some("1"))), Some(res("a", Some("2")))).unwrap();
        assert_eq!(d.kind(), ChangeCode::Modified);
    }

    #[test]
    fn none_when_values_equal() {
        let d = DiffResource::new(Some(res("a", Some("1"))), Some(res("a", Some("1")))).unwrap();
        assert_eq!(d.kind(), ChangeCode::None);
    }

    #[test]
    fn rejects_mismatched_names() {
        assert!(DiffResource::new(Some(res("a", None)), Some(res("b", None))).is_err());
    }

    #[test]
    fn hold_fragment_suppresses_empty_added() {
        let d = DiffResource::new(None, Some(res("foo", None))).unwrap();
        assert_eq!(d.hold_fragment(None, OptionFlags::empty()), "");
    }

    #[test]
    fn hold_fragment_emits_move() {
        let d = DiffResource::new(Some(res("foo", Some("a"))), Some(res("foo", Some("b")))).unwrap();
        assert_eq!(d.hold_fragment(None, OptionFlags::empty()), "foo:\n - a\n + b\n");
    }
}
