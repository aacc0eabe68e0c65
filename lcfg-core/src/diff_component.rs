//! Component-level diffs and prod detection (spec §4.6, §4.7).

use crate::change::ChangeCode;
use crate::component::Component;
use crate::diff_resource::DiffResource;
use crate::options::OptionFlags;
use crate::resource::Resource;

const NG_PROD: &str = "ng_prod";

/// A named, ordered sequence of non-NONE resource diffs, with a cached
/// aggregate classification (spec §4.6).
#[derive(Debug, Clone)]
pub struct DiffComponent {
    name: String,
    diffs: Vec<DiffResource>,
    aggregate: ChangeCode,
}

impl DiffComponent {
    /// Compute the diff between two components with the same name.
    ///
    /// For each active, validly-named resource in `c1`: locate by name in
    /// `c2`; if absent or values differ, record a resource diff. For each
    /// active resource in `c2` absent from `c1`: record an ADDED diff.
    pub fn diff(c1: &Component, c2: &Component) -> Self {
        let name = if c1.is_empty() { c2.name() } else { c1.name() };
        let mut diffs = Vec::new();

        for old in c1.active_resources() {
            let new = c2.find(&old.name()).filter(Resource::is_active);
            match &new {
                Some(n) if Resource::same_value(&old, n) => {}
                Some(n) => diffs.push(DiffResource::new(Some(old.clone()), Some(n.clone())).expect("names match")),
                None => diffs.push(DiffResource::new(Some(old), None).expect("single-sided diff")),
            }
        }
        for new in c2.active_resources() {
            if c1.find(&new.name()).filter(Resource::is_active).is_none() {
                diffs.push(DiffResource::new(None, Some(new)).expect("single-sided diff"));
            }
        }

        let aggregate = if c1.is_empty() {
            if c2.is_empty() {
                ChangeCode::None
            } else {
                ChangeCode::Added
            }
        } else if c2.is_empty() {
            ChangeCode::Removed
        } else if diffs.is_empty() {
            ChangeCode::None
        } else {
            ChangeCode::Modified
        };

        Self { name, diffs, aggregate }
    }

    /// Fast component classifier that skips building the full resource-diff
    /// list (spec §4.6). Size inequality short-circuits to MODIFIED;
    /// otherwise scans one side for a modified/absent value and then the
    /// other for an addition, stopping at the first difference.
    pub fn quickdiff(c1: &Component, c2: &Component) -> ChangeCode {
        if c1.is_empty() && c2.is_empty() {
            return ChangeCode::None;
        }
        if c1.is_empty() {
            return ChangeCode::Added;
        }
        if c2.is_empty() {
            return ChangeCode::Removed;
        }
        let a1 = c1.active_resources();
        let a2 = c2.active_resources();
        if a1.len() != a2.len() {
            return ChangeCode::Modified;
        }
        for old in &a1 {
            match c2.find(&old.name()).filter(Resource::is_active) {
                Some(new) if !Resource::same_value(old, &new) => return ChangeCode::Modified,
                None => return ChangeCode::Modified,
                _ => {}
            }
        }
        for new in &a2 {
            if c1.find(&new.name()).filter(Resource::is_active).is_none() {
                return ChangeCode::Modified;
            }
        }
        ChangeCode::None
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aggregate(&self) -> ChangeCode {
        self.aggregate
    }

    pub fn diffs(&self) -> &[DiffResource] {
        &self.diffs
    }

    /// Resource names whose diff matches `kind`.
    pub fn names_with(&self, kind: ChangeCode) -> Vec<String> {
        self.diffs.iter().filter(|d| d.kind() == kind).map(|d| d.name()).collect()
    }

    /// A component diff is "prodded" (spec §4.7) iff its aggregate change
    /// is MODIFIED, it contains a diff for `ng_prod` classified ADDED or
    /// MODIFIED, and the new resource has a non-empty value.
    pub fn was_prodded(&self) -> bool {
        if self.aggregate != ChangeCode::Modified {
            return false;
        }
        self.diffs.iter().any(|d| {
            d.name() == NG_PROD
                && matches!(d.kind(), ChangeCode::Added | ChangeCode::Modified)
                && d.new_resource().and_then(Resource::value).is_some_and(|v| !v.is_empty())
        })
    }

    /// Concatenated hold-file fragments for every diff in this component
    /// (spec §4.6).
    pub fn hold_fragments(&self, options: OptionFlags) -> String {
        let mut out = String::new();
        for d in &self.diffs {
            out.push_str(&d.hold_fragment(Some(&self.name), options));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component_with(name: &str, entries: &[(&str, &str)]) -> Component {
        let c = Component::new(name).unwrap();
        for (rname, value) in entries {
            let r = Resource::new(rname).unwrap();
            r.set_value(value).unwrap();
            c.append(r);
        }
        c
    }

    #[test]
    fn diff_both_empty_is_none() {
        let c1 = Component::new("net").unwrap();
        let c2 = Component::new("net").unwrap();
        assert_eq!(DiffComponent::diff(&c1, &c2).aggregate(), ChangeCode::None);
    }

    #[test]
    fn diff_empty_c1_is_added() {
        let c1 = Component::new("net").unwrap();
        let c2 = component_with("net", &[("eth0", "up")]);
        assert_eq!(DiffComponent::diff(&c1, &c2).aggregate(), ChangeCode::Added);
    }

    #[test]
    fn diff_empty_c2_is_removed() {
        let c1 = component_with("net", &[("eth0", "up")]);
        let c2 = Component::new("net").unwrap();
        assert_eq!(DiffComponent::diff(&c1, &c2).aggregate(), ChangeCode::Removed);
    }

    #[test]
    fn diff_detects_modification_and_addition() {
        let c1 = component_with("net", &[("eth0", "up")]);
        let c2 = component_with("net", &[("eth0", "down"), ("eth1", "up")]);
        let d = DiffComponent::diff(&c1, &c2);
        assert_eq!(d.aggregate(), ChangeCode::Modified);
        assert_eq!(d.names_with(ChangeCode::Modified), vec!["eth0"]);
        assert_eq!(d.names_with(ChangeCode::Added), vec!["eth1"]);
    }

    #[test]
    fn diff_inverse_swaps_added_and_removed() {
        let c1 = component_with("net", &[("eth0", "up")]);
        let c2 = component_with("net", &[("eth1", "up")]);
        let forward = DiffComponent::diff(&c1, &c2);
        let backward = DiffComponent::diff(&c2, &c1);
        assert_eq!(forward.names_with(ChangeCode::Added), vec!["eth1"]);
        assert_eq!(backward.names_with(ChangeCode::Removed), vec!["eth1"]);
        assert_eq!(forward.names_with(ChangeCode::Removed), vec!["eth0"]);
        assert_eq!(backward.names_with(ChangeCode::Added), vec!["eth0"]);
    }

    #[test]
    fn quickdiff_conservatism_matches_full_diff_on_no_change() {
        let c1 = component_with("net", &[("eth0", "up")]);
        let c2 = component_with("net", &[("eth0", "up")]);
        assert_eq!(DiffComponent::quickdiff(&c1, &c2), ChangeCode::None);
        assert_eq!(DiffComponent::diff(&c1, &c2).aggregate(), ChangeCode::None);
    }

    #[test]
    fn quickdiff_size_mismatch_short_circuits() {
        let c1 = component_with("net", &[("eth0", "up")]);
        let c2 = component_with("net", &[("eth0", "up"), ("eth1", "down")]);
        assert_eq!(DiffComponent::quickdiff(&c1, &c2), ChangeCode::Modified);
    }

    #[test]
    fn prod_detection_requires_modified_aggregate_and_nonempty_value() {
        let c1 = component_with("net", &[("eth0", "up")]);
        let c2 = component_with("net", &[("eth0", "down"), ("ng_prod", "1")]);
        let d = DiffComponent::diff(&c1, &c2);
        assert!(d.was_prodded());

        let c3 = component_with("other", &[("x", "1")]);
        let c4 = component_with("other", &[("x", "1"), ("ng_prod", "")]);
        let d2 = DiffComponent::diff(&c3, &c4);
        assert!(!d2.was_prodded(), "empty ng_prod value must not count as prodded");
    }
}
