//! Profile-level diffs and the fast set-level quickdiff (spec §4.6, §4.7).

use crate::component_set::ComponentSet;
use crate::diff_component::DiffComponent;
use crate::options::OptionFlags;
use crate::tag::TagList;

/// A flat sequence of component diffs; no further aggregation (spec §4.6).
#[derive(Debug, Clone)]
pub struct DiffProfile {
    diffs: Vec<DiffComponent>,
}

impl DiffProfile {
    /// Diff every component present in either `s1` or `s2`.
    pub fn diff(s1: &ComponentSet, s2: &ComponentSet) -> Self {
        let mut seen = TagList::new();
        let mut diffs = Vec::new();
        for c1 in s1.components() {
            let c2 = s2.find(&c1.name());
            diffs.push(DiffComponent::diff(&c1, &c2.unwrap_or_else(|| empty_like(&c1))));
            let _ = seen.mutate_add(&c1.name());
        }
        for c2 in s2.components() {
            if !seen.contains(&c2.name()) {
                diffs.push(DiffComponent::diff(&empty_like(&c2), &c2));
            }
        }
        Self { diffs }
    }

    pub fn components(&self) -> &[DiffComponent] {
        &self.diffs
    }

    /// Names of components whose aggregate classification was "prodded"
    /// (spec §4.7).
    pub fn prodded_components(&self) -> Vec<&str> {
        self.diffs.iter().filter(|d| d.was_prodded()).map(DiffComponent::name).collect()
    }

    /// Stream every component's hold-file fragment, threading the bytes
    /// through an MD5 accumulator so the caller can attach a stable content
    /// signature to the emitted file (spec §4.6).
    ///
    /// Returns `(body, digest_hex)`.
    pub fn hold_file(&self, options: OptionFlags) -> (String, String) {
        use md5::{Digest, Md5};
        let mut hasher = Md5::new();
        let mut body = String::new();
        for d in &self.diffs {
            let fragment = d.hold_fragments(options);
            hasher.update(fragment.as_bytes());
            body.push_str(&fragment);
        }
        (body, format!("{:x}", hasher.finalize()))
    }
}

fn empty_like(c: &crate::component::Component) -> crate::component::Component {
    crate::component::Component::new(&c.name()).expect("component names are already validated")
}

/// Fast structural comparator at the component-set level (spec §4.6):
/// classify each component via [`DiffComponent::quickdiff`] and bucket its
/// name into `modified`/`removed`/`added`, without building per-resource
/// detail. Returns `(modified, added, removed)` tag lists; all three are
/// empty when nothing differs.
pub fn quickdiff_set(s1: &ComponentSet, s2: &ComponentSet) -> (TagList, TagList, TagList) {
    let mut modified = TagList::new();
    let mut added = TagList::new();
    let mut removed = TagList::new();

    for c1 in s1.components() {
        let name = c1.name();
        match s2.find(&name) {
            Some(c2) => match DiffComponent::quickdiff(&c1, &c2) {
                crate::change::ChangeCode::None => {}
                _ => {
                    let _ = modified.mutate_add(&name);
                }
            },
            None => {
                let _ = removed.mutate_add(&name);
            }
        }
    }
    for c2 in s2.components() {
        if !s1.has(&c2.name()) {
            let _ = added.mutate_add(&c2.name());
        }
    }

    (modified, added, removed)
}
