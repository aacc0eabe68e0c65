//! Component sets: an ordered collection of components indexed by name
//! (spec §3, §4.4, §4.5).

use crate::change::ChangeCode;
use crate::component::Component;
use crate::error::{MergeError, ValidationError};

struct ComponentSetData {
    components: Vec<Component>,
}

/// A shared, ordered collection of components with at most one component
/// per name.
#[derive(Clone)]
pub struct ComponentSet(std::rc::Rc<std::cell::RefCell<ComponentSetData>>);

impl ComponentSet {
    pub fn new() -> Self {
        Self(std::rc::Rc::new(std::cell::RefCell::new(ComponentSetData {
            components: Vec::new(),
        })))
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().components.len()
    }

    pub fn components(&self) -> Vec<Component> {
        self.0.borrow().components.clone()
    }

    /// Component names in current order.
    pub fn names(&self) -> Vec<String> {
        self.0.borrow().components.iter().map(Component::name).collect()
    }

    pub fn find(&self, name: &str) -> Option<Component> {
        self.0.borrow().components.iter().find(|c| c.name() == name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Return the existing component named `name`, or create and insert an
    /// empty one.
    pub fn find_or_create(&self, name: &str) -> Result<Component, ValidationError> {
        if let Some(c) = self.find(name) {
            return Ok(c);
        }
        let c = Component::new(name)?;
        self.insert_or_replace(c.clone());
        Ok(c)
    }

    /// Insert `component`, replacing any existing component with the same
    /// name.
    pub fn insert_or_replace(&self, component: Component) {
        let mut data = self.0.borrow_mut();
        match data.components.iter().position(|c| c.name() == component.name()) {
            Some(idx) => data.components[idx] = component,
            None => data.components.push(component),
        }
    }

    pub fn remove(&self, name: &str) -> Option<Component> {
        let mut data = self.0.borrow_mut();
        let idx = data.components.iter().position(|c| c.name() == name)?;
        Some(data.components.remove(idx))
    }

    /// Force-overwrite: every component in `other` replaces (or is
    /// appended alongside) its namesake in `self`, via [`Component::transplant`].
    pub fn transplant(&self, other: &ComponentSet) -> ChangeCode {
        let mut changed = false;
        for comp in other.components() {
            match self.find(&comp.name()) {
                Some(existing) => {
                    if existing.transplant(&comp) == ChangeCode::Modified {
                        changed = true;
                    }
                }
                None => {
                    self.insert_or_replace(comp);
                    changed = true;
                }
            }
        }
        if changed {
            ChangeCode::Modified
        } else {
            ChangeCode::None
        }
    }

    /// Merge every component of `other` into `self` under the §4.5 policy.
    /// When `take_new` is set, components in `other` with no counterpart in
    /// `self` are appended (shared, not copied); otherwise they are
    /// ignored. Stops at the first unresolvable conflict.
    pub fn merge(&self, other: &ComponentSet, take_new: bool) -> Result<ChangeCode, MergeError> {
        let mut any_change = false;
        for comp in other.components() {
            match self.find(&comp.name()) {
                Some(existing) => {
                    if existing.merge_component(&comp)? == ChangeCode::Modified {
                        any_change = true;
                    }
                }
                None if take_new => {
                    self.insert_or_replace(comp);
                    any_change = true;
                }
                None => {}
            }
        }
        Ok(if any_change { ChangeCode::Modified } else { ChangeCode::None })
    }
}

impl Default for ComponentSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComponentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentSet")
            .field("components", &self.components().iter().map(Component::name).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;

    fn component_with(name: &str, entries: &[(&str, &str, i64)]) -> Component {
        let c = Component::new(name).unwrap();
        for (rname, value, priority) in entries {
            let r = Resource::new(rname).unwrap();
            r.set_value(value).unwrap();
            r.set_priority(*priority);
            c.append(r);
        }
        c
    }

    #[test]
    fn names_reflects_insertion_order() {
        let set = ComponentSet::new();
        set.insert_or_replace(component_with("net", &[]));
        set.insert_or_replace(component_with("disk", &[]));
        assert_eq!(set.names(), vec!["net", "disk"]);
    }

    #[test]
    fn find_or_create_is_idempotent() {
        let set = ComponentSet::new();
        let c1 = set.find_or_create("net").unwrap();
        let c2 = set.find_or_create("net").unwrap();
        assert_eq!(set.len(), 1);
        c1.append(Resource::new("eth0").unwrap());
        assert_eq!(c2.len(), 1);
    }

    #[test]
    fn insert_or_replace_overwrites_same_name() {
        let set = ComponentSet::new();
        set.insert_or_replace(component_with("net", &[("eth0", "up", 0)]));
        set.insert_or_replace(component_with("net", &[("eth1", "down", 0)]));
        assert_eq!(set.len(), 1);
        assert!(set.find("net").unwrap().has("eth1"));
    }

    #[test]
    fn merge_take_new_appends_unmatched_components() {
        let set = ComponentSet::new();
        set.insert_or_replace(component_with("net", &[("eth0", "up", 0)]));
        let other = ComponentSet::new();
        other.insert_or_replace(component_with("disk", &[("mount", "/", 0)]));
        assert_eq!(set.merge(&other, true).unwrap(), ChangeCode::Modified);
        assert!(set.has("disk"));
    }

    #[test]
    fn merge_without_take_new_ignores_unmatched_components() {
        let set = ComponentSet::new();
        set.insert_or_replace(component_with("net", &[("eth0", "up", 0)]));
        let other = ComponentSet::new();
        other.insert_or_replace(component_with("disk", &[("mount", "/", 0)]));
        assert_eq!(set.merge(&other, false).unwrap(), ChangeCode::None);
        assert!(!set.has("disk"));
    }

    #[test]
    fn merge_propagates_resource_conflicts() {
        let set = ComponentSet::new();
        set.insert_or_replace(component_with("net", &[("eth0", "up", 3)]));
        let other = ComponentSet::new();
        other.insert_or_replace(component_with("net", &[("eth0", "down", 3)]));
        assert!(set.merge(&other, true).is_err());
    }

    #[test]
    fn transplant_is_unconditional() {
        let set = ComponentSet::new();
        set.insert_or_replace(component_with("net", &[("eth0", "up", 100)]));
        let other = ComponentSet::new();
        other.insert_or_replace(component_with("net", &[("eth0", "down", -100)]));
        assert_eq!(set.transplant(&other), ChangeCode::Modified);
        assert_eq!(set.find("net").unwrap().find("eth0").unwrap().value().as_deref(), Some("down"));
    }
}
