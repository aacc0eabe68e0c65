//! The component container and merge policy (spec §3, §4.4, §4.5).

use crate::change::ChangeCode;
use crate::error::{MergeError, ValidationError};
use crate::options::OptionFlags;
use crate::resource::Resource;
use crate::tag::{validate_name, TagList};

/// Environment-variable naming templates for [`Component::to_env`] (spec
/// §4.4). `val_pfx`/`type_pfx` may each contain a single `%s` placeholder,
/// substituted with the component name exactly once.
#[derive(Debug, Clone)]
pub struct EnvNames {
    pub val_pfx: String,
    pub type_pfx: String,
}

impl EnvNames {
    pub fn new(val_pfx: impl Into<String>, type_pfx: impl Into<String>) -> Self {
        Self {
            val_pfx: val_pfx.into(),
            type_pfx: type_pfx.into(),
        }
    }

    fn expand(template: &str, component: &str) -> String {
        match template.find("%s") {
            Some(idx) => {
                let mut out = String::with_capacity(template.len() + component.len());
                out.push_str(&template[..idx]);
                out.push_str(component);
                out.push_str(&template[idx + 2..]);
                out
            }
            None => template.to_string(),
        }
    }
}

struct ComponentData {
    name: String,
    resources: Vec<Resource>,
    merge_rules: OptionFlags,
}

/// A shared, named, ordered collection of resources (spec §3, §4.4).
///
/// Like [`Resource`](crate::resource::Resource), components are reference
/// counted; cloning shares the same underlying container.
#[derive(Clone)]
pub struct Component(std::rc::Rc<std::cell::RefCell<ComponentData>>);

impl Component {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if !validate_name(name) {
            return Err(ValidationError::InvalidName { name: name.to_string() });
        }
        Ok(Self(std::rc::Rc::new(std::cell::RefCell::new(ComponentData {
            name: name.to_string(),
            resources: Vec::new(),
            merge_rules: OptionFlags::empty(),
        }))))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn merge_rules(&self) -> OptionFlags {
        self.0.borrow().merge_rules
    }

    pub fn set_merge_rules(&self, rules: OptionFlags) {
        self.0.borrow_mut().merge_rules = rules;
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().resources.len()
    }

    /// All resources in insertion (or post-`sort`) order.
    pub fn resources(&self) -> Vec<Resource> {
        self.0.borrow().resources.clone()
    }

    /// Active resources only, in current order.
    pub fn active_resources(&self) -> Vec<Resource> {
        self.0
            .borrow()
            .resources
            .iter()
            .filter(|r| r.is_active())
            .cloned()
            .collect()
    }

    /// Active resources, unless `options` contains `ALL_PRIORITIES`, in
    /// which case every resource (including inactive ones) is returned
    /// (spec §6).
    pub fn resources_for_options(&self, options: OptionFlags) -> Vec<Resource> {
        if options.contains(OptionFlags::ALL_PRIORITIES) {
            self.resources()
        } else {
            self.active_resources()
        }
    }

    /// Resource names in current order (used by `to_env`'s `_RESOURCES`
    /// value and by hold-file emission's component ordering, and exposed
    /// publicly since callers of the real tool need them for display).
    pub fn names(&self) -> Vec<String> {
        self.0.borrow().resources.iter().map(Resource::name).collect()
    }

    /// O(n) linear scan by resource name, case-sensitive.
    pub fn find(&self, name: &str) -> Option<Resource> {
        self.0.borrow().resources.iter().find(|r| r.name() == name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Return the existing resource named `name`, or create and append an
    /// empty one. Fails only on an invalid name.
    pub fn find_or_create(&self, name: &str) -> Result<Resource, ValidationError> {
        if let Some(r) = self.find(name) {
            return Ok(r);
        }
        let r = Resource::new(name)?;
        self.append(r.clone());
        Ok(r)
    }

    /// Append `res`, retaining a share of it.
    pub fn append(&self, res: Resource) {
        self.0.borrow_mut().resources.push(res);
    }

    /// Insert `res` immediately after the resource named `after`, or at the
    /// end if no such resource exists.
    pub fn insert_after(&self, after: &str, res: Resource) {
        let mut data = self.0.borrow_mut();
        match data.resources.iter().position(|r| r.name() == after) {
            Some(idx) => data.resources.insert(idx + 1, res),
            None => data.resources.push(res),
        }
    }

    /// Remove and return the resource immediately after the one named
    /// `after`, if any.
    pub fn remove_after(&self, after: &str) -> Option<Resource> {
        let mut data = self.0.borrow_mut();
        let idx = data.resources.iter().position(|r| r.name() == after)?;
        if idx + 1 < data.resources.len() {
            Some(data.resources.remove(idx + 1))
        } else {
            None
        }
    }

    pub fn remove(&self, name: &str) -> Option<Resource> {
        let mut data = self.0.borrow_mut();
        let idx = data.resources.iter().position(|r| r.name() == name)?;
        Some(data.resources.remove(idx))
    }

    /// Stable sort by resource name (spec §3 invariant).
    pub fn sort(&self) {
        self.0.borrow_mut().resources.sort_by(|a, b| a.name().cmp(&b.name()));
    }

    /// Merge a single incoming resource into this component, following the
    /// three-way priority policy (spec §4.5):
    ///
    /// - no existing resource with this name ⇒ append `new`, report ADDED;
    /// - `pT > pN` ⇒ target wins, report NONE;
    /// - `pN > pT` ⇒ `new` replaces the target in place, report REPLACED;
    /// - `pT == pN` and values equal ⇒ `new` replaces the target, report
    ///   REPLACED (type mismatch at equal priority is allowed through);
    /// - `pT == pN` and values differ ⇒ CONFLICT, neither side mutated.
    pub fn merge_resource(&self, new: &Resource) -> Result<ChangeCode, MergeError> {
        let existing = self.find(&new.name());
        let Some(target) = existing else {
            self.append(new.clone());
            return Ok(ChangeCode::Added);
        };

        let p_target = target.priority();
        let p_new = new.priority();

        if p_target > p_new {
            return Ok(ChangeCode::None);
        }
        if p_new > p_target {
            self.replace(&target, new);
            return Ok(ChangeCode::Replaced);
        }
        if Resource::same_value(&target, new) {
            self.replace(&target, new);
            return Ok(ChangeCode::Replaced);
        }
        Err(MergeError {
            name: new.name(),
            priority: p_new,
            old_value: target.value(),
            new_value: new.value(),
        })
    }

    fn replace(&self, target: &Resource, new: &Resource) {
        let mut data = self.0.borrow_mut();
        if let Some(idx) = data.resources.iter().position(|r| r.name() == target.name()) {
            data.resources[idx] = new.clone();
        }
    }

    /// Unconditionally replace each resource in `self` with its namesake in
    /// `other`. Resources in `other` absent from `self` are appended only
    /// when `take_new` is set (spec §4.4 "override-only" vs "take-new"
    /// variants).
    pub fn apply_overrides(&self, other: &Component, take_new: bool) -> ChangeCode {
        let mut changed = false;
        for res in other.resources() {
            if self.has(&res.name()) {
                self.replace(&self.find(&res.name()).unwrap(), &res);
                changed = true;
            } else if take_new {
                self.append(res);
                changed = true;
            }
        }
        if changed {
            ChangeCode::Modified
        } else {
            ChangeCode::None
        }
    }

    /// Merge every resource of `other` into `self` under the §4.5 policy.
    /// Stops at the first unresolvable conflict.
    pub fn merge_component(&self, other: &Component) -> Result<ChangeCode, MergeError> {
        let mut any_change = false;
        for res in other.resources() {
            match self.merge_resource(&res)? {
                ChangeCode::None => {}
                _ => any_change = true,
            }
        }
        Ok(if any_change { ChangeCode::Modified } else { ChangeCode::None })
    }

    /// Force-overwrite: every resource in `other` replaces (or is appended
    /// alongside) its namesake in `self`, regardless of priority or value.
    /// Always reports MODIFIED if `other` is non-empty.
    pub fn transplant(&self, other: &Component) -> ChangeCode {
        let other_resources = other.resources();
        if other_resources.is_empty() {
            return ChangeCode::None;
        }
        for res in other_resources {
            if self.has(&res.name()) {
                self.replace(&self.find(&res.name()).unwrap(), &res);
            } else {
                self.append(res);
            }
        }
        ChangeCode::Modified
    }

    /// Publish each active resource as an environment variable, plus a
    /// sorted `_RESOURCES` list of exported names (spec §4.4, §6).
    ///
    /// `names.val_pfx` is mandatory context for every published name;
    /// `names.type_pfx`, if non-empty, additionally publishes a
    /// `{type_pfx}{name}` binding carrying the resource's type string.
    /// `ALL_PRIORITIES` includes inactive resources; `ALL_VALUES` includes
    /// resources with no value (published as an empty string) instead of
    /// skipping them.
    pub fn to_env(&self, names: &EnvNames, options: OptionFlags) -> Vec<(String, String)> {
        let component = self.name();
        let val_pfx = EnvNames::expand(&names.val_pfx, &component);
        let type_pfx = EnvNames::expand(&names.type_pfx, &component);

        let mut out = Vec::new();
        let mut exported = TagList::new();
        for res in self.resources_for_options(options) {
            let name = res.name();
            let require_value = !options.contains(OptionFlags::ALL_VALUES);
            let value = res.value();
            if require_value && value.is_none() {
                continue;
            }
            out.push((format!("{val_pfx}{name}"), value.unwrap_or_default()));
            if !type_pfx.is_empty() {
                out.push((format!("{type_pfx}{name}"), res.type_string_opts(options)));
            }
            let _ = exported.mutate_append(&name);
        }
        exported.sort();
        out.push((format!("{val_pfx}_RESOURCES"), exported.to_string_opt(false)));
        out
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name())
            .field("len", &self.len())
            .finish()
    }
}
