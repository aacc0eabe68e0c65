//! Directory-level (de)serialisation of a [`ComponentSet`] (spec §4.3,
//! §4.4): one status file per component, filename equal to the component
//! name, in a single flat directory.

use std::path::Path;

use lcfg_core::{validate_name, Component, ComponentSet, OptionFlags};

use crate::error::{IoError, IoResult};
use crate::status::{emit_component, parse_component, atomic_write};

/// Read every status file in `dir` into a fresh [`ComponentSet`].
///
/// Files whose names are not valid component names, or that begin with
/// `.`, are skipped without error (spec §6). A missing directory yields an
/// empty set when `allow_missing` is set; otherwise it is an error.
/// Processing stops at the first file that fails to parse.
pub fn read_status_dir(dir: &Path, allow_missing: bool) -> IoResult<ComponentSet> {
    if !dir.exists() {
        return if allow_missing {
            Ok(ComponentSet::new())
        } else {
            Err(IoError::MissingDirectory { path: dir.display().to_string() })
        };
    }

    let set = ComponentSet::new();
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else { continue };
        if name.starts_with('.') || !validate_name(name) {
            continue;
        }
        if !entry.file_type()?.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(entry.path())?;
        let component = parse_component(name, &text)?;
        set.insert_or_replace(component);
    }

    Ok(set)
}

/// Write every component of `set` to its own status file under `dir`,
/// each atomically (spec §4.3, §4.4). Creates `dir` if it does not exist.
pub fn write_status_dir(dir: &Path, set: &ComponentSet, options: OptionFlags) -> IoResult<()> {
    std::fs::create_dir_all(dir)?;
    for component in set.components() {
        let body = emit_component(&component, options);
        atomic_write(&dir.join(component.name()), body.as_bytes())?;
    }
    Ok(())
}

/// Convenience: find-or-create a component within `set` and return it,
/// validating the name the same way [`Component::new`] would.
pub fn find_or_create(set: &ComponentSet, name: &str) -> IoResult<Component> {
    Ok(set.find_or_create(name)?)
}
