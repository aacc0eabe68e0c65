//! The status-file line format: parser, emitter, and atomic on-disk
//! persistence for a single component (spec §4.3, §4.4).
//!
//! ```text
//! line    = symbol? key '=' value '\n'
//! symbol  = '%' | '#' | '^' | '.'
//! key     = ( host '.' )? ( component '.' )? name
//! ```
//!
//! Value bytes on a plain (symbol-less) line carry the `&#xD;`/`&#xA;`/
//! `&#x26;` entity encoding; lines for the other attributes (type,
//! derivation, priority, context) are raw text.

use std::io::Write as _;
use std::path::Path;

use lcfg_core::{decode, Component, OptionFlags, Resource};

use crate::error::{IoError, IoResult, ParseError};

/// Parse the on-disk status-file text of a single component.
///
/// `component_name` is the component this text is being loaded into; any
/// key carrying an explicit component segment that disagrees with it is a
/// [`ParseError::ComponentMismatch`]. Processing stops at the first error,
/// discarding the partially-built component (spec §7).
pub fn parse_component(component_name: &str, text: &str) -> IoResult<Component> {
    let component = Component::new(component_name)?;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::MissingSeparator { line: line_no })?;

        let (symbol, _host, comp, resource_name) =
            Resource::parse_key(key).map_err(|source| ParseError::Key { line: line_no, source })?;

        if let Some(comp) = &comp {
            if comp != component_name {
                return Err(ParseError::ComponentMismatch {
                    line: line_no,
                    key: key.to_string(),
                    expected: component_name.to_string(),
                }
                .into());
            }
        }

        let resource = component
            .find_or_create(&resource_name)
            .map_err(|source| ParseError::Key { line: line_no, source })?;

        let applied_value = if symbol.is_none() { decode(value) } else { value.to_string() };
        resource
            .set_attribute(symbol, &applied_value)
            .map_err(|source| ParseError::Value { line: line_no, source })?;
    }

    Ok(component)
}

/// Render a component's status-file text: active resources only unless
/// `ALL_PRIORITIES` is set, sorted lexicographically by name for stable
/// byte-for-byte diffs (spec §4.3, §6).
pub fn emit_component(component: &Component, options: OptionFlags) -> String {
    let mut resources = component.resources_for_options(options);
    resources.sort_by(|a, b| a.name().cmp(&b.name()));

    let mut out = String::new();
    for res in resources {
        out.push_str(&res.serialise_status("", options));
    }
    out
}

/// Load a component's status file from `path`. The component name is
/// derived from the file's name, matching the "one file per component,
/// filename equal to the component name" directory layout (spec §4.3).
pub fn load_status_file(path: &Path) -> IoResult<Component> {
    let component_name = file_stem_as_component_name(path)?;
    let text = std::fs::read_to_string(path)?;
    parse_component(&component_name, &text)
}

/// Write a component's status file to `path`, atomically: the new content
/// goes to a sibling temp file first, which is renamed over `path` only on
/// success (spec §4.3, §4.4).
pub fn save_status_file(path: &Path, component: &Component, options: OptionFlags) -> IoResult<()> {
    let body = emit_component(component, options);
    atomic_write(path, body.as_bytes())
}

/// Write `bytes` to `path` via a sibling temp file renamed into place.
/// The temp file is unlinked on any I/O failure rather than left behind.
pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> IoResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    let write_result = tmp.write_all(bytes).and_then(|_| tmp.flush());
    match write_result {
        Ok(()) => {
            tmp.persist(path).map_err(|e| e.error)?;
            Ok(())
        }
        Err(e) => Err(IoError::Io(e)),
    }
}

fn file_stem_as_component_name(path: &Path) -> IoResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            lcfg_core::ValidationError::InvalidName {
                name: path.display().to_string(),
            }
            .into()
        })
}
