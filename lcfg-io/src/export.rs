//! Shell export-format emission (spec §4.4, §6).
//!
//! `Component::to_env` (in `lcfg-core`) computes the `(name, value)` pairs
//! to publish; this module renders them as `export NAME='VALUE'` lines and,
//! optionally, persists them to disk.

use std::path::Path;

use crate::error::IoResult;
use crate::status::atomic_write;

/// Render `export NAME='VALUE'\n` for each pair, escaping `'` as `'"'"'`
/// (spec §6). Pairs are rendered in the order given — callers wanting a
/// specific ordering (e.g. `_RESOURCES` last) should already have ordered
/// them, as [`lcfg_core::Component::to_env`] does.
pub fn render_export(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (name, value) in pairs {
        out.push_str("export ");
        out.push_str(name);
        out.push_str("='");
        out.push_str(&escape_single_quotes(value));
        out.push_str("'\n");
    }
    out
}

/// Write the rendered export script to `path`, atomically.
pub fn write_export_file(path: &Path, pairs: &[(String, String)]) -> IoResult<()> {
    let body = render_export(pairs);
    atomic_write(path, body.as_bytes())
}

fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', r#"'"'"'"#)
}
