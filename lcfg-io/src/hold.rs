//! Hold-file persistence (spec §4.6).
//!
//! [`lcfg_core::DiffProfile::hold_file`] already streams every component
//! diff's fragment through an MD5 accumulator and returns `(body,
//! digest_hex)` — that part is pure and lives in `lcfg-core` alongside the
//! diff types it operates on. This module is the thin I/O edge: writing
//! that body to disk atomically and handing back the digest so a caller
//! can name or cross-check the file by its content signature.

use std::path::Path;

use lcfg_core::{DiffProfile, OptionFlags};

use crate::error::IoResult;
use crate::status::atomic_write;

/// Compute and atomically write the hold file for `profile` to `path`.
/// Returns the MD5 hex digest of the written content.
pub fn write_hold_file(path: &Path, profile: &DiffProfile, options: OptionFlags) -> IoResult<String> {
    let (body, digest) = profile.hold_file(options);
    atomic_write(path, body.as_bytes())?;
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcfg_core::{Component, ComponentSet, Resource};

    #[test]
    fn writes_hold_file_and_returns_digest() {
        let dir = tempfile::tempdir().unwrap();
        let s1 = ComponentSet::new();
        let net = Component::new("net").unwrap();
        let eth0 = Resource::new("eth0").unwrap();
        eth0.set_value("up").unwrap();
        net.append(eth0);
        s1.insert_or_replace(net);

        let s2 = ComponentSet::new();
        let net2 = Component::new("net").unwrap();
        let eth0b = Resource::new("eth0").unwrap();
        eth0b.set_value("down").unwrap();
        net2.append(eth0b);
        s2.insert_or_replace(net2);

        let profile = DiffProfile::diff(&s1, &s2);
        let path = dir.path().join("net.hold");
        let digest = write_hold_file(&path, &profile, OptionFlags::empty()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("net.eth0:"));
        assert_eq!(digest.len(), 32);
    }
}
