//! End-to-end scenarios (spec §8) exercised across `lcfg-core` +
//! `lcfg-io` together, the way a caller of both crates actually would.

use lcfg_core::{ChangeCode, Component, ComponentSet, DiffProfile, OptionFlags, Resource};

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
fn priority_driven_merge() {
    let net = component_with("net", &[("eth0", "up", 0)]);
    let incoming = component_with("net", &[("eth0", "down", 5)]);

    let change = net.merge_component(&incoming).unwrap();
    assert_eq!(change, ChangeCode::Modified);
    let eth0 = net.find("eth0").unwrap();
    assert_eq!(eth0.value().as_deref(), Some("down"));
    assert_eq!(eth0.priority(), 5);
}

#[test]
fn conflict_refusal() {
    let web = component_with("web", &[("port", "80", 0)]);
    let incoming = component_with("web", &[("port", "8080", 0)]);

    let err = web.merge_component(&incoming).unwrap_err();
    assert!(err.to_string().to_lowercase().contains("conflict"));
    assert_eq!(web.find("port").unwrap().value().as_deref(), Some("80"));
}

#[test]
fn status_round_trip_via_temp_directory() {
    let kernel = Component::new("kernel").unwrap();
    let version = Resource::new("version").unwrap();
    version.set_value("4.18").unwrap();
    kernel.append(version);

    let modules = Resource::new("modules").unwrap();
    modules.set_type(lcfg_core::ResourceType::List).unwrap();
    modules.set_value("usb net").unwrap();
    kernel.append(modules);

    let debug = Resource::new("debug").unwrap();
    debug.set_type(lcfg_core::ResourceType::Boolean).unwrap();
    debug.set_value("yes").unwrap();
    kernel.append(debug);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kernel");
    lcfg_io::save_status_file(&path, &kernel, OptionFlags::empty()).unwrap();
    let reloaded = lcfg_io::load_status_file(&path).unwrap();

    // Insertion order is replaced by sort order on reload (spec §8 scenario 3).
    assert_eq!(reloaded.names(), vec!["debug", "modules", "version"]);
    assert_eq!(reloaded.find("version").unwrap().value().as_deref(), Some("4.18"));
    assert_eq!(reloaded.find("modules").unwrap().resource_type(), lcfg_core::ResourceType::List);
    assert_eq!(reloaded.find("debug").unwrap().value().as_deref(), Some("yes"));
}

#[test]
fn quickdiff_buckets_across_a_component_set() {
    let a = ComponentSet::new();
    a.insert_or_replace(component_with("auth", &[("version", "v1", 0)]));
    a.insert_or_replace(component_with("net", &[("eth0", "up", 0)]));

    let b = ComponentSet::new();
    b.insert_or_replace(component_with("auth", &[("version", "v2", 0)]));
    b.insert_or_replace(component_with("dns", &[("resolver", "1.1.1.1", 0)]));

    let (modified, added, removed) = lcfg_core::quickdiff_set(&a, &b);
    assert_eq!(modified.as_slice(), &["auth"]);
    assert_eq!(added.as_slice(), &["dns"]);
    assert_eq!(removed.as_slice(), &["net"]);
}

#[test]
fn prod_detection_requires_nonempty_new_value() {
    let old = component_with("cron", &[("schedule", "daily", 0)]);
    let new = component_with("cron", &[("schedule", "daily", 0), ("ng_prod", "1", 0)]);
    let diff = lcfg_core::DiffComponent::diff(&old, &new);
    assert!(diff.was_prodded());

    let old2 = component_with("cron", &[("schedule", "daily", 0)]);
    let new2 = component_with("cron", &[("schedule", "daily", 0), ("ng_prod", "", 0)]);
    let diff2 = lcfg_core::DiffComponent::diff(&old2, &new2);
    assert!(!diff2.was_prodded());
}

#[test]
fn hold_file_suppression_and_emission() {
    let s1 = ComponentSet::new();
    s1.insert_or_replace(component_with("net", &[("foo", "a", 0)]));
    let s2 = ComponentSet::new();
    s2.insert_or_replace(component_with("net", &[("foo", "b", 0), ("bar", "", 0)]));

    let profile = DiffProfile::diff(&s1, &s2);
    let dir = tempfile::tempdir().unwrap();
    let hold_path = dir.path().join("net.hold");
    let digest = lcfg_io::write_hold_file(&hold_path, &profile, OptionFlags::empty()).unwrap();

    let text = std::fs::read_to_string(&hold_path).unwrap();
    assert_eq!(text, "net.foo:\n - a\n + b\n");
    assert!(!text.contains("bar"), "addition with an empty value must be suppressed");
    assert_eq!(digest.len(), 32);
}
