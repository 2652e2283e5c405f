//! Integration tests for saving, loading and exporting assembled models

use garm_engine::{Model, Module};
use garm_foundation::ErrorKind;
use garm_runtime::{from_bytes, load_from_file, merge, save_to_file, to_bngl, to_bytes};
use garm_stdlib::{GProtein, ReceptorActivation};

fn full_model() -> Model {
    let receptor = ReceptorActivation::default();
    let gprotein = GProtein::default();
    let modules: [&dyn Module; 2] = [&receptor, &gprotein];
    merge(&modules).unwrap()
}

// =============================================================================
// MessagePack
// =============================================================================

#[test]
fn saved_model_reloads_identically() {
    let model = full_model();
    let path = std::env::temp_dir().join("garm_integration_model.msgpack");

    save_to_file(&model, &path).unwrap();
    let loaded = load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, model);
    assert!((loaded.resolve("kr_G_bind_R_A").unwrap() - 0.08).abs() < 1e-12);
}

#[test]
fn reloaded_model_can_be_extended() {
    let base = merge(&[&ReceptorActivation::default()]).unwrap();
    let reloaded = from_bytes(&to_bytes(&base).unwrap()).unwrap();

    let extended = reloaded.merge(&[&GProtein::default()]).unwrap();
    // Declaration order differs from a single merge, the contents do not.
    assert_eq!(extended.stats(), full_model().stats());
    assert_eq!(
        extended.resolve("kr_L_bind_R_AG").unwrap(),
        full_model().resolve("kr_L_bind_R_AG").unwrap()
    );
}

#[test]
fn truncated_bytes_fail() {
    let bytes = to_bytes(&full_model()).unwrap();
    let err = from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SerializationError(_)));
}

// =============================================================================
// BNGL
// =============================================================================

#[test]
fn export_lists_every_declaration() {
    let model = full_model();
    let text = to_bngl(&model).unwrap();
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let stats = model.stats();
    let rule_lines = lines.iter().filter(|l| l.contains("<->")).count();
    let observable_lines = lines.iter().filter(|l| l.starts_with("Molecules ")).count();
    assert_eq!(rule_lines, stats.rules);
    assert_eq!(observable_lines, stats.observables);

    assert!(lines.contains(&"G(b)"));
    assert!(lines.contains(&"GDP(b)@C GDP_0"));
    assert!(lines.contains(&"CM 2 V_CM EXTRA"));
}

#[test]
fn export_survives_roundtrip() {
    let model = full_model();
    let restored = from_bytes(&to_bytes(&model).unwrap()).unwrap();
    assert_eq!(to_bngl(&restored).unwrap(), to_bngl(&model).unwrap());
}
