//! Shared model fixtures

use garm_engine::Model;

/// Ligand and receptor declared in `EXTRA` and `CM`, with binding rates.
pub fn receptor_model() -> Model {
    Model::new()
        .declare_monomer("L", &["b"], &[])
        .unwrap()
        .declare_monomer("R", &["bl", "bg", "state"], &[("state", &["I", "A"])])
        .unwrap()
        .declare_parameters(&[
            ("V_EXTRA", 1000.0),
            ("V_CM", 100.0),
            ("L_0", 1e4),
            ("R_0", 200.0),
            ("kf", 1e-3),
            ("Kd_LR", 100.0),
        ])
        .unwrap()
        .declare_compartment("EXTRA", 3, "V_EXTRA", None)
        .unwrap()
        .declare_compartment("CM", 2, "V_CM", Some("EXTRA"))
        .unwrap()
}
