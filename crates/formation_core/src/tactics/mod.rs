// crates/formation_core/src/tactics/mod.rs
// Formation templates used by the matcher

pub mod catalog;

pub use catalog::{FormationCatalog, FormationTemplate};
