//! Binding-site location: ligand selection, per-member transfer pipeline and
//! docking-box generation.

pub mod docking_box;
pub mod ligand;
pub mod locator;
