//! # About project
//!
//! Bindsite locates the binding site of a target protein structure from the
//! ligand positions of homologous structures (members of a sequence identity
//! cluster). Each cluster member is aligned to the target by sequence,
//! superimposed by its alpha-carbons, and its ligand coordinates are
//! transferred into the target frame; target residues near any transferred
//! ligand form the binding site.

pub mod structure;
pub mod sequence;
pub mod site;
pub mod cli;
pub mod utils;

pub mod prelude {
    pub use crate::structure::core::{Structure, Chain, Residue, ResidueId};
    pub use crate::structure::coordinate::Coordinate;
    pub use crate::structure::io::pdb::{Reader as PDBReader, write_pdb};
    pub use crate::structure::kabsch::KabschSuperimposer;
    pub use crate::structure::grid::NeighborGrid;
    pub use crate::sequence::chain_sequence;
    pub use crate::sequence::alignment::{align_global, alignment_identity, residue_mapping};
    pub use crate::sequence::matrix::SubstitutionMatrix;
    pub use crate::site::locator::{BindingSiteLocator, BindingSiteReport};
    pub use crate::cli::config::SiteConfig;
    pub use crate::utils::log::*;
    pub use crate::utils::loader::{load_path, unzip_archive};
}
