//!
pub mod parser;
pub mod pdb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StructureFileFormat {
    PDB,
    PDBGz,
    Unknown,
}

impl StructureFileFormat {
    pub fn from_path(path: &str) -> StructureFileFormat {
        if path.ends_with(".pdb.gz") || path.ends_with(".ent.gz") {
            StructureFileFormat::PDBGz
        } else if path.ends_with(".pdb") || path.ends_with(".ent") {
            StructureFileFormat::PDB
        } else {
            StructureFileFormat::Unknown
        }
    }
}
