use std::fmt;

use crate::structure::atom::Atom;
use crate::structure::coordinate::Coordinate;

/// Hetero flag of a residue identifier, following the PDB record type:
/// `b' '` for polymer (ATOM) residues, `b'W'` for waters, `b'H'` for any
/// other HETATM residue.
pub const HET_AMINO: u8 = b' ';
pub const HET_WATER: u8 = b'W';
pub const HET_OTHER: u8 = b'H';

/// Composite residue identifier: hetero flag, sequence number, insertion
/// code. Unique within a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidueId {
    pub het: u8,
    pub num: i32,
    pub icode: u8,
}

impl ResidueId {
    pub fn new(het: u8, num: i32, icode: u8) -> ResidueId {
        ResidueId { het, num, icode }
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.icode == b' ' {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}{}", self.num, self.icode as char)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Residue {
    pub id: ResidueId,
    pub name: [u8; 3],
    pub atoms: Vec<Atom>,
}

impl Residue {
    pub fn new(id: ResidueId, name: [u8; 3]) -> Residue {
        Residue { id, name, atoms: Vec::new() }
    }

    pub fn name_str(&self) -> &str {
        std::str::from_utf8(&self.name).unwrap_or("").trim()
    }

    pub fn ca(&self) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.is_ca())
    }

    pub fn is_amino_acid(&self) -> bool {
        self.id.het == HET_AMINO
    }

    pub fn is_water(&self) -> bool {
        self.id.het == HET_WATER
    }

    /// Hetero field in the style of the composite identifier string:
    /// `" "` for amino acids, `"W"` for waters, `"H_<name>"` otherwise.
    pub fn het_field(&self) -> String {
        match self.id.het {
            HET_AMINO => " ".to_string(),
            HET_WATER => "W".to_string(),
            _ => format!("H_{}", self.name_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Chain {
    pub id: u8,
    pub residues: Vec<Residue>,
}

impl Chain {
    pub fn new(id: u8) -> Chain {
        Chain { id, residues: Vec::new() }
    }

    pub fn residue(&self, id: &ResidueId) -> Option<&Residue> {
        self.residues.iter().find(|r| &r.id == id)
    }

    pub fn num_atoms(&self) -> usize {
        self.residues.iter().map(|r| r.atoms.len()).sum()
    }
}

/// Structure is the main data structure for storing the information of a
/// protein structure. Residues keep their file order within each chain.
#[derive(Debug, Clone)]
pub struct Structure {
    pub name: String,
    pub chains: Vec<Chain>,
}

impl Structure {
    pub fn new(name: &str) -> Structure {
        Structure { name: name.to_string(), chains: Vec::new() }
    }

    /// Append an atom, opening a new chain or residue when the identifiers
    /// change from the previous record.
    pub fn update(&mut self, chain_id: u8, res_id: ResidueId, res_name: [u8; 3], atom: Atom) {
        if self.chains.last().map(|c| c.id) != Some(chain_id) {
            self.chains.push(Chain::new(chain_id));
        }
        let chain = self.chains.last_mut().unwrap();
        let same_residue = chain.residues.last().map(|r| r.id) == Some(res_id);
        if !same_residue {
            chain.residues.push(Residue::new(res_id, res_name));
        }
        chain.residues.last_mut().unwrap().atoms.push(atom);
    }

    pub fn num_chains(&self) -> usize {
        self.chains.len()
    }

    pub fn num_residues(&self) -> usize {
        self.chains.iter().map(|c| c.residues.len()).sum()
    }

    pub fn num_atoms(&self) -> usize {
        self.chains.iter().map(|c| c.num_atoms()).sum()
    }

    pub fn first_chain(&self) -> Option<&Chain> {
        self.chains.first()
    }

    /// Drop every chain except the first. Returns the number of chains
    /// discarded.
    pub fn keep_first_chain(&mut self) -> usize {
        if self.chains.len() <= 1 {
            return 0;
        }
        let dropped = self.chains.len() - 1;
        self.chains.truncate(1);
        dropped
    }

    /// Apply a rigid transformation to every atom of the structure.
    pub fn transform(&mut self, rot: &[[f32; 3]; 3], tran: &[f32; 3]) {
        for chain in &mut self.chains {
            for residue in &mut chain.residues {
                for atom in &mut residue.atoms {
                    let c = atom.coord;
                    atom.coord = Coordinate::new(
                        rot[0][0] * c.x + rot[0][1] * c.y + rot[0][2] * c.z + tran[0],
                        rot[1][0] * c.x + rot[1][1] * c.y + rot[1][2] * c.z + tran[1],
                        rot[2][0] * c.x + rot[2][1] * c.y + rot[2][2] * c.z + tran[2],
                    );
                }
            }
        }
    }

    pub fn iter_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.chains
            .iter()
            .flat_map(|c| c.residues.iter())
            .flat_map(|r| r.atoms.iter())
    }
}

#[cfg(test)]
mod core_tests {
    use super::*;

    fn dummy_atom(name: &[u8; 4], x: f32) -> Atom {
        Atom::new(*name, 1, Coordinate::new(x, 0.0, 0.0), 1.0, 0.0, *b" C")
    }

    #[test]
    fn test_update_groups_residues() {
        let mut structure = Structure::new("test");
        let res1 = ResidueId::new(HET_AMINO, 1, b' ');
        let res2 = ResidueId::new(HET_AMINO, 2, b' ');
        structure.update(b'A', res1, *b"ALA", dummy_atom(b" N  ", 0.0));
        structure.update(b'A', res1, *b"ALA", dummy_atom(b" CA ", 1.5));
        structure.update(b'A', res2, *b"GLY", dummy_atom(b" N  ", 3.0));
        structure.update(b'B', res1, *b"SER", dummy_atom(b" N  ", 9.0));

        assert_eq!(structure.num_chains(), 2);
        assert_eq!(structure.num_residues(), 3);
        assert_eq!(structure.num_atoms(), 4);
        assert_eq!(structure.chains[0].residues[0].atoms.len(), 2);
    }

    #[test]
    fn test_keep_first_chain() {
        let mut structure = Structure::new("test");
        let res = ResidueId::new(HET_AMINO, 1, b' ');
        structure.update(b'A', res, *b"ALA", dummy_atom(b" CA ", 0.0));
        structure.update(b'B', res, *b"ALA", dummy_atom(b" CA ", 5.0));
        assert_eq!(structure.keep_first_chain(), 1);
        assert_eq!(structure.num_chains(), 1);
        assert_eq!(structure.chains[0].id, b'A');
        // a second call is a no-op
        assert_eq!(structure.keep_first_chain(), 0);
    }

    #[test]
    fn test_transform_translation() {
        let mut structure = Structure::new("test");
        let res = ResidueId::new(HET_AMINO, 1, b' ');
        structure.update(b'A', res, *b"ALA", dummy_atom(b" CA ", 1.0));
        let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        structure.transform(&identity, &[10.0, -2.0, 0.5]);
        let atom = structure.iter_atoms().next().unwrap();
        assert_eq!(atom.coord, Coordinate::new(11.0, -2.0, 0.5));
    }

    #[test]
    fn test_het_field() {
        let lig = Residue::new(ResidueId::new(HET_OTHER, 301, b' '), *b"LIG");
        assert_eq!(lig.het_field(), "H_LIG");
        let wat = Residue::new(ResidueId::new(HET_WATER, 401, b' '), *b"HOH");
        assert_eq!(wat.het_field(), "W");
        let ala = Residue::new(ResidueId::new(HET_AMINO, 1, b' '), *b"ALA");
        assert_eq!(ala.het_field(), " ");
    }
}
