//! Sequence extraction, substitution matrices and pairwise alignment.

pub mod alignment;
pub mod matrix;
pub mod tables;

use crate::structure::core::Chain;
use crate::structure::core::ResidueId;

/// Amino-acid sequence of a chain as (identifier, one-letter code) pairs.
/// Restricted to standard amino-acid residues; heteroatoms, waters and
/// unknown residue names are left out.
pub fn chain_sequence(chain: &Chain) -> Vec<(ResidueId, u8)> {
    chain
        .residues
        .iter()
        .filter(|r| r.is_amino_acid())
        .filter_map(|r| tables::three_to_one(&r.name).map(|code| (r.id, code)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::atom::Atom;
    use crate::structure::coordinate::Coordinate;
    use crate::structure::core::{Structure, HET_AMINO, HET_OTHER};

    #[test]
    fn test_chain_sequence_skips_non_amino() {
        let mut structure = Structure::new("seq_test");
        let atom = |x| Atom::new(*b" CA ", 1, Coordinate::new(x, 0.0, 0.0), 1.0, 0.0, *b" C");
        structure.update(b'A', ResidueId::new(HET_AMINO, 1, b' '), *b"ALA", atom(0.0));
        structure.update(b'A', ResidueId::new(HET_AMINO, 2, b' '), *b"TRP", atom(3.8));
        structure.update(b'A', ResidueId::new(HET_AMINO, 3, b' '), *b"UNK", atom(7.6));
        structure.update(b'A', ResidueId::new(HET_OTHER, 101, b' '), *b"LIG", atom(11.0));

        let seq = chain_sequence(structure.first_chain().unwrap());
        let letters: Vec<u8> = seq.iter().map(|p| p.1).collect();
        assert_eq!(letters, b"AW".to_vec());
        assert_eq!(seq[0].0.num, 1);
        assert_eq!(seq[1].0.num, 2);
    }
}
