use crate::sequence::tables::{canonical_for_modified, is_ion};
use crate::structure::core::{Chain, Residue};

/// Heteroatom residues of a chain that can guide the binding-site search.
/// Waters, ions and modified amino acids are excluded.
pub fn ligand_candidates(chain: &Chain) -> Vec<&Residue> {
    chain
        .residues
        .iter()
        .filter(|res| {
            if res.is_amino_acid() || res.is_water() {
                return false;
            }
            let name = res.name_str();
            !is_ion(name) && canonical_for_modified(name).is_none()
        })
        .collect()
}

/// Representative ligand among the candidates. With a requested name, only
/// residues of that name qualify (`None` when absent). Otherwise the residue
/// with the most atoms wins; ties go to the first one seen.
pub fn select_ligand<'a>(candidates: &[&'a Residue], requested: Option<&str>) -> Option<&'a Residue> {
    let pool: Vec<&Residue> = match requested {
        Some(name) => {
            let named: Vec<&Residue> = candidates
                .iter()
                .copied()
                .filter(|res| res.name_str() == name)
                .collect();
            if named.is_empty() {
                return None;
            }
            named
        }
        None => candidates.to_vec(),
    };

    let mut best: Option<&Residue> = None;
    let mut best_atoms = 0usize;
    for res in pool {
        if res.atoms.len() > best_atoms {
            best = Some(res);
            best_atoms = res.atoms.len();
        }
    }
    best
}
