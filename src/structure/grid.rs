use rustc_hash::{FxHashMap, FxHashSet};

use crate::structure::coordinate::Coordinate;
use crate::structure::core::Structure;

/// Hash-grid spatial index over every atom of a structure. Cells are cubes of
/// `spacing` length units; a radius query visits only the cells overlapping
/// the query sphere and returns the indices of residues (in chain order,
/// chains concatenated) with at least one atom inside the radius.
pub struct NeighborGrid {
    spacing: f32,
    cells: FxHashMap<(i32, i32, i32), Vec<usize>>,
    atoms: Vec<(Coordinate, usize)>,
}

impl NeighborGrid {
    pub fn new(structure: &Structure, spacing: f32) -> NeighborGrid {
        assert!(spacing > 0.0, "Grid spacing must be positive");
        let mut atoms = Vec::with_capacity(structure.num_atoms());
        let mut residue_index = 0usize;
        for chain in &structure.chains {
            for residue in &chain.residues {
                for atom in &residue.atoms {
                    atoms.push((atom.coord, residue_index));
                }
                residue_index += 1;
            }
        }

        let mut cells: FxHashMap<(i32, i32, i32), Vec<usize>> = FxHashMap::default();
        for (atom_index, (coord, _)) in atoms.iter().enumerate() {
            cells.entry(cell_of(coord, spacing)).or_default().push(atom_index);
        }

        NeighborGrid { spacing, cells, atoms }
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Residue indices with at least one atom within `radius` of `point`,
    /// sorted ascending.
    pub fn query(&self, point: &Coordinate, radius: f32) -> Vec<usize> {
        let lo = cell_of(&Coordinate::new(point.x - radius, point.y - radius, point.z - radius), self.spacing);
        let hi = cell_of(&Coordinate::new(point.x + radius, point.y + radius, point.z + radius), self.spacing);

        let mut found: FxHashSet<usize> = FxHashSet::default();
        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                for cz in lo.2..=hi.2 {
                    if let Some(atom_indices) = self.cells.get(&(cx, cy, cz)) {
                        for &atom_index in atom_indices {
                            let (coord, residue_index) = &self.atoms[atom_index];
                            if coord.distance(point) <= radius {
                                found.insert(*residue_index);
                            }
                        }
                    }
                }
            }
        }
        let mut result: Vec<usize> = found.into_iter().collect();
        result.sort_unstable();
        result
    }
}

fn cell_of(coord: &Coordinate, spacing: f32) -> (i32, i32, i32) {
    (
        (coord.x / spacing).floor() as i32,
        (coord.y / spacing).floor() as i32,
        (coord.z / spacing).floor() as i32,
    )
}

#[cfg(test)]
mod grid_tests {
    use super::*;
    use crate::structure::atom::Atom;
    use crate::structure::core::{ResidueId, HET_AMINO};

    fn line_structure(n: usize, step: f32) -> Structure {
        let mut structure = Structure::new("grid_test");
        for i in 0..n {
            let id = ResidueId::new(HET_AMINO, i as i32 + 1, b' ');
            let atom = Atom::new(
                *b" CA ", i as u32 + 1,
                Coordinate::new(i as f32 * step, -3.0, 7.5),
                1.0, 0.0, *b" C",
            );
            structure.update(b'A', id, *b"GLY", atom);
        }
        structure
    }

    #[test]
    fn test_query_matches_brute_force() {
        let structure = line_structure(25, 1.7);
        let grid = NeighborGrid::new(&structure, 5.0);
        let chain = structure.first_chain().unwrap();

        for point in [
            Coordinate::new(0.0, 0.0, 7.5),
            Coordinate::new(20.0, -3.0, 7.5),
            Coordinate::new(-100.0, 0.0, 0.0),
        ] {
            let expected: Vec<usize> = chain
                .residues
                .iter()
                .enumerate()
                .filter(|(_, r)| r.atoms.iter().any(|a| a.coord.distance(&point) <= 5.0))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(grid.query(&point, 5.0), expected);
        }
    }

    #[test]
    fn test_query_handles_negative_coordinates() {
        let mut structure = Structure::new("neg");
        let id = ResidueId::new(HET_AMINO, 1, b' ');
        let atom = Atom::new(*b" CA ", 1, Coordinate::new(-12.3, -0.1, -44.0), 1.0, 0.0, *b" C");
        structure.update(b'A', id, *b"GLY", atom);
        let grid = NeighborGrid::new(&structure, 5.0);
        assert_eq!(grid.query(&Coordinate::new(-12.0, 0.0, -44.0), 5.0), vec![0]);
        assert!(grid.query(&Coordinate::new(-12.0, 0.0, -30.0), 5.0).is_empty());
    }
}
