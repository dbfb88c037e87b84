use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::structure::core::Structure;
use crate::structure::io::pdb::Reader as PDBReader;

/// Rectangular parallelepiped around a residue selection: center plus
/// per-axis half-extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockingBox {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

impl DockingBox {
    /// Box around every atom of the structure. `offset` is the extra distance
    /// between the outermost atom and the box boundary on each axis.
    pub fn from_structure(structure: &Structure, offset: f32) -> Result<DockingBox, String> {
        let mut count = 0usize;
        let mut sum = [0.0f64; 3];
        let mut max = [f32::MIN; 3];
        for atom in structure.iter_atoms() {
            let p = atom.coord.to_array();
            for axis in 0..3 {
                sum[axis] += p[axis] as f64;
                if p[axis] > max[axis] {
                    max[axis] = p[axis];
                }
            }
            count += 1;
        }
        if count == 0 {
            return Err(format!("No atoms found in selection {}", structure.name));
        }
        let center = [
            (sum[0] / count as f64) as f32,
            (sum[1] / count as f64) as f32,
            (sum[2] / count as f64) as f32,
        ];
        let size = [
            max[0] - center[0] + offset,
            max[1] - center[1] + offset,
            max[2] - center[2] + offset,
        ];
        Ok(DockingBox { center, size })
    }

    pub fn from_file(path: &str, offset: f32) -> Result<DockingBox, String> {
        let reader = PDBReader::from_file(path)?;
        let structure = reader.read_structure_auto(path)?;
        DockingBox::from_structure(&structure, offset)
    }

    pub fn volume(&self) -> f32 {
        self.size[0] * self.size[1] * self.size[2] * 8.0
    }

    /// The eight corner points of the box.
    pub fn corners(&self) -> [[f32; 3]; 8] {
        let [cx, cy, cz] = self.center;
        let [sx, sy, sz] = self.size;
        [
            [cx - sx, cy - sy, cz - sz],
            [cx - sx, cy - sy, cz + sz],
            [cx - sx, cy + sy, cz - sz],
            [cx - sx, cy + sy, cz + sz],
            [cx + sx, cy - sy, cz - sz],
            [cx + sx, cy - sy, cz + sz],
            [cx + sx, cy + sy, cz - sz],
            [cx + sx, cy + sy, cz + sz],
        ]
    }
}

/// Write the box annotation PDB: one REMARK carrying center and size, and
/// optionally the corners as eight pseudo-atom records.
pub fn write_box_pdb<P: AsRef<Path>>(
    docking_box: &DockingBox,
    path: P,
    with_coords: bool,
) -> Result<(), String> {
    let file = File::create(&path)
        .map_err(|e| format!("Error creating {}: {}", path.as_ref().display(), e))?;
    let mut writer = BufWriter::new(file);
    writeln!(
        writer,
        "REMARK BOX CENTER:{:>10.3}{:>10.3}{:>10.3} SIZE:{:>10.3}{:>10.3}{:>10.3}",
        docking_box.center[0],
        docking_box.center[1],
        docking_box.center[2],
        docking_box.size[0],
        docking_box.size[1],
        docking_box.size[2],
    )
    .map_err(|e| format!("Error writing {}: {}", path.as_ref().display(), e))?;
    if with_coords {
        for (i, corner) in docking_box.corners().iter().enumerate() {
            writeln!(
                writer,
                "HETATM{:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                10000 + i,
                format!("ZN{}", i + 1),
                "ZN",
                "Z",
                9999,
                corner[0],
                corner[1],
                corner[2],
                1.0,
                50.0,
                "ZN",
            )
            .map_err(|e| format!("Error writing {}: {}", path.as_ref().display(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::atom::Atom;
    use crate::structure::coordinate::Coordinate;
    use crate::structure::core::{ResidueId, HET_AMINO};

    fn selection() -> Structure {
        let mut structure = Structure::new("selection");
        let coords = [
            Coordinate::new(0.0, 0.0, 0.0),
            Coordinate::new(4.0, 2.0, 0.0),
            Coordinate::new(2.0, 4.0, 6.0),
        ];
        for (i, coord) in coords.iter().enumerate() {
            let id = ResidueId::new(HET_AMINO, i as i32 + 1, b' ');
            structure.update(
                b'A', id, *b"GLY",
                Atom::new(*b" CA ", i as u32 + 1, *coord, 1.0, 0.0, *b" C"),
            );
        }
        structure
    }

    #[test]
    fn test_box_center_and_size() {
        let docking_box = DockingBox::from_structure(&selection(), 2.0).unwrap();
        assert!((docking_box.center[0] - 2.0).abs() < 1e-5);
        assert!((docking_box.center[1] - 2.0).abs() < 1e-5);
        assert!((docking_box.center[2] - 2.0).abs() < 1e-5);
        // max - center + offset
        assert!((docking_box.size[0] - 4.0).abs() < 1e-5);
        assert!((docking_box.size[1] - 4.0).abs() < 1e-5);
        assert!((docking_box.size[2] - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_volume() {
        let docking_box = DockingBox { center: [0.0; 3], size: [1.0, 2.0, 3.0] };
        assert_eq!(docking_box.volume(), 48.0);
    }

    #[test]
    fn test_empty_selection() {
        let structure = Structure::new("empty");
        assert!(DockingBox::from_structure(&structure, 2.0).is_err());
    }

    #[test]
    fn test_write_box_pdb() {
        let docking_box = DockingBox { center: [1.0, 2.0, 3.0], size: [4.0, 5.0, 6.0] };
        let path = std::env::temp_dir().join("bindsite_box_test.pdb");
        write_box_pdb(&docking_box, &path, true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("REMARK BOX CENTER:"));
        assert!(content.contains("SIZE:"));
        assert_eq!(content.lines().filter(|l| l.starts_with("HETATM")).count(), 8);
    }
}
