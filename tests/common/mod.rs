//! Shared fixtures: synthetic PDB text and zip archives for the pipeline
//! tests.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const TARGET_RESIDUES: [&str; 12] = [
    "ALA", "CYS", "ASP", "GLU", "PHE", "GLY", "HIS", "ILE", "LYS", "LEU", "MET", "ASN",
];

pub fn atom_line(
    record: &str, serial: u32, name: &str, res_name: &str, chain: char,
    res_num: i32, x: f32, y: f32, z: f32,
) -> String {
    // short atom names start at column 14, per the PDB convention
    let name_field = if name.len() < 4 { format!(" {:<3}", name) } else { name.to_string() };
    format!(
        "{:<6}{:>5} {} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}\n",
        record, serial, name_field, res_name, chain, res_num, x, y, z, 1.0, 10.0,
        name.trim().chars().next().unwrap(),
    )
}

/// Twelve-residue single-chain target along the x axis, one N and one CA per
/// residue, with a far-away water and a heteroatom residue sitting right in
/// the middle of the future binding site.
pub fn target_pdb() -> String {
    let mut pdb = String::new();
    let mut serial = 1;
    for (i, res_name) in TARGET_RESIDUES.iter().enumerate() {
        let x = 3.8 * i as f32;
        let z = 0.7 * (i % 3) as f32;
        pdb.push_str(&atom_line("ATOM", serial, "N", res_name, 'A', i as i32 + 1, x, 1.0, z));
        serial += 1;
        pdb.push_str(&atom_line("ATOM", serial, "CA", res_name, 'A', i as i32 + 1, x, 0.0, z));
        serial += 1;
    }
    // in range of the transferred ligand, but heteroatoms never survive
    pdb.push_str(&atom_line("HETATM", serial, "C1", "LXX", 'A', 250, 19.0, 1.5, 0.0));
    serial += 1;
    pdb.push_str(&atom_line("HETATM", serial, "O", "HOH", 'A', 300, 100.0, 100.0, 100.0));
    pdb.push_str("TER\nEND\n");
    pdb
}

/// Cluster member: the target backbone translated by +10 on y, optionally
/// with a three-atom LIG near the sixth residue.
pub fn member_pdb(with_ligand: bool) -> String {
    let mut pdb = String::new();
    let mut serial = 1;
    for (i, res_name) in TARGET_RESIDUES.iter().enumerate() {
        let x = 3.8 * i as f32;
        let z = 0.7 * (i % 3) as f32;
        pdb.push_str(&atom_line("ATOM", serial, "N", res_name, 'A', i as i32 + 1, x, 11.0, z));
        serial += 1;
        pdb.push_str(&atom_line("ATOM", serial, "CA", res_name, 'A', i as i32 + 1, x, 10.0, z));
        serial += 1;
    }
    if with_ligand {
        for (dx, dz) in [(0.0, 0.5), (0.3, 0.2), (-0.3, 0.2)] {
            pdb.push_str(&atom_line(
                "HETATM", serial, "C1", "LIG", 'A', 301, 19.0 + dx, 10.5, dz,
            ));
            serial += 1;
        }
    }
    pdb.push_str("TER\nEND\n");
    pdb
}

/// Member whose amino acids carry no alpha-carbons; alignment succeeds but
/// superposition has nothing to anchor on.
pub fn member_pdb_without_ca() -> String {
    let mut pdb = String::new();
    let mut serial = 1;
    for (i, res_name) in TARGET_RESIDUES.iter().enumerate() {
        let x = 3.8 * i as f32;
        let z = 0.7 * (i % 3) as f32;
        pdb.push_str(&atom_line("ATOM", serial, "N", res_name, 'A', i as i32 + 1, x, 11.0, z));
        serial += 1;
    }
    pdb.push_str(&atom_line("HETATM", serial, "C1", "LIG", 'A', 301, 19.0, 10.5, 0.5));
    pdb.push_str("TER\nEND\n");
    pdb
}

/// Target with no amino-acid residues at all.
pub fn hetero_only_pdb() -> String {
    let mut pdb = String::new();
    pdb.push_str(&atom_line("HETATM", 1, "C1", "LIG", 'A', 1, 0.0, 0.0, 0.0));
    pdb.push_str(&atom_line("HETATM", 2, "O", "HOH", 'A', 2, 5.0, 0.0, 0.0));
    pdb.push_str("TER\nEND\n");
    pdb
}

pub fn write_file(name: &str, content: &str) -> String {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

pub fn write_zip(name: &str, entries: &[(&str, &str)]) -> String {
    let path: PathBuf = std::env::temp_dir().join(name);
    let file = File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (entry_name, content) in entries {
        writer.start_file(*entry_name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path.to_str().unwrap().to_string()
}

pub fn temp_path(name: &str) -> String {
    std::env::temp_dir().join(name).to_str().unwrap().to_string()
}
