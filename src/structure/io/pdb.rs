use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;

use super::parser::parse_line;
use super::StructureFileFormat;
use crate::structure::core::{Structure, HET_AMINO};

/// A PDB reader
#[derive(Debug)]
pub struct Reader<R: io::Read> {
    pub reader: R,
    pub name: String,
}

impl Reader<File> {
    pub fn new(file: File, name: &str) -> Self {
        Reader { reader: file, name: name.to_string() }
    }

    /// Read from a file path. The structure name is the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let name = structure_name(path.as_ref());
        File::open(&path)
            .map(|file| Reader::new(file, &name))
            .map_err(|e| format!("Error opening {}: {}", path.as_ref().display(), e))
    }

    pub fn read_structure(&self) -> Result<Structure, String> {
        let reader = BufReader::new(&self.reader);
        self.build_structure(reader)
    }

    pub fn read_structure_from_gz(&self) -> Result<Structure, String> {
        let reader = BufReader::new(GzDecoder::new(&self.reader));
        self.build_structure(reader)
    }

    /// Pick the plain or gzip reader from the file extension. Unknown
    /// extensions are read as plain PDB.
    pub fn read_structure_auto(&self, path: &str) -> Result<Structure, String> {
        match StructureFileFormat::from_path(path) {
            StructureFileFormat::PDBGz => self.read_structure_from_gz(),
            _ => self.read_structure(),
        }
    }

    fn build_structure<B: BufRead>(&self, reader: B) -> Result<Structure, String> {
        let mut structure = Structure::new(&self.name);
        for line in reader.lines() {
            let line = line.map_err(|e| format!("Error reading {}: {}", self.name, e))?;
            // Only the first model is used.
            if line.starts_with("ENDMDL") {
                break;
            }
            if !line.starts_with("ATOM  ") && !line.starts_with("HETATM") {
                continue;
            }
            match parse_line(&line) {
                Ok(record) => {
                    structure.update(record.chain, record.res_id, record.res_name, record.atom);
                }
                // Conversion error. Just skip the line.
                Err(_) => continue,
            }
        }
        Ok(structure)
    }
}

fn structure_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("structure");
    // strip the inner extension of ".pdb.gz"
    stem.trim_end_matches(".pdb").trim_end_matches(".ent").to_string()
}

/// Serialize a structure as PDB. Atom serials are renumbered sequentially;
/// every other field round-trips from the parsed records.
pub fn write_pdb<P: AsRef<Path>>(structure: &Structure, path: P) -> Result<(), String> {
    let file = File::create(&path)
        .map_err(|e| format!("Error creating {}: {}", path.as_ref().display(), e))?;
    let mut writer = BufWriter::new(file);
    let mut serial: u32 = 1;
    for chain in &structure.chains {
        for residue in &chain.residues {
            let record = if residue.id.het == HET_AMINO { "ATOM  " } else { "HETATM" };
            for atom in &residue.atoms {
                let line = format!(
                    "{}{:>5} {} {} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {}",
                    record,
                    serial,
                    field_str(&atom.name),
                    format!("{:>3}", residue.name_str()),
                    chain.id as char,
                    residue.id.num,
                    residue.id.icode as char,
                    atom.coord.x,
                    atom.coord.y,
                    atom.coord.z,
                    atom.occupancy,
                    atom.b_factor,
                    field_str(&atom.element),
                );
                writeln!(writer, "{}", line)
                    .map_err(|e| format!("Error writing {}: {}", path.as_ref().display(), e))?;
                serial += 1;
            }
        }
        writeln!(writer, "TER")
            .map_err(|e| format!("Error writing {}: {}", path.as_ref().display(), e))?;
    }
    writeln!(writer, "END")
        .map_err(|e| format!("Error writing {}: {}", path.as_ref().display(), e))?;
    Ok(())
}

fn field_str(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or("")
}
