use crate::structure::atom::Atom;
use crate::structure::coordinate::Coordinate;
use crate::structure::core::{ResidueId, HET_AMINO, HET_OTHER, HET_WATER};

/// One parsed ATOM/HETATM record together with the residue and chain it
/// belongs to.
#[derive(Debug)]
pub struct AtomRecord {
    pub chain: u8,
    pub res_id: ResidueId,
    pub res_name: [u8; 3],
    pub atom: Atom,
}

const WATER_NAMES: [&[u8; 3]; 2] = [b"HOH", b"WAT"];

pub fn parse_line(line: &str) -> Result<AtomRecord, &'static str> {
    // Columns up to the B-factor (66) are required; the element field is
    // optional since many tools emit truncated lines.
    if line.len() < 66 || !line.is_ascii() {
        return Err("Line too short for an atom record");
    }
    let hetatm = match &line[..6] {
        "ATOM  " => false,
        "HETATM" => true,
        _ => return Err("Not an atom record"),
    };

    let serial = line[6..11].trim().parse::<u32>();
    let atom_name = parse_atom(&line[12..16]);
    let res_name = parse_residue(&line[17..20]);
    let chain = line.as_bytes()[21];
    let res_serial = line[22..26].trim().parse::<i32>();
    let icode = line.as_bytes()[26];
    let x = line[30..38].trim().parse::<f32>();
    let y = line[38..46].trim().parse::<f32>();
    let z = line[46..54].trim().parse::<f32>();
    let occupancy = line[54..60].trim().parse::<f32>();
    let b_factor = line[60..66].trim().parse::<f32>();

    match (serial, atom_name, res_name, res_serial, x, y, z, occupancy, b_factor) {
        (
            Ok(serial),
            Ok(atom_name),
            Ok(res_name),
            Ok(res_serial),
            Ok(x),
            Ok(y),
            Ok(z),
            Ok(occupancy),
            Ok(b_factor),
        ) => {
            let het = if !hetatm {
                HET_AMINO
            } else if WATER_NAMES.iter().any(|w| **w == res_name) {
                HET_WATER
            } else {
                HET_OTHER
            };
            let element = parse_element(line, &atom_name);
            Ok(AtomRecord {
                chain,
                res_id: ResidueId::new(het, res_serial, icode),
                res_name,
                atom: Atom::new(
                    atom_name,
                    serial,
                    Coordinate::new(x, y, z),
                    occupancy,
                    b_factor,
                    element,
                ),
            })
        }
        _ => Err("Error parsing line"),
    }
}

pub fn parse_atom(name: &str) -> Result<[u8; 4], &'static str> {
    let bytes = name.as_bytes();
    match bytes.len() {
        4 => Ok([bytes[0], bytes[1], bytes[2], bytes[3]]),
        _ => Err("Atom name is not 4 characters long"),
    }
}

pub fn parse_residue(name: &str) -> Result<[u8; 3], &'static str> {
    let bytes = name.as_bytes();
    match bytes.len() {
        3 => Ok([bytes[0], bytes[1], bytes[2]]),
        _ => Err("Residue name is not 3 characters long"),
    }
}

// Element symbol from columns 77-78 when present, otherwise derived from the
// first two characters of the atom name field.
fn parse_element(line: &str, atom_name: &[u8; 4]) -> [u8; 2] {
    if line.len() >= 78 {
        let bytes = &line.as_bytes()[76..78];
        if bytes != b"  " {
            return [bytes[0], bytes[1]];
        }
    }
    let first = atom_name[0];
    if first == b' ' || first.is_ascii_digit() {
        [b' ', atom_name[1]]
    } else {
        [atom_name[0], atom_name[1]]
    }
}
