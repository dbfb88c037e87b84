use std::fs::File;
use std::io;
use std::path::Path;

use zip::ZipArchive;

const ALLOWED_EXTENSIONS: [&str; 4] = ["pdb", "ent", "pdb.gz", "ent.gz"];

fn has_allowed_extension(path: &str) -> bool {
    ALLOWED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Load all structure files in the given path, sorted by name.
pub fn load_path(dir: &str, recursive: bool) -> Vec<String> {
    let mut pdb_paths = Vec::new();
    let paths = std::fs::read_dir(dir).expect("Unable to read structure directory");

    for path in paths {
        let path = path.expect("Unable to read path");
        let path = path.path();
        let path = path.to_str().expect("Unable to convert path to string");
        if recursive && Path::new(path).is_dir() {
            let mut sub_pdb_paths = load_path(path, recursive);
            pdb_paths.append(&mut sub_pdb_paths);
        } else if has_allowed_extension(path) {
            pdb_paths.push(path.to_string());
        }
    }
    pdb_paths.sort();
    pdb_paths
}

/// Extract every structure file from a zip archive into `dest_dir` and return
/// the extracted paths sorted by name, so cluster members always process in
/// the same order.
pub fn unzip_archive(zip_path: &str, dest_dir: &Path) -> Result<Vec<String>, String> {
    let file = File::open(zip_path).map_err(|e| format!("Error opening {}: {}", zip_path, e))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| format!("Error reading archive {}: {}", zip_path, e))?;

    std::fs::create_dir_all(dest_dir)
        .map_err(|e| format!("Error creating {}: {}", dest_dir.display(), e))?;

    let mut extracted = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| format!("Error reading archive {}: {}", zip_path, e))?;
        if entry.is_dir() {
            continue;
        }
        let Some(enclosed) = entry.enclosed_name() else {
            continue;
        };
        let Some(file_name) = enclosed.file_name() else {
            continue;
        };
        let out_path = dest_dir.join(file_name);
        let out_str = match out_path.to_str() {
            Some(s) => s.to_string(),
            None => continue,
        };
        if !has_allowed_extension(&out_str) {
            continue;
        }
        let mut out_file = File::create(&out_path)
            .map_err(|e| format!("Error creating {}: {}", out_path.display(), e))?;
        io::copy(&mut entry, &mut out_file)
            .map_err(|e| format!("Error extracting {}: {}", out_path.display(), e))?;
        extracted.push(out_str);
    }
    extracted.sort();
    Ok(extracted)
}
