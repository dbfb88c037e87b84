use std::io::{BufRead, Write};

use toml::map::Map;

use crate::utils::log::{log_msg, FAIL};

/// Options of the binding-site workflow. Defaults follow the reference
/// protocol: 5 A cutoff, up to 15 accepted members, BLOSUM62 scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub ligand: Option<String>,
    pub radius: f32,
    pub max_members: usize,
    pub matrix_name: String,
    pub gap_open: f32,
    pub gap_extend: f32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            ligand: None,
            radius: 5.0,
            max_members: 15,
            matrix_name: "BLOSUM62".to_string(),
            gap_open: -10.0,
            gap_extend: -0.5,
        }
    }
}

impl SiteConfig {
    pub fn from_toml(toml: &toml::Value) -> Self {
        let default = SiteConfig::default();
        let ligand = toml.get("ligand").and_then(|x| x.as_str()).map(|x| x.to_string());
        let radius = toml.get("radius").and_then(|x| x.as_float()).map(|x| x as f32);
        let max_members = toml.get("max_members").and_then(|x| x.as_integer()).map(|x| x as usize);
        let matrix_name = toml.get("matrix_name").and_then(|x| x.as_str()).map(|x| x.to_string());
        let gap_open = toml.get("gap_open").and_then(|x| x.as_float()).map(|x| x as f32);
        let gap_extend = toml.get("gap_extend").and_then(|x| x.as_float()).map(|x| x as f32);
        Self {
            ligand,
            radius: radius.unwrap_or(default.radius),
            max_members: max_members.unwrap_or(default.max_members),
            matrix_name: matrix_name.unwrap_or(default.matrix_name),
            gap_open: gap_open.unwrap_or(default.gap_open),
            gap_extend: gap_extend.unwrap_or(default.gap_extend),
        }
    }

    pub fn to_toml(&self) -> toml::Value {
        let mut map = Map::new();
        if let Some(ligand) = &self.ligand {
            map.insert("ligand".to_string(), toml::Value::String(ligand.clone()));
        }
        map.insert("radius".to_string(), toml::Value::Float(self.radius as f64));
        map.insert("max_members".to_string(), toml::Value::Integer(self.max_members as i64));
        map.insert("matrix_name".to_string(), toml::Value::String(self.matrix_name.clone()));
        map.insert("gap_open".to_string(), toml::Value::Float(self.gap_open as f64));
        map.insert("gap_extend".to_string(), toml::Value::Float(self.gap_extend as f64));
        toml::Value::Table(map)
    }
}

pub fn write_site_config_to_file(path: &str, config: SiteConfig) {
    let mut file = std::fs::File::create(path).expect(
        &log_msg(FAIL, &format!("Unable to create config file: {}", path))
    );
    let toml = config.to_toml();
    file.write_all(toml::to_string(&toml).unwrap().as_bytes()).unwrap();
}

pub fn read_site_config_from_file(path: &str) -> SiteConfig {
    let file = std::fs::File::open(path).expect(
        &log_msg(FAIL, &format!("Config file not found: {}", path))
    );
    let reader = std::io::BufReader::new(file);
    let toml = toml::from_str(
        &reader.lines().map(|x| format!("{}\n", x.unwrap())).collect::<String>()
    ).unwrap();
    SiteConfig::from_toml(&toml)
}
