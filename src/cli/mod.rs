//! Command line interface for Bindsite

// Arguments of CLI app are defined here

pub mod workflows;
pub mod config;

pub enum AppArgs {
    Global {
        help: bool,
    },
    Site {
        input_pdb: Option<String>,
        clusters_zip: Option<String>,
        output_pdb: Option<String>,
        config: Option<String>,
        ligand: Option<String>,
        radius: Option<f32>,
        max_members: Option<usize>,
        matrix_name: Option<String>,
        gap_open: Option<f32>,
        gap_extend: Option<f32>,
        verbose: bool,
        help: bool,
    },
    Box {
        input_pdb: Option<String>,
        output_pdb: Option<String>,
        offset: f32,
        coords: bool,
        help: bool,
    },
}
