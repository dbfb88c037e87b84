//! Workflow for locating the binding site of a target structure from the
//! ligand positions of its sequence identity cluster members.

use crate::cli::config::{read_site_config_from_file, SiteConfig};
use crate::cli::AppArgs;
use crate::site::locator::BindingSiteLocator;
use crate::utils::log::{print_log_msg, DONE, FAIL};

pub const HELP_SITE: &str = "\
USAGE: bindsite site [OPTIONS]
Options:
    -i, --input <PDB>            Target structure where the binding site is to be found
    -c, --clusters <ZIP|DIR>     ZIP archive or directory with the PDB members of the identity cluster
    -o, --output <PDB>           Output PDB with the binding-site residues
    --config <TOML>              Read options from a TOML config file
    -l, --ligand <NAME>          Ligand to look for; default picks the largest one
    -r, --radius <RADIUS>        Cutoff distance around ligand atoms (default 5.0)
    -n, --max-members <N>        Soft cap on accepted cluster members, 0 = unlimited (default 15)
    -m, --matrix <NAME>          Substitution matrix for the alignment (default BLOSUM62)
    --gap-open <PENALTY>         Gap open penalty (default -10.0)
    --gap-extend <PENALTY>       Gap extend penalty (default -0.5)
    -v, --verbose                Print verbose messages
    -h, --help                   Print this help menu
";

pub fn find_site(env: AppArgs) {
    match env {
        AppArgs::Site {
            input_pdb,
            clusters_zip,
            output_pdb,
            config,
            ligand,
            radius,
            max_members,
            matrix_name,
            gap_open,
            gap_extend,
            verbose,
            help,
        } => {
            if help {
                eprintln!("{}", HELP_SITE);
                std::process::exit(0);
            }
            let (Some(input_pdb), Some(clusters_zip), Some(output_pdb)) =
                (input_pdb, clusters_zip, output_pdb)
            else {
                print_log_msg(FAIL, "Input structure, cluster archive and output path are required");
                eprintln!("{}", HELP_SITE);
                std::process::exit(1);
            };

            // Config file values first, explicit flags override.
            let mut site_config = match config {
                Some(path) => read_site_config_from_file(&path),
                None => SiteConfig::default(),
            };
            if ligand.is_some() {
                site_config.ligand = ligand;
            }
            if let Some(radius) = radius {
                site_config.radius = radius;
            }
            if let Some(max_members) = max_members {
                site_config.max_members = max_members;
            }
            if let Some(matrix_name) = matrix_name {
                site_config.matrix_name = matrix_name;
            }
            if let Some(gap_open) = gap_open {
                site_config.gap_open = gap_open;
            }
            if let Some(gap_extend) = gap_extend {
                site_config.gap_extend = gap_extend;
            }

            let mut locator =
                BindingSiteLocator::new(&input_pdb, &clusters_zip, &output_pdb, site_config);
            locator.verbose = verbose;
            match locator.run() {
                Ok(report) => {
                    print_log_msg(DONE, &format!(
                        "Binding site written to {} ({} residues kept, {} removed, {} members accepted, {} skipped)",
                        output_pdb,
                        report.residues_kept,
                        report.residues_removed,
                        report.accepted_members,
                        report.skipped_members,
                    ));
                }
                Err(e) => {
                    print_log_msg(FAIL, &e);
                    std::process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("{}", HELP_SITE);
            std::process::exit(1);
        }
    }
}
