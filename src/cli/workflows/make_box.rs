//! Workflow for annotating a docking box around a residue selection,
//! typically the binding-site output of the `site` workflow.

use crate::cli::AppArgs;
use crate::site::docking_box::{write_box_pdb, DockingBox};
use crate::utils::log::{print_log_msg, DONE, FAIL, INFO};

pub const HELP_BOX: &str = "\
USAGE: bindsite box [OPTIONS]
Options:
    -i, --input <PDB>            PDB with the residue selection to enclose
    -o, --output <PDB>           Output PDB with the box annotation REMARK
    -f, --offset <OFFSET>        Extra distance between the selection and the box boundary (default 2.0)
    --coords                     Also write the box corners as eight pseudo-atom records
    -h, --help                   Print this help menu
";

pub fn make_box(env: AppArgs) {
    match env {
        AppArgs::Box { input_pdb, output_pdb, offset, coords, help } => {
            if help {
                eprintln!("{}", HELP_BOX);
                std::process::exit(0);
            }
            let (Some(input_pdb), Some(output_pdb)) = (input_pdb, output_pdb) else {
                print_log_msg(FAIL, "Input selection and output path are required");
                eprintln!("{}", HELP_BOX);
                std::process::exit(1);
            };

            let docking_box = DockingBox::from_file(&input_pdb, offset).unwrap_or_else(|e| {
                print_log_msg(FAIL, &e);
                std::process::exit(1);
            });
            print_log_msg(INFO, &format!(
                "Box center: {:10.3}{:10.3}{:10.3}",
                docking_box.center[0], docking_box.center[1], docking_box.center[2]
            ));
            print_log_msg(INFO, &format!(
                "Box size:   {:10.3}{:10.3}{:10.3}",
                docking_box.size[0], docking_box.size[1], docking_box.size[2]
            ));
            print_log_msg(INFO, &format!("Volume (cubic length units): {:.0}", docking_box.volume()));

            match write_box_pdb(&docking_box, &output_pdb, coords) {
                Ok(()) => print_log_msg(DONE, &format!("Box annotation written to {}", output_pdb)),
                Err(e) => {
                    print_log_msg(FAIL, &e);
                    std::process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("{}", HELP_BOX);
            std::process::exit(1);
        }
    }
}
