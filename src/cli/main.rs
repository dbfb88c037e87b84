use bindsite::cli::workflows::find_site::find_site;
use bindsite::cli::workflows::make_box::make_box;
use bindsite::cli::AppArgs;

const HELP: &str = "\
USAGE: bindsite site [OPTIONS]
       bindsite box [OPTIONS]

SUBCOMMANDS:
  site      Find the binding site of a target structure from the ligands of
            its sequence identity cluster members
  box       Set the center and size of a docking box around a residue selection
OPTIONS:
  -h, --help                 Print this help menu
";

fn parse_arg() -> Result<AppArgs, Box<dyn std::error::Error>> {
    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some("site") => Ok(AppArgs::Site {
            input_pdb: args.opt_value_from_str(["-i", "--input"])?,
            clusters_zip: args.opt_value_from_str(["-c", "--clusters"])?,
            output_pdb: args.opt_value_from_str(["-o", "--output"])?,
            config: args.opt_value_from_str("--config")?,
            ligand: args.opt_value_from_str(["-l", "--ligand"])?,
            radius: args.opt_value_from_str(["-r", "--radius"])?,
            max_members: args.opt_value_from_str(["-n", "--max-members"])?,
            matrix_name: args.opt_value_from_str(["-m", "--matrix"])?,
            gap_open: args.opt_value_from_str("--gap-open")?,
            gap_extend: args.opt_value_from_str("--gap-extend")?,
            verbose: args.contains(["-v", "--verbose"]),
            help: args.contains(["-h", "--help"]),
        }),
        Some("box") => Ok(AppArgs::Box {
            input_pdb: args.opt_value_from_str(["-i", "--input"])?,
            output_pdb: args.opt_value_from_str(["-o", "--output"])?,
            offset: args.value_from_str(["-f", "--offset"]).unwrap_or(2.0),
            coords: args.contains("--coords"),
            help: args.contains(["-h", "--help"]),
        }),
        Some(_) => Err("Invalid subcommand".into()),
        None => Ok(AppArgs::Global {
            help: args.contains(["-h", "--help"]),
        }),
    }
}

fn main() {
    let parsed_args = parse_arg().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    match parsed_args {
        AppArgs::Global { help } => {
            if help {
                println!("{}", HELP);
            } else {
                println!("No subcommand specified. Try `bindsite --help` for more information.");
            }
        }
        env @ AppArgs::Site { .. } => find_site(env),
        env @ AppArgs::Box { .. } => make_box(env),
    }
}
