use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ocreport::commands::{self, convert::ConvertArgs};
use ocreport::{config, logging};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Shorthand for `convert`
    #[command(flatten)]
    convert: ConvertArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an OCLint XML report into normalized violations
    Convert(ConvertArgs),

    /// Write a default .ocreport/config.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let args = Args::parse();

    let convert_args = match args.command {
        Some(Commands::Init { path, force }) => {
            logging::init(0, None);
            let p = path.unwrap_or_else(|| PathBuf::from("."));
            if let Err(e) = commands::init::run_init(&p, force) {
                eprintln!("init failed: {:#}", e);
                std::process::exit(1);
            }
            return;
        }
        Some(Commands::Convert(c)) => c,
        None => args.convert,
    };

    let cfg = match config::load_config(convert_args.config.as_deref(), &PathBuf::from(".")) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to load config: {:#}", e);
            std::process::exit(2);
        }
    };

    logging::init(convert_args.verbose, cfg.logging.level.as_deref());

    if let Err(e) = commands::convert::run(convert_args, &cfg) {
        eprintln!("convert failed: {:#}", e);
        std::process::exit(1);
    }
}
