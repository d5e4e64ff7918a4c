use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Process PNG or JPEG images to and from the BKS format",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Print more detail while converting. Repeat for debug output.
    ///
    /// RUST_LOG, when set, takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a PNG or JPEG image into a .bks file
    Compress {
        /// Path to the input image (PNG/JPEG)
        input_path: PathBuf,
        /// Path to the output .bks file
        output_path: PathBuf,
    },
    /// Convert a .bks file back into an image. The format follows the output extension.
    Decompress {
        /// Path to the input .bks file
        input_path: PathBuf,
        /// Path to the output image (PNG/JPEG)
        output_path: PathBuf,
    },
    /// Show the header of a .bks file without decoding it
    Info {
        /// Path to the .bks file
        input_path: PathBuf,
    },
}

impl Args {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

#[test]
fn parse_compress() {
    let args = Args::parse_from(["bks", "compress", "in.png", "out.bks"]);
    assert_eq!(args.verbose, 0);
    assert!(matches!(
        args.command,
        Command::Compress { ref input_path, ref output_path }
            if input_path == &PathBuf::from("in.png") && output_path == &PathBuf::from("out.bks")
    ));
}

#[test]
fn parse_verbosity() {
    let args = Args::parse_from(["bks", "-vv", "info", "in.bks"]);
    assert_eq!(args.log_level(), log::LevelFilter::Debug);
    assert!(matches!(args.command, Command::Info { .. }));
}

#[test]
fn reject_unknown_mode() {
    assert!(Args::try_parse_from(["bks", "explode", "a", "b"]).is_err());
    assert!(Args::try_parse_from(["bks", "compress", "only-one"]).is_err());
}
