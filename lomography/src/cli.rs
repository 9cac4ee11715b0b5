//! Command line surface
//!
//! One positional picture path plus optional overrides for the values the
//! configuration file provides.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lomography",
    version,
    about = "Lomography v1.0",
    long_about = "Applies a red-channel color curve and a dark halo to a picture.\n\
                  Move the sliders to tune each filter, press `r` to run the halo\n\
                  again with the stored radius, `s` to save the result and quit,\n\
                  or `q` to quit without saving."
)]
pub struct Cli {
    /// Picture file
    #[arg(value_name = "FILENAME")]
    pub image: PathBuf,

    /// Initial color curve steepness (effective from 8 to 20)
    #[arg(short, long, value_name = "0-20", value_parser = clap::value_parser!(i32).range(0..=20))]
    pub steepness: Option<i32>,

    /// Initial halo radius as a percentage of half the shorter side
    #[arg(short, long, value_name = "0-100", value_parser = clap::value_parser!(i32).range(0..=100))]
    pub radius: Option<i32>,

    /// Where `s` writes the displayed image
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite the radius percentage with the computed pixel radius after
    /// every halo pass. A slider move sets a fresh percentage, so only
    /// repeated passes with `r` shrink the halo
    #[arg(long)]
    pub legacy_radius: bool,

    /// Ignore the configuration file
    #[arg(long)]
    pub no_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_positional_only() {
        let cli = Cli::try_parse_from(["lomography", "photo.jpg"]).unwrap();
        assert_eq!(cli.image, PathBuf::from("photo.jpg"));
        assert_eq!(cli.steepness, None);
        assert_eq!(cli.radius, None);
        assert!(!cli.legacy_radius);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "lomography",
            "-s",
            "14",
            "--radius",
            "60",
            "-o",
            "out.png",
            "--legacy-radius",
            "photo.jpg",
        ])
        .unwrap();

        assert_eq!(cli.steepness, Some(14));
        assert_eq!(cli.radius, Some(60));
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert!(cli.legacy_radius);
    }

    #[test]
    fn test_missing_filename() {
        let err = Cli::try_parse_from(["lomography"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_help_is_an_error() {
        let err = Cli::try_parse_from(["lomography", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_legacy_radius_help_names_reapply_key() {
        use clap::CommandFactory;

        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "legacy_radius")
            .unwrap();
        let help = arg.get_long_help().or(arg.get_help()).unwrap().to_string();
        assert!(help.contains("only repeated passes with `r`"), "{help}");
    }

    #[test]
    fn test_out_of_range_values() {
        assert!(Cli::try_parse_from(["lomography", "-s", "21", "a.jpg"]).is_err());
        assert!(Cli::try_parse_from(["lomography", "-r", "101", "a.jpg"]).is_err());
        assert!(Cli::try_parse_from(["lomography", "-r", "-1", "a.jpg"]).is_err());
    }
}
