use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::Stage;
use crate::study::domain::Timepoint;

/// Longitudinal vulnerability study of container base images
#[derive(Parser, Debug)]
#[command(name = "vuln-timeline")]
#[command(version)]
#[command(
    about = "Mirror container base images, scan them at fixed timepoints and consolidate the results",
    long_about = None
)]
pub struct Args {
    /// Path to the study configuration file (defaults to ./vuln-timeline.config.yml if present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show debug output, including every external tool invocation
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Verify that terraform, az, docker and trivy are installed
    Check,
    /// Create the container registry and record its coordinates
    Provision,
    /// Log the container engine into the registry
    #[command(alias = "login")]
    Authenticate,
    /// Copy the tracked images into the registry
    Mirror,
    /// Scan every tracked image and write the timepoint's table
    Scan {
        /// Timepoint to record: T0, T1, T2 or T3
        #[arg(value_parser = parse_timepoint)]
        timepoint: Timepoint,
    },
    /// Merge all timepoint tables into the analysis dataset
    Consolidate,
    /// Show how far the pipeline has progressed
    Status,
}

impl Command {
    /// The pipeline stage run by this command, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Command::Provision => Some(Stage::Provision),
            Command::Authenticate => Some(Stage::Authenticate),
            Command::Mirror => Some(Stage::Mirror),
            Command::Scan { .. } => Some(Stage::Scan),
            Command::Consolidate => Some(Stage::Consolidate),
            Command::Check | Command::Status => None,
        }
    }
}

fn parse_timepoint(raw: &str) -> Result<Timepoint, String> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_timepoint() {
        let args = Args::try_parse_from(["vuln-timeline", "scan", "t2"]).unwrap();
        assert_eq!(
            args.command,
            Command::Scan {
                timepoint: Timepoint::T2
            }
        );
        assert!(!args.verbose);
    }

    #[test]
    fn test_invalid_timepoint_is_rejected() {
        let err = Args::try_parse_from(["vuln-timeline", "scan", "T9"]).unwrap_err();
        assert!(err.to_string().contains("Invalid timepoint"));
    }

    #[test]
    fn test_login_alias() {
        let args = Args::try_parse_from(["vuln-timeline", "login"]).unwrap();
        assert_eq!(args.command, Command::Authenticate);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args =
            Args::try_parse_from(["vuln-timeline", "consolidate", "--verbose", "--config", "study.yml"])
                .unwrap();
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("study.yml")));
        assert_eq!(args.command.stage(), Some(Stage::Consolidate));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["vuln-timeline"]).is_err());
    }

    #[test]
    fn test_status_has_no_stage() {
        assert_eq!(Command::Status.stage(), None);
        assert_eq!(Command::Check.stage(), None);
    }
}
