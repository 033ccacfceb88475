//! Command-line interface argument parsing.

use crate::data::NullPolicy;
use crate::stats::{AgeRange, MedalFilter};
use clap::Parser;
use std::path::PathBuf;

/// Olympic History Dashboard
///
/// Merges the athlete-events and NOC-region tables, cleans them and shows
/// medal statistics in an interactive window.
///
/// Examples:
///   olympic-dashboard
///   olympic-dashboard --athletes data/athlete_events.csv --regions data/noc_regions.csv
///   olympic-dashboard --headless --export-dir report --medal-filter gold
///   olympic-dashboard --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Athlete-events CSV file
    #[arg(long, value_name = "FILE", env = "OLYMPIC_ATHLETES")]
    pub athletes: Option<PathBuf>,

    /// NOC-region CSV file
    #[arg(long, value_name = "FILE", env = "OLYMPIC_REGIONS")]
    pub regions: Option<PathBuf>,

    /// Where to write the merged (pre-clean) dataset
    #[arg(long, value_name = "FILE", conflicts_with = "no_dump")]
    pub merged_output: Option<PathBuf>,

    /// Do not write the merged dataset
    #[arg(long)]
    pub no_dump: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .olympic-dashboard.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Columns inspected when dropping rows with nulls
    #[arg(long, value_enum, value_name = "POLICY")]
    pub null_policy: Option<NullPolicy>,

    /// Initial medal type of the country chart
    #[arg(long, value_enum, value_name = "TYPE")]
    pub medal_filter: Option<MedalFilter>,

    /// Lower bound of the athlete age range (inclusive)
    #[arg(long, value_name = "AGE")]
    pub age_min: Option<u32>,

    /// Upper bound of the athlete age range (inclusive)
    #[arg(long, value_name = "AGE")]
    pub age_max: Option<u32>,

    /// Export the dashboard to files instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Output directory for --headless exports
    #[arg(long, default_value = "dashboard_export", value_name = "DIR")]
    pub export_dir: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .olympic-dashboard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        for bound in [self.age_min, self.age_max].into_iter().flatten() {
            if !(AgeRange::MIN..=AgeRange::MAX).contains(&bound) {
                return Err(format!(
                    "Age bounds must lie within {}..={}, got {}",
                    AgeRange::MIN,
                    AgeRange::MAX,
                    bound
                ));
            }
        }

        if let (Some(lo), Some(hi)) = (self.age_min, self.age_max) {
            if lo > hi {
                return Err(format!("--age-min {} exceeds --age-max {}", lo, hi));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "olympic-dashboard",
            "--athletes",
            "a.csv",
            "--null-policy",
            "used-columns",
            "--medal-filter",
            "silver",
            "--age-min",
            "18",
            "--headless",
        ])
        .unwrap();

        assert_eq!(args.athletes, Some(PathBuf::from("a.csv")));
        assert_eq!(args.null_policy, Some(NullPolicy::UsedColumns));
        assert_eq!(args.medal_filter, Some(MedalFilter::Silver));
        assert_eq!(args.age_min, Some(18));
        assert!(args.headless);
        assert_eq!(args.export_dir, PathBuf::from("dashboard_export"));
    }

    #[test]
    fn test_no_dump_conflicts_with_merged_output() {
        let result = Args::try_parse_from([
            "olympic-dashboard",
            "--no-dump",
            "--merged-output",
            "m.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let args = Args {
            verbose: true,
            quiet: true,
            ..Default::default()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_age_bounds() {
        let args = Args {
            age_min: Some(5),
            ..Default::default()
        };
        assert!(args.validate().is_err());

        let args = Args {
            age_min: Some(40),
            age_max: Some(30),
            ..Default::default()
        };
        assert!(args.validate().is_err());

        let args = Args {
            age_min: Some(20),
            age_max: Some(100),
            ..Default::default()
        };
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = Args::default();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
