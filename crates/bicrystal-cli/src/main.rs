// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! `bicrystal`: explore which interface and bulk bond counts a number of
//! solutes can realize at a grain boundary.
//!
//! The built-in backend is exhaustive, so query cost grows exponentially
//! with the lattice. The defaults (side 5, five solutes) are in its range.
//! The 12 x 12 lattice with 28 solutes is not: its ceiling search stalls, and
//! the run stops at the first query that exceeds `--time-limit-secs`.

use bicrystal_core::math::hull::DegeneracyPolicy;
use bicrystal_explore::{
    error::ExploreError,
    explorer::{Explorer, ExplorerConfig},
    report::ExplorationReport,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{process::ExitCode, time::Duration};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bicrystal")]
#[command(about = "Constructible solute configurations at a planar grain boundary")]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG wins if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the ceiling, classify every candidate triple and report the
    /// extreme configurations
    Explore {
        #[command(flatten)]
        lattice: LatticeArgs,
        /// Worker threads, each with its own oracle
        #[arg(short, long, default_value_t = 1)]
        workers: usize,
        /// Wall-clock limit per oracle query, in seconds; 0 disables it
        #[arg(long, value_parser = parse_seconds, default_value = "60")]
        time_limit_secs: Duration,
        /// Do not force the interface hint sites
        #[arg(long)]
        no_hints: bool,
        /// Do not add the half-lattice symmetry-breaking row
        #[arg(long)]
        no_symmetry_breaking: bool,
        /// Treatment of feasible sets that do not span 3-space
        #[arg(long, value_enum, default_value_t = Degeneracy::Reduce)]
        degeneracy: Degeneracy,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Classify every candidate with the pruning hints and symmetry row and
    /// on a plain model, and list disagreements
    AuditHints {
        #[command(flatten)]
        lattice: LatticeArgs,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Args, Debug)]
struct LatticeArgs {
    /// Lattice side length
    #[arg(short = 'n', long, default_value_t = 5)]
    side: usize,
    /// Number of solute atoms
    #[arg(short = 's', long, default_value_t = 5)]
    num_solute: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Degeneracy {
    /// Report the lower-dimensional hull
    Reduce,
    /// Fail the hull stage
    Reject,
}

impl From<Degeneracy> for DegeneracyPolicy {
    fn from(value: Degeneracy) -> Self {
        match value {
            Degeneracy::Reduce => DegeneracyPolicy::Reduce,
            Degeneracy::Reject => DegeneracyPolicy::Reject,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|e| format!("not a number of seconds: {e}"))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("invalid duration: {e}"))
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &ExplorationReport, format: Format) -> Result<(), String> {
    match format {
        Format::Text => {
            print!("{report}");
            Ok(())
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(report).map_err(|e| e.to_string())?;
            println!("{json}");
            Ok(())
        }
    }
}

/// Progress events of single queries are `debug!` events, so they are only
/// produced when something would print them.
fn progress_log_interval(verbose: u8) -> Option<Duration> {
    (verbose >= 2).then(|| Duration::from_secs(1))
}

fn explore(command: Command, verbose: u8) -> Result<ExitCode, ExploreError> {
    match command {
        Command::Explore {
            lattice,
            workers,
            time_limit_secs,
            no_hints,
            no_symmetry_breaking,
            degeneracy,
            format,
        } => {
            let mut builder = ExplorerConfig::builder(lattice.side, lattice.num_solute)
                .workers(workers)
                .pruning_hints(!no_hints)
                .symmetry_breaking(!no_symmetry_breaking)
                .degeneracy(degeneracy.into());
            if !time_limit_secs.is_zero() {
                builder = builder.query_time_limit(time_limit_secs);
            }
            if let Some(interval) = progress_log_interval(verbose) {
                builder = builder.progress_log_interval(interval);
            }

            let report = Explorer::new(builder.build()?).run()?;
            if let Err(e) = print_report(&report, format) {
                error!("failed to write the report: {e}");
                return Ok(ExitCode::FAILURE);
            }

            // The feasible set is printed above even when the hull failed.
            if let Some(hull_error) = report.hull_error() {
                eprintln!("error: {hull_error}");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::AuditHints { lattice, format } => {
            let mut builder = ExplorerConfig::builder(lattice.side, lattice.num_solute);
            if let Some(interval) = progress_log_interval(verbose) {
                builder = builder.progress_log_interval(interval);
            }
            let config = builder.build()?;
            let audit = Explorer::new(config).audit_hints()?;
            match format {
                Format::Text => print!("{audit}"),
                Format::Json => match serde_json::to_string_pretty(&audit) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        error!("failed to write the audit: {e}");
                        return Ok(ExitCode::FAILURE);
                    }
                },
            }
            Ok(if audit.is_sound() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match explore(cli.command, cli.verbose) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_explore_arguments() {
        let cli = Cli::try_parse_from([
            "bicrystal",
            "explore",
            "-n",
            "4",
            "-s",
            "3",
            "--workers",
            "2",
            "--time-limit-secs",
            "1.5",
            "--no-hints",
            "--degeneracy",
            "reject",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Explore {
                lattice,
                workers,
                time_limit_secs,
                no_hints,
                no_symmetry_breaking,
                degeneracy,
                format,
            } => {
                assert_eq!((lattice.side, lattice.num_solute), (4, 3));
                assert_eq!(workers, 2);
                assert_eq!(time_limit_secs, Duration::from_millis(1500));
                assert!(no_hints);
                assert!(!no_symmetry_breaking);
                assert_eq!(DegeneracyPolicy::from(degeneracy), DegeneracyPolicy::Reject);
                assert_eq!(format, Format::Json);
            }
            other => panic!("expected explore, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_small_and_time_limited() {
        let cli = Cli::try_parse_from(["bicrystal", "audit-hints"]).unwrap();
        match cli.command {
            Command::AuditHints { lattice, format } => {
                assert_eq!((lattice.side, lattice.num_solute), (5, 5));
                assert_eq!(format, Format::Text);
            }
            other => panic!("expected audit-hints, got {other:?}"),
        }

        let cli = Cli::try_parse_from(["bicrystal", "explore"]).unwrap();
        match cli.command {
            Command::Explore {
                lattice,
                time_limit_secs,
                ..
            } => {
                assert_eq!((lattice.side, lattice.num_solute), (5, 5));
                assert_eq!(time_limit_secs, Duration::from_secs(60));
            }
            other => panic!("expected explore, got {other:?}"),
        }
    }

    #[test]
    fn test_progress_logging_follows_verbosity() {
        assert_eq!(progress_log_interval(0), None);
        assert_eq!(progress_log_interval(1), None);
        assert_eq!(progress_log_interval(2), Some(Duration::from_secs(1)));
        assert_eq!(progress_log_interval(3), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_rejects_negative_time_limit() {
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("abc").is_err());
        assert_eq!(parse_seconds("0.25"), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["bicrystal", "-q", "-v", "audit-hints"]).is_err());
    }
}
