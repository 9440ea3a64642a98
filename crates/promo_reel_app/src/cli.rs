// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Compute per-frame layer lists for promotional reels
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize a job's composition and segment windows
    Inspect {
        /// Job file (RON)
        #[arg(value_name = "JOB")]
        job: PathBuf,
    },

    /// Print the layers of one frame as JSON
    Frame {
        /// Job file (RON)
        #[arg(value_name = "JOB")]
        job: PathBuf,

        /// Frame number (0-based)
        #[arg(value_name = "N")]
        frame: u32,
    },

    /// Print the layers of a frame range as JSON lines, rendered in parallel
    Render {
        /// Job file (RON)
        #[arg(value_name = "JOB")]
        job: PathBuf,

        /// First frame (default: 0)
        #[arg(long = "start", value_name = "N")]
        start: Option<u32>,

        /// End frame, exclusive (default: composition duration)
        #[arg(long = "end", value_name = "N")]
        end: Option<u32>,
    },

    /// Print a job file for a built-in template with its default inputs
    Template {
        /// Template to print
        #[arg(value_enum)]
        kind: TemplateKind,
    },
}

/// Built-in templates
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Landscape teaser with animated bullets
    ShortTeaser,
    /// Portrait image slideshow
    Slideshow,
}

impl Args {
    /// Default log directive for the verbosity count
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_range() {
        let args = Args::try_parse_from(["promo_reel", "-vv", "render", "job.ron", "--start", "10", "--end", "20"]).unwrap();
        assert_eq!(args.log_level(), "debug");
        match args.command {
            Command::Render { job, start, end } => {
                assert_eq!(job, PathBuf::from("job.ron"));
                assert_eq!(start, Some(10));
                assert_eq!(end, Some(20));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_template_kind() {
        let args = Args::try_parse_from(["promo_reel", "template", "short-teaser"]).unwrap();
        assert!(matches!(args.command, Command::Template { kind: TemplateKind::ShortTeaser }));
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn test_rejects_negative_frame() {
        assert!(Args::try_parse_from(["promo_reel", "frame", "job.ron", "-3"]).is_err());
    }
}
