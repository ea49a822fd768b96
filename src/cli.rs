use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "attainmap")]
#[command(about = "Outcome attainment analytics and reporting", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-CLO attainment report for one course offering
    CloReport {
        /// Course offering id
        #[arg(long)]
        offering: u32,

        /// Dataset snapshot (JSON)
        #[arg(long, env = "ATTAINMAP_DATA")]
        data: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include per-student attainment detail
        #[arg(long)]
        students: bool,

        /// Include per-assessment-component breakdown
        #[arg(long)]
        components: bool,
    },

    /// Per-PLO attainment report for one degree program
    PloReport {
        /// Degree id
        #[arg(long)]
        degree: u32,

        /// Dataset snapshot (JSON)
        #[arg(long, env = "ATTAINMAP_DATA")]
        data: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Restrict aggregation to one academic session
        #[arg(long)]
        session: Option<u32>,

        /// Include the historical per-session trend series
        #[arg(long)]
        trend: bool,
    },

    /// Course report for one offering: CLO statistics plus enrollment,
    /// component, and grade data
    CourseReport {
        /// Course offering id
        #[arg(long)]
        offering: u32,

        /// Dataset snapshot (JSON)
        #[arg(long, env = "ATTAINMAP_DATA")]
        data: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Program report for one degree: PLO rollup plus course, student,
    /// PEO, and action-plan data
    ProgramReport {
        /// Degree id
        #[arg(long)]
        degree: u32,

        /// Dataset snapshot (JSON)
        #[arg(long, env = "ATTAINMAP_DATA")]
        data: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Most recent improvement action plans to include
        #[arg(long, default_value = "10")]
        plan_limit: usize,

        /// Include the historical per-session trend series
        #[arg(long)]
        trend: bool,
    },
}
