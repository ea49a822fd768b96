use anyhow::Result;
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use attainmap::cli::{Cli, Commands};
use attainmap::config::ReportOptions;
use attainmap::io::output::{create_writer, OutputFormat};
use attainmap::report::assembler;
use attainmap::report::Report;
use attainmap::store::memory::InMemoryStore;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::CloReport {
            offering,
            data,
            format,
            output,
            students,
            components,
        } => {
            let store = load_store(&data)?;
            let options = ReportOptions {
                include_students: students,
                include_components: components,
                ..Default::default()
            };
            let report = assembler::clo_report(&store, offering, &options)?;
            emit(report, format, output)
        }
        Commands::PloReport {
            degree,
            data,
            format,
            output,
            session,
            trend,
        } => {
            let store = load_store(&data)?;
            let options = ReportOptions {
                include_trend: trend,
                ..Default::default()
            };
            let report = assembler::plo_report(&store, degree, session, &options)?;
            emit(report, format, output)
        }
        Commands::CourseReport {
            offering,
            data,
            format,
            output,
        } => {
            let store = load_store(&data)?;
            let report = assembler::course_report(&store, offering, &ReportOptions::default())?;
            emit(report, format, output)
        }
        Commands::ProgramReport {
            degree,
            data,
            format,
            output,
            plan_limit,
            trend,
        } => {
            let store = load_store(&data)?;
            let options = ReportOptions {
                include_trend: trend,
                action_plan_limit: plan_limit,
                ..Default::default()
            };
            let report = assembler::program_report(&store, degree, &options)?;
            emit(report, format, output)
        }
    }
}

fn load_store(path: &Path) -> Result<InMemoryStore> {
    Ok(InMemoryStore::from_json_file(path)?)
}

fn emit(report: Report, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut writer = create_writer(sink, format);
    writer.write_report(&report)
}
