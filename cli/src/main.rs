//! RESPONSE SPECTRA GENERATOR
//!
//! Computes the response spectra of all the acceleration time histories
//! (`.ahl`, `.csv`, `.at2` and `.acc` files, and fixed width columns files if set) found in a folder.
//! The spectra are written to the `RS` sub-folder, one `<file>_RS.csv` file per time histories file.
//! Files sharing the same name get the extension appended: `<file>_<ext>_RS.csv`.
//!
//! ```shell
//! cargo run -r --bin rsgen -- --settings RS_settings.toml
//! ```
//! If the settings file does not exist, a default one is written and the program exits.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use rsgen::SpectrumBuilder;
use rsgen_io::{source, Filing, Settings, SpectraTable, SETTINGS_FILE};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// settings file
    #[arg(short, long, default_value = SETTINGS_FILE)]
    settings: PathBuf,
    /// time histories folder, overrides the settings folder
    #[arg(short, long)]
    folder: Option<PathBuf>,
    /// number of threads (default: number of logical cores)
    #[arg(short, long)]
    threads: Option<usize>,
    /// writes the default settings file and exits
    #[arg(long)]
    init: bool,
}

/// Time histories file processing outcome
#[derive(Debug, Default)]
struct Report {
    records: usize,
    failures: usize,
}

fn process(
    path: &Path,
    stem: &str,
    rs_dir: &Path,
    settings: &Settings,
    builder: &SpectrumBuilder,
) -> anyhow::Result<Report> {
    let time_histories = settings.source(path)?.read()?;
    let mut report = Report {
        records: time_histories.len(),
        ..Default::default()
    };

    let mut spectra = vec![];
    for result in builder.build_all(&time_histories) {
        match result {
            Ok(set) => {
                log::debug!("{set}");
                spectra.push(set)
            }
            Err(e) => {
                log::error!("{path:?}: {:#}", anyhow::Error::from(e));
                report.failures += 1;
            }
        }
    }
    if spectra.is_empty() {
        anyhow::bail!("no response spectra computed");
    }

    let csv_file = format!("{stem}_RS.csv");
    let dampings: Vec<String> = settings.damping.iter().map(|z| z.to_string()).collect();
    let mut table = SpectraTable::new(&spectra)
        .title(csv_file.as_str())
        .note("RS settings:")
        .note(format!("damping = {}", dampings.join(" ")));
    table = match &settings.periods {
        Some(periods) => table.note(format!("periods = {} user defined", periods.len())),
        None => table
            .note(format!("high_frequency = {}", settings.high_frequency))
            .note(format!("rigid = {}", settings.rigid)),
    };
    table = table.note(format!("method = {}", settings.method));
    for th in &time_histories {
        table = table.note(format!(
            "{}: PGA = {:.6} PGV = {:.6} PGD = {:.6}",
            th.label(),
            th.peak(),
            th.peak_velocity(),
            th.peak_displacement()
        ));
    }
    table
        .note("Note: acceleration units match the input time histories")
        .to_path(rs_dir.join(&csv_file))?;
    if settings.binary {
        spectra.to_path(rs_dir.join(format!("{stem}_RS.bin")))?;
    }
    Ok(report)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if args.init || !args.settings.exists() {
        Settings::write_default(&args.settings)?;
        println!(
            "Default settings written to {:?}, edit the file and rerun",
            args.settings
        );
        return Ok(());
    }
    let mut settings = Settings::from_path(&args.settings)
        .with_context(|| format!("failed to load {:?}", args.settings))?;
    if let Some(folder) = args.folder {
        settings.folder = folder;
    }
    log::info!("settings:\n{settings}");

    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()?;
    }

    let files = settings
        .scan()
        .with_context(|| format!("can't read folder {:?}", settings.folder))?;
    if files.is_empty() {
        log::warn!(
            "no time histories found in {:?} (extensions: {})",
            settings.folder,
            settings.extensions().join(", ")
        );
        return Ok(());
    }
    log::info!("{} time histories files found", files.len());
    let stems = source::output_stems(&files);

    let rs_dir = settings.folder.join("RS");
    fs::create_dir_all(&rs_dir).with_context(|| format!("can't create {rs_dir:?}"))?;
    let builder = settings.spectrum_builder()?;
    log::info!("{builder}");

    let now = Instant::now();
    let reports: Vec<_> = files
        .par_iter()
        .zip(&stems)
        .progress()
        .map(|(path, stem)| {
            let report = process(path, stem, &rs_dir, &settings, &builder);
            if let Err(e) = &report {
                log::error!("{path:?}: {e:#}");
            }
            report
        })
        .collect();

    let failed_files = reports.iter().filter(|r| r.is_err()).count();
    let (records, failed_records) = reports
        .iter()
        .flatten()
        .fold((0, 0), |(n, f), r| (n + r.records, f + r.failures));
    println!(
        "{} files processed ({} failed), {} records ({} failed) in {:.3}s",
        files.len(),
        failed_files,
        records,
        failed_records,
        now.elapsed().as_secs_f64()
    );
    if failed_files + failed_records > 0 {
        anyhow::bail!("response spectra generation completed with failures");
    }
    Ok(())
}
