//! `jdhub template|review|commit|reference`: the import workflow.

use std::path::{Path, PathBuf};

use jdhub_config::Settings;
use jdhub_import::{
    commit, BatchReport, CommitError, ImportError, ImportTemplate, ReferenceIndex, ReferenceSet,
    TemplateDefaults,
};
use jdhub_io::payload::JsonPayloadSink;
use jdhub_io::IoError;

use crate::exit_codes::{
    EXIT_COMMIT_FAILED, EXIT_INPUT_UNREADABLE, EXIT_INVALID_ROWS, EXIT_NOTHING_TO_COMMIT,
    EXIT_REFERENCE_INVALID,
};
use crate::render;
use crate::{CliError, REFERENCE_ENV};

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn cmd_template(
    settings: &Settings,
    reference: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let set = match reference_path(settings, reference) {
        Some(path) => load_reference(&path)?,
        None => {
            tracing::warn!("no reference snapshot configured, template uses default names");
            ReferenceSet::default()
        }
    };

    let defaults = TemplateDefaults {
        location: settings.template.location.clone(),
        department: settings.template.department.clone(),
        team: settings.template.team.clone(),
    };
    let template = ImportTemplate::from_reference(&set, &defaults);

    let output = output.unwrap_or_else(|| PathBuf::from(&settings.template.file_name));
    jdhub_io::template::write_template(&template, &output)
        .map_err(|e| CliError::general(e.to_string()))?;

    eprintln!("wrote {}", output.display());
    Ok(())
}

pub fn cmd_review(
    settings: &Settings,
    file: PathBuf,
    reference: Option<PathBuf>,
    json_output: bool,
    csv_output: Option<PathBuf>,
) -> Result<(), CliError> {
    let index = load_index(settings, reference)?;
    let report = review_file(&file, &index)?;

    if let Some(ref path) = csv_output {
        jdhub_io::report::write_report_csv(&report, path)
            .map_err(|e| CliError::general(e.to_string()))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", render::review_table(&report));
    }

    eprintln!("{}", render::summary_line(&report.summary));

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::new(
            EXIT_INVALID_ROWS,
            format!("{} of {} rows are invalid", report.summary.invalid, report.summary.total),
        )
        .with_hint("fix the listed rows and run review again; commit skips invalid rows"))
    }
}

pub fn cmd_commit(
    settings: &Settings,
    file: PathBuf,
    reference: Option<PathBuf>,
    payload: PathBuf,
) -> Result<(), CliError> {
    let index = load_index(settings, reference)?;
    let report = review_file(&file, &index)?;

    let mut sink = JsonPayloadSink::new(&payload);
    let outcome = commit(&report, &mut sink).map_err(|e| match e {
        CommitError::NothingToCommit => CliError::new(EXIT_NOTHING_TO_COMMIT, e.to_string())
            .with_hint(format!("run `jdhub review {}` to see why every row failed", file.display())),
        CommitError::Sink(_) => CliError::new(EXIT_COMMIT_FAILED, e.to_string()),
    })?;

    if outcome.skipped_invalid > 0 {
        eprint!("{}", render::invalid_rows(&report));
    }
    eprintln!(
        "imported {} users to {} ({} invalid rows skipped)",
        outcome.inserted,
        sink.path().display(),
        outcome.skipped_invalid,
    );
    Ok(())
}

pub fn cmd_reference_check(settings: &Settings, file: Option<PathBuf>) -> Result<(), CliError> {
    let index = load_index(settings, file)?;
    println!("locations:   {}", index.location_count());
    println!("departments: {}", index.department_count());
    println!("teams:       {}", index.team_count());
    println!("users:       {}", index.user_count());
    if index.skipped_count() > 0 {
        println!("skipped:     {}", index.skipped_count());
        eprintln!("warning: duplicate names or teams of unknown departments were left out (run with JDHUB_LOG=warn for details)");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared steps
// ---------------------------------------------------------------------------

/// Flag or `JDHUB_REFERENCE` (clap merges both), then the settings file.
fn reference_path(settings: &Settings, flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| settings.reference_path.clone())
}

fn load_reference(path: &Path) -> Result<ReferenceSet, CliError> {
    jdhub_io::reference::load_reference(path)
        .map_err(|e| CliError::new(EXIT_REFERENCE_INVALID, e.to_string()))
}

fn load_index(settings: &Settings, flag: Option<PathBuf>) -> Result<ReferenceIndex, CliError> {
    let path = reference_path(settings, flag).ok_or_else(|| {
        CliError::usage("no reference snapshot given").with_hint(format!(
            "pass --reference FILE or set {REFERENCE_ENV}; a default can go in {}",
            Settings::config_path_display()
        ))
    })?;

    let set = load_reference(&path)?;
    Ok(ReferenceIndex::build(&set))
}

fn review_file(file: &Path, index: &ReferenceIndex) -> Result<BatchReport, CliError> {
    let rows = jdhub_io::read_rows(file).map_err(input_err)?;
    jdhub_import::run(&rows, index).map_err(|e| match e {
        ImportError::EmptyInput => CliError::new(
            EXIT_INPUT_UNREADABLE,
            format!("{}: {e}", file.display()),
        )
        .with_hint("the header row must hold column names, with data rows below it"),
    })
}

fn input_err(e: IoError) -> CliError {
    let hint = matches!(e, IoError::UnsupportedFormat(_))
        .then(|| "save the sheet as .xlsx or .csv".to_string());
    CliError { code: EXIT_INPUT_UNREADABLE, message: e.to_string(), hint }
}
