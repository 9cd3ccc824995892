use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span};

use faixa_cli::blocks::overview;
use faixa_cli::logging::redact_value;
use faixa_core::{
    Interaction, MacroKind, MacroSettings, prepare_export, run_macro, write_export,
};
use faixa_model::OutputSchema;
use faixa_store::{CsvWorkbook, Workbook, WorkbookConfig};

use crate::cli::{ExportArgs, WorkbookArgs};
use crate::types::{ActionResult, ExportFile, ShowResult};

/// Opens the workbook directory, applying command-line overrides on top of
/// `workbook.toml`.
pub fn open_workbook(args: &WorkbookArgs) -> Result<CsvWorkbook> {
    let dir = &args.workbook_dir;
    let mut config = WorkbookConfig::load(dir)
        .with_context(|| format!("read configuration in {}", dir.display()))?;
    if let Some(zone) = &args.time_zone {
        config.time_zone.clone_from(zone);
    }
    if let Some(id) = &args.document_id {
        config.document_id.clone_from(id);
    }
    CsvWorkbook::open_with_config(dir, config)
        .with_context(|| format!("open workbook {}", dir.display()))
}

/// Runs one macro and saves the touched sheets if it succeeded.
pub fn run_action(
    kind: MacroKind,
    args: &WorkbookArgs,
    ui: &mut dyn Interaction,
) -> Result<ActionResult> {
    let span = info_span!("workbook", dir = %args.workbook_dir.display());
    let _guard = span.enter();

    let mut workbook = open_workbook(args)?;
    let settings = MacroSettings::from(workbook.config());
    let report = run_macro(kind, &mut workbook, ui, &settings);

    let saved_sheets = if report.succeeded() {
        workbook.save().context("save workbook")?
    } else {
        0
    };
    info!(saved_sheets, "done");
    Ok(ActionResult {
        workbook_dir: args.workbook_dir.clone(),
        report,
        saved_sheets,
        export_file: None,
    })
}

/// Builds the export link and, with `--output`, writes the master sheet to
/// a local file.
pub fn run_export(args: &ExportArgs, ui: &mut dyn Interaction) -> Result<ActionResult> {
    let span = info_span!("workbook", dir = %args.workbook.workbook_dir.display());
    let _guard = span.enter();

    let mut workbook = open_workbook(&args.workbook)?;
    let settings = MacroSettings::from(workbook.config());
    let report = run_macro(MacroKind::ExportCsv, &mut workbook, ui, &settings);

    let export_file = match &args.output {
        Some(path) if report.succeeded() => Some(write_export_file(
            &workbook,
            &settings.sheets.master,
            settings.schema,
            path,
            args.delimiter,
        )?),
        _ => None,
    };
    Ok(ActionResult {
        workbook_dir: args.workbook.workbook_dir.clone(),
        report,
        saved_sheets: 0,
        export_file,
    })
}

fn write_export_file(
    workbook: &dyn Workbook,
    sheet: &str,
    schema: OutputSchema,
    path: &Path,
    delimiter: char,
) -> Result<ExportFile> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("delimiter must be a single ASCII character, got {delimiter:?}"))?;
    let plan = prepare_export(workbook, sheet)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let rows = write_export(&plan, schema, delimiter, BufWriter::new(file))
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows, "wrote export file");
    Ok(ExportFile {
        path: path.to_path_buf(),
        rows,
    })
}

/// Reads the master sheet and groups it into line/day/direction blocks.
pub fn run_show(args: &WorkbookArgs) -> Result<ShowResult> {
    let workbook = open_workbook(args)?;
    let sheet = workbook.config().sheets.master.clone();
    if workbook.sheet(&sheet).is_none() {
        return Err(anyhow!("sheet '{sheet}' not found"));
    }
    let table = workbook
        .data_range(&sheet)
        .with_context(|| format!("read sheet {sheet}"))?;
    let overview = overview(&table);
    for block in &overview.blocks {
        debug!(
            line = redact_value(&block.line),
            day = redact_value(&block.day),
            direction = redact_value(&block.direction),
            bands = block.bands.len(),
            "block"
        );
    }
    Ok(ShowResult {
        workbook_dir: args.workbook_dir.clone(),
        sheet,
        overview,
    })
}
