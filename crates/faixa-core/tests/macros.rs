//! End-to-end macro runs against an in-memory workbook.

use chrono_tz::Tz;

use faixa_core::{
    ClearTarget, MacroError, MacroKind, MacroOutcome, MacroSettings, ScriptedInteraction,
    add_service_orders, add_time_bands, clear_columns, plan_clear, prepare_export, run_macro,
    write_export,
};
use faixa_model::{Cell, OutputSchema, Row, Table, row};
use faixa_store::{MemoryWorkbook, Workbook};

fn staging_header() -> Row {
    row([
        "Inicio", "Fim", "Intervalo", "Percurso", "TempTerm", "Frota", "", "Linha", "Dia",
        "Sentido",
    ])
}

fn staging_row(start: &str, end: &str, line: &str, day: &str, direction: &str) -> Row {
    row([start, end, "10", "45", "5", "3", "", line, day, direction])
}

fn master_with(rows: Table) -> Table {
    let mut table = vec![OutputSchema::Full.header_row()];
    table.extend(rows);
    table
}

fn workbook(master: Table, bands: Table, orders: Table) -> MemoryWorkbook {
    MemoryWorkbook::new("doc-123", chrono_tz::America::Sao_Paulo)
        .with_sheet("CSV", master)
        .with_sheet("ADD_Linhas", bands)
        .with_sheet("ADD_OSOs", orders)
}

fn text(cells: &[Cell]) -> Vec<String> {
    cells.iter().map(Cell::to_text).collect()
}

// === Time bands ===

#[test]
fn time_bands_append_after_last_row_and_clear_staging() {
    let existing = row([
        "0600", "0700", "10", "40", "5", "2", "0101", "U", "0", "", "",
    ]);
    let mut wb = workbook(
        master_with(vec![existing.clone()]),
        vec![
            staging_header(),
            staging_row("8:00", "9:00:00", "0101", "U", "Sentido 1 - Ida"),
            staging_row("", "", "", "", ""),
            staging_row("0900", "1000", "9999", "S", "2"),
        ],
        vec![row(["Oso", "LinhaOso"])],
    );
    let settings = MacroSettings::default();

    let outcome = add_time_bands(&mut wb, &settings).unwrap();

    assert_eq!(
        outcome,
        MacroOutcome::Appended {
            sheet: "CSV".to_string(),
            first_row: 3,
            rows: 2,
            skipped: 1,
        }
    );
    let master = wb.snapshot("CSV").unwrap();
    assert_eq!(master.len(), 4);
    assert_eq!(master[1], existing);
    assert_eq!(
        text(&master[2][..9]),
        vec!["0800", "0900", "10", "45", "5", "3", "0101", "U", "1"]
    );
    assert_eq!(
        text(&master[3][..9]),
        vec!["0900", "1000", "10", "45", "5", "3", "0101", "U", "1"]
    );
    let staging = wb.snapshot("ADD_Linhas").unwrap();
    assert_eq!(staging, vec![staging_header()]);
}

#[test]
fn time_bands_overwrite_stale_header() {
    let mut wb = workbook(
        vec![row(["old", "header"])],
        vec![staging_header(), staging_row("0800", "0900", "L1", "U", "0")],
        vec![],
    );
    add_time_bands(&mut wb, &MacroSettings::default()).unwrap();

    let master = wb.snapshot("CSV").unwrap();
    assert_eq!(master[0], OutputSchema::Full.header_row());
    assert_eq!(master[1][0], Cell::text("0800"));
}

#[test]
fn time_bands_into_empty_master_start_at_row_two() {
    let mut wb = workbook(
        vec![],
        vec![staging_header(), staging_row("0800", "0900", "L1", "U", "0")],
        vec![],
    );
    let settings = MacroSettings {
        schema: OutputSchema::Legacy,
        ..MacroSettings::default()
    };
    let outcome = add_time_bands(&mut wb, &settings).unwrap();

    assert!(matches!(outcome, MacroOutcome::Appended { first_row: 2, .. }));
    let master = wb.snapshot("CSV").unwrap();
    assert_eq!(master[0].len(), 9);
}

#[test]
fn legacy_batch_replaces_full_header() {
    let mut wb = workbook(
        master_with(vec![]),
        vec![staging_header(), staging_row("0800", "0900", "0101", "U", "1")],
        vec![],
    );
    let settings = MacroSettings {
        schema: OutputSchema::Legacy,
        ..MacroSettings::default()
    };
    add_time_bands(&mut wb, &settings).unwrap();

    let master = wb.snapshot("CSV").unwrap();
    assert_eq!(master[0][..9], OutputSchema::Legacy.header_row()[..]);
    assert!(master[0][9..].iter().all(Cell::is_blank));
    assert_eq!(
        text(&master[1][..9]),
        ["0800", "0900", "10", "45", "5", "3", "0101", "U", "1"]
    );
}

#[test]
fn missing_line_day_or_direction_writes_nothing() {
    let mut wb = workbook(
        master_with(vec![]),
        vec![staging_header(), staging_row("0800", "0900", "0101", "", "1")],
        vec![],
    );
    let err = add_time_bands(&mut wb, &MacroSettings::default()).unwrap_err();

    assert!(matches!(err, MacroError::MissingRequiredFields { .. }));
    assert_eq!(wb.write_count(), 0);
}

#[test]
fn header_only_staging_reports_missing_fields_first() {
    let mut wb = workbook(master_with(vec![]), vec![staging_header()], vec![]);
    let err = add_time_bands(&mut wb, &MacroSettings::default()).unwrap_err();

    assert!(matches!(err, MacroError::MissingRequiredFields { .. }));
    assert_eq!(wb.write_count(), 0);
}

#[test]
fn rows_without_band_times_write_nothing() {
    let mut wb = workbook(
        master_with(vec![]),
        vec![staging_header(), staging_row("", "0900", "0101", "U", "1")],
        vec![],
    );
    let err = add_time_bands(&mut wb, &MacroSettings::default()).unwrap_err();

    assert!(matches!(err, MacroError::NoValidRows));
    assert_eq!(wb.write_count(), 0);
}

#[test]
fn missing_master_sheet_is_reported() {
    let mut wb = MemoryWorkbook::new("doc", Tz::UTC).with_sheet(
        "ADD_Linhas",
        vec![staging_header(), staging_row("0800", "0900", "L", "U", "1")],
    );
    let err = add_time_bands(&mut wb, &MacroSettings::default()).unwrap_err();
    assert_eq!(err.to_string(), "sheet 'CSV' not found");
}

// === Service orders ===

#[test]
fn service_orders_follow_last_existing_pair() {
    let mut master = master_with(vec![
        row(["0800", "0900", "", "", "", "", "", "", "", "111111", "1111"]),
        row(["0900", "1000", "", "", "", "", "", "", "", "", ""]),
        row(["1000", "1100", "", "", "", "", "", "", "", "", ""]),
    ]);
    master[2][9] = Cell::Number(222222.0);
    let mut wb = workbook(
        master,
        vec![],
        vec![
            row(["Oso", "LinhaOso"]),
            row(["333333", "3333"]),
            row(["", ""]),
            row(["444444", "444444"]),
        ],
    );

    let outcome = add_service_orders(&mut wb, &MacroSettings::default()).unwrap();

    assert_eq!(
        outcome,
        MacroOutcome::Appended {
            sheet: "CSV".to_string(),
            first_row: 4,
            rows: 2,
            skipped: 1,
        }
    );
    let master = wb.snapshot("CSV").unwrap();
    assert_eq!(text(&master[3][9..]), vec!["333333", "3333"]);
    assert_eq!(text(&master[4][9..]), vec!["444444", "444444"]);
    // Time-band columns of row 4 are untouched.
    assert_eq!(master[3][0], Cell::text("1000"));
    assert_eq!(wb.snapshot("ADD_OSOs").unwrap(), vec![row(["Oso", "LinhaOso"])]);
}

#[test]
fn one_bad_order_rejects_the_batch() {
    let mut wb = workbook(
        master_with(vec![]),
        vec![],
        vec![
            row(["Oso", "LinhaOso"]),
            row(["123456", "1234"]),
            row(["12345", "1234"]),
        ],
    );
    let err = add_service_orders(&mut wb, &MacroSettings::default()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid Oso on row 3: \"12345\" (expected 6 digits)"
    );
    assert_eq!(wb.write_count(), 0);
}

#[test]
fn header_only_order_sheet_is_no_data() {
    let mut wb = workbook(master_with(vec![]), vec![], vec![row(["Oso", "LinhaOso"])]);
    let err = add_service_orders(&mut wb, &MacroSettings::default()).unwrap_err();
    assert!(matches!(err, MacroError::NoDataRows { .. }));
}

// === Clears ===

#[test]
fn declined_clear_writes_nothing() {
    let mut wb = workbook(
        master_with(vec![row([
            "0800", "0900", "", "", "", "", "", "", "", "123456", "1234",
        ])]),
        vec![],
        vec![],
    );
    let mut ui = ScriptedInteraction::answering([false]);

    let outcome = clear_columns(&mut wb, &mut ui, "CSV", ClearTarget::ServiceOrders).unwrap();

    assert_eq!(outcome, MacroOutcome::Cancelled);
    assert_eq!(wb.write_count(), 0);
    assert_eq!(ui.prompts.len(), 1);
}

#[test]
fn confirmed_clear_only_touches_target_columns() {
    let mut wb = workbook(
        master_with(vec![
            row(["0800", "0900", "", "", "", "", "", "", "", "123456", "1234"]),
            row(["0900", "1000", "", "", "", "", "", "", "", "654321", "4321"]),
        ]),
        vec![],
        vec![],
    );
    let mut ui = ScriptedInteraction::answering([true]);

    let outcome = clear_columns(&mut wb, &mut ui, "CSV", ClearTarget::ServiceOrders).unwrap();

    assert_eq!(
        outcome,
        MacroOutcome::Cleared {
            sheet: "CSV".to_string(),
            range: "J2:K3".to_string(),
        }
    );
    let master = wb.snapshot("CSV").unwrap();
    assert_eq!(master.len(), 3);
    assert_eq!(master[0].len(), 11);
    assert!(master[1][9].is_blank() && master[2][10].is_blank());
    assert_eq!(master[2][0], Cell::text("0900"));
}

#[test]
fn time_band_clear_spans_a_to_i() {
    let wb = workbook(
        master_with(vec![row(["0800", "0900"]), row(["0900", "1000"])]),
        vec![],
        vec![],
    );
    let plan = plan_clear(&wb, "CSV", ClearTarget::TimeBands).unwrap();
    assert_eq!(plan.range.to_string(), "A2:I3");
}

#[test]
fn clear_on_header_only_master_never_asks() {
    let mut wb = workbook(master_with(vec![]), vec![], vec![]);
    let mut ui = ScriptedInteraction::answering([true]);

    let err = clear_columns(&mut wb, &mut ui, "CSV", ClearTarget::TimeBands).unwrap_err();

    assert!(matches!(err, MacroError::NoDataRows { .. }));
    assert!(ui.prompts.is_empty());
}

// === Runner ===

#[test]
fn runner_turns_errors_into_one_alert() {
    let mut wb = workbook(master_with(vec![]), vec![staging_header()], vec![]);
    let mut ui = ScriptedInteraction::new();

    let report = run_macro(
        MacroKind::AddTimeBands,
        &mut wb,
        &mut ui,
        &MacroSettings::default(),
    );

    assert!(!report.succeeded());
    assert_eq!(ui.alerts.len(), 1);
    assert_eq!(
        ui.last_alert(),
        Some("missing band details: H2:J2 on sheet 'ADD_Linhas' must be filled in")
    );
}

#[test]
fn runner_cancelled_clear_still_succeeds() {
    let mut wb = workbook(
        master_with(vec![row(["0800", "0900"])]),
        vec![],
        vec![],
    );
    let mut ui = ScriptedInteraction::answering([false]);

    let report = run_macro(
        MacroKind::ClearTimeBands,
        &mut wb,
        &mut ui,
        &MacroSettings::default(),
    );

    assert!(report.succeeded());
    assert_eq!(ui.last_alert(), Some("Operation cancelled."));
}

#[test]
fn runner_export_reports_url() {
    let mut wb = workbook(
        master_with(vec![row(["0800", "0900"])]),
        vec![],
        vec![],
    );
    let mut ui = ScriptedInteraction::new();

    let report = run_macro(
        MacroKind::ExportCsv,
        &mut wb,
        &mut ui,
        &MacroSettings::default(),
    );

    assert_eq!(
        report.outcome,
        MacroOutcome::Exported {
            sheet: "CSV".to_string(),
            url: "https://docs.google.com/spreadsheets/d/doc-123/export?format=csv&gid=0"
                .to_string(),
            rows: 1,
        }
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["action"], "export-csv");
    assert_eq!(json["status"], "exported");
}

#[test]
fn export_of_header_only_master_fails() {
    let mut wb = workbook(master_with(vec![]), vec![], vec![]);
    let mut ui = ScriptedInteraction::new();
    let report = run_macro(
        MacroKind::ExportCsv,
        &mut wb,
        &mut ui,
        &MacroSettings::default(),
    );
    assert!(!report.succeeded());
    assert_eq!(wb.last_row("CSV").unwrap(), 1);
}

#[test]
fn export_writes_semicolon_file_with_padded_rows() {
    let wb = workbook(
        master_with(vec![
            row(["0800", "0900", "10", "45", "5", "3", "0101", "U", "1"]),
            row(["", "", "", "", "", "", "", "", "", "123456", "0101"]),
        ]),
        vec![],
        vec![],
    );
    let plan = prepare_export(&wb, "CSV").unwrap();
    let mut out = Vec::new();

    let rows = write_export(&plan, OutputSchema::Full, b';', &mut out).unwrap();

    assert_eq!(rows, 2);
    let written = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(written, @r"
    FaixaInicio;FaixaFinal;Intervalo;Percurso;TempTerm;Frota;Linha;Dia;Sentido;Oso;LinhaOso
    0800;0900;10;45;5;3;0101;U;1;;
    ;;;;;;;;;123456;0101
    ");
}

#[test]
fn export_rejects_header_without_service_order_columns() {
    let mut legacy = vec![OutputSchema::Legacy.header_row()];
    legacy.push(row(["0800", "0900"]));
    let wb = workbook(legacy, vec![], vec![]);
    let plan = prepare_export(&wb, "CSV").unwrap();

    let err = write_export(&plan, OutputSchema::Full, b';', Vec::new()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "sheet 'CSV' header is missing columns: Oso, LinhaOso"
    );
    assert!(write_export(&plan, OutputSchema::Legacy, b';', Vec::new()).is_ok());
}
