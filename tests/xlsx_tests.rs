use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};
use std::env;
use std::fs;
use std::path::PathBuf;

use rtraining::config::Config;
use rtraining::core::import::ImportLogic;
use rtraining::db::pool::DbPool;
use rtraining::db::queries::{ScheduleFilter, list_schedule, table_counts};
use rtraining::ingest::sheet::Cell;
use rtraining::ingest::workbook::load_workbook;

mod common;
use common::{init_db, rti, setup_test_db};

fn temp_xlsx(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtraining.xlsx", name));
    fs::remove_file(&path).ok();
    path
}

fn write_training_workbook(path: &PathBuf) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let date_fmt = Format::new().set_num_format("yyyy-mm-dd");

    let ws = workbook.add_worksheet();
    ws.set_name("Empleados")?;
    for (col, h) in ["Id Persona", "Nombre Completo", "Cargo", "Proceso", "Lugar de Trabajo"]
        .iter()
        .enumerate()
    {
        ws.write_string(0, col as u16, *h)?;
    }
    ws.write_number(1, 0, 1001.0)?;
    ws.write_string(1, 1, "Ana Ruiz")?;
    ws.write_string(1, 2, "Operator")?;
    ws.write_string(1, 3, "Production")?;
    ws.write_string(1, 4, "Plant A")?;

    let ws = workbook.add_worksheet();
    ws.set_name("Eventos formativos")?;
    for (col, h) in ["Id Evento", "Tema General", "Evento Formativo", "Esquema de Evento", "Duración"]
        .iter()
        .enumerate()
    {
        ws.write_string(0, col as u16, *h)?;
    }
    ws.write_string(1, 0, "EV1")?;
    ws.write_string(1, 1, "Safety")?;
    ws.write_string(1, 2, "Fire drill")?;
    ws.write_string(1, 3, "Internal")?;
    ws.write_number(1, 4, 3.0)?;

    // one month header is a real date cell, the other plain text
    let ws = workbook.add_worksheet();
    ws.set_name("Matriz Programación")?;
    ws.write_string(0, 0, "Id Evento")?;
    ws.write_string(0, 1, "Operator")?;
    ws.write_datetime_with_format(0, 2, &ExcelDateTime::from_ymd(2024, 1, 15)?, &date_fmt)?;
    ws.write_string(0, 3, "2024-02-01")?;
    ws.write_string(1, 0, "EV1")?;
    ws.write_string(1, 1, "P")?;
    ws.write_string(1, 2, "P")?;
    ws.write_string(1, 3, "p")?;

    let ws = workbook.add_worksheet();
    ws.set_name("Registro Eventos Formativos")?;
    ws.write_string(0, 0, "Id Persona")?;
    ws.write_string(0, 1, "Id Evento")?;
    ws.write_string(0, 2, "Fecha")?;
    ws.write_number(1, 0, 1001.0)?;
    ws.write_string(1, 1, "EV1")?;
    ws.write_datetime_with_format(1, 2, &ExcelDateTime::from_ymd(2024, 1, 22)?, &date_fmt)?;

    workbook.save(path)?;
    Ok(())
}

#[test]
fn test_xlsx_workbook_is_loaded_and_imported() {
    let path = temp_xlsx("xlsx_import");
    write_training_workbook(&path).expect("write xlsx");

    let wb = load_workbook(&path).expect("load xlsx");
    assert_eq!(wb.sheets.len(), 4);

    // date-typed header cells arrive as calendar dates, not serial numbers
    let matrix = wb.sheet("Matriz Programación").expect("matrix sheet");
    assert_eq!(
        matrix.headers[2],
        Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    );
    assert_eq!(matrix.headers[3], Cell::text("2024-02-01"));

    let mut pool = DbPool::in_memory().unwrap();
    let summary = ImportLogic::run(
        &mut pool,
        &wb,
        &Config::default(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    );
    assert!(summary.all_committed());

    let counts = table_counts(&pool.conn).unwrap();
    assert_eq!(counts.persons, 1);
    assert_eq!(counts.events, 1);
    assert_eq!(counts.schedule, 2);
    assert_eq!(counts.records, 1);

    let months: Vec<NaiveDate> = list_schedule(&pool.conn, &ScheduleFilter::default())
        .unwrap()
        .into_iter()
        .map(|e| e.month)
        .collect();
    assert_eq!(
        months,
        vec![
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ]
    );
    assert!(summary.dangling.is_clean());
}

#[test]
fn test_cli_imports_xlsx() {
    let db_path = setup_test_db("xlsx_cli");
    let path = temp_xlsx("xlsx_cli");
    write_training_workbook(&path).expect("write xlsx");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "import", "--strict", path.to_str().unwrap()])
        .assert()
        .success();

    let output = rti()
        .args(["--db", &db_path, "report", "--json"])
        .output()
        .expect("failed to run report");
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["coverage"]["percent"].as_f64(), Some(100.0));
    // hours come from the event duration
    assert_eq!(report["hours_by_person"][0]["hours"].as_f64(), Some(3.0));
    assert_eq!(report["hours_by_person"][0]["person_id"], "1001");
}
