use predicates::prelude::*;
use serde_json::Value;

mod common;
use common::{
    EVENTS, MATRIX, PERSONS, init_db, rti, sample_workbook, setup_test_db, workbook_dir,
    write_sheet,
};

fn report_json(db_path: &str) -> Value {
    let output = rti()
        .args(["--db", db_path, "report", "--json"])
        .output()
        .expect("failed to run report");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("report output is JSON")
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates");

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_import_then_report() {
    let db_path = setup_test_db("import_report");
    let wb = sample_workbook("import_report");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "import", wb.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("persons"))
        .stdout(predicate::str::contains("3 new"));

    let report = report_json(&db_path);

    assert_eq!(report["counts"]["persons"], 3);
    assert_eq!(report["counts"]["events"], 2);
    assert_eq!(report["counts"]["schedule"], 3);
    assert_eq!(report["counts"]["records"], 2);

    // obligated: E1, E2, E3; trained: E1, E3
    assert_eq!(report["coverage"]["obligated"], 3);
    assert_eq!(report["coverage"]["trained"], 2);
    assert_eq!(report["coverage"]["percent"].as_f64(), Some(66.67));

    assert_eq!(report["efficacy"]["scheduled"], 3);
    assert_eq!(report["efficacy"]["executed"], 2);

    let monthly = report["monthly"].as_array().expect("monthly rows");
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0]["month"], "2024-01-01");
    assert_eq!(monthly[0]["percent"].as_f64(), Some(100.0));
    assert_eq!(monthly[1]["month"], "2024-02-01");
    assert_eq!(monthly[1]["percent"].as_f64(), Some(50.0));

    // E1 had no hours in the sheet: the event duration (2h) is used
    let hours = report["hours_by_person"].as_array().expect("hours rows");
    let e1 = hours
        .iter()
        .find(|h| h["person_id"] == "E1")
        .expect("E1 has hours");
    assert_eq!(e1["hours"].as_f64(), Some(2.0));
}

#[test]
fn test_reimport_does_not_duplicate_schedule() {
    let db_path = setup_test_db("reimport");
    let wb = sample_workbook("reimport");
    init_db(&db_path);

    for _ in 0..2 {
        rti()
            .args(["--db", &db_path, "import", wb.to_str().unwrap()])
            .assert()
            .success();
    }

    let report = report_json(&db_path);
    assert_eq!(report["counts"]["persons"], 3);
    assert_eq!(report["counts"]["events"], 2);
    assert_eq!(report["counts"]["schedule"], 3);
    // execution records are append-only
    assert_eq!(report["counts"]["records"], 4);
}

#[test]
fn test_missing_role_column_fails_only_persons() {
    let db_path = setup_test_db("missing_role");
    let wb = workbook_dir("missing_role");
    init_db(&db_path);

    write_sheet(
        &wb,
        "Empleados",
        &[
            "Id Persona,Nombre Completo,Proceso,Lugar de Trabajo",
            "E1,Ana Ruiz,Production,Plant A",
        ],
    );
    write_sheet(&wb, "Eventos formativos", EVENTS);
    write_sheet(&wb, "Matriz Programación", MATRIX);

    rti()
        .args(["--db", &db_path, "import", wb.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("persons"))
        .stderr(predicate::str::contains("role"));

    let report = report_json(&db_path);
    assert_eq!(report["counts"]["persons"], 0);
    assert_eq!(report["counts"]["events"], 2);
    assert_eq!(report["counts"]["schedule"], 3);
    assert_eq!(report["coverage"]["percent"].as_f64(), Some(0.0));
}

#[test]
fn test_strict_import_fails_on_missing_sheet() {
    let db_path = setup_test_db("strict_missing");
    let wb = workbook_dir("strict_missing");
    init_db(&db_path);

    write_sheet(&wb, "Empleados", PERSONS);

    rti()
        .args(["--db", &db_path, "import", "--strict", wb.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("events"))
        .stderr(predicate::str::contains("schedule"));

    // the persons batch committed anyway
    let report = report_json(&db_path);
    assert_eq!(report["counts"]["persons"], 3);
}

#[test]
fn test_unsupported_workbook_is_rejected() {
    let db_path = setup_test_db("unsupported_wb");
    init_db(&db_path);

    let path = std::env::temp_dir().join("rtraining_unsupported.txt");
    std::fs::write(&path, "not a workbook").unwrap();

    rti()
        .args(["--db", &db_path, "import", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported workbook"));
}

#[test]
fn test_schedule_add_show_and_delete() {
    let db_path = setup_test_db("schedule_cli");
    let wb = sample_workbook("schedule_cli");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "import", wb.to_str().unwrap()])
        .assert()
        .success();

    rti()
        .args([
            "--db",
            &db_path,
            "schedule",
            "--role",
            "Operator",
            "--month",
            "2024-03",
            "--add",
            "EV1",
            "EV9",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 new"))
        .stdout(predicate::str::contains("2 obligated persons"))
        .stderr(predicate::str::contains("EV9"));

    rti()
        .args([
            "--db", &db_path, "schedule", "--role", "Operator", "--month", "2024-03", "--delete",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 entries"))
        .stdout(predicate::str::contains("Nothing scheduled"));

    // other months are untouched
    rti()
        .args([
            "--db", &db_path, "schedule", "--role", "Operator", "--month", "2024-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("EV1"))
        .stdout(predicate::str::contains("Fire drill"));
}

#[test]
fn test_schedule_rejects_bad_month() {
    let db_path = setup_test_db("schedule_bad_month");
    init_db(&db_path);

    rti()
        .args([
            "--db", &db_path, "schedule", "--role", "Operator", "--month", "someday",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn test_record_reports_schedule_match() {
    let db_path = setup_test_db("record_cli");
    let wb = sample_workbook("record_cli");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "import", wb.to_str().unwrap()])
        .assert()
        .success();

    rti()
        .args([
            "--db", &db_path, "record", "--person", "E2", "--event", "EV1", "--date", "2024-01-20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matches schedule"));

    rti()
        .args([
            "--db", &db_path, "record", "--person", "E2", "--event", "EV2", "--date", "2024-01-20",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Outside schedule"));

    let report = report_json(&db_path);
    assert_eq!(report["counts"]["records"], 4);
    assert_eq!(report["coverage"]["percent"].as_f64(), Some(100.0));
}

#[test]
fn test_record_rejects_bad_input() {
    let db_path = setup_test_db("record_bad_input");
    init_db(&db_path);

    rti()
        .args([
            "--db", &db_path, "record", "--person", "E1", "--event", "EV1", "--date", "20/01/2024",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    rti()
        .args([
            "--db", &db_path, "record", "--person", "E1", "--event", "EV1", "--hours", "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number"));
}

#[test]
fn test_log_lists_import_batches() {
    let db_path = setup_test_db("log_cli");
    let wb = sample_workbook("log_cli");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "import", wb.to_str().unwrap()])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "log", "--print", "--operation", "import"])
        .assert()
        .success()
        .stdout(predicate::str::contains("persons"))
        .stdout(predicate::str::contains("schedule"))
        .stdout(predicate::str::contains("migration_applied").not());
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    let wb = sample_workbook("db_info");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "import", wb.to_str().unwrap()])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Integrity check passed"));
}

#[test]
fn test_report_json_on_uninitialized_database() {
    let db_path = setup_test_db("report_fresh");

    let output = rti()
        .args(["--db", &db_path, "report", "--json"])
        .output()
        .expect("failed to run report");
    assert!(output.status.success());

    // schema migrations run on first open and report on stderr only
    let report: Value = serde_json::from_slice(&output.stdout).expect("report output is JSON");
    assert_eq!(report["counts"]["persons"], 0);
    assert_eq!(report["coverage"]["percent"].as_f64(), Some(0.0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Migration applied"));
}

#[test]
fn test_db_info_on_uninitialized_database() {
    let db_path = setup_test_db("db_info_fresh");

    rti()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Integrity check passed"))
        .stderr(predicate::str::contains("no such table").not());
}

#[test]
fn test_schedule_add_and_delete_conflict() {
    let db_path = setup_test_db("schedule_conflict");
    init_db(&db_path);

    rti()
        .args([
            "--db", &db_path, "schedule", "--role", "Operator", "--month", "2024-03", "--delete",
            "--add", "EV1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
