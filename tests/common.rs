#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rtraining")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtraining.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh directory used as a CSV workbook: one `<sheet>.csv` per sheet.
pub fn workbook_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtraining_wb", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create workbook dir");
    path
}

pub fn write_sheet(dir: &PathBuf, sheet: &str, lines: &[&str]) {
    let mut body = lines.join("\n");
    body.push('\n');
    fs::write(dir.join(format!("{}.csv", sheet)), body).expect("write csv sheet");
}

pub const PERSONS: &[&str] = &[
    "Id Persona,Nombre Completo,Cargo,Proceso,Lugar de Trabajo",
    "E1,Ana Ruiz,Operator,Production,Plant A",
    "E2,Luis Gil,Operator,Production,Plant A",
    "E3,Marta Sol,Supervisor,Quality,Plant B",
];

pub const EVENTS: &[&str] = &[
    "Id Evento,Tema General,Evento Formativo,Esquema de Evento,Duración",
    "EV1,Safety,Fire drill,Internal,2",
    "EV2,Quality,ISO basics,External,1.5",
];

/// EV1: Operator in January; EV2: Operator and Supervisor in February.
pub const MATRIX: &[&str] = &[
    "Id Evento,Tema General,Evento Formativo,Operator,Supervisor,2024-01-01,2024-02-01",
    "EV1,Safety,Fire drill,P,,P,",
    "EV2,Quality,ISO basics,P,p,,P",
];

pub const RECORDS: &[&str] = &[
    "Id Persona,Id Evento,Fecha,Horas,Resultado",
    "E1,EV1,2024-01-15,,Approved",
    "E3,EV2,2024-02-10,1.5,",
];

/// Complete sample workbook with the default sheet names.
pub fn sample_workbook(name: &str) -> PathBuf {
    let dir = workbook_dir(name);
    write_sheet(&dir, "Empleados", PERSONS);
    write_sheet(&dir, "Eventos formativos", EVENTS);
    write_sheet(&dir, "Matriz Programación", MATRIX);
    write_sheet(&dir, "Registro Eventos Formativos", RECORDS);
    dir
}

/// Initialize an empty DB through the CLI.
pub fn init_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
