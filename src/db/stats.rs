use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::db::queries::{dangling_refs, list_roles, table_counts};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let counts = table_counts(&pool.conn)?;
    println!("{}• Rows:{}", CYAN, RESET);
    println!("    persons:  {}{}{}", GREEN, counts.persons, RESET);
    println!("    events:   {}{}{}", GREEN, counts.events, RESET);
    println!("    schedule: {}{}{}", GREEN, counts.schedule, RESET);
    println!("    records:  {}{}{}", GREEN, counts.records, RESET);

    let roles = list_roles(&pool.conn)?;
    println!("{}• Roles:{} {}", CYAN, RESET, roles.len());

    //
    // 3) SCHEDULE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(month) FROM schedule", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(month) FROM schedule", [], |row| row.get(0))
        .optional()?
        .flatten();

    println!("{}• Schedule months:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    //
    // 4) REFERENTIAL DIAGNOSTICS
    //
    let refs = dangling_refs(&pool.conn)?;
    println!("{}• Dangling references:{}", CYAN, RESET);
    println!("    schedule → unknown event: {}", refs.schedule_unknown_event);
    println!("    records  → unknown person: {}", refs.records_unknown_person);
    println!("    records  → unknown event: {}", refs.records_unknown_event);

    //
    // 5) MIGRATIONS
    //
    let versions = applied_versions(&pool.conn)?;
    println!("{}• Migrations applied:{} {}", CYAN, RESET, versions.len());

    println!();
    Ok(())
}
