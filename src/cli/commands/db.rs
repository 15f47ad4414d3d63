use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::dangling_refs;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    // --migrate reports its own progress; every other action needs the schema
    let pool = if *migrate {
        DbPool::new(&cfg.database)?
    } else {
        DbPool::open(&cfg.database)?
    };

    if *migrate {
        info("Running migrations…");
        run_pending_migrations(&pool.conn)?;
        success("Schema is up to date.");
    }

    if *show_info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    if *check {
        info("Running integrity check…");
        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        if integrity == "ok" {
            success("Integrity check passed.");
        } else {
            error(format!("Integrity check failed: {}", integrity));
        }

        let refs = dangling_refs(&pool.conn)?;
        if refs.is_clean() {
            success("Every schedule entry and record references a known person and event.");
        } else {
            warning(format!(
                "{} schedule entries and {} records reference unknown ids",
                refs.schedule_unknown_event,
                refs.records_unknown_person + refs.records_unknown_event
            ));
        }
    }

    if *vacuum {
        info("Running VACUUM…");
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}
