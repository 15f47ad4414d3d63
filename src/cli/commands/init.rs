use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::{LogOp, ttlog_lenient};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rTraining…");
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::open(&db_path)?;

    ttlog_lenient(
        &pool.conn,
        LogOp::Init,
        "database",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rTraining initialization completed!");
    Ok(())
}
