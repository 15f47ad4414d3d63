use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ingest::workbook::load_workbook;
use crate::ui::messages::info;
use crate::utils::date::today;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { workbook, strict } = cmd {
        let path = Path::new(workbook);
        info(format!("Reading workbook {}", path.display()));
        let wb = load_workbook(path)?;
        info(format!("Sheets: {}", wb.sheet_names().join(", ")));

        let mut pool = DbPool::open(&cfg.database)?;
        let summary = ImportLogic::run(&mut pool, &wb, cfg, today());
        ImportLogic::print(&summary);

        if *strict && !summary.all_committed() {
            let failed: Vec<&str> = summary
                .batches()
                .iter()
                .filter(|b| !b.is_committed())
                .map(|b| b.entity)
                .collect();
            return Err(AppError::Other(format!(
                "import incomplete, failed batches: {}",
                failed.join(", ")
            )));
        }
    }
    Ok(())
}
