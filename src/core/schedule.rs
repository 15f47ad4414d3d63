use crate::core::obligations::ObligationLogic;
use crate::db::log::{LogOp, ttlog_lenient};
use crate::db::pool::DbPool;
use crate::db::queries::{ScheduleFilter, get_event, list_schedule};
use crate::errors::AppResult;
use crate::models::schedule::ScheduleEntry;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::format_month;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

/// Maintenance of the schedule for one (role, month) pair.
pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Insert-if-absent for each event; returns how many were new.
    pub fn add(pool: &mut DbPool, role: &str, month: NaiveDate, events: &[String]) -> AppResult<usize> {
        let entries: Vec<ScheduleEntry> = events
            .iter()
            .map(|e| ScheduleEntry::new(e, role, month))
            .collect();

        for e in &entries {
            if get_event(&pool.conn, &e.event_id)?.is_none() {
                warning(format!("Event '{}' is not in the catalogue", e.event_id));
            }
        }

        let counts = pool.import_schedule(&entries)?;
        ttlog_lenient(
            &pool.conn,
            LogOp::ScheduleAdd,
            role,
            &format!("{} new entries for {}", counts.inserted, format_month(month)),
        );
        success(format!(
            "{} new, {} already scheduled for {} in {}",
            counts.inserted,
            counts.unchanged,
            role,
            format_month(month)
        ));
        Ok(counts.inserted)
    }

    pub fn delete(pool: &mut DbPool, role: &str, month: NaiveDate) -> AppResult<usize> {
        let n = pool.delete_schedule(role, month)?;
        ttlog_lenient(
            &pool.conn,
            LogOp::ScheduleDel,
            role,
            &format!("Deleted {} entries for {}", n, format_month(month)),
        );
        info(format!(
            "Deleted {} entries for {} in {}",
            n,
            role,
            format_month(month)
        ));
        Ok(n)
    }

    pub fn print(pool: &DbPool, role: &str, month: NaiveDate) -> AppResult<()> {
        let filter = ScheduleFilter {
            role: Some(role),
            month: Some(month),
            event_id: None,
        };
        let entries = list_schedule(&pool.conn, &filter)?;

        if entries.is_empty() {
            info(format!("Nothing scheduled for {} in {}", role, format_month(month)));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("event", 5),
            Column::new("topic", 5),
            Column::new("name", 4),
            Column::new("hours", 5),
        ]);
        for e in &entries {
            let row = match get_event(&pool.conn, &e.event_id)? {
                Some(ev) => vec![
                    ev.id,
                    ev.topic,
                    ev.name,
                    format!("{:.2}", ev.duration_hours),
                ],
                None => vec![e.event_id.clone(), "?".into(), "?".into(), "--".into()],
            };
            table.add_row(row);
        }
        println!("📅 {} · {}\n", role, format_month(month));
        print!("{}", table.render());

        let obligations = ObligationLogic::for_role_month(pool, role, month)?;
        let mut persons: Vec<&str> = obligations.iter().map(|o| o.person_id.as_str()).collect();
        persons.sort_unstable();
        persons.dedup();
        println!(
            "\n👥 {} obligated persons, {} obligations",
            persons.len(),
            obligations.len()
        );
        Ok(())
    }
}
