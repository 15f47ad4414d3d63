use crate::core::calculator::breakdown::{
    PersonHours, TopicResult, hours_by_person, results_by_topic,
};
use crate::core::calculator::coverage::{Coverage, calculate_coverage};
use crate::core::calculator::efficacy::{Efficacy, calculate_efficacy};
use crate::core::calculator::monthly::{MonthlyCompliance, calculate_monthly};
use crate::core::obligations::expand;
use crate::db::pool::DbPool;
use crate::db::queries::{
    RecordFilter, ScheduleFilter, TableCounts, list_events, list_persons, list_records,
    list_schedule, table_counts,
};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET, color_for_percent};
use crate::utils::date::format_month;
use crate::utils::table::{Column, Table};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub counts: TableCounts,
    pub coverage: Coverage,
    pub efficacy: Efficacy,
    pub monthly: Vec<MonthlyCompliance>,
    pub hours_by_person: Vec<PersonHours>,
    pub results_by_topic: Vec<TopicResult>,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Compute every metric from one snapshot of committed state.
    pub fn build(pool: &DbPool) -> AppResult<ComplianceReport> {
        pool.read_snapshot(|conn| {
            let persons = list_persons(conn, None)?;
            let events = list_events(conn)?;
            let schedule = list_schedule(conn, &ScheduleFilter::default())?;
            let records = list_records(conn, &RecordFilter::default())?;

            let obligations = expand(&schedule, &persons);

            Ok(ComplianceReport {
                counts: table_counts(conn)?,
                coverage: calculate_coverage(&obligations, &records),
                efficacy: calculate_efficacy(&schedule, &records),
                monthly: calculate_monthly(&schedule, &records),
                hours_by_person: hours_by_person(&records, &persons),
                results_by_topic: results_by_topic(&records, &events),
            })
        })
    }

    pub fn print(report: &ComplianceReport) {
        header("Training compliance");

        let c = &report.coverage;
        println!(
            "{}🎯 Coverage:{} {}{:.2}%{}  ({} of {} obligated persons trained)",
            CYAN,
            RESET,
            color_for_percent(c.percent),
            c.percent,
            RESET,
            c.trained,
            c.obligated
        );

        let e = &report.efficacy;
        println!(
            "{}🧪 Efficacy:{} {}{:.2}%{}  ({} executed event/date pairs, {} scheduled entries)",
            CYAN,
            RESET,
            color_for_percent(e.percent),
            e.percent,
            RESET,
            e.executed,
            e.scheduled
        );
        println!();

        println!("{}📅 Monthly compliance{}", CYAN, RESET);
        if report.monthly.is_empty() {
            println!("No schedule yet.");
        } else {
            let mut table = Table::new(vec![
                Column::new("month", 8),
                Column::new("scheduled", 9),
                Column::new("executed", 8),
                Column::new("compliance %", 12),
            ]);
            for m in &report.monthly {
                table.add_row(vec![
                    format_month(m.month),
                    m.scheduled.to_string(),
                    m.executed.to_string(),
                    format!("{:.2}", m.percent),
                ]);
            }
            print!("{}", table.render());
        }
        println!();

        println!("{}⏱️  Hours per person{}", CYAN, RESET);
        if report.hours_by_person.is_empty() {
            println!("No executions recorded yet.");
        } else {
            let mut table = Table::new(vec![
                Column::new("person", 6),
                Column::new("name", 4),
                Column::new("role", 4),
                Column::new("hours", 5),
            ]);
            for h in &report.hours_by_person {
                table.add_row(vec![
                    h.person_id.clone(),
                    h.name.clone(),
                    h.role.clone(),
                    format!("{:.2}", h.hours),
                ]);
            }
            print!("{}", table.render());
        }
        println!();

        println!("{}✅ Results per topic{}", CYAN, RESET);
        if report.results_by_topic.is_empty() {
            println!("No executions recorded yet.");
        } else {
            let mut table = Table::new(vec![
                Column::new("topic", 5),
                Column::new("result", 6),
                Column::new("count", 5),
            ]);
            for t in &report.results_by_topic {
                table.add_row(vec![t.topic.clone(), t.result.clone(), t.count.to_string()]);
            }
            print!("{}", table.render());
        }

        println!(
            "\n{}{} persons · {} events · {} schedule entries · {} records{}",
            GREEN,
            report.counts.persons,
            report.counts.events,
            report.counts.schedule,
            report.counts.records,
            RESET
        );
    }
}
