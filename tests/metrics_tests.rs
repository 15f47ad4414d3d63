use chrono::NaiveDate;
use rtraining::core::calculator::breakdown::{hours_by_person, results_by_topic};
use rtraining::core::calculator::coverage::calculate_coverage;
use rtraining::core::calculator::efficacy::calculate_efficacy;
use rtraining::core::calculator::monthly::calculate_monthly;
use rtraining::core::calculator::percentage;
use rtraining::core::obligations::expand;
use rtraining::core::report::ReportLogic;
use rtraining::db::pool::DbPool;
use rtraining::models::event::Event;
use rtraining::models::execution::{ExecutionRecord, NewExecutionRecord};
use rtraining::models::person::Person;
use rtraining::models::schedule::ScheduleEntry;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(id: i64, person: &str, event: &str, date: NaiveDate, hours: f64) -> ExecutionRecord {
    ExecutionRecord {
        id,
        person_id: person.to_string(),
        event_id: event.to_string(),
        execution_date: date,
        hours,
        result: "Approved".to_string(),
    }
}

fn operators() -> Vec<Person> {
    vec![
        Person::new("E1", "Ana", "Operator", "Production", "Plant A"),
        Person::new("E2", "Luis", "Operator", "Production", "Plant A"),
    ]
}

#[test]
fn test_percentage_bounds() {
    assert_eq!(percentage(0, 0), 0.0);
    assert_eq!(percentage(5, 0), 0.0);
    assert_eq!(percentage(1, 3), 33.33);
    assert_eq!(percentage(2, 3), 66.67);
    assert_eq!(percentage(3, 3), 100.0);
    assert_eq!(percentage(7, 3), 100.0);
}

#[test]
fn test_coverage_half_of_role_trained() {
    let jan = ymd(2024, 1, 1);
    let schedule = vec![ScheduleEntry::new("EV1", "Operator", jan)];
    let obligations = expand(&schedule, &operators());
    let records = vec![record(1, "E1", "EV1", ymd(2024, 1, 10), 1.0)];

    let c = calculate_coverage(&obligations, &records);
    assert_eq!(c.obligated, 2);
    assert_eq!(c.trained, 1);
    assert_eq!(c.percent, 50.0);
}

#[test]
fn test_coverage_without_obligations_is_zero() {
    let records = vec![record(1, "E1", "EV1", ymd(2024, 1, 10), 1.0)];
    let c = calculate_coverage(&[], &records);
    assert_eq!(c.percent, 0.0);
}

#[test]
fn test_coverage_never_exceeds_hundred() {
    // records from people outside the obligation set still count as trained
    let schedule = vec![ScheduleEntry::new("EV1", "Operator", ymd(2024, 1, 1))];
    let obligations = expand(&schedule, &operators()[..1]);
    let records = vec![
        record(1, "E1", "EV1", ymd(2024, 1, 10), 1.0),
        record(2, "X9", "EV1", ymd(2024, 1, 10), 1.0),
    ];

    let c = calculate_coverage(&obligations, &records);
    assert_eq!(c.trained, 2);
    assert_eq!(c.percent, 100.0);
}

#[test]
fn test_efficacy_counts_distinct_event_dates() {
    let jan = ymd(2024, 1, 1);
    let schedule = vec![
        ScheduleEntry::new("EV1", "Operator", jan),
        ScheduleEntry::new("EV1", "Supervisor", jan),
        ScheduleEntry::new("EV2", "Operator", jan),
        ScheduleEntry::new("EV3", "Operator", jan),
    ];
    // two attendees of the same session are one execution
    let records = vec![
        record(1, "E1", "EV1", ymd(2024, 1, 10), 1.0),
        record(2, "E2", "EV1", ymd(2024, 1, 10), 1.0),
        record(3, "E1", "EV2", ymd(2024, 1, 12), 1.0),
    ];

    let e = calculate_efficacy(&schedule, &records);
    assert_eq!(e.scheduled, 4);
    assert_eq!(e.executed, 2);
    assert_eq!(e.percent, 50.0);

    assert_eq!(calculate_efficacy(&[], &records).percent, 0.0);
}

#[test]
fn test_monthly_includes_months_without_executions() {
    let schedule = vec![
        ScheduleEntry::new("EV1", "Operator", ymd(2024, 1, 1)),
        ScheduleEntry::new("EV2", "Operator", ymd(2024, 1, 1)),
        ScheduleEntry::new("EV1", "Operator", ymd(2024, 3, 1)),
    ];
    let records = vec![
        record(1, "E1", "EV1", ymd(2024, 1, 9), 1.0),
        record(2, "E1", "EV1", ymd(2024, 2, 9), 1.0),
    ];

    let monthly = calculate_monthly(&schedule, &records);
    assert_eq!(monthly.len(), 2);

    assert_eq!(monthly[0].month, ymd(2024, 1, 1));
    assert_eq!(monthly[0].scheduled, 2);
    assert_eq!(monthly[0].executed, 1);
    assert_eq!(monthly[0].percent, 50.0);

    assert_eq!(monthly[1].month, ymd(2024, 3, 1));
    assert_eq!(monthly[1].executed, 0);
    assert_eq!(monthly[1].percent, 0.0);

    assert!(monthly.iter().all(|m| (0.0..=100.0).contains(&m.percent)));
}

#[test]
fn test_hours_and_results_breakdown() {
    let persons = operators();
    let events = vec![
        Event::new("EV1", "Safety", "Fire drill", "Internal"),
        Event::new("EV2", "Quality", "ISO basics", "External"),
    ];
    let mut failed = record(3, "E2", "EV2", ymd(2024, 1, 12), 1.0);
    failed.result = "Failed".to_string();
    let records = vec![
        record(1, "E1", "EV1", ymd(2024, 1, 10), 1.5),
        record(2, "E2", "EV1", ymd(2024, 1, 10), 2.0),
        failed,
        record(4, "E1", "EV1", ymd(2024, 2, 10), 2.0),
        record(5, "X9", "EV9", ymd(2024, 2, 11), 0.5),
    ];

    let hours = hours_by_person(&records, &persons);
    assert_eq!(hours[0].person_id, "E1");
    assert_eq!(hours[0].hours, 3.5);
    assert_eq!(hours[1].person_id, "E2");
    assert_eq!(hours[1].hours, 3.0);
    assert_eq!(hours[2].person_id, "X9");
    assert_eq!(hours[2].name, "");

    let topics = results_by_topic(&records, &events);
    let safety = topics
        .iter()
        .find(|t| t.topic == "Safety" && t.result == "Approved")
        .unwrap();
    assert_eq!(safety.count, 3);
    assert!(
        topics
            .iter()
            .any(|t| t.topic == "Quality" && t.result == "Failed" && t.count == 1)
    );
    assert!(topics.iter().any(|t| t.topic.is_empty() && t.count == 1));
}

#[test]
fn test_report_on_empty_store() {
    let pool = DbPool::in_memory().unwrap();
    let report = ReportLogic::build(&pool).unwrap();

    assert_eq!(report.coverage.percent, 0.0);
    assert_eq!(report.efficacy.percent, 0.0);
    assert!(report.monthly.is_empty());
    assert!(report.hours_by_person.is_empty());
}

#[test]
fn test_report_reflects_committed_state() {
    let mut pool = DbPool::in_memory().unwrap();
    let jan = ymd(2024, 1, 1);

    pool.import_persons(&operators()).unwrap();
    pool.import_events(&[Event::new("EV1", "Safety", "Fire drill", "Internal")])
        .unwrap();
    pool.import_schedule(&[ScheduleEntry::new("EV1", "Operator", jan)])
        .unwrap();
    pool.append_execution_record(&NewExecutionRecord::new("E1", "EV1", ymd(2024, 1, 20)))
        .unwrap();

    let report = ReportLogic::build(&pool).unwrap();
    assert_eq!(report.coverage.percent, 50.0);
    assert_eq!(report.efficacy.percent, 100.0);
    assert_eq!(report.monthly[0].percent, 100.0);
    assert_eq!(report.counts.records, 1);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["monthly"][0]["month"], "2024-01-01");
}
