pub mod calculator;
pub mod import;
pub mod log;
pub mod obligations;
pub mod record;
pub mod report;
pub mod schedule;
