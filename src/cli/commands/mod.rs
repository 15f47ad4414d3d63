pub mod config;
pub mod db;
pub mod import;
pub mod init;
pub mod log;
pub mod record;
pub mod report;
pub mod schedule;
