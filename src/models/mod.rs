pub mod event;
pub mod execution;
pub mod person;
pub mod schedule;
