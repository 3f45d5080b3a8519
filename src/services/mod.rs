pub mod calendar;
pub mod queries;
