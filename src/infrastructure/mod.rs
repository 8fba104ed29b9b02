pub mod answer_source;
pub mod database;
