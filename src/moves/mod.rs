pub mod classify;
pub mod movegen;
pub mod types;
