pub mod database;
pub mod prompt;
pub mod providers;

pub use database::NumerologyDb;
