pub mod health;
pub mod users;

pub use health::{health_check, readiness_check};
pub use users::create_user;
