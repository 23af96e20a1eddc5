pub mod dashboard;
pub mod habits;
pub mod health;
pub mod insights;
pub mod journal;
pub mod users;
