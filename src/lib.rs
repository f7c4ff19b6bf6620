//! Study plan scheduling and topic progression for a single learner.
//!
//! The planning core (`scheduler`, `progression`, `planner`, `sessions`) is pure:
//! it takes snapshots and the current date and returns new snapshots. The
//! `app`, `db` and `api` modules host it behind SQLite and HTTP.

pub mod api;
pub mod app;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod data;
pub mod db;
pub mod models;
pub mod planner;
pub mod progression;
pub mod scheduler;
pub mod sessions;

pub use models::{Chapter, Profile, QuizResult, SessionStatus, StudySession, StudyState, Subject, Topic};
pub use planner::recalculate;
pub use progression::apply_quiz_result;
pub use scheduler::generate_schedule;
pub use sessions::{add_session, delete_session, toggle_status, update_session};
