//! liftlog - Personal strength training logbook
//!
//! Workouts are stored as a workout -> exercises -> sets hierarchy in a
//! local SQLite file, with GZCLP rotation scheduling and per-exercise
//! trend statistics computed on top.

pub mod catalog;
pub mod db;
pub mod gzclp;
pub mod stats;

pub use db::Database;
