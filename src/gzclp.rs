//! GZCLP progression scheduling
//!
//! The template cycles through four days; days 1/3 and 2/4 share a triad of
//! movements (T1 main compound, T2 secondary, T3 accessory). Scheduling is a
//! pure query over what has already been logged: nothing here writes.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::{LibraryEntry, Tier};
use crate::db::Database;

/// Next day index in the 1-2-3-4 rotation given the highest day recorded so
/// far (0 when no gzclp workout exists yet).
pub fn next_day(max_recorded: i64) -> i64 {
    (max_recorded % 4) + 1
}

/// The (T1, T2, T3) movement triad for a workout day. Out-of-range values
/// fall back to the day 1 triad.
pub fn day_triad(day: i64) -> (&'static str, &'static str, &'static str) {
    match day {
        2 | 4 => ("Bench Press", "Deadlift", "Dumbbell Row"),
        _ => ("Squat", "Overhead Press", "Lat Pulldown"),
    }
}

/// Everything needed to prefill a gzclp entry form: the upcoming day, its
/// triad, and the library options per tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prefill {
    pub day: i64,
    pub t1: String,
    pub t2: String,
    pub t3: String,
    pub t1_options: Vec<LibraryEntry>,
    pub t2_options: Vec<LibraryEntry>,
    pub t3_options: Vec<LibraryEntry>,
}

impl Prefill {
    /// Build the prefill payload for the next workout in the rotation
    pub fn next(db: &Database) -> Result<Self> {
        let day = next_day(db.max_gzclp_day()?);
        let (t1, t2, t3) = day_triad(day);

        Ok(Self {
            day,
            t1: t1.to_string(),
            t2: t2.to_string(),
            t3: t3.to_string(),
            t1_options: db.library_by_category(Some(Tier::T1))?,
            t2_options: db.library_by_category(Some(Tier::T2))?,
            t3_options: db.library_by_category(Some(Tier::T3))?,
        })
    }
}
