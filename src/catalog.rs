//! Exercise catalog - the seeded movement library

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Movement tier in the GZCLP template
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tier {
    T1, // Main compounds
    T2, // Secondary movements
    T3, // Accessories
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::T1 => "T1",
            Tier::T2 => "T2",
            Tier::T3 => "T3",
        }
    }

    /// All tiers for iteration
    pub fn all() -> &'static [Tier] {
        &[Tier::T1, Tier::T2, Tier::T3]
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T1" | "t1" => Ok(Tier::T1),
            "T2" | "t2" => Ok(Tier::T2),
            "T3" | "t3" => Ok(Tier::T3),
            other => bail!("unknown tier: {other}"),
        }
    }
}

/// Catalog row as stored in the exercise library table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub id: i64,
    pub name: String,
    pub category: Tier,
}

/// Default library seeded into a fresh database. Existing rows are left
/// untouched on re-seed.
pub const DEFAULT_LIBRARY: &[(&str, Tier)] = &[
    // T1 - main compounds
    ("Squat", Tier::T1),
    ("Bench Press", Tier::T1),
    ("Deadlift", Tier::T1),
    ("Overhead Press", Tier::T1),
    // T2 - secondary movements
    ("Front Squat", Tier::T2),
    ("Incline Bench Press", Tier::T2),
    ("Sumo Deadlift", Tier::T2),
    ("Close Grip Bench Press", Tier::T2),
    ("Romanian Deadlift", Tier::T2),
    ("Paused Bench Press", Tier::T2),
    // T3 - accessories
    ("Lat Pulldown", Tier::T3),
    ("Dumbbell Row", Tier::T3),
    ("Leg Curl", Tier::T3),
    ("Leg Extension", Tier::T3),
    ("Tricep Pushdown", Tier::T3),
    ("Bicep Curl", Tier::T3),
    ("Calf Raise", Tier::T3),
    ("Face Pull", Tier::T3),
    ("Lateral Raise", Tier::T3),
    ("Chest Fly", Tier::T3),
];
