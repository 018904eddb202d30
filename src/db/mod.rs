//! Database module - SQLite storage for workout data
//!
//! The `Database` wrapper owns the single process-lifetime connection and is
//! the only place that issues writes. Multi-row writes (create, delete) each
//! run inside one transaction; a failure at any step rolls the whole
//! hierarchy back.

pub mod hierarchy;

use anyhow::Result;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{DEFAULT_LIBRARY, LibraryEntry, Tier};

/// A logged training session with its exercises and sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: Option<i64>,
    pub date: String,
    pub workout_type: String,
    pub workout_day: i64,
    pub exercises: Vec<Exercise>,
}

/// One exercise within a workout, sets in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<Set>,
}

/// A single set: reps at a weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub reps: i64,
    pub weight: f64,
}

/// One row of the flattened workout/exercise/set join, as produced by
/// [`Database::workout_set_rows`]. Workout and exercise columns repeat
/// across rows that share a parent.
#[derive(Debug, Clone)]
pub struct WorkoutSetRow {
    pub workout_id: i64,
    pub date: String,
    pub workout_type: String,
    pub workout_day: i64,
    pub exercise_name: String,
    pub reps: i64,
    pub weight: f64,
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        db.seed_library()?;
        Ok(db)
    }

    /// Initialize database schema. Safe to run against an
    /// already-initialized store.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                workout_type TEXT DEFAULT 'custom',
                workout_day INTEGER DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS exercise_library (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER,
                name TEXT NOT NULL,
                FOREIGN KEY(workout_id) REFERENCES workouts(id)
            );

            CREATE TABLE IF NOT EXISTS sets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exercise_id INTEGER,
                reps INTEGER NOT NULL,
                weight REAL NOT NULL,
                FOREIGN KEY(exercise_id) REFERENCES exercises(id)
            );",
        )?;

        // Migration: add workout_type/workout_day columns if missing
        let has_type = self
            .conn
            .prepare("SELECT workout_type FROM workouts LIMIT 1")
            .is_ok();
        if !has_type {
            let _ = self.conn.execute(
                "ALTER TABLE workouts ADD COLUMN workout_type TEXT DEFAULT 'custom'",
                [],
            );
            let _ = self.conn.execute(
                "ALTER TABLE workouts ADD COLUMN workout_day INTEGER DEFAULT 0",
                [],
            );
        }

        Ok(())
    }

    /// Seed the exercise library, leaving existing rows untouched
    fn seed_library(&self) -> Result<()> {
        for (name, category) in DEFAULT_LIBRARY {
            self.conn.execute(
                "INSERT OR IGNORE INTO exercise_library (name, category) VALUES (?1, ?2)",
                params![name, category.as_str()],
            )?;
        }
        Ok(())
    }

    /// Save a whole workout hierarchy in one transaction. Exercises with no
    /// sets are dropped before write; an empty workout type is stored as
    /// "custom". Returns the new workout id.
    pub fn create_workout(&self, workout: &Workout) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;

        let workout_type = if workout.workout_type.is_empty() {
            "custom"
        } else {
            workout.workout_type.as_str()
        };

        tx.execute(
            "INSERT INTO workouts (date, workout_type, workout_day) VALUES (?1, ?2, ?3)",
            params![workout.date, workout_type, workout.workout_day],
        )?;
        let workout_id = tx.last_insert_rowid();

        for exercise in &workout.exercises {
            if exercise.sets.is_empty() {
                debug!("Skipping exercise without sets: {}", exercise.name);
                continue;
            }

            tx.execute(
                "INSERT INTO exercises (workout_id, name) VALUES (?1, ?2)",
                params![workout_id, exercise.name],
            )?;
            let exercise_id = tx.last_insert_rowid();

            for set in &exercise.sets {
                tx.execute(
                    "INSERT INTO sets (exercise_id, reps, weight) VALUES (?1, ?2, ?3)",
                    params![exercise_id, set.reps, set.weight],
                )?;
            }
        }

        tx.commit()?;
        info!("Saved workout {} ({})", workout_id, workout.date);
        Ok(workout_id)
    }

    /// Delete a workout and all descendant exercises and sets, children
    /// first. Returns the number of workout rows removed: 0 means the id
    /// did not exist and nothing was touched.
    pub fn delete_workout(&self, workout_id: i64) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "DELETE FROM sets WHERE exercise_id IN (
                SELECT id FROM exercises WHERE workout_id = ?1
            )",
            params![workout_id],
        )?;
        tx.execute(
            "DELETE FROM exercises WHERE workout_id = ?1",
            params![workout_id],
        )?;
        let removed = tx.execute("DELETE FROM workouts WHERE id = ?1", params![workout_id])?;

        tx.commit()?;
        if removed > 0 {
            info!("Deleted workout {}", workout_id);
        }
        Ok(removed)
    }

    /// Every stored set joined with its exercise and workout, ordered by
    /// workout date descending, then exercise insertion order, then set
    /// insertion order. A workout with no exercises yields no rows here.
    pub fn workout_set_rows(&self) -> Result<Vec<WorkoutSetRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT w.id, w.date, w.workout_type, w.workout_day, e.name, s.reps, s.weight
             FROM workouts w
             JOIN exercises e ON w.id = e.workout_id
             JOIN sets s ON e.id = s.exercise_id
             ORDER BY w.date DESC, e.id, s.id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(WorkoutSetRow {
                    workout_id: row.get(0)?,
                    date: row.get(1)?,
                    workout_type: row.get(2)?,
                    workout_day: row.get(3)?,
                    exercise_name: row.get(4)?,
                    reps: row.get(5)?,
                    weight: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// All workouts as a nested hierarchy, newest first
    pub fn all_workouts(&self) -> Result<Vec<Workout>> {
        Ok(hierarchy::assemble_workouts(self.workout_set_rows()?))
    }

    /// Library entries, optionally filtered by tier, ordered by name
    pub fn library_by_category(&self, category: Option<Tier>) -> Result<Vec<LibraryEntry>> {
        let mut query = String::from("SELECT id, name, category FROM exercise_library");
        if category.is_some() {
            query.push_str(" WHERE category = ?1");
        }
        query.push_str(" ORDER BY name");

        let mut stmt = self.conn.prepare(&query)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(i64, String, String)> {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        };

        let raw = match category {
            Some(tier) => stmt
                .query_map(params![tier.as_str()], map_row)?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };

        raw.into_iter()
            .map(|(id, name, category)| {
                Ok(LibraryEntry {
                    id,
                    name,
                    category: category.parse()?,
                })
            })
            .collect()
    }

    /// Sets from the most recent workout containing the named exercise, in
    /// insertion order. Empty if the exercise was never performed.
    pub fn latest_exercise_sets(&self, name: &str) -> Result<Vec<Set>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.reps, s.weight
             FROM sets s
             JOIN exercises e ON s.exercise_id = e.id
             JOIN workouts w ON e.workout_id = w.id
             WHERE e.name = ?1 AND w.id = (
                 SELECT w2.id
                 FROM workouts w2
                 JOIN exercises e2 ON w2.id = e2.workout_id
                 WHERE e2.name = ?1
                 ORDER BY w2.date DESC
                 LIMIT 1
             )
             ORDER BY s.id",
        )?;

        let sets = stmt
            .query_map(params![name], |row| {
                Ok(Set {
                    reps: row.get(0)?,
                    weight: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sets)
    }

    /// Highest day index ever recorded among gzclp workouts, 0 if none
    pub fn max_gzclp_day(&self) -> Result<i64> {
        let day = self.conn.query_row(
            "SELECT COALESCE(MAX(workout_day), 0)
             FROM workouts
             WHERE workout_type = 'gzclp'",
            [],
            |row| row.get(0),
        )?;
        Ok(day)
    }

    /// Every recorded (date, weight, reps) for the named exercise, ordered
    /// by workout date
    pub fn exercise_set_history(&self, name: &str) -> Result<Vec<(String, f64, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT w.date, s.weight, s.reps
             FROM sets s
             JOIN exercises e ON s.exercise_id = e.id
             JOIN workouts w ON e.workout_id = w.id
             WHERE e.name = ?1
             ORDER BY w.date, s.weight DESC, s.reps DESC",
        )?;

        let rows = stmt
            .query_map(params![name], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Sorted distinct names of every exercise that appears in a stored
    /// workout
    pub fn recorded_exercise_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT e.name
             FROM exercises e
             JOIN workouts w ON e.workout_id = w.id
             ORDER BY e.name",
        )?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(names)
    }
}
