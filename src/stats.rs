//! Statistics module - per-exercise trend aggregation
//!
//! Turns raw recorded sets into one point per training date: the best
//! estimated one-rep-max of the session and its total volume.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::db::Database;

/// One trend point per training date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub estimated_1rm: f64,
    pub total_volume: f64,
}

/// Result of a statistics query: either the names available to query, or the
/// trend series for one exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsReport {
    Exercises { exercises: Vec<String> },
    Trend { data: Vec<TrendPoint> },
}

/// Estimated one-rep-max via the Brzycki formula. Degenerate at reps = 37;
/// callers are expected to pass realistic rep counts.
pub fn estimate_one_rep_max(weight: f64, reps: i64) -> f64 {
    if reps == 1 {
        return weight;
    }
    weight * 36.0 / (37.0 - reps as f64)
}

/// Collapse (date, weight, reps) rows into one point per date, ascending by
/// date: max estimated 1RM across the session, volume summed.
pub fn exercise_trend(rows: &[(String, f64, i64)]) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for (date, weight, reps) in rows {
        let estimated = estimate_one_rep_max(*weight, *reps);
        let volume = weight * *reps as f64;

        let entry = by_date.entry(date.as_str()).or_insert((estimated, 0.0));
        if estimated > entry.0 {
            entry.0 = estimated;
        }
        entry.1 += volume;
    }

    by_date
        .into_iter()
        .map(|(date, (best, volume))| TrendPoint {
            date: date.to_string(),
            estimated_1rm: best,
            total_volume: volume,
        })
        .collect()
}

/// Run a statistics query. No exercise name lists what can be queried;
/// a name yields its per-date trend (empty series if never recorded).
pub fn report(db: &Database, exercise: Option<&str>) -> Result<StatsReport> {
    match exercise {
        None | Some("") => Ok(StatsReport::Exercises {
            exercises: db.recorded_exercise_names()?,
        }),
        Some(name) => Ok(StatsReport::Trend {
            data: exercise_trend(&db.exercise_set_history(name)?),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Exercise, Set, Workout};

    #[test]
    fn test_one_rep_max_single_rep_is_the_weight() {
        assert_eq!(estimate_one_rep_max(100.0, 1), 100.0);
    }

    #[test]
    fn test_one_rep_max_brzycki() {
        assert_eq!(estimate_one_rep_max(100.0, 5), 112.5);
        let approx = estimate_one_rep_max(110.0, 3);
        assert!((approx - 116.470588).abs() < 1e-4, "got {approx}");
    }

    fn rows(data: &[(&str, f64, i64)]) -> Vec<(String, f64, i64)> {
        data.iter()
            .map(|(d, w, r)| (d.to_string(), *w, *r))
            .collect()
    }

    #[test]
    fn test_trend_groups_by_date_and_sorts_ascending() {
        let history = rows(&[
            ("2026-01-05", 100.0, 5),
            ("2026-01-05", 110.0, 3),
            ("2026-01-12", 120.0, 2),
        ]);
        let trend = exercise_trend(&history);

        assert_eq!(trend.len(), 2);

        assert_eq!(trend[0].date, "2026-01-05");
        assert!((trend[0].estimated_1rm - 116.470588).abs() < 1e-4);
        assert_eq!(trend[0].total_volume, 830.0);

        assert_eq!(trend[1].date, "2026-01-12");
        assert!((trend[1].estimated_1rm - 123.428571).abs() < 1e-4);
        assert_eq!(trend[1].total_volume, 240.0);
    }

    #[test]
    fn test_trend_sorted_even_when_rows_unordered() {
        let history = rows(&[
            ("2026-02-01", 60.0, 8),
            ("2026-01-01", 50.0, 8),
            ("2026-03-01", 70.0, 8),
        ]);
        let dates: Vec<_> = exercise_trend(&history)
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(dates, vec!["2026-01-01", "2026-02-01", "2026-03-01"]);
    }

    #[test]
    fn test_trend_empty_history() {
        assert!(exercise_trend(&[]).is_empty());
    }

    fn log(db: &Database, date: &str, name: &str, sets: Vec<Set>) {
        db.create_workout(&Workout {
            id: None,
            date: date.to_string(),
            workout_type: "custom".to_string(),
            workout_day: 0,
            exercises: vec![Exercise {
                name: name.to_string(),
                sets,
            }],
        })
        .unwrap();
    }

    #[test]
    fn test_report_without_name_lists_recorded_exercises() {
        let db = Database::open(":memory:").unwrap();
        log(&db, "2026-01-05", "Squat", vec![Set { reps: 5, weight: 100.0 }]);
        log(&db, "2026-01-07", "Bench Press", vec![Set { reps: 5, weight: 80.0 }]);

        match report(&db, None).unwrap() {
            StatsReport::Exercises { exercises } => {
                assert_eq!(exercises, vec!["Bench Press", "Squat"]);
            }
            other => panic!("expected exercise list, got {other:?}"),
        }
    }

    #[test]
    fn test_report_empty_name_behaves_like_none() {
        let db = Database::open(":memory:").unwrap();
        log(&db, "2026-01-05", "Squat", vec![Set { reps: 5, weight: 100.0 }]);

        assert!(matches!(
            report(&db, Some("")).unwrap(),
            StatsReport::Exercises { .. }
        ));
    }

    #[test]
    fn test_report_with_name_returns_trend() {
        let db = Database::open(":memory:").unwrap();
        log(&db, "2026-01-05", "Squat", vec![Set { reps: 5, weight: 100.0 }]);

        match report(&db, Some("Squat")).unwrap() {
            StatsReport::Trend { data } => {
                assert_eq!(data.len(), 1);
                assert_eq!(data[0].estimated_1rm, 112.5);
                assert_eq!(data[0].total_volume, 500.0);
            }
            other => panic!("expected trend, got {other:?}"),
        }
    }

    #[test]
    fn test_report_unknown_exercise_yields_empty_trend() {
        let db = Database::open(":memory:").unwrap();
        match report(&db, Some("Deadlift")).unwrap() {
            StatsReport::Trend { data } => assert!(data.is_empty()),
            other => panic!("expected trend, got {other:?}"),
        }
    }
}
