//! Rebuilds nested workouts from the flattened join rows
//!
//! The read path hands back one row per set with the workout and exercise
//! columns repeated. Reassembly keeps three orderings intact: workouts in
//! row order (date descending), exercises in first-seen order within their
//! workout, sets in row order within their exercise.

use std::collections::HashMap;

use super::{Exercise, Set, Workout, WorkoutSetRow};

/// Assemble the flat row stream into nested workouts.
///
/// Exercises are matched by name within a workout, so two same-named
/// exercise rows in one workout merge into a single exercise with their
/// sets concatenated.
pub fn assemble_workouts(rows: Vec<WorkoutSetRow>) -> Vec<Workout> {
    let mut workouts: Vec<Workout> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = match index.get(&row.workout_id) {
            Some(&slot) => slot,
            None => {
                workouts.push(Workout {
                    id: Some(row.workout_id),
                    date: row.date.clone(),
                    workout_type: row.workout_type.clone(),
                    workout_day: row.workout_day,
                    exercises: Vec::new(),
                });
                index.insert(row.workout_id, workouts.len() - 1);
                workouts.len() - 1
            }
        };

        let workout = &mut workouts[slot];
        let exercise = match workout
            .exercises
            .iter_mut()
            .find(|e| e.name == row.exercise_name)
        {
            Some(exercise) => exercise,
            None => {
                workout.exercises.push(Exercise {
                    name: row.exercise_name.clone(),
                    sets: Vec::new(),
                });
                workout.exercises.last_mut().unwrap()
            }
        };

        exercise.sets.push(Set {
            reps: row.reps,
            weight: row.weight,
        });
    }

    workouts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(workout_id: i64, date: &str, exercise: &str, reps: i64, weight: f64) -> WorkoutSetRow {
        WorkoutSetRow {
            workout_id,
            date: date.to_string(),
            workout_type: "custom".to_string(),
            workout_day: 0,
            exercise_name: exercise.to_string(),
            reps,
            weight,
        }
    }

    #[test]
    fn test_empty_stream_yields_no_workouts() {
        assert!(assemble_workouts(vec![]).is_empty());
    }

    #[test]
    fn test_workouts_keep_row_order() {
        let rows = vec![
            row(7, "2026-02-10", "Squat", 5, 100.0),
            row(3, "2026-02-03", "Squat", 5, 95.0),
            row(5, "2026-01-27", "Bench Press", 8, 60.0),
        ];
        let workouts = assemble_workouts(rows);

        let ids: Vec<_> = workouts.iter().map(|w| w.id.unwrap()).collect();
        assert_eq!(ids, vec![7, 3, 5]);
        assert_eq!(workouts[0].date, "2026-02-10");
    }

    #[test]
    fn test_exercises_keep_first_seen_order_and_sets_row_order() {
        let rows = vec![
            row(1, "2026-02-10", "Squat", 5, 100.0),
            row(1, "2026-02-10", "Squat", 5, 102.5),
            row(1, "2026-02-10", "Lat Pulldown", 12, 50.0),
            row(1, "2026-02-10", "Squat", 3, 105.0),
        ];
        let workouts = assemble_workouts(rows);

        assert_eq!(workouts.len(), 1);
        let exercises = &workouts[0].exercises;
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].name, "Squat");
        assert_eq!(exercises[1].name, "Lat Pulldown");
        assert_eq!(
            exercises[0].sets,
            vec![
                Set { reps: 5, weight: 100.0 },
                Set { reps: 5, weight: 102.5 },
                Set { reps: 3, weight: 105.0 },
            ]
        );
    }

    #[test]
    fn test_same_name_in_one_workout_merges() {
        // Name-based matching: distinct exercise rows sharing a name within
        // one workout collapse into a single exercise.
        let rows = vec![
            row(1, "2026-02-10", "Squat", 5, 100.0),
            row(1, "2026-02-10", "Squat", 8, 80.0),
        ];
        let workouts = assemble_workouts(rows);
        assert_eq!(workouts[0].exercises.len(), 1);
        assert_eq!(workouts[0].exercises[0].sets.len(), 2);
    }

    #[test]
    fn test_same_name_across_workouts_stays_separate() {
        let rows = vec![
            row(1, "2026-02-10", "Squat", 5, 100.0),
            row(2, "2026-02-03", "Squat", 5, 95.0),
        ];
        let workouts = assemble_workouts(rows);
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].exercises[0].sets.len(), 1);
        assert_eq!(workouts[1].exercises[0].sets.len(), 1);
    }

    #[test]
    fn test_workout_metadata_taken_from_first_row() {
        let mut first = row(1, "2026-02-10", "Squat", 5, 100.0);
        first.workout_type = "gzclp".to_string();
        first.workout_day = 3;
        let rows = vec![first, row(1, "2026-02-10", "Overhead Press", 10, 40.0)];

        let workouts = assemble_workouts(rows);
        assert_eq!(workouts[0].workout_type, "gzclp");
        assert_eq!(workouts[0].workout_day, 3);
    }
}
