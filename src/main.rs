//! liftlog - Personal strength training logbook

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use liftlog::catalog::Tier;
use liftlog::db::{Database, Exercise, Set, Workout};
use liftlog::gzclp::Prefill;
use liftlog::stats;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(author, version, about = "Personal strength training logbook")]
struct Cli {
    /// Path to the workout database
    #[arg(long, env = "LIFTLOG_DB", default_value = "workouts.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout
    Log {
        /// Workout date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Workout type ("gzclp" participates in rotation scheduling)
        #[arg(short = 't', long, default_value = "custom")]
        workout_type: String,

        /// GZCLP day index (only meaningful for gzclp workouts)
        #[arg(long, default_value = "0")]
        day: i64,

        /// Exercises as NAME=REPS@WEIGHT[,REPS@WEIGHT...], repeatable
        #[arg(short, long = "exercise", required = true)]
        exercises: Vec<String>,
    },

    /// List logged workouts, newest first
    List {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Delete a workout and everything logged under it
    Delete {
        /// Workout id
        id: i64,
    },

    /// Show the next GZCLP day and its prefill data
    Gzclp,

    /// Show the sets from the last time an exercise was performed
    Latest {
        /// Exercise name
        name: String,
    },

    /// Show trend statistics for an exercise, or list queryable exercises
    Stats {
        /// Exercise name
        exercise: Option<String>,
    },

    /// List the exercise library
    Exercises {
        /// Filter by tier (T1, T2, T3)
        #[arg(short, long)]
        category: Option<Tier>,
    },
}

/// Parse one `NAME=REPS@WEIGHT[,REPS@WEIGHT...]` argument. Rejects
/// malformed numerics before anything reaches the database.
fn parse_exercise_arg(arg: &str) -> Result<Exercise> {
    let (name, sets_part) = arg
        .split_once('=')
        .with_context(|| format!("expected NAME=REPS@WEIGHT..., got {arg:?}"))?;
    if name.is_empty() {
        bail!("exercise name is empty in {arg:?}");
    }

    let mut sets = Vec::new();
    for piece in sets_part.split(',').filter(|p| !p.is_empty()) {
        let (reps_str, weight_str) = piece
            .split_once('@')
            .with_context(|| format!("expected REPS@WEIGHT, got {piece:?}"))?;

        let reps: i64 = reps_str
            .parse()
            .with_context(|| format!("invalid reps value {reps_str:?}"))?;
        if reps < 1 {
            bail!("reps must be positive, got {reps}");
        }

        let weight: f64 = weight_str
            .parse()
            .with_context(|| format!("invalid weight value {weight_str:?}"))?;
        if weight < 0.0 {
            bail!("weight must be non-negative, got {weight}");
        }

        sets.push(Set { reps, weight });
    }

    Ok(Exercise {
        name: name.to_string(),
        sets,
    })
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let db = Database::open(&cli.db)?;

    match cli.command {
        Commands::Log { date, workout_type, day, exercises } => {
            let date = date
                .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            let exercises = exercises
                .iter()
                .map(|arg| parse_exercise_arg(arg))
                .collect::<Result<Vec<_>>>()?;

            let workout = Workout {
                id: None,
                date,
                workout_type,
                workout_day: day,
                exercises,
            };
            let id = db.create_workout(&workout)?;
            println!("Logged workout {} on {}", id, workout.date);
        }

        Commands::List { limit } => {
            let workouts = db.all_workouts()?;
            for workout in workouts.iter().take(limit) {
                println!(
                    "#{} {} [{} day {}]",
                    workout.id.unwrap_or(0),
                    workout.date,
                    workout.workout_type,
                    workout.workout_day
                );
                for exercise in &workout.exercises {
                    let sets: Vec<String> = exercise
                        .sets
                        .iter()
                        .map(|s| format!("{}x{}", s.reps, s.weight))
                        .collect();
                    println!("  {:24} {}", exercise.name, sets.join(" "));
                }
            }
        }

        Commands::Delete { id } => {
            if db.delete_workout(id)? == 0 {
                bail!("workout {id} not found");
            }
            println!("Deleted workout {id}");
        }

        Commands::Gzclp => {
            let prefill = Prefill::next(&db)?;
            println!("{}", serde_json::to_string_pretty(&prefill)?);
        }

        Commands::Latest { name } => {
            let sets = db.latest_exercise_sets(&name)?;
            println!("{}", serde_json::to_string(&serde_json::json!({ "sets": sets }))?);
        }

        Commands::Stats { exercise } => {
            let report = stats::report(&db, exercise.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Exercises { category } => {
            for entry in db.library_by_category(category)? {
                println!("{} {}", entry.category, entry.name);
            }
        }
    }

    Ok(())
}
