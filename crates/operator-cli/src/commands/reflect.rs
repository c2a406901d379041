use chrono::{Datelike, Local};
use clap::Subcommand;
use operator_core::{
    calculate_day_result, calculate_life_score_preview, calculate_streak_impact, evaluate_night,
    miss_reason_options, reflection_prompt, Config, DayOutcome, Task,
};
use serde_json::json;
use std::path::{Path, PathBuf};

use super::print_json;

#[derive(Subcommand)]
pub enum ReflectAction {
    /// Score a day from a JSON task list ([{"completed": true}, ...])
    Day {
        /// Path to the task list, or "-" for stdin
        tasks: PathBuf,
    },
    /// Streak before and after an outcome
    Streak {
        current: u32,
        /// win or loss
        outcome: DayOutcome,
    },
    /// Life score change for an outcome
    Score {
        current: i32,
        /// win or loss
        outcome: DayOutcome,
        /// Completion percentage (0-100)
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        pct: u8,
    },
    /// Reasons a task can be marked as missed
    Reasons,
    /// Reflection prompt for a day of week (0 = Sunday)
    Prompt {
        /// Defaults to today
        day: Option<usize>,
    },
    /// Full night report for a JSON task list
    Night {
        /// Path to the task list, or "-" for stdin
        tasks: PathBuf,
        /// Current streak
        #[arg(long, default_value_t = 0)]
        streak: u32,
        /// Current life score (defaults to reflection.life_score)
        #[arg(long)]
        score: Option<i32>,
    },
}

fn read_tasks(path: &Path) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?
    };
    let tasks: Vec<Task> = serde_json::from_str(&content)?;
    tracing::debug!(count = tasks.len(), "loaded tasks");
    Ok(tasks)
}

pub fn run(action: ReflectAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ReflectAction::Day { tasks } => {
            let tasks = read_tasks(&tasks)?;
            print_json(&calculate_day_result(&tasks))?;
        }
        ReflectAction::Streak { current, outcome } => {
            print_json(&calculate_streak_impact(current, outcome))?;
        }
        ReflectAction::Score {
            current,
            outcome,
            pct,
        } => {
            print_json(&calculate_life_score_preview(current, outcome, pct))?;
        }
        ReflectAction::Reasons => {
            print_json(&miss_reason_options())?;
        }
        ReflectAction::Prompt { day } => {
            let today = Local::now().weekday().num_days_from_sunday() as usize;
            let day = day.unwrap_or(today);
            print_json(&json!({ "day": day, "prompt": reflection_prompt(day) }))?;
        }
        ReflectAction::Night {
            tasks,
            streak,
            score,
        } => {
            let tasks = read_tasks(&tasks)?;
            let score = score.unwrap_or(config.reflection.life_score);
            let report = evaluate_night(&tasks, streak, score, Local::now().weekday());
            print_json(&report)?;
        }
    }
    Ok(())
}
