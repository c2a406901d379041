//! Night reflection - scores the day and previews its consequences.
//!
//! At the end of each day the task list is reduced to a [`DayResult`]. The
//! outcome then drives the streak ([`StreakImpact`]) and the life score
//! ([`LifeScorePreview`]). A day is only a win when every task was completed
//! and there was at least one task.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowest possible life score.
pub const LIFE_SCORE_MIN: i32 = 0;
/// Highest possible life score.
pub const LIFE_SCORE_MAX: i32 = 100;

/// Anything that can be counted as done or not done.
pub trait Completable {
    fn is_completed(&self) -> bool;
}

impl Completable for bool {
    fn is_completed(&self) -> bool {
        *self
    }
}

impl<T: Completable + ?Sized> Completable for &T {
    fn is_completed(&self) -> bool {
        (**self).is_completed()
    }
}

/// Minimal task shape read by the reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub title: String,
    pub completed: bool,
}

impl Completable for Task {
    fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Win or loss for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOutcome {
    Win,
    Loss,
}

impl DayOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            DayOutcome::Win => "win",
            DayOutcome::Loss => "loss",
        }
    }
}

impl fmt::Display for DayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOutcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(DayOutcome::Win),
            "loss" => Ok(DayOutcome::Loss),
            other => Err(ValidationError::invalid(
                "outcome",
                format!("expected 'win' or 'loss', got '{other}'"),
            )),
        }
    }
}

/// Scored result of a day's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResult {
    pub outcome: DayOutcome,
    pub completed: u32,
    pub total: u32,
    /// 0-100
    pub completion_pct: u8,
}

/// Score a day's task list.
pub fn calculate_day_result<T: Completable>(tasks: &[T]) -> DayResult {
    let total = tasks.len() as u32;
    let completed = tasks.iter().filter(|t| t.is_completed()).count() as u32;

    let completion_pct = if total == 0 {
        0
    } else {
        // round half up
        ((200 * completed as u64 + total as u64) / (2 * total as u64)) as u8
    };

    let outcome = if total > 0 && completed == total {
        DayOutcome::Win
    } else {
        DayOutcome::Loss
    };

    DayResult {
        outcome,
        completed,
        total,
        completion_pct,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakDirection {
    Up,
    Broken,
}

/// Streak before and after the night's outcome is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakImpact {
    pub before: u32,
    pub after: u32,
    pub direction: StreakDirection,
}

/// A win extends the streak by one; a loss resets it to zero.
pub fn calculate_streak_impact(current_streak: u32, outcome: DayOutcome) -> StreakImpact {
    match outcome {
        DayOutcome::Win => StreakImpact {
            before: current_streak,
            after: current_streak.saturating_add(1),
            direction: StreakDirection::Up,
        },
        DayOutcome::Loss => StreakImpact {
            before: current_streak,
            after: 0,
            direction: StreakDirection::Broken,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeScorePreview {
    pub delta: i32,
    pub projected: i32,
}

/// Life score change for a day outcome.
///
/// Wins always add one point. Losses are graded by completion: 80% and up
/// costs nothing, 60% and up costs one point, anything lower costs two.
pub fn life_score_delta(outcome: DayOutcome, completion_pct: u8) -> i32 {
    match (outcome, completion_pct) {
        (DayOutcome::Win, _) => 1,
        (DayOutcome::Loss, 80..=u8::MAX) => 0,
        (DayOutcome::Loss, 60..=79) => -1,
        (DayOutcome::Loss, _) => -2,
    }
}

/// Preview the life score after tonight, clamped to 0-100.
pub fn calculate_life_score_preview(
    current_score: i32,
    outcome: DayOutcome,
    completion_pct: u8,
) -> LifeScorePreview {
    let delta = life_score_delta(outcome, completion_pct);
    LifeScorePreview {
        delta,
        projected: current_score
            .saturating_add(delta)
            .clamp(LIFE_SCORE_MIN, LIFE_SCORE_MAX),
    }
}

const MISS_REASONS: [&str; 6] = [
    "Ran out of time",
    "Low energy",
    "Got distracted",
    "Unexpected obligation",
    "Underestimated the task",
    "Chose comfort over commitment",
];

/// Closed set of reasons a user can give for a missed task.
pub fn miss_reason_options() -> &'static [&'static str] {
    &MISS_REASONS
}

// Indexed by day of week, Sunday = 0.
const REFLECTION_PROMPTS: [&str; 7] = [
    "What will you carry from this week into the next?",
    "How did you set the tone for the week today?",
    "Where did you hold the line today, and where did you bend?",
    "What was the hardest task today, and how did you face it?",
    "What pattern showed up today that you need to break?",
    "What did you finish today that you almost let slide?",
    "How did you keep the standard without the structure of a workday?",
];

/// Reflection prompt for a day of week (0 = Sunday). Out-of-range days get
/// Sunday's prompt.
pub fn reflection_prompt(day_of_week: usize) -> &'static str {
    REFLECTION_PROMPTS
        .get(day_of_week)
        .copied()
        .unwrap_or(REFLECTION_PROMPTS[0])
}

pub fn reflection_prompt_for(weekday: Weekday) -> &'static str {
    reflection_prompt(weekday.num_days_from_sunday() as usize)
}

/// Everything the night reflection screen shows, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NightReport {
    pub day: DayResult,
    pub streak: StreakImpact,
    pub life_score: LifeScorePreview,
    pub prompt: &'static str,
}

pub fn evaluate_night<T: Completable>(
    tasks: &[T],
    current_streak: u32,
    current_score: i32,
    weekday: Weekday,
) -> NightReport {
    let day = calculate_day_result(tasks);
    NightReport {
        day,
        streak: calculate_streak_impact(current_streak, day.outcome),
        life_score: calculate_life_score_preview(current_score, day.outcome, day.completion_pct),
        prompt: reflection_prompt_for(weekday),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn task(completed: bool) -> Task {
        Task {
            title: String::new(),
            completed,
        }
    }

    #[test]
    fn test_empty_day_is_a_loss() {
        let result = calculate_day_result::<Task>(&[]);
        assert_eq!(
            result,
            DayResult {
                outcome: DayOutcome::Loss,
                completed: 0,
                total: 0,
                completion_pct: 0,
            }
        );
    }

    #[test]
    fn test_all_done_is_a_win() {
        let result = calculate_day_result(&[task(true), task(true)]);
        assert_eq!(result.outcome, DayOutcome::Win);
        assert_eq!(result.completed, 2);
        assert_eq!(result.total, 2);
        assert_eq!(result.completion_pct, 100);
    }

    #[test]
    fn test_partial_day_rounds_percentage() {
        let result = calculate_day_result(&[true, true, false]);
        assert_eq!(result.outcome, DayOutcome::Loss);
        assert_eq!(result.completion_pct, 67);

        let result = calculate_day_result(&[true, false, false]);
        assert_eq!(result.completion_pct, 33);

        // 1/8 = 12.5 rounds up
        let mut tasks = vec![false; 8];
        tasks[0] = true;
        assert_eq!(calculate_day_result(&tasks).completion_pct, 13);
    }

    #[test]
    fn test_streak_impact() {
        assert_eq!(
            calculate_streak_impact(5, DayOutcome::Loss),
            StreakImpact {
                before: 5,
                after: 0,
                direction: StreakDirection::Broken
            }
        );
        assert_eq!(
            calculate_streak_impact(5, DayOutcome::Win),
            StreakImpact {
                before: 5,
                after: 6,
                direction: StreakDirection::Up
            }
        );
        assert_eq!(calculate_streak_impact(0, DayOutcome::Loss).after, 0);
    }

    #[test]
    fn test_life_score_steps() {
        assert_eq!(life_score_delta(DayOutcome::Win, 0), 1);
        assert_eq!(life_score_delta(DayOutcome::Loss, 100), 0);
        assert_eq!(life_score_delta(DayOutcome::Loss, 80), 0);
        assert_eq!(life_score_delta(DayOutcome::Loss, 79), -1);
        assert_eq!(life_score_delta(DayOutcome::Loss, 60), -1);
        assert_eq!(life_score_delta(DayOutcome::Loss, 59), -2);
        assert_eq!(life_score_delta(DayOutcome::Loss, 0), -2);
    }

    #[test]
    fn test_life_score_preview_clamps() {
        assert_eq!(
            calculate_life_score_preview(50, DayOutcome::Loss, 70),
            LifeScorePreview {
                delta: -1,
                projected: 49
            }
        );
        assert_eq!(
            calculate_life_score_preview(99, DayOutcome::Win, 100),
            LifeScorePreview {
                delta: 1,
                projected: 100
            }
        );
        assert_eq!(
            calculate_life_score_preview(100, DayOutcome::Win, 100).projected,
            100
        );
        assert_eq!(
            calculate_life_score_preview(1, DayOutcome::Loss, 10),
            LifeScorePreview {
                delta: -2,
                projected: 0
            }
        );
    }

    #[test]
    fn test_miss_reasons() {
        let reasons = miss_reason_options();
        assert_eq!(reasons.len(), 6);
        assert_eq!(reasons[0], "Ran out of time");
    }

    #[test]
    fn test_reflection_prompt_fallback() {
        assert_eq!(reflection_prompt(7), reflection_prompt(0));
        assert_eq!(reflection_prompt(usize::MAX), reflection_prompt(0));
        assert_ne!(reflection_prompt(1), reflection_prompt(0));
        assert_eq!(reflection_prompt_for(Weekday::Sun), reflection_prompt(0));
        assert_eq!(reflection_prompt_for(Weekday::Sat), reflection_prompt(6));
    }

    #[test]
    fn test_outcome_parse() {
        assert_eq!("WIN".parse::<DayOutcome>().unwrap(), DayOutcome::Win);
        assert_eq!("loss".parse::<DayOutcome>().unwrap(), DayOutcome::Loss);
        assert!("draw".parse::<DayOutcome>().is_err());
    }

    #[test]
    fn test_evaluate_night() {
        let report = evaluate_night(&[task(true), task(false)], 4, 60, Weekday::Wed);
        assert_eq!(report.day.completion_pct, 50);
        assert_eq!(report.streak.after, 0);
        assert_eq!(report.life_score.delta, -2);
        assert_eq!(report.life_score.projected, 58);
        assert_eq!(report.prompt, reflection_prompt(3));
    }

    #[test]
    fn test_day_result_json_uses_camel_case() {
        let json = serde_json::to_value(calculate_day_result(&[task(true)])).unwrap();
        assert_eq!(json["completionPct"], 100);
        assert_eq!(json["outcome"], "win");
    }

    proptest! {
        #[test]
        fn projected_score_stays_in_range(
            score in -1_000i32..1_000,
            win in any::<bool>(),
            pct in 0u8..=100,
        ) {
            let outcome = if win { DayOutcome::Win } else { DayOutcome::Loss };
            let preview = calculate_life_score_preview(score, outcome, pct);
            prop_assert!((LIFE_SCORE_MIN..=LIFE_SCORE_MAX).contains(&preview.projected));
        }

        #[test]
        fn win_iff_streak_goes_up(streak in 0u32..10_000, done in 0usize..10, missed in 0usize..10) {
            let mut tasks = vec![true; done];
            tasks.extend(std::iter::repeat(false).take(missed));
            let day = calculate_day_result(&tasks);
            let impact = calculate_streak_impact(streak, day.outcome);
            let up = impact.direction == StreakDirection::Up;
            prop_assert_eq!(up, day.outcome == DayOutcome::Win);
            prop_assert_eq!(up, impact.after == streak + 1);
            if !up {
                prop_assert_eq!(impact.after, 0);
            }
        }
    }
}
