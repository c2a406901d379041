//! Integration tests wiring the evaluators together the way the app does.

use std::collections::HashSet;

use chrono::Weekday;
use operator_core::{
    calculate_day_result, calculate_escalation_tier, calculate_life_score_preview,
    calculate_streak_impact, check_crew_post_gate, check_proof_triggers, check_social_gate,
    evaluate_night, evaluate_proof_triggers, DayOutcome, GateReason, SnapshotStore,
    StreakRecord, Task,
};

fn tasks(done: usize, missed: usize) -> Vec<Task> {
    (0..done + missed)
        .map(|i| Task {
            title: format!("Task {}", i + 1),
            completed: i < done,
        })
        .collect()
}

#[test]
fn test_tier_feeds_social_gate() {
    // Six strikes put a veteran user into strike lock
    let tier = calculate_escalation_tier(6);
    let result = check_social_gate(40, 0, tier, true, 200);
    assert!(result.gated);
    assert_eq!(result.reason, GateReason::StrikeLock { tier });

    // Clearing strikes reopens the feed
    let tier = calculate_escalation_tier(1);
    let result = check_social_gate(40, 0, tier, true, 200);
    assert!(!result.gated);
}

#[test]
fn test_new_user_first_days() {
    let tier = calculate_escalation_tier(0);

    // Day 1, brief not viewed
    let day1 = check_social_gate(0, 0, tier, false, 1);
    assert_eq!(day1.reason, GateReason::BuyinBrief { days_in_app: 1 });

    // Brief viewed, still no streak
    let day1_after = check_social_gate(0, 0, tier, true, 1);
    assert_eq!(
        day1_after.reason,
        GateReason::NewUser {
            streak: 0,
            required: 3
        }
    );
    assert!(check_crew_post_gate(0));

    // Three wins later
    let mut streak = 0;
    for _ in 0..3 {
        let day = calculate_day_result(&tasks(4, 0));
        streak = calculate_streak_impact(streak, day.outcome).after;
    }
    assert_eq!(streak, 3);
    assert!(!check_social_gate(streak, 0, tier, true, 4).gated);
    assert!(!check_crew_post_gate(streak));
}

#[test]
fn test_night_sequence_updates_score() {
    let mut score = 50;
    let mut streak = 2;

    // Perfect day
    let day = calculate_day_result(&tasks(5, 0));
    assert_eq!(day.outcome, DayOutcome::Win);
    streak = calculate_streak_impact(streak, day.outcome).after;
    score = calculate_life_score_preview(score, day.outcome, day.completion_pct).projected;
    assert_eq!((streak, score), (3, 51));

    // 4 of 5 is a loss but costs no score
    let day = calculate_day_result(&tasks(4, 1));
    assert_eq!(day.completion_pct, 80);
    streak = calculate_streak_impact(streak, day.outcome).after;
    score = calculate_life_score_preview(score, day.outcome, day.completion_pct).projected;
    assert_eq!((streak, score), (0, 51));

    // Empty day is a loss at 0%
    let report = evaluate_night(&tasks(0, 0), streak, score, Weekday::Fri);
    assert_eq!(report.day.outcome, DayOutcome::Loss);
    assert_eq!(report.life_score.projected, 49);
}

#[test]
fn test_proof_triggers_fire_once_each() {
    let streak = StreakRecord {
        current: 30,
        total_days_won: 30,
        total_days_lost: 2,
    };
    let mut fired = HashSet::new();
    let mut order = Vec::new();

    // The store records each trigger after it is shown
    while let Some(result) = evaluate_proof_triggers(&streak, &fired) {
        assert!(fired.insert(result.trigger_id.clone()), "fired twice");
        order.push(result.trigger_id);
    }

    assert_eq!(
        order,
        vec!["streak_7", "streak_14", "streak_30", "win_rate_80", "first_week"]
    );
}

#[tokio::test]
async fn test_check_proof_triggers_against_snapshot() {
    let store = SnapshotStore::new(
        StreakRecord {
            current: 7,
            total_days_won: 7,
            total_days_lost: 0,
        },
        Vec::<String>::new(),
    );
    let result = check_proof_triggers(&store).await.unwrap();
    assert_eq!(result.trigger_id, "streak_7");
    assert!(result.should_trigger);
}
