//! Proof triggers - one-time celebratory milestones.
//!
//! Rules are scanned in a fixed order and the first eligible rule whose id has
//! not fired yet wins:
//!
//! 1. Streak milestones 7, 14, 30, 75, 100 (ascending)
//! 2. 80% win rate over at least 5 days
//! 3. Recovery win: first win after 3+ losses
//! 4. First week: 7 days tracked
//!
//! Detection only. The store owns the fired-id set and is responsible for
//! recording a trigger once it has been shown.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Result;

/// Streak counters as kept by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub current: u32,
    pub total_days_won: u32,
    pub total_days_lost: u32,
}

impl StreakRecord {
    pub fn total_days(&self) -> u32 {
        self.total_days_won.saturating_add(self.total_days_lost)
    }
}

/// A trigger that has already been shown. Only the id takes part in the
/// fire-once check; any other fields the store keeps are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiredTrigger {
    pub trigger_id: String,
}

impl FiredTrigger {
    pub fn new(trigger_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
        }
    }
}

/// Read side of the key-value store the proof check depends on.
#[async_trait]
pub trait ProofStore: Send + Sync {
    async fn get_streak(&self) -> Result<StreakRecord>;

    async fn get_proof_triggers_fired(&self) -> Result<Vec<FiredTrigger>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofTriggerType {
    StreakMilestone,
    WinRate,
    RecoveryWin,
    FirstWeek,
}

/// A milestone that should be celebrated now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofTriggerResult {
    pub should_trigger: bool,
    /// Stable idempotency key
    pub trigger_id: String,
    pub trigger_type: ProofTriggerType,
    pub trigger_label: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Condition {
    StreakAtLeast(u32),
    WinRate { min_days: u32, min_pct: u32 },
    Recovery { min_losses: u32 },
    TotalDaysAtLeast(u32),
}

impl Condition {
    fn is_met(self, streak: &StreakRecord) -> bool {
        match self {
            Condition::StreakAtLeast(n) => streak.current >= n,
            Condition::WinRate { min_days, min_pct } => {
                let total = streak.total_days();
                // won / total * 100 >= min_pct, kept in integers
                let won = u64::from(streak.total_days_won);
                total >= min_days && won * 100 >= u64::from(min_pct) * u64::from(total)
            }
            Condition::Recovery { min_losses } => {
                streak.current == 1 && streak.total_days_lost >= min_losses
            }
            Condition::TotalDaysAtLeast(n) => streak.total_days() >= n,
        }
    }
}

/// A proof trigger and the condition that makes it eligible.
#[derive(Debug, Clone, Copy)]
pub struct ProofRule {
    pub id: &'static str,
    pub trigger_type: ProofTriggerType,
    pub label: &'static str,
    pub message: &'static str,
    condition: Condition,
}

impl ProofRule {
    pub fn is_eligible(&self, streak: &StreakRecord) -> bool {
        self.condition.is_met(streak)
    }

    fn to_result(self) -> ProofTriggerResult {
        ProofTriggerResult {
            should_trigger: true,
            trigger_id: self.id.to_string(),
            trigger_type: self.trigger_type,
            trigger_label: self.label.to_string(),
            message: self.message.to_string(),
        }
    }
}

const fn streak_milestone(
    id: &'static str,
    days: u32,
    label: &'static str,
    message: &'static str,
) -> ProofRule {
    ProofRule {
        id,
        trigger_type: ProofTriggerType::StreakMilestone,
        label,
        message,
        condition: Condition::StreakAtLeast(days),
    }
}

static PROOF_RULES: [ProofRule; 8] = [
    streak_milestone(
        "streak_7",
        7,
        "7-Day Streak",
        "Seven days straight. The standard is starting to hold.",
    ),
    streak_milestone(
        "streak_14",
        14,
        "14-Day Streak",
        "Two weeks of keeping your word. That is proof.",
    ),
    streak_milestone(
        "streak_30",
        30,
        "30-Day Streak",
        "Thirty days. This is no longer a phase, it is who you are.",
    ),
    streak_milestone(
        "streak_75",
        75,
        "75-Day Streak",
        "Seventy-five days. Most people quit long before this. You did not.",
    ),
    streak_milestone(
        "streak_100",
        100,
        "100-Day Streak",
        "One hundred days. Triple digits. You are the proof.",
    ),
    ProofRule {
        id: "win_rate_80",
        trigger_type: ProofTriggerType::WinRate,
        label: "80% Win Rate",
        message: "You win at least four out of every five days. That is the operator standard.",
        condition: Condition::WinRate {
            min_days: 5,
            min_pct: 80,
        },
    },
    ProofRule {
        id: "recovery_win",
        trigger_type: ProofTriggerType::RecoveryWin,
        label: "Recovery Win",
        message: "Back on the board after a rough stretch. Comebacks count.",
        condition: Condition::Recovery { min_losses: 3 },
    },
    ProofRule {
        id: "first_week",
        trigger_type: ProofTriggerType::FirstWeek,
        label: "First Week",
        message: "Seven days on the record. You showed up.",
        condition: Condition::TotalDaysAtLeast(7),
    },
];

/// Every proof rule in evaluation order.
pub fn proof_trigger_catalog() -> &'static [ProofRule] {
    &PROOF_RULES
}

/// Pick the next trigger to fire for a streak snapshot, if any.
pub fn evaluate_proof_triggers(
    streak: &StreakRecord,
    fired_ids: &HashSet<String>,
) -> Option<ProofTriggerResult> {
    PROOF_RULES
        .iter()
        .find(|rule| !fired_ids.contains(rule.id) && rule.is_eligible(streak))
        .map(|rule| {
            tracing::debug!(trigger_id = rule.id, "proof trigger eligible");
            rule.to_result()
        })
}

/// Read the streak and fired triggers concurrently and detect the next
/// trigger.
///
/// Read failures are logged and reported as "no trigger"; the next check
/// will try again.
pub async fn check_proof_triggers<S>(store: &S) -> Option<ProofTriggerResult>
where
    S: ProofStore + ?Sized,
{
    let (streak, fired) = tokio::join!(store.get_streak(), store.get_proof_triggers_fired());

    let streak = match streak {
        Ok(streak) => streak,
        Err(e) => {
            tracing::warn!(error = %e, "proof trigger check: failed to read streak");
            return None;
        }
    };
    let fired = match fired {
        Ok(fired) => fired,
        Err(e) => {
            tracing::warn!(error = %e, "proof trigger check: failed to read fired triggers");
            return None;
        }
    };

    let fired_ids: HashSet<String> = fired.into_iter().map(|f| f.trigger_id).collect();
    evaluate_proof_triggers(&streak, &fired_ids)
}

/// In-memory [`ProofStore`] over a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    pub streak: StreakRecord,
    pub fired: Vec<FiredTrigger>,
}

impl SnapshotStore {
    pub fn new<I, T>(streak: StreakRecord, fired_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            streak,
            fired: fired_ids.into_iter().map(FiredTrigger::new).collect(),
        }
    }
}

#[async_trait]
impl ProofStore for SnapshotStore {
    async fn get_streak(&self) -> Result<StreakRecord> {
        Ok(self.streak)
    }

    async fn get_proof_triggers_fired(&self) -> Result<Vec<FiredTrigger>> {
        Ok(self.fired.clone())
    }
}
