//! Social gate - decides whether social and engagement features are blocked.
//!
//! The gate is an ordered list of rules evaluated top-down; the first rule
//! that matches decides the outcome. Order is precedence:
//!
//! 1. `strike_lock` - red escalation tier overrides everything
//! 2. `buyin_brief` - new users must view the daily brief first
//! 3. `new_user` - new users need a minimal streak
//! 4. `inactive` - too many days without activity
//!
//! A user who matches both `buyin_brief` and `new_user` sees `buyin_brief`
//! until the brief is viewed, then `new_user`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::escalation::EscalationTier;

/// Users within this many days of onboarding are "new".
pub const NEW_USER_WINDOW_DAYS: u32 = 14;
/// Streak a new user needs before social access opens.
pub const NEW_USER_REQUIRED_STREAK: u32 = 3;
/// Days without activity before the feed is gated.
pub const INACTIVE_THRESHOLD_DAYS: u32 = 3;

/// Why the gate is (or is not) closed, with the data the UI needs for each case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(
    tag = "reason",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum GateReason {
    None {},
    StrikeLock { tier: EscalationTier },
    BuyinBrief { days_in_app: u32 },
    NewUser { streak: u32, required: u32 },
    Inactive { days_inactive: u32 },
}

impl GateReason {
    pub fn code(&self) -> &'static str {
        match self {
            GateReason::None {} => "none",
            GateReason::StrikeLock { .. } => "strike_lock",
            GateReason::BuyinBrief { .. } => "buyin_brief",
            GateReason::NewUser { .. } => "new_user",
            GateReason::Inactive { .. } => "inactive",
        }
    }
}

/// Outcome of a social gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateResult {
    pub gated: bool,
    #[serde(flatten)]
    pub reason: GateReason,
}

impl GateResult {
    pub fn open() -> Self {
        Self {
            gated: false,
            reason: GateReason::None {},
        }
    }

    pub fn blocked(reason: GateReason) -> Self {
        Self {
            gated: !matches!(reason, GateReason::None {}),
            reason,
        }
    }
}

/// Snapshot of user state the gate rules read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateInput {
    pub streak: u32,
    pub days_inactive: u32,
    pub strike_tier: EscalationTier,
    pub brief_viewed_today: bool,
    pub days_in_app: u32,
}

/// A named gate rule. Returns the blocking reason when it matches.
pub struct GateRule {
    pub name: &'static str,
    check: fn(&GateInput) -> Option<GateReason>,
}

impl GateRule {
    pub fn check(&self, input: &GateInput) -> Option<GateReason> {
        (self.check)(input)
    }
}

fn strike_lock(input: &GateInput) -> Option<GateReason> {
    (input.strike_tier == EscalationTier::Red).then_some(GateReason::StrikeLock {
        tier: input.strike_tier,
    })
}

fn buyin_brief(input: &GateInput) -> Option<GateReason> {
    (input.days_in_app <= NEW_USER_WINDOW_DAYS && !input.brief_viewed_today).then_some(
        GateReason::BuyinBrief {
            days_in_app: input.days_in_app,
        },
    )
}

fn new_user(input: &GateInput) -> Option<GateReason> {
    (input.streak < NEW_USER_REQUIRED_STREAK && input.days_in_app <= NEW_USER_WINDOW_DAYS)
        .then_some(GateReason::NewUser {
            streak: input.streak,
            required: NEW_USER_REQUIRED_STREAK,
        })
}

fn inactive(input: &GateInput) -> Option<GateReason> {
    (input.days_inactive >= INACTIVE_THRESHOLD_DAYS).then_some(GateReason::Inactive {
        days_inactive: input.days_inactive,
    })
}

/// Social gate rules in precedence order.
pub static SOCIAL_GATE_RULES: [GateRule; 4] = [
    GateRule {
        name: "strike_lock",
        check: strike_lock,
    },
    GateRule {
        name: "buyin_brief",
        check: buyin_brief,
    },
    GateRule {
        name: "new_user",
        check: new_user,
    },
    GateRule {
        name: "inactive",
        check: inactive,
    },
];

/// Rule names in the order they are evaluated.
pub fn social_gate_rule_names() -> Vec<&'static str> {
    SOCIAL_GATE_RULES.iter().map(|rule| rule.name).collect()
}

/// Evaluate the social gate against a state snapshot.
pub fn evaluate_social_gate(input: &GateInput) -> GateResult {
    for rule in SOCIAL_GATE_RULES.iter() {
        if let Some(reason) = rule.check(input) {
            tracing::debug!(rule = rule.name, "social gate closed");
            return GateResult::blocked(reason);
        }
    }
    GateResult::open()
}

/// Decide whether social features are blocked for the user.
pub fn check_social_gate(
    streak: u32,
    days_inactive: u32,
    strike_tier: EscalationTier,
    brief_viewed_today: bool,
    days_in_app: u32,
) -> GateResult {
    evaluate_social_gate(&GateInput {
        streak,
        days_inactive,
        strike_tier,
        brief_viewed_today,
        days_in_app,
    })
}

/// Whether posting to the crew feed is blocked. Requires an active streak.
pub fn check_crew_post_gate(streak: u32) -> bool {
    streak == 0
}

/// Days since onboarding, counting the start day as day 1.
pub fn days_in_app(started_on: NaiveDate, today: NaiveDate) -> u32 {
    let elapsed = (today - started_on).num_days();
    u32::try_from(elapsed + 1).unwrap_or(1).max(1)
}
