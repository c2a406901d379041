//! # Operator Standard Core Library
//!
//! This library provides the behavioral-state engine behind the Operator
//! Standard accountability tracker. Every decision the app makes about a
//! user's standing lives here; screens and storage sit on top of it.
//!
//! ## Architecture
//!
//! - **Escalation**: active strikes map to a severity tier with restrictions
//! - **Social Gate**: an ordered rule list decides if social features are blocked
//! - **Night Reflection**: scores the day and previews streak and life score
//! - **Proof Triggers**: detects one-time milestones from an async store
//!
//! The evaluators are stateless and never call each other. Callers compute
//! the tier with [`calculate_escalation_tier`] and hand it to
//! [`check_social_gate`].
//!
//! ## Key Components
//!
//! - [`EscalationTier`]: Severity band for accumulated strikes
//! - [`GateResult`]: Social gate decision with a typed reason
//! - [`DayResult`]: Scored outcome of a day's tasks
//! - [`ProofStore`]: Async store contract read by [`check_proof_triggers`]
//! - [`Config`]: Application configuration management

pub mod error;
pub mod escalation;
pub mod gate;
pub mod proof;
pub mod reflection;
pub mod storage;

pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use escalation::{
    calculate_escalation_tier, strike_reason_display, strike_rule, tier_config, EscalationTier,
    StrikeReason, StrikeReasonDisplay, StrikeRule, StrikeSeverity, TierConfig, STRIKE_RULES,
};
pub use gate::{
    check_crew_post_gate, check_social_gate, days_in_app, evaluate_social_gate,
    social_gate_rule_names, GateInput, GateReason, GateResult,
};
pub use proof::{
    check_proof_triggers, evaluate_proof_triggers, proof_trigger_catalog, FiredTrigger, ProofRule,
    ProofStore, ProofTriggerResult, ProofTriggerType, SnapshotStore, StreakRecord,
};
pub use reflection::{
    calculate_day_result, calculate_life_score_preview, calculate_streak_impact, evaluate_night,
    miss_reason_options, reflection_prompt, reflection_prompt_for, Completable, DayOutcome,
    DayResult, LifeScorePreview, NightReport, StreakDirection, StreakImpact, Task,
};
pub use storage::Config;
