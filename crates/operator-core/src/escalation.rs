//! Strike escalation - maps accumulated strikes to a severity tier.
//!
//! ## Tiers
//!
//! - **Green**: 0-1 active strikes, no restrictions
//! - **Yellow**: 2-3 active strikes
//! - **Orange**: 4-5 active strikes
//! - **Red**: 6+ active strikes, critical intervention
//!
//! Tiers are recomputed from the strike count on every read and never
//! persisted. Strike accumulation itself lives outside this crate; the
//! [`STRIKE_RULES`] table is the data it consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Escalation tier, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationTier {
    Green,
    Yellow,
    Orange,
    Red,
}

impl EscalationTier {
    pub const ALL: [EscalationTier; 4] = [
        EscalationTier::Green,
        EscalationTier::Yellow,
        EscalationTier::Orange,
        EscalationTier::Red,
    ];

    /// Numeric severity (0-3)
    pub fn as_u8(self) -> u8 {
        match self {
            EscalationTier::Green => 0,
            EscalationTier::Yellow => 1,
            EscalationTier::Orange => 2,
            EscalationTier::Red => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EscalationTier::Green => "green",
            EscalationTier::Yellow => "yellow",
            EscalationTier::Orange => "orange",
            EscalationTier::Red => "red",
        }
    }

    /// Static display and restriction metadata for this tier.
    pub fn config(self) -> &'static TierConfig {
        tier_config(self)
    }
}

impl fmt::Display for EscalationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EscalationTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(EscalationTier::Green),
            "yellow" => Ok(EscalationTier::Yellow),
            "orange" => Ok(EscalationTier::Orange),
            "red" => Ok(EscalationTier::Red),
            other => Err(ValidationError::invalid(
                "tier",
                format!("unknown tier '{other}' (expected green, yellow, orange or red)"),
            )),
        }
    }
}

/// Compute the escalation tier for a number of active strikes.
pub fn calculate_escalation_tier(active_strikes: u32) -> EscalationTier {
    match active_strikes {
        0..=1 => EscalationTier::Green,
        2..=3 => EscalationTier::Yellow,
        4..=5 => EscalationTier::Orange,
        _ => EscalationTier::Red,
    }
}

/// Display and restriction metadata attached to a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierConfig {
    /// Hex color
    pub color: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Restrictions in display order
    pub restrictions: &'static [&'static str],
}

static GREEN: TierConfig = TierConfig {
    color: "#22C55E",
    label: "Operational",
    description: "Standard held. No restrictions in effect.",
    restrictions: &[],
};

static YELLOW: TierConfig = TierConfig {
    color: "#EAB308",
    label: "Warning",
    description: "Strikes are accumulating. Tighten execution.",
    restrictions: &["Night reflection required before social access"],
};

static ORANGE: TierConfig = TierConfig {
    color: "#F97316",
    label: "Probation",
    description: "Pattern of misses detected. Privileges are being reduced.",
    restrictions: &[
        "Night reflection required before social access",
        "Crew posting disabled",
    ],
};

static RED: TierConfig = TierConfig {
    color: "#EF4444",
    label: "Critical",
    description: "Standard broken. Social features locked until strikes clear.",
    restrictions: &[
        "Social feed locked",
        "Crew posting disabled",
        "Operator Mode session required daily",
    ],
};

/// Look up the static config for a tier.
pub fn tier_config(tier: EscalationTier) -> &'static TierConfig {
    match tier {
        EscalationTier::Green => &GREEN,
        EscalationTier::Yellow => &YELLOW,
        EscalationTier::Orange => &ORANGE,
        EscalationTier::Red => &RED,
    }
}

/// Reason a strike was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeReason {
    DailyLoss,
    CriticalTaskMissed,
    PatternFailure,
    ReflectionSkipped,
    OperatorModeExit,
    StreakBroken,
}

impl StrikeReason {
    pub fn code(self) -> &'static str {
        match self {
            StrikeReason::DailyLoss => "daily_loss",
            StrikeReason::CriticalTaskMissed => "critical_task_missed",
            StrikeReason::PatternFailure => "pattern_failure",
            StrikeReason::ReflectionSkipped => "reflection_skipped",
            StrikeReason::OperatorModeExit => "operator_mode_exit",
            StrikeReason::StreakBroken => "streak_broken",
        }
    }

    fn display(self) -> StrikeReasonDisplay {
        let (icon, label) = match self {
            StrikeReason::DailyLoss => ("calendar-x", "Daily loss"),
            StrikeReason::CriticalTaskMissed => ("alert-triangle", "Critical task missed"),
            StrikeReason::PatternFailure => ("repeat", "Pattern failure"),
            StrikeReason::ReflectionSkipped => ("moon", "Reflection skipped"),
            StrikeReason::OperatorModeExit => ("log-out", "Left Operator Mode early"),
            StrikeReason::StreakBroken => ("flame-off", "Streak broken"),
        };
        StrikeReasonDisplay {
            icon: icon.to_string(),
            label: label.to_string(),
        }
    }
}

impl FromStr for StrikeReason {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STRIKE_RULES
            .iter()
            .map(|rule| rule.reason)
            .find(|reason| reason.code() == s)
            .ok_or_else(|| {
                ValidationError::invalid("reason", format!("unknown strike reason '{s}'"))
            })
    }
}

/// Icon and label for rendering a strike reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeReasonDisplay {
    pub icon: String,
    pub label: String,
}

const FALLBACK_ICON: &str = "alert-circle";

/// Display info for a raw reason code.
///
/// Unknown codes get a generic icon and echo the code as the label, so
/// there is always something to render.
pub fn strike_reason_display(reason: &str) -> StrikeReasonDisplay {
    match reason.parse::<StrikeReason>() {
        Ok(known) => known.display(),
        Err(_) => StrikeReasonDisplay {
            icon: FALLBACK_ICON.to_string(),
            label: reason.to_string(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrikeSeverity {
    Minor,
    Standard,
    Major,
}

/// How much a strike reason weighs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrikeRule {
    pub reason: StrikeReason,
    pub severity: StrikeSeverity,
    /// Always 1 or 2
    pub points: u8,
}

pub static STRIKE_RULES: [StrikeRule; 6] = [
    StrikeRule {
        reason: StrikeReason::DailyLoss,
        severity: StrikeSeverity::Standard,
        points: 1,
    },
    StrikeRule {
        reason: StrikeReason::CriticalTaskMissed,
        severity: StrikeSeverity::Major,
        points: 2,
    },
    StrikeRule {
        reason: StrikeReason::PatternFailure,
        severity: StrikeSeverity::Major,
        points: 2,
    },
    StrikeRule {
        reason: StrikeReason::ReflectionSkipped,
        severity: StrikeSeverity::Minor,
        points: 1,
    },
    StrikeRule {
        reason: StrikeReason::OperatorModeExit,
        severity: StrikeSeverity::Standard,
        points: 1,
    },
    StrikeRule {
        reason: StrikeReason::StreakBroken,
        severity: StrikeSeverity::Major,
        points: 2,
    },
];

pub fn strike_rule(reason: StrikeReason) -> &'static StrikeRule {
    let index = match reason {
        StrikeReason::DailyLoss => 0,
        StrikeReason::CriticalTaskMissed => 1,
        StrikeReason::PatternFailure => 2,
        StrikeReason::ReflectionSkipped => 3,
        StrikeReason::OperatorModeExit => 4,
        StrikeReason::StreakBroken => 5,
    };
    &STRIKE_RULES[index]
}
