use clap::Subcommand;
use operator_core::{
    calculate_escalation_tier, strike_reason_display, tier_config, EscalationTier, STRIKE_RULES,
};
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum StrikesAction {
    /// Tier for a number of active strikes
    Tier {
        /// Active strike count
        count: u32,
    },
    /// Restrictions and display data for a tier
    Config {
        /// green, yellow, orange or red
        tier: EscalationTier,
    },
    /// Icon and label for a strike reason code
    Reason {
        /// Reason code (e.g. "daily_loss")
        code: String,
    },
    /// Point values for every strike reason
    Rules,
}

pub fn run(action: StrikesAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StrikesAction::Tier { count } => {
            let tier = calculate_escalation_tier(count);
            print_json(&json!({
                "activeStrikes": count,
                "tier": tier,
                "config": tier_config(tier),
            }))?;
        }
        StrikesAction::Config { tier } => {
            print_json(tier_config(tier))?;
        }
        StrikesAction::Reason { code } => {
            print_json(&strike_reason_display(&code))?;
        }
        StrikesAction::Rules => {
            print_json(&STRIKE_RULES)?;
        }
    }
    Ok(())
}
