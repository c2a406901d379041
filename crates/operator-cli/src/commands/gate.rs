use chrono::Local;
use clap::Subcommand;
use operator_core::{check_crew_post_gate, check_social_gate, Config, EscalationTier};
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum GateAction {
    /// Check whether social features are gated
    Social {
        /// Current streak
        #[arg(long, default_value_t = 0)]
        streak: u32,
        /// Days since last activity
        #[arg(long, default_value_t = 0)]
        days_inactive: u32,
        /// Escalation tier
        #[arg(long, default_value = "green")]
        tier: EscalationTier,
        /// Whether today's brief has been viewed
        #[arg(long)]
        brief_viewed: bool,
        /// Days since onboarding (defaults to profile.started_on)
        #[arg(long)]
        days_in_app: Option<u32>,
    },
    /// Check whether crew posting is blocked
    Crew {
        /// Current streak
        streak: u32,
    },
}

pub fn run(action: GateAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GateAction::Social {
            streak,
            days_inactive,
            tier,
            brief_viewed,
            days_in_app,
        } => {
            let days_in_app = days_in_app
                .or_else(|| config.days_in_app(Local::now().date_naive()))
                .ok_or("--days-in-app is required when profile.started_on is not configured")?;
            let result = check_social_gate(streak, days_inactive, tier, brief_viewed, days_in_app);
            print_json(&result)?;
        }
        GateAction::Crew { streak } => {
            print_json(&json!({ "blocked": check_crew_post_gate(streak) }))?;
        }
    }
    Ok(())
}
