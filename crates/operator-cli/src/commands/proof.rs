use clap::Subcommand;
use operator_core::{check_proof_triggers, proof_trigger_catalog, SnapshotStore, StreakRecord};
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum ProofAction {
    /// Detect the next proof trigger for a streak snapshot
    Check {
        /// Current streak
        #[arg(long, default_value_t = 0)]
        current: u32,
        /// Total days won
        #[arg(long, default_value_t = 0)]
        won: u32,
        /// Total days lost
        #[arg(long, default_value_t = 0)]
        lost: u32,
        /// Trigger ids that already fired
        #[arg(long, value_delimiter = ',')]
        fired: Vec<String>,
    },
    /// List every proof trigger in evaluation order
    Catalog,
}

pub fn run(action: ProofAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProofAction::Check {
            current,
            won,
            lost,
            fired,
        } => {
            let store = SnapshotStore::new(
                StreakRecord {
                    current,
                    total_days_won: won,
                    total_days_lost: lost,
                },
                fired,
            );
            let runtime = tokio::runtime::Builder::new_current_thread().build()?;
            let result = runtime.block_on(check_proof_triggers(&store));
            print_json(&result)?;
        }
        ProofAction::Catalog => {
            let catalog: Vec<_> = proof_trigger_catalog()
                .iter()
                .map(|rule| {
                    json!({
                        "triggerId": rule.id,
                        "triggerType": rule.trigger_type,
                        "triggerLabel": rule.label,
                    })
                })
                .collect();
            print_json(&catalog)?;
        }
    }
    Ok(())
}
