//! Human-readable rendering of a deployment plan.

use comfy_table::Table;
use mintbox_deploy::Orchestrator;

/// Render the plan selected by an orchestrator: its deployments and wiring.
pub fn render_plan(orchestrator: &Orchestrator) -> String {
    let config = orchestrator.config();
    let plan = orchestrator.plan();

    let mut steps = Table::new();
    steps.set_header(vec!["#", "Contract", "Constructor arguments", "Gas"]);

    for (i, step) in plan.steps().iter().enumerate() {
        let args = step
            .args
            .iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let gas = if step.bounded_gas {
            config.gas_limit.to_string()
        } else {
            "estimated".to_string()
        };

        steps.add_row(vec![
            (i + 1).to_string(),
            step.contract.to_string(),
            args,
            gas,
        ]);
    }

    let mut out = format!("Network:        {}\n", config.network);
    out.push_str(&format!("Registry:       {}\n", orchestrator.registry()));
    out.push_str(&format!("External token: {}\n", config.external_token_address));
    out.push_str(&format!("Plan:           {plan}\n\n{steps}\n"));

    match plan.wiring() {
        None => out.push_str("\nNo wiring.\n"),
        Some(wiring) => {
            if wiring.transfer_ownership {
                out.push_str("\nTransfer Collectible ownership to LootBox.\n");
            }
            let registrations = config.rarity_registrations();
            if registrations.is_empty() {
                out.push_str("No token ids to register.\n");
            }
            for (rarity, token_ids) in registrations {
                out.push_str(&format!(
                    "Register {} token ids for rarity {rarity}.\n",
                    token_ids.len()
                ));
            }
        }
    }

    out
}
