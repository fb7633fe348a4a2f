//! Empty the cart.

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub async fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_store()?;

    let ids: Vec<_> = session.store.cart().items().iter().map(|i| i.id).collect();
    if ids.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} product(s) from the cart?", ids.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    let mut failed = 0;
    for id in &ids {
        if let Err(e) = session.store.remove_product(*id) {
            ctx.output.debug(&format!("Product {}: {}", id, e));
            failed += 1;
        }
    }
    session.flush_notices(&ctx.output);

    if failed > 0 {
        bail!("Failed to remove {} of {} product(s)", failed, ids.len());
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "removed": ids }));
    } else {
        ctx.output.success(&format!("Removed {} product(s)", ids.len()));
    }

    Ok(())
}
