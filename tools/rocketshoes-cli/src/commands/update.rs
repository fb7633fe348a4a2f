//! Set a product's amount.

use anyhow::{Context as _, Result};
use rocketshoes_store::UpdateProductAmount;

use super::UpdateArgs;
use crate::context::Context;

/// Run the update command.
pub async fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_store()?;

    if args.amount <= 0 {
        ctx.output.warn("Amount must be at least 1; cart left unchanged");
    }

    let spinner = ctx.output.spinner("Checking stock...");
    let result = session
        .store
        .update_product_amount(UpdateProductAmount {
            product_id: args.id,
            amount: args.amount,
        })
        .await;
    spinner.finish_and_clear();

    session.flush_notices(&ctx.output);
    result.with_context(|| format!("Failed to update product {}", args.id))?;

    let amount = session.store.cart().amount_of(args.id);
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product_id": args.id,
            "amount": amount,
        }));
        return Ok(());
    }

    match amount {
        Some(amount) => ctx
            .output
            .success(&format!("Product {} amount: {}", args.id, amount)),
        None => ctx
            .output
            .info(&format!("Product {} is not in the cart", args.id)),
    }

    Ok(())
}
