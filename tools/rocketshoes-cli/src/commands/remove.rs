//! Remove a product from the cart.

use anyhow::{Context as _, Result};

use super::RemoveArgs;
use crate::context::Context;

/// Run the remove command.
pub async fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_store()?;

    let result = session.store.remove_product(args.id);
    session.flush_notices(&ctx.output);
    result.with_context(|| format!("Failed to remove product {}", args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product_id": args.id,
            "distinct_items": session.store.cart().len(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!("Removed product {}", args.id));
    ctx.output.kv("Items in cart", &session.store.cart().len().to_string());

    Ok(())
}
