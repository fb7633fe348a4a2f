//! Add a product to the cart.

use anyhow::{Context as _, Result};

use super::AddArgs;
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_store()?;

    let spinner = ctx.output.spinner(&format!("Adding product {}...", args.id));
    let result = session.store.add_product(args.id).await;
    spinner.finish_and_clear();

    session.flush_notices(&ctx.output);
    result.with_context(|| format!("Failed to add product {}", args.id))?;

    let amount = session.store.cart().amount_of(args.id).unwrap_or_default();
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product_id": args.id,
            "amount": amount,
            "distinct_items": session.store.cart().len(),
        }));
        return Ok(());
    }

    let title = session
        .store
        .cart()
        .get(args.id)
        .and_then(|item| item.title())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Product {}", args.id));
    ctx.output.success(&format!("{} (x{})", title, amount));
    ctx.output.kv("Items in cart", &session.store.cart().len().to_string());

    Ok(())
}
