//! Show the cart.

use anyhow::{Context as _, Result};

use crate::context::Context;
use crate::output::{format_price, truncate};

const WIDTHS: [usize; 5] = [6, 36, 6, 12, 12];

/// Run the show command.
pub async fn run(ctx: &Context) -> Result<()> {
    let session = ctx.open_store()?;
    let cart = session.store.cart();
    let summary = session
        .store
        .summary()
        .context("Failed to compute cart totals")?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart,
            "summary": summary,
            "total_formatted": summary.total.display(),
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", summary.distinct_items));

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"], &WIDTHS);
    for (item, line) in cart.items().iter().zip(&summary.lines) {
        let id = item.id.to_string();
        let title = truncate(item.title().unwrap_or("-"), WIDTHS[1]);
        let amount = item.amount.to_string();
        let price = format_price(line.unit_price);
        let subtotal = format_price(line.subtotal);
        ctx.output.table_row(
            &[
                id.as_str(),
                title.as_str(),
                amount.as_str(),
                price.as_str(),
                subtotal.as_str(),
            ],
            &WIDTHS,
        );
    }

    println!();
    ctx.output.kv("Units", &summary.total_units.to_string());
    ctx.output.kv("Total", &summary.total.display());
    if !summary.fully_priced() {
        ctx.output.warn("Some products have no price and are left out of the total");
    }

    Ok(())
}
