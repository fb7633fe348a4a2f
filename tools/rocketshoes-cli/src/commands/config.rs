//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, base_url } => init_config(force, &base_url, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    if let Some(timeout) = config.api.timeout_ms {
        ctx.output.kv("timeout_ms", &timeout.to_string());
    }
    ctx.output.kv("max_retries", &config.api.max_retries.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());
    ctx.output.kv("key", &config.storage.key);

    ctx.output.info("[cart]");
    ctx.output
        .kv("add_stock_rule", &format!("{:?}", config.cart.add_stock_rule));
    ctx.output.kv("currency", config.cart.currency.code());

    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level.to_string());
    ctx.output.kv("format", &format!("{:?}", config.logging.format));
    if let Some(filter) = &config.logging.filter {
        ctx.output.kv("filter", filter);
    }

    Ok(())
}

fn init_config(force: bool, base_url: &str, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("rocketshoes.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(base_url))
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
