//! `scanguard config` - inspect the effective configuration.

use anyhow::Result;
use colored::Colorize;
use scanguard::DNS_CACHE_TTL;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::education::Explain;
use crate::output::OutputFormat;

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<ExitCode> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx)?,
        ConfigCommands::Path => show_path(&ctx),
    }
    Ok(ExitCode::SUCCESS)
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Pretty => {
            if ctx.explain {
                Explain::config().print();
            }

            let source = if ctx.config_path.exists() {
                ctx.config_path.display().to_string()
            } else {
                format!("{} (not found, using defaults)", ctx.config_path.display())
            };
            println!("{} {}", "Configuration:".bold(), source.dimmed());
            println!();

            let policy = &config.policy;
            println!("  {} {}", "allow_localhost:".bold(), flag(policy.allow_localhost));
            println!(
                "  {} {}",
                "allow_private_networks:".bold(),
                flag(policy.allow_private_networks)
            );
            print_patterns("whitelist:", &policy.whitelist, policy.whitelist_active());
            print_patterns("blacklist:", &policy.blacklist, true);
            println!();
            println!("  {} {:?}", "resolver.backend:".bold(), config.resolver.backend);
            println!("  {} {} ms", "resolver.timeout_ms:".bold(), config.resolver.timeout_ms);
            println!("  {} {} s", "dns_cache_ttl:".bold(), DNS_CACHE_TTL.as_secs());

            if ctx.verbose {
                println!();
                println!("{}", config.policy.to_string().dimmed());
            }
        }
    }

    Ok(())
}

fn show_path(ctx: &Context) {
    println!("{}", ctx.config_path.display());
}

fn flag(value: bool) -> String {
    if value {
        "true".yellow().to_string()
    } else {
        "false".green().to_string()
    }
}

fn print_patterns(label: &str, patterns: &[scanguard::HostPattern], active: bool) {
    if patterns.is_empty() || !active {
        println!("  {} {}", label.bold(), "(none)".dimmed());
        return;
    }
    println!("  {}", label.bold());
    for pattern in patterns.iter().filter(|p| !p.is_empty()) {
        println!("    - {pattern}");
    }
}
