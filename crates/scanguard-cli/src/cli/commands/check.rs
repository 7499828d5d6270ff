//! `scanguard check` - validate scan targets.

use anyhow::Result;
use colored::Colorize;
use futures_util::future::join_all;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::education::Explain;
use crate::output::{CheckReport, OutputFormat};

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<ExitCode> {
    if ctx.explain && ctx.output_format != OutputFormat::Json {
        Explain::check(args.pin).print();
    }

    let validator = ctx.validator()?;
    let pin = args.pin;

    let checks = args.urls.iter().map(|url| {
        let validator = &validator;
        async move {
            let outcome = if pin {
                validator.validate_with_resolution(url).await
            } else {
                validator.validate(url).await
            };
            CheckReport::from_outcome(url, outcome)
        }
    });
    let mut reports = join_all(checks).await;

    if let Some(host_override) = &args.host_override {
        let report = match validator.validate_host_override(host_override).await {
            Ok(Some(host)) => CheckReport {
                target: host_override.clone(),
                allowed: true,
                resolved_ip: validator
                    .cached_resolution(&host_name(&host))
                    .map(|ip| ip.to_string()),
                hostname: Some(host),
                code: None,
                reason: None,
            },
            // Blank override: nothing to check.
            Ok(None) => CheckReport {
                target: host_override.clone(),
                allowed: true,
                resolved_ip: None,
                hostname: None,
                code: None,
                reason: None,
            },
            Err(rejection) => CheckReport::rejected(host_override, &rejection),
        };
        reports.push(report);
    }

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Pretty => print_reports(&reports, pin, ctx.verbose),
    }

    let rejected = reports.iter().filter(|r| !r.allowed).count();
    if rejected == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_reports(reports: &[CheckReport], pin: bool, verbose: bool) {
    for report in reports {
        if report.allowed {
            print!("{} {}", "ALLOW".green().bold(), report.target);
            if let Some(ip) = &report.resolved_ip {
                if pin || verbose {
                    print!(" {} {}", "->".dimmed(), ip.cyan());
                }
            }
            println!();
        } else {
            println!(
                "{} {} {}",
                "DENY ".red().bold(),
                report.target,
                format!("[{}]", report.code.unwrap_or("rejected")).yellow()
            );
            if let Some(reason) = &report.reason {
                println!("      {}", reason.dimmed());
            }
        }
    }

    let rejected = reports.iter().filter(|r| !r.allowed).count();
    if reports.len() > 1 {
        println!();
        println!(
            "{} {} checked, {} allowed, {} denied",
            "Summary:".bold(),
            reports.len(),
            reports.len() - rejected,
            rejected
        );
    }
}

/// Host part of a `host` or `host:port` override, as the cache keys it.
fn host_name(host_override: &str) -> String {
    if let Some(rest) = host_override.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest).to_lowercase();
    }
    match host_override.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host.to_lowercase(),
        _ => host_override.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_name_strips_port() {
        assert_eq!(host_name("API.example.com:8443"), "api.example.com");
        assert_eq!(host_name("example.com"), "example.com");
        assert_eq!(host_name("[::1]:8080"), "::1");
    }
}
