//! Educational features: explanations of what each check does.

use colored::Colorize;

/// Command explanation builder.
pub struct Explain {
    description: String,
    what_happens: Vec<String>,
    rejections: Vec<(&'static str, &'static str)>,
    note: Option<String>,
}

impl Explain {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            what_happens: Vec::new(),
            rejections: Vec::new(),
            note: None,
        }
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn rejects(mut self, code: &'static str, meaning: &'static str) -> Self {
        self.rejections.push((code, meaning));
        self
    }

    fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    /// Print the explanation to stdout.
    pub fn print(&self) {
        println!();
        println!("{}", "=== What This Does ===".bold().cyan());
        println!("{}", self.description);
        println!();

        if !self.what_happens.is_empty() {
            println!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!();
        }

        if !self.rejections.is_empty() {
            println!("{}", "Rejection codes:".bold());
            for (code, meaning) in &self.rejections {
                println!("  {:<28} {}", code.yellow(), meaning);
            }
            println!();
        }

        if let Some(note) = &self.note {
            println!("{} {}", "Note:".bold(), note.dimmed());
        }

        println!();
        println!("{}", "=== Results ===".bold().cyan());
        println!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn check(pin: bool) -> Self {
        let explain = Self::new(
            "Decides whether a scanner may connect to each URL, before any request is sent.",
        )
        .step("Parses the URL; only http and https are accepted")
        .step("If a whitelist is configured, the host must match it and nothing else is checked")
        .step("Refuses localhost names unless allow_localhost is set")
        .step("Refuses hosts matching a blacklist pattern")
        .step("Resolves the host name (IP literals are used as-is)")
        .step("Pins the first address so the scanner connects to what was checked")
        .step("Refuses private, loopback and link-local addresses")
        .rejects("invalid_format", "URL could not be parsed or has no host")
        .rejects("disallowed_protocol", "scheme other than http/https")
        .rejects("not_whitelisted", "host outside the configured whitelist")
        .rejects("localhost_disallowed", "localhost by name")
        .rejects("blacklisted", "host matched a blacklist pattern")
        .rejects("unresolvable_host", "DNS failed or timed out")
        .rejects("private_network_disallowed", "RFC 1918, ULA or site-local address")
        .rejects("loopback_disallowed", "127.0.0.0/8 or ::1")
        .rejects("link_local_disallowed", "169.254.0.0/16 or fe80::/10");

        if pin {
            explain.note(
                "--pin reuses a pinned address for up to 60 seconds, defeating DNS rebinding \
                 between the check and the connection.",
            )
        } else {
            explain.note("Add --pin to see the address a scanner should connect to.")
        }
    }

    pub fn config() -> Self {
        Self::new("Shows the configuration the validator would run with.")
            .step("Reads the TOML config file, if it exists")
            .step("Applies SCANGUARD_* environment variable overrides")
            .note("Wildcards in whitelist/blacklist patterns match any run of characters.")
    }
}
