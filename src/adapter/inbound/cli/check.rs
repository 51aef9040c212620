//! Handler for the `check` command.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::dispatch::TriggerPolicy;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::sink::SinkKind;
use crate::infrastructure::resources::load_classifier;

/// Validate the configuration file and severity resources without starting.
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Configuration");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    let classifier = load_classifier(&config.severity)?;
    output::section("Severity");
    output::field("Tiers", classifier.thresholds().len());
    output::field("Corpus lines", classifier.corpus().len());
    output::field("Slice size", classifier.slice_size());
    if classifier.corpus().len() < classifier.thresholds().len() {
        output::warning("Corpus has fewer lines than tiers; high tiers share the last line");
    } else {
        output::success("Severity resources are valid");
    }

    output::section("Dispatch");
    let trigger = match config.dispatch.trigger {
        TriggerPolicy::Reactive => "reactive".to_string(),
        TriggerPolicy::Periodic => format!("every {}s", config.dispatch.interval_secs),
    };
    output::field("Trigger", trigger);
    output::field("Sink", config.effective_sink().as_str());
    output::field("Dry run", config.dry_run);

    match config.effective_sink() {
        SinkKind::Log => {}
        SinkKind::Twitter => credential("TWITTER_ACCESS_TOKEN"),
        SinkKind::Telegram => {
            credential("TELEGRAM_BOT_TOKEN");
            credential("TELEGRAM_CHAT_ID");
        }
    }

    output::section("Chain");
    if config.chain.rpc_url.is_empty() {
        output::warning("RPC_URL not set");
    } else {
        output::field("RPC", &config.chain.rpc_url);
    }
    output::field("ABI", format!("{:?}", config.chain.abi_version).to_lowercase());
    if config.chain.markets.is_empty() {
        match &config.chain.manager_address {
            Some(manager) => output::field("Manager", manager),
            None => output::warning("Neither markets nor manager_address configured"),
        }
    } else {
        output::field("Markets", config.chain.markets.len());
    }

    Ok(())
}

fn credential(var: &str) {
    if std::env::var(var).is_ok_and(|value| !value.trim().is_empty()) {
        output::success(&format!("{var} present"));
    } else {
        output::warning(&format!("{var} missing"));
    }
}
