use anyhow::Context;
use tracing::debug;

use crate::cli::Cli;
use crate::domain::models::{CheckReport, TrimReport};
use crate::engine;
use crate::rules;
use crate::services::config::{load_config, trim_settings};
use crate::services::output::{print_lines, print_one};
use crate::services::{source, storage};

pub fn handle_trim(cli: &Cli) -> anyhow::Result<()> {
    let loaded = load_config(&cli.config)?;
    let settings = trim_settings(&loaded.config)?;

    let (content, source) = source::read_input(
        &settings.input,
        settings.cache_dir.as_deref(),
        cli.timeout_ms,
    )?;

    let trimmed = engine::trim(&content, &settings.rules).context("failed to trim input data")?;
    debug!(
        bytes = trimmed.len(),
        preview = %source::preview(&trimmed),
        "done trimming input data"
    );

    storage::write_output(&settings.output, &trimmed)?;

    let report = TrimReport {
        config: loaded.path.to_string_lossy().to_string(),
        input: settings.input.clone(),
        source,
        output: settings.output.to_string_lossy().to_string(),
        rule_count: rules::count(&settings.rules),
        input_bytes: content.len(),
        output_bytes: trimmed.len(),
    };
    print_one(cli.json, report, |r| {
        format!("trimmed {} -> {} ({} bytes)", r.input, r.output, r.output_bytes)
    })
}

pub fn handle_check(cli: &Cli) -> anyhow::Result<()> {
    let loaded = load_config(&cli.config)?;
    let config = loaded.config;

    let cache_path = if config.cache.enabled {
        Some(storage::cache_dir(&config.cache.path)?.to_string_lossy().to_string())
    } else {
        None
    };

    let mut lines = vec![
        format!("config: {}", loaded.path.display()),
        format!("input: {}", config.input),
        format!("output: {}", config.output),
        format!("cache: {}", cache_path.as_deref().unwrap_or("disabled")),
        format!("rules: {}", rules::count(&config.include)),
    ];
    lines.extend(rules::outline(&config.include).into_iter().map(|l| format!("  {}", l)));

    let report = CheckReport {
        config: loaded.path.to_string_lossy().to_string(),
        input: config.input,
        output: config.output,
        cache_enabled: config.cache.enabled,
        cache_path,
        rule_count: rules::count(&config.include),
        rules: config.include,
    };
    print_lines(cli.json, report, &lines)
}
