#![forbid(unsafe_code)]

//! Theme picker demo.
//!
//! Builds a headless picker, applies the requested operations, and prints
//! the emitted notifications as JSON lines followed by the trigger label.

mod cli;

use std::io::{self, Write};
use std::process;
use std::sync::Arc;

use tpick::core::logging;
use tpick::{Catalog, LogConfig, LogFormat, OBSERVED_ATTRIBUTE, PickerConfig, ThemePicker};

fn main() {
    let opts = cli::Opts::parse();

    let mut log = LogConfig::from_env();
    if let Some(name) = &opts.log_format {
        match name.parse::<LogFormat>() {
            Ok(format) => log = log.with_format(format),
            Err(err) => {
                eprintln!("{err}");
                process::exit(1);
            }
        }
    }
    if let Err(err) = logging::init(&log) {
        eprintln!("logging disabled: {err}");
    }

    if let Err(err) = run(&opts) {
        tracing::error!(error = %err, "demo failed");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(opts: &cli::Opts) -> tpick::Result<()> {
    let catalog: Arc<Catalog> = match &opts.catalog {
        Some(path) => {
            let catalog = tpick::load_catalog(path)?;
            tracing::info!(path = %path.display(), themes = catalog.len(), "catalog loaded");
            Arc::new(catalog)
        }
        None => tpick::builtin(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if opts.list {
        for group in catalog.groups() {
            writeln!(out, "{} ({})", group.meta().name, group.key())?;
            for (key, theme) in group.themes() {
                writeln!(out, "  {:<24} {}", key.as_str(), theme.name)?;
            }
        }
        return Ok(());
    }

    let mut config = PickerConfig::from_env();
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    let mut picker = ThemePicker::with_config(catalog, config);
    picker.attach()?;

    if opts.more_info {
        picker.set_more_info(true);
    }
    if let Some(key) = &opts.select {
        picker.set_attribute(OBSERVED_ATTRIBUTE, key.as_str());
    }
    if opts.random {
        let key = picker.select_random();
        tracing::debug!(theme_key = ?key, "random selection");
    }

    for notification in picker.take_notifications() {
        let line = serde_json::json!({
            "event": notification.name,
            "bubbles": notification.bubbles,
            "composed": notification.composed,
            "detail": notification.detail,
        });
        writeln!(out, "{line}")?;
    }
    writeln!(out, "label: {}", picker.trigger_label().unwrap_or_default())?;
    if opts.markup {
        write!(out, "{}", picker.markup())?;
    }

    picker.detach();
    Ok(())
}
