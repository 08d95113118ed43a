use crate::output::{print_fields, print_json};
use anyhow::Context;
use clap::Subcommand;
use natal_core::config::{Config, WarnLevel};
use natal_core::{io, paths};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a default .natal/config.yaml (kept if one exists)
    Init {
        /// Overwrite an existing config with defaults
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Init { force } => init(root, force, json),
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(root: &Path, force: bool, json: bool) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    let written = if force {
        Config::default().save(root).context("failed to write config")?;
        true
    } else {
        let data = Config::default().to_yaml()?;
        io::write_if_missing(&path, data.as_bytes()).context("failed to write config")?
    };
    tracing::info!(path = %path.display(), written, "config init");

    if json {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "written": written,
        }))?;
    } else if written {
        println!("Wrote {}", path.display());
    } else {
        println!("Config already exists at {} (use --force to reset)", path.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let source = if paths::config_path(root).exists() {
        paths::config_path(root).display().to_string()
    } else {
        "(defaults)".to_string()
    };

    if json {
        print_json(&serde_json::json!({ "source": source, "config": config }))?;
        return Ok(());
    }

    let v = &config.validation;
    print_fields(&[
        ("Source", source),
        ("Version", config.version.to_string()),
        ("Min birth date", v.min_birth_date.to_string()),
        ("Max name length", v.max_display_name.to_string()),
        (
            "Location length",
            format!("{}-{}", v.min_location, v.max_location),
        ),
        ("JSON output", config.output.json.to_string()),
    ]);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
