//! `orgocr config show|init|validate`.

use anyhow::{bail, Context as _, Result};
use clap::Subcommand;

use orgocr_config::{apply_all_defaults, validate, write_config, OrgOcrConfig};

use crate::terminal_output::{note_error, note_info, note_success, note_warn};
use crate::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective config (file, env overrides and defaults merged)
    Show,
    /// Write a config file populated with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate the effective config
    Validate,
}

pub async fn run(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            note_info(&format!("Config file: {}", ctx.config_path.display()));
            let yaml = serde_yaml::to_string(&ctx.config).context("Failed to serialize config")?;
            print!("{yaml}");
            Ok(())
        }
        ConfigAction::Init { force } => {
            if ctx.config_path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    ctx.config_path.display()
                );
            }
            let config = apply_all_defaults(OrgOcrConfig::default());
            write_config(&config, &ctx.config_path).await?;
            note_success(&format!("Wrote {}", ctx.config_path.display()));
            Ok(())
        }
        ConfigAction::Validate => {
            let report = validate(&ctx.config);
            for warning in &report.warnings {
                note_warn(&format!("{}: {}", warning.path, warning.message));
            }
            for error in &report.errors {
                note_error(&format!("{}: {}", error.path, error.message));
            }
            if !report.is_valid() {
                bail!("Config has {} error(s)", report.errors.len());
            }
            note_success("Config is valid");
            Ok(())
        }
    }
}
