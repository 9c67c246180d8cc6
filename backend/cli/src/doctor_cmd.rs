//! CLI Doctor Command
//!
//! Checks that the configured engines can actually be started.

use anyhow::Result;
use orgocr_config::validate;
use orgocr_core::BackendKind;

use crate::Context;

/// Executes the full doctor diagnosis.
pub async fn run(ctx: &Context) -> Result<()> {
    println!("\n🔍 Running orgocr doctor...\n");

    let config_ok = check_config(ctx);
    let engines_ok = check_engines(ctx);

    println!();
    if config_ok && engines_ok {
        println!("✅ All checks passed! The selected backend is ready.");
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
    }

    Ok(())
}

fn check_config(ctx: &Context) -> bool {
    println!("Checking Config ({}):", ctx.config_path.display());
    if !ctx.config_path.exists() {
        println!("  🟡 No config file, using defaults (run `orgocr config init`)");
    }

    let report = validate(&ctx.config);
    for warning in &report.warnings {
        println!("  🟡 {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  🔴 {}: {}", error.path, error.message);
    }
    if report.is_valid() {
        println!("  🟢 Config is valid");
    }
    report.is_valid()
}

fn check_engines(ctx: &Context) -> bool {
    println!("Checking OCR Engines:");
    let settings = &ctx.settings;

    let selected = match settings.backend_kind() {
        Ok(kind) => {
            println!("  🟢 Selected backend: {kind}");
            Some(kind)
        }
        Err(e) => {
            println!("  🔴 {e}");
            None
        }
    };

    let mut all_good = selected.is_some();
    for kind in BackendKind::ALL {
        let required = selected == Some(kind);
        let found = match kind {
            BackendKind::Tesseract => report_command(&settings.tesseract_command, required),
            BackendKind::EasyOcr => report_easyocr(ctx, required),
        };
        all_good &= found || !required;
    }
    all_good
}

fn report_command(command: &str, required: bool) -> bool {
    match which::which(command) {
        Ok(path) => {
            println!("  🟢 {} found at {}", command, path.display());
            true
        }
        Err(_) if required => {
            println!("  🔴 {} not found on PATH (REQUIRED)", command);
            false
        }
        Err(_) => {
            println!("  🟡 {} not found on PATH (optional)", command);
            false
        }
    }
}

fn report_easyocr(ctx: &Context, required: bool) -> bool {
    let settings = &ctx.settings;
    let mut ok = true;

    if let Some(env) = &settings.easyocr_env {
        ok &= report_command(&settings.env_runner, required);
        println!("  ⚪ easyocr runs inside environment '{env}'");
    }

    if which::which(&settings.easyocr_command).is_ok() {
        ok &= report_command(&settings.easyocr_command, required);
    } else {
        let script = orgocr_core::expand_home(&settings.script_dir)
            .join(&settings.easyocr_command);
        if script.is_file() {
            println!("  🟢 easyocr helper installed at {}", script.display());
        } else {
            println!(
                "  🟡 easyocr helper will be installed to {} on first use",
                script.display()
            );
        }
    }
    ok
}
