//! `orgocr ocr` and `orgocr install-script`.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use orgocr_engines::{ensure_script_installed, run_ocr as recognize, EASYOCR_SCRIPT};

use crate::terminal_output::note_success;
use crate::Context;

/// Recognize `image` with the configured backend and print the text verbatim.
pub async fn run_ocr(ctx: &Context, image: &Path) -> Result<()> {
    if !image.is_file() {
        bail!("Image not found: {}", image.display());
    }
    let text = recognize(&ctx.settings.backend, image, &ctx.settings).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Write the easyocr helper into the script directory unless it is already there.
pub async fn install_script(ctx: &Context) -> Result<()> {
    let path = ensure_script_installed(
        &ctx.settings.easyocr_command,
        &ctx.settings.script_dir,
        EASYOCR_SCRIPT,
    )
    .await?;
    note_success(&format!("easyocr helper at {}", path.display()));
    println!("{}", path.display());
    Ok(())
}
