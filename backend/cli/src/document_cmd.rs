//! Document commands: `insert`, `annotate`, `scan`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use tokio::sync::Mutex;
use tracing::info;

use orgocr_core::Document;
use orgocr_drawer::{
    find_image_links, has_drawer_after, insert_image_link, DrawerInserter, InsertOutcome,
    TextDocument,
};
use orgocr_engines::Backend;
use orgocr_hooks::{
    DrawerHook, HookPhase, HookPipeline, ImageInsertedPayload, LoggingHook, OcrLifecycle,
};

use crate::terminal_output::{note_info, note_success, note_warn};
use crate::Context;

fn inserter_for(ctx: &Context, document: &Path) -> Result<DrawerInserter> {
    let backend = Backend::from_settings(&ctx.settings)?;
    let mut inserter = DrawerInserter::new(Arc::new(backend));
    if let Some(dir) = document_dir(document) {
        inserter = inserter.with_base_dir(dir);
    }
    Ok(inserter)
}

/// Directory relative image links resolve against.
fn document_dir(document: &Path) -> Option<PathBuf> {
    document
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Insert `[[file:image]]` below `line` (1-based), then fire the image-inserted
/// hook so the drawer is written the same way an editor integration would.
pub async fn insert(
    ctx: &Context,
    document: &Path,
    line: usize,
    image: &str,
    ocr: bool,
) -> Result<()> {
    let doc = TextDocument::load(document).await?;
    let shared = Arc::new(Mutex::new(doc));

    let pipeline = HookPipeline::default();
    let logging = Arc::new(LoggingHook::new("orgocr"));
    pipeline.registry.register(HookPhase::ImageInserted, logging.clone()).await;
    pipeline.registry.register(HookPhase::DrawerInserted, logging).await;

    let hook = DrawerHook::new(shared.clone(), inserter_for(ctx, document)?);
    let mut lifecycle = OcrLifecycle::new(pipeline.registry.clone(), Arc::new(hook));
    if ocr {
        lifecycle.enable().await;
    }

    let anchor_line = {
        let mut doc = shared.lock().await;
        insert_image_link(&mut *doc, line - 1, image)
    };
    let result = pipeline
        .image_inserted(ImageInsertedPayload {
            image_path: PathBuf::from(image),
            anchor_line,
        })
        .await;
    lifecycle.disable().await;
    let result = result?;

    let doc = shared.lock().await;
    doc.save(document).await?;

    note_success(&format!("Inserted link at line {}", anchor_line + 1));
    match result.drawers.first() {
        Some(drawer) => note_success(&format!(
            "OCR drawer with {} line(s) at line {}",
            drawer.text_lines,
            drawer.drawer_line + 1
        )),
        None if ocr => note_warn(&format!("No OCR drawer written: {image} not found")),
        None => {}
    }
    Ok(())
}

/// Add a drawer below the image link on `line` (1-based).
pub async fn annotate(
    ctx: &Context,
    document: &Path,
    line: usize,
    image: Option<&Path>,
) -> Result<()> {
    let mut doc = TextDocument::load(document).await?;
    let anchor = line - 1;
    if anchor >= doc.line_count() {
        bail!("{} has only {} line(s)", document.display(), doc.line_count());
    }

    let image: PathBuf = match image {
        Some(path) => path.to_path_buf(),
        None => find_image_links(&doc)
            .into_iter()
            .find(|link| link.line == anchor)
            .map(|link| PathBuf::from(link.path))
            .with_context(|| format!("No image link on line {line}"))?,
    };

    let inserter = inserter_for(ctx, document)?;
    match inserter.insert_annotation(&mut doc, anchor, &image).await? {
        InsertOutcome::Inserted { text_lines, .. } => {
            doc.save(document).await?;
            note_success(&format!("OCR drawer with {text_lines} line(s) below line {line}"));
        }
        InsertOutcome::Skipped { image } => {
            note_warn(&format!("Image not found, nothing inserted: {}", image.display()));
        }
    }
    Ok(())
}

/// Annotate every image link that has no drawer yet, bottom-up so earlier
/// line numbers stay valid.
///
/// When an engine fails part-way, the drawers written so far are saved before
/// the error is returned.
pub async fn scan(ctx: &Context, document: &Path, dry_run: bool) -> Result<()> {
    let mut doc = TextDocument::load(document).await?;
    let pending: Vec<_> = find_image_links(&doc)
        .into_iter()
        .filter(|link| !has_drawer_after(&doc, link.line))
        .collect();

    if pending.is_empty() {
        note_info("Every image link already has an OCR drawer");
        return Ok(());
    }
    if dry_run {
        for link in &pending {
            println!("{}:{}: {}", document.display(), link.line + 1, link.path);
        }
        return Ok(());
    }

    let inserter = inserter_for(ctx, document)?;
    let mut inserted = 0usize;
    let mut skipped = 0usize;
    for link in pending.iter().rev() {
        let outcome = match inserter
            .insert_annotation(&mut doc, link.line, Path::new(&link.path))
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                if inserted > 0 {
                    doc.save(document).await?;
                    note_warn(&format!("Saved {inserted} drawer(s) written before the failure"));
                }
                return Err(e).with_context(|| {
                    format!("OCR failed for {} (line {})", link.path, link.line + 1)
                });
            }
        };
        match outcome {
            InsertOutcome::Inserted { .. } => inserted += 1,
            InsertOutcome::Skipped { image } => {
                skipped += 1;
                note_warn(&format!("Skipping missing image {}", image.display()));
            }
        }
    }

    if inserted > 0 {
        doc.save(document).await?;
    }
    info!(inserted, skipped, document = %document.display(), "Scan finished");
    note_success(&format!("Annotated {inserted} image(s), skipped {skipped}"));
    Ok(())
}
