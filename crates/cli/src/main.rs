//! CLI tool for adding generated speaker notes to presentations.

mod args;
mod progress;
mod repl;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use notes_ai::{GeminiClient, GeminiConfig};
use notes_core::{InputFile, SourceKind};
use notes_pdf::{PdfExtractor, PdfiumEngine, RenderOptions};
use notes_pipeline::{BoxedEngine, DocumentExtractor, Pipeline};
use progress::ProgressReporter;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = GeminiConfig::default()
        .with_api_key(args.api_key.clone())
        .with_model(args.model.clone())
        .with_endpoint(args.endpoint.clone());
    let client = GeminiClient::new(config).context("Failed to create Gemini client")?;
    log::debug!("Using model {}", client.config().model);
    if !client.has_credential() {
        log::warn!("GEMINI_API_KEY is not set; every slide will get placeholder notes");
    }

    let input = read_input(&args.input)?;
    let extractor = build_extractor(&args, input.kind());
    if let Some(kind) = input.kind() {
        if !extractor.supports(kind) {
            anyhow::bail!(
                "Cannot read {}: {} support needs the pdfium library (see --pdfium-lib)",
                args.input.display(),
                kind
            );
        }
    }

    let pipeline =
        Pipeline::new(extractor, client).with_observer(Arc::new(ProgressReporter::new()));

    if args.verbose {
        eprintln!("Processing: {}", args.input.display());
    }

    let count = pipeline
        .process(input)
        .await
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    if args.verbose {
        eprintln!("  Generated notes for {} slides", count);
    }

    if args.print {
        for slide in pipeline.slides() {
            repl::print_slide(&slide);
        }
    }

    let output_dir = args.output_dir();
    if args.no_review {
        let path = pipeline
            .export(&output_dir, args.output_name.as_deref())
            .await
            .context("Failed to export presentation")?;
        println!("Written to: {}", path.display());
    } else {
        repl::run_review(&pipeline, &output_dir).await?;
    }

    Ok(())
}

/// Archive extraction always works; PDF needs the pdfium library.
fn build_extractor(args: &Args, kind: Option<SourceKind>) -> DocumentExtractor {
    let extractor = DocumentExtractor::new();
    match PdfiumEngine::bind(args.pdfium_lib.as_deref()) {
        Ok(engine) => {
            let options = RenderOptions::default()
                .with_target_width(args.width)
                .with_jpeg_quality(args.jpeg_quality);
            let raster = PdfExtractor::new(Box::new(engine) as BoxedEngine).with_options(options);
            extractor.with_raster(raster)
        }
        Err(e) => {
            log::log!(bind_failure_level(kind), "PDF input disabled: {}", e);
            extractor
        }
    }
}

/// A missing pdfium only matters to the user when the input is a PDF.
fn bind_failure_level(kind: Option<SourceKind>) -> log::Level {
    match kind {
        Some(SourceKind::Pptx) => log::Level::Debug,
        _ => log::Level::Warn,
    }
}

/// Read a presentation from disk.
pub(crate) fn read_input(path: &Path) -> Result<InputFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    Ok(InputFile::sniffed(name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_failure_is_quiet_for_pptx_input() {
        assert_eq!(bind_failure_level(Some(SourceKind::Pptx)), log::Level::Debug);
        assert_eq!(bind_failure_level(Some(SourceKind::Pdf)), log::Level::Warn);
        assert_eq!(bind_failure_level(None), log::Level::Warn);
    }

    #[test]
    fn test_read_input_sniffs_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan");
        std::fs::write(&path, b"%PDF-1.7\n").unwrap();

        let input = read_input(&path).unwrap();
        assert_eq!(input.name, "scan");
        assert_eq!(input.kind(), Some(SourceKind::Pdf));
    }
}
