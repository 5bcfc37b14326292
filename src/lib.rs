pub mod analysis;
mod docx;
mod error;
pub mod merge;
mod model;
mod options;
pub mod report;
pub mod units;

pub use analysis::DocumentAnalysis;
pub use docx::ns;
pub use error::{Error, Result, SkipReason};
pub use merge::{MergedStyleEntry, MergedTextStyles, OrderedSet, merge_runs, merge_sources};
pub use model::*;
pub use options::AnalyzeOptions;

use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::time::Instant;

/// Analyzes the DOCX file at `path` with default options.
pub fn analyze(path: &Path) -> Result<DocumentSummary> {
    analyze_with_options(path, &AnalyzeOptions::default())
}

pub fn analyze_with_options(path: &Path, options: &AnalyzeOptions) -> Result<DocumentSummary> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    analyze_reader(file, options)
}

pub fn analyze_bytes(input: &[u8], options: &AnalyzeOptions) -> Result<DocumentSummary> {
    analyze_reader(Cursor::new(input), options)
}

/// Opens the archive, parses every eligible part, then runs the merge passes.
///
/// Only an unreadable or corrupt archive is an error. Parts or elements that cannot be
/// read are reported in [`DocumentSummary::diagnostics`].
pub fn analyze_reader<R: Read + Seek>(
    reader: R,
    options: &AnalyzeOptions,
) -> Result<DocumentSummary> {
    let t0 = Instant::now();

    let package = docx::open(reader, options)?;
    let part_count = package.parts.len();
    let mut summary = docx::parse_package(package, options);
    let t_parse = t0.elapsed();

    if options.merge_runs {
        for paragraph in &mut summary.paragraphs {
            paragraph.runs = merge_runs(&paragraph.runs);
        }
    }
    if options.merge_sources {
        summary.merged_text_styles = merge_sources(&summary.paragraphs, &summary.word_art);
    }
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, merge={:.1}ms, total={:.1}ms ({} parts)",
        t_parse.as_secs_f64() * 1000.0,
        (t_total - t_parse).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        part_count,
    );

    Ok(summary)
}
