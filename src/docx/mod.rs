mod drawing;
mod effects;
mod image;
pub mod ns;
mod paragraph;
mod table;

use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::model::{AxisPosition, Diagnostic, DiagnosticKind, DocumentSummary, Geometry, Position};
use crate::options::AnalyzeOptions;
use crate::units::{angle_to_deg, emu_to_cm, percent_to_ratio};

pub(super) use ns::{DML, MC, PIC, REL, VML, W14, WML, WPD};

/// One eligible XML part, read fully out of the archive.
pub(crate) struct Part {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The eligible parts of a verified archive, in archive order.
pub(crate) struct Package {
    pub parts: Vec<Part>,
    pub diagnostics: Vec<Diagnostic>,
}

// ---- shared XML lookups ----

pub(super) fn is_element(node: roxmltree::Node, namespace: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(namespace)
}

pub(super) fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    is_element(node, WML, name)
}

pub(super) fn child<'a>(
    node: roxmltree::Node<'a, 'a>,
    namespace: &str,
    name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_element(*n, namespace, name))
}

pub(super) fn descendant<'a>(
    node: roxmltree::Node<'a, 'a>,
    namespace: &str,
    name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.descendants()
        .skip(1)
        .find(|n| is_element(*n, namespace, name) && !in_fallback(*n))
}

pub(super) fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    child(node, WML, name)
}

pub(super) fn w_attr<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<&'a str> {
    node.attribute((WML, name))
}

/// `w:val` of the child element `child`.
pub(super) fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| w_attr(n, "val"))
}

/// Parse a WML boolean toggle element (e.g., w:b, w:i, w:strike).
/// Present with no val or val != "0"/"false"/"none" means true.
pub(super) fn wml_bool(parent: roxmltree::Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| {
        w_attr(n, "val").is_none_or(|v| v != "0" && v != "false" && v != "none")
    })
}

/// Attribute lookup by local name, whatever the prefix (`val`, `w14:val`, ...).
pub(super) fn attr_local<'a>(node: roxmltree::Node<'a, 'a>, local: &str) -> Option<&'a str> {
    node.attributes()
        .find(|a| a.name() == local)
        .map(|a| a.value())
}

pub(super) fn child_local<'a>(
    node: roxmltree::Node<'a, 'a>,
    local: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == local)
}

pub(super) fn descendant_local<'a>(
    node: roxmltree::Node<'a, 'a>,
    local: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == local)
}

/// Whether `node` sits under `mc:Fallback`. Those subtrees repeat the `mc:Choice`
/// content in an older markup and are never read.
pub(super) fn in_fallback(node: roxmltree::Node) -> bool {
    node.ancestors().any(|a| is_element(a, MC, "Fallback"))
}

/// Elements named `namespace:name` below `root`, in document order, outside fallbacks.
pub(super) fn elements<'a>(
    root: roxmltree::Node<'a, 'a>,
    namespace: &'static str,
    name: &'static str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> {
    root.descendants()
        .filter(move |n| is_element(*n, namespace, name) && !in_fallback(*n))
}

/// Closest `w:p` strictly above `node`.
pub(super) fn nearest_paragraph<'a>(node: roxmltree::Node<'a, 'a>) -> Option<roxmltree::Node<'a, 'a>> {
    node.ancestors().skip(1).find(|a| is_wml(*a, "p"))
}

/// Flatten SDT wrappers: descend into w:sdtContent and collect effective children.
pub(super) fn collect_block_nodes<'a>(parent: roxmltree::Node<'a, 'a>) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if is_wml(child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else if child.is_element() {
            nodes.push(child);
        }
    }
    nodes
}

/// `prefix:local` for log messages.
pub(super) fn qname(node: roxmltree::Node) -> String {
    let tag = node.tag_name();
    match tag.namespace().and_then(ns::prefix) {
        Some(prefix) => format!("{prefix}:{}", tag.name()),
        None => tag.name().to_string(),
    }
}

/// `#RRGGBB` from a WML color value; `auto` and empty values are absent.
pub(super) fn hex_color(val: &str) -> Option<String> {
    let val = val.trim().trim_start_matches('#');
    if val.is_empty() || val.eq_ignore_ascii_case("auto") {
        return None;
    }
    Some(format!("#{}", val.to_ascii_uppercase()))
}

// ---- drawing frame (wp:inline / wp:anchor), shared by WordArt and images ----

/// The `wp:inline` or `wp:anchor` directly under a `w:drawing`.
pub(super) fn drawing_frame<'a>(drawing: roxmltree::Node<'a, 'a>) -> Option<roxmltree::Node<'a, 'a>> {
    drawing
        .children()
        .find(|n| is_element(*n, WPD, "inline") || is_element(*n, WPD, "anchor"))
}

pub(super) fn parse_geometry(drawing: roxmltree::Node) -> Geometry {
    let extent = descendant(drawing, WPD, "extent");
    let xfrm = descendant(drawing, DML, "xfrm");
    Geometry {
        width_cm: extent.and_then(|n| n.attribute("cx")).and_then(emu_to_cm),
        height_cm: extent.and_then(|n| n.attribute("cy")).and_then(emu_to_cm),
        rotation_deg: xfrm.and_then(|n| n.attribute("rot")).and_then(angle_to_deg),
        scale_x: xfrm.and_then(|n| n.attribute("sx")).and_then(percent_to_ratio),
        scale_y: xfrm.and_then(|n| n.attribute("sy")).and_then(percent_to_ratio),
    }
}

fn parse_axis(container: roxmltree::Node, name: &str) -> AxisPosition {
    let Some(pos) = child(container, WPD, name) else {
        return AxisPosition::default();
    };
    AxisPosition {
        relative_from: pos.attribute("relativeFrom").map(str::to_string),
        align: child(pos, WPD, "align")
            .and_then(|n| n.text())
            .map(|t| t.trim().to_string()),
        offset_cm: child(pos, WPD, "posOffset")
            .and_then(|n| n.text())
            .and_then(|t| emu_to_cm(t.trim())),
    }
}

pub(super) fn parse_position(drawing: roxmltree::Node) -> Position {
    let Some(frame) = drawing_frame(drawing) else {
        return Position::default();
    };
    Position {
        anchored: frame.tag_name().name() == "anchor",
        horizontal: parse_axis(frame, "positionH"),
        vertical: parse_axis(frame, "positionV"),
        relative_height: frame.attribute("relativeHeight").map(str::to_string),
    }
}

// ---- assembler ----

fn invalid_archive(e: impl std::fmt::Display) -> Error {
    Error::InvalidArchive(e.to_string())
}

/// Upper bound on the buffer reserved up front for a part.
const INITIAL_PART_CAPACITY: u64 = 1 << 20;

/// Opens the archive, verifies every entry and reads the eligible parts.
///
/// Every entry is decompressed to the end so its CRC is checked, whether or not it is
/// analyzed. Any failure there rejects the whole archive.
pub(crate) fn open<R: Read + Seek>(reader: R, options: &AnalyzeOptions) -> Result<Package> {
    let mut zip = zip::ZipArchive::new(reader)
        .map_err(|e| Error::InvalidArchive(format!("file is not a ZIP archive: {e}")))?;

    let mut parts = Vec::new();
    let mut diagnostics = Vec::new();

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(invalid_archive)?;
        let name = entry.name().to_string();
        if entry.is_dir() {
            continue;
        }

        let wanted = options.is_eligible(&name);
        if wanted && entry.size() > options.max_part_size {
            log::warn!("Skipping {name}: {} bytes exceeds the part size limit", entry.size());
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::PartParseFailure,
                source: Some(name.clone()),
                message: format!(
                    "part is {} bytes, larger than the {} byte limit",
                    entry.size(),
                    options.max_part_size
                ),
            });
        }

        if wanted && entry.size() <= options.max_part_size {
            // The declared size is untrusted until the CRC check passes.
            let mut bytes = Vec::with_capacity(entry.size().min(INITIAL_PART_CAPACITY) as usize);
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| Error::InvalidArchive(format!("{name}: {e}")))?;
            parts.push(Part { name, bytes });
        } else {
            std::io::copy(&mut entry, &mut std::io::sink())
                .map_err(|e| Error::InvalidArchive(format!("{name}: {e}")))?;
        }
    }

    Ok(Package { parts, diagnostics })
}

/// Runs the content parsers over every part. The merge passes are left to the caller.
pub(crate) fn parse_package(package: Package, options: &AnalyzeOptions) -> DocumentSummary {
    let mut summary = DocumentSummary {
        diagnostics: package.diagnostics,
        ..Default::default()
    };

    for part in &package.parts {
        let xml = match std::str::from_utf8(&part.bytes) {
            Ok(xml) => xml,
            Err(e) => {
                part_failure(&mut summary, &part.name, format!("part is not valid UTF-8: {e}"));
                continue;
            }
        };
        let doc = match roxmltree::Document::parse(xml) {
            Ok(doc) => doc,
            Err(e) => {
                part_failure(&mut summary, &part.name, format!("XML parse error: {e}"));
                continue;
            }
        };
        log::debug!("Parsing part {}", part.name);
        parse_part(&part.name, doc.root_element(), options, &mut summary);
    }

    summary
}

fn part_failure(summary: &mut DocumentSummary, source: &str, message: String) {
    log::warn!("Skipping {source}: {message}");
    summary.diagnostics.push(Diagnostic {
        kind: DiagnosticKind::PartParseFailure,
        source: Some(source.to_string()),
        message,
    });
}

fn parse_part<'a>(
    source: &str,
    root: roxmltree::Node<'a, 'a>,
    options: &AnalyzeOptions,
    summary: &mut DocumentSummary,
) {
    let carriers = drawing::scan(root);

    summary
        .paragraphs
        .extend(paragraph::parse_paragraphs(source, root, &carriers));
    summary
        .word_art
        .extend(drawing::parse_word_art(source, &carriers, &mut summary.diagnostics));

    if options.tables {
        let tables = table::parse_tables(source, root);
        if !tables.is_empty() {
            log::info!("{source}: {} tables detected", tables.len());
            summary
                .diagnostics
                .push(Diagnostic::info(source, format!("{} tables detected", tables.len())));
        }
        summary.tables.extend(tables);
    }

    if options.images {
        let images = image::parse_images(source, root, &mut summary.diagnostics);
        if !images.is_empty() {
            log::info!("{source}: {} images detected", images.len());
            summary
                .diagnostics
                .push(Diagnostic::info(source, format!("{} images detected", images.len())));
        }
        summary.images.extend(images);
    }
}
