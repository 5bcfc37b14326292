//! WordArt detection in its three encodings.
//!
//! [`scan`] finds every carrier in a part once. The same list drives both the
//! WordArt records and the paragraph parser's exclusion check, so a paragraph is
//! reported either as text or as WordArt, never both.

use crate::error::SkipReason;
use crate::model::{
    Diagnostic, DiagnosticKind, EffectBundle, Fill, WordArtElement, WordArtKind, WordArtStyle,
};
use crate::units::{css_length_to_pt, half_points_to_pt, hundredths_to_pt};

use super::effects::interpret_effects;
use super::paragraph::{owned_runs, paragraph_text, parse_style};
use super::{
    DML, VML, W14, WML, attr_local, descendant, elements, hex_color, nearest_paragraph,
    parse_geometry, parse_position, qname, w_attr,
};

pub(super) enum CarrierKind {
    /// `w14:textEffect`, one per paragraph.
    Modern,
    /// `w:drawing` with a text warp, or a decorated text box.
    Intermediate { text_box: bool, effects: EffectBundle },
    /// `v:shape` with a `v:textpath`.
    Legacy,
}

pub(super) struct Carrier<'a> {
    pub node: roxmltree::Node<'a, 'a>,
    pub owner: Option<roxmltree::Node<'a, 'a>>,
    pub kind: CarrierKind,
}

pub(super) struct Carriers<'a> {
    items: Vec<Carrier<'a>>,
}

impl<'a> Carriers<'a> {
    /// A paragraph that owns a carrier marker, or sits inside a carrier, is WordArt.
    pub fn excludes(&self, paragraph: roxmltree::Node<'a, 'a>) -> bool {
        self.items.iter().any(|c| {
            c.owner == Some(paragraph) || paragraph.ancestors().skip(1).any(|a| a == c.node)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Carrier<'a>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Finds every WordArt carrier below `root`, in document order.
///
/// A carrier nested inside another carrier (a text effect inside a warped text box)
/// belongs to the outer one and is dropped.
pub(super) fn scan<'a>(root: roxmltree::Node<'a, 'a>) -> Carriers<'a> {
    let mut items: Vec<Carrier<'a>> = Vec::new();

    for te in elements(root, W14, "textEffect") {
        let Some(owner) = nearest_paragraph(te) else {
            log::debug!("Ignoring {} outside any paragraph", qname(te));
            continue;
        };
        if items.iter().any(|c| c.owner == Some(owner)) {
            continue;
        }
        items.push(Carrier {
            node: te,
            owner: Some(owner),
            kind: CarrierKind::Modern,
        });
    }

    for drawing in elements(root, WML, "drawing") {
        let has_warp = descendant(drawing, DML, "prstTxWarp")
            .is_some_and(|w| w.attribute("prst") != Some("textNoShape"));
        let text_box = descendant(drawing, WML, "txbxContent").is_some();
        if !has_warp && !text_box {
            continue;
        }
        let effects = interpret_effects(drawing);
        // Without a warp only a decorated box with visible text reads as WordArt.
        if !has_warp && (!effects.is_decorative() || drawing_text(drawing).is_empty()) {
            continue;
        }
        items.push(Carrier {
            node: drawing,
            owner: nearest_paragraph(drawing),
            kind: CarrierKind::Intermediate { text_box, effects },
        });
    }

    for shape in elements(root, VML, "shape") {
        if descendant(shape, VML, "textpath").is_none() {
            continue;
        }
        items.push(Carrier {
            node: shape,
            owner: nearest_paragraph(shape),
            kind: CarrierKind::Legacy,
        });
    }

    let nested: Vec<bool> = items
        .iter()
        .map(|c| {
            c.node
                .ancestors()
                .skip(1)
                .any(|a| items.iter().any(|outer| outer.node == a))
        })
        .collect();
    let mut items: Vec<Carrier<'a>> = items
        .into_iter()
        .zip(nested)
        .filter_map(|(c, nested)| (!nested).then_some(c))
        .collect();
    items.sort_by_key(|c| c.node.range().start);

    Carriers { items }
}

/// Builds one [`WordArtElement`] per carrier. Elements that cannot be extracted are
/// reported as `ElementSkipped` and do not consume an index.
pub(super) fn parse_word_art(
    source: &str,
    carriers: &Carriers,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<WordArtElement> {
    let mut out = Vec::with_capacity(carriers.len());
    for carrier in carriers.iter() {
        let parsed = match &carrier.kind {
            CarrierKind::Modern => Ok(parse_modern(carrier)),
            CarrierKind::Intermediate { text_box, effects } => {
                Ok(parse_intermediate(carrier.node, *text_box, effects.clone()))
            }
            CarrierKind::Legacy => parse_legacy(carrier.node),
        };
        match parsed {
            Ok((text, style, kind)) => {
                let element = WordArtElement {
                    source: source.to_string(),
                    index: out.len() + 1,
                    text,
                    style,
                    kind,
                };
                log::debug!(
                    "{source}: WordArt #{} ({:?}) {:?}",
                    element.index,
                    element.era(),
                    element.text
                );
                out.push(element);
            }
            Err(reason) => {
                log::warn!("{source}: skipping {}: {reason}", qname(carrier.node));
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::ElementSkipped,
                    source: Some(source.to_string()),
                    message: format!("WordArt skipped: {reason}"),
                });
            }
        }
    }
    out
}

type Parsed = (String, WordArtStyle, WordArtKind);

fn fill_rgb(effects: &EffectBundle) -> Option<String> {
    effects
        .fill
        .as_ref()
        .and_then(Fill::solid_rgb)
        .map(str::to_string)
}

fn outline_rgb(effects: &EffectBundle) -> Option<String> {
    effects
        .outline
        .as_ref()
        .and_then(|o| o.rgb())
        .map(str::to_string)
}

fn parse_modern(carrier: &Carrier) -> Parsed {
    let te = carrier.node;
    let text = carrier.owner.map(paragraph_text).unwrap_or_default();

    // Sibling w14 effects in the same w:rPr belong to the marker.
    let scope = te
        .parent_element()
        .filter(|p| super::is_wml(*p, "rPr"))
        .unwrap_or(te);
    let effects = interpret_effects(scope);

    let run_style = te
        .ancestors()
        .find(|a| super::is_wml(*a, "r"))
        .or_else(|| carrier.owner.and_then(|p| owned_runs(p).next()))
        .map(|r| parse_style(super::wml(r, "rPr")))
        .unwrap_or_default();

    let kern_raw = attr_local(te, "kern").map(str::to_string);
    let style = WordArtStyle {
        font: attr_local(te, "font")
            .map(str::to_string)
            .or_else(|| run_style.fonts.primary().map(str::to_string)),
        size_pt: attr_local(te, "fontSize")
            .and_then(half_points_to_pt)
            .or(run_style.size_pt),
        fill_color: attr_local(te, "fillColor")
            .or_else(|| attr_local(te, "color"))
            .and_then(hex_color)
            .or_else(|| fill_rgb(&effects)),
        outline_color: outline_rgb(&effects),
        kerning_pt: kern_raw.as_deref().and_then(hundredths_to_pt),
        kern_raw,
    };

    let kind = WordArtKind::ModernTextEffect {
        variant: attr_local(te, "val").map(str::to_string),
        effects,
    };
    (text, style, kind)
}

/// Text of a warped shape or text box: `w:t` inside the text box content, or the
/// DrawingML `a:t` runs when there is no WordprocessingML body.
fn drawing_text(drawing: roxmltree::Node) -> String {
    let collect = |ns: &str| -> String {
        drawing
            .descendants()
            .filter(|n| super::is_element(*n, ns, "t") && !super::in_fallback(*n))
            .filter_map(|n| n.text())
            .collect()
    };
    let text = collect(WML);
    if text.trim().is_empty() {
        collect(DML).trim().to_string()
    } else {
        text.trim().to_string()
    }
}

fn parse_intermediate(drawing: roxmltree::Node, text_box: bool, effects: EffectBundle) -> Parsed {
    let txbx = descendant(drawing, WML, "txbxContent");
    let in_box = |name: &str| txbx.and_then(|b| descendant(b, WML, name));

    let font = in_box("rFonts")
        .and_then(|f| w_attr(f, "ascii").or_else(|| w_attr(f, "hAnsi")))
        .or_else(|| descendant(drawing, DML, "latin").and_then(|l| l.attribute("typeface")))
        .map(str::to_string);

    let size_pt = in_box("sz")
        .and_then(|s| w_attr(s, "val"))
        .and_then(half_points_to_pt)
        .or_else(|| {
            drawing
                .descendants()
                .filter(|n| {
                    super::is_element(*n, DML, "rPr") || super::is_element(*n, DML, "defRPr")
                })
                .find_map(|n| n.attribute("sz"))
                .and_then(hundredths_to_pt)
        });

    let style = WordArtStyle {
        font,
        size_pt,
        fill_color: in_box("color")
            .and_then(|c| w_attr(c, "val"))
            .and_then(hex_color)
            .or_else(|| fill_rgb(&effects)),
        outline_color: outline_rgb(&effects),
        kerning_pt: None,
        kern_raw: None,
    };

    let kind = WordArtKind::IntermediateDrawing {
        text_box,
        geometry: parse_geometry(drawing),
        position: parse_position(drawing),
        effects,
    };
    (drawing_text(drawing), style, kind)
}

/// Splits a CSS-like `key:value;key:value` attribute into trimmed pairs.
pub(super) fn css_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

/// VML colors come as `#rrggbb`, `#rgb [index]` or a color name.
pub(super) fn vml_color(raw: &str) -> Option<String> {
    let value = raw.split_whitespace().next()?;
    if value.starts_with('#') {
        hex_color(value)
    } else {
        Some(value.to_string())
    }
}

fn parse_legacy(shape: roxmltree::Node) -> Result<Parsed, SkipReason> {
    let textpath = descendant(shape, VML, "textpath").ok_or(SkipReason::MissingTextPathString)?;
    let text = textpath
        .attribute("string")
        .ok_or(SkipReason::MissingTextPathString)?
        .to_string();

    let decls = css_declarations(textpath.attribute("style").unwrap_or(""));
    let lookup = |key: &str| {
        decls
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let style = WordArtStyle {
        font: lookup("font-family")
            .map(|f| f.trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|f| !f.is_empty()),
        size_pt: lookup("font-size").and_then(css_length_to_pt),
        fill_color: shape.attribute("fillcolor").and_then(vml_color),
        outline_color: shape.attribute("strokecolor").and_then(vml_color),
        kerning_pt: None,
        kern_raw: None,
    };

    let kind = WordArtKind::LegacyVector {
        shape_type: shape.attribute("type").map(str::to_string),
    };
    Ok((text, style, kind))
}
