use crate::model::{
    Alignment, FontSlots, Indentation, Measure, NumberingRef, Paragraph, ParagraphProperties,
    ParagraphSpacing, Run, Style, TabAlignment, TabLeader, TabStop,
};
use crate::units::{half_points_to_pt, pt_to_cm, round_to, twips_to_cm, twips_to_pt};

use super::drawing::Carriers;
use super::{
    WML, elements, hex_color, in_fallback, is_wml, nearest_paragraph, w_attr, wml, wml_attr,
    wml_bool,
};

/// All paragraphs of a part that are not WordArt carriers, in document order.
pub(super) fn parse_paragraphs<'a>(
    source: &str,
    root: roxmltree::Node<'a, 'a>,
    carriers: &Carriers<'a>,
) -> Vec<Paragraph> {
    elements(root, WML, "p")
        .enumerate()
        .filter(|(_, p)| !carriers.excludes(*p))
        .map(|(i, p)| {
            let runs: Vec<Run> = owned_runs(p)
                .map(|r| Run {
                    text: run_text(r),
                    style: parse_style(wml(r, "rPr")),
                })
                .collect();
            Paragraph {
                source: source.to_string(),
                index: i + 1,
                text: runs.iter().map(|r| r.text.as_str()).collect(),
                runs,
                properties: wml(p, "pPr")
                    .map(parse_paragraph_properties)
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// Runs whose nearest paragraph is `p`. Runs of nested text-box paragraphs and of
/// `mc:Fallback` renditions are not included.
pub(super) fn owned_runs<'a>(
    p: roxmltree::Node<'a, 'a>,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> {
    p.descendants().filter(move |r| {
        is_wml(*r, "r") && !in_fallback(*r) && nearest_paragraph(*r) == Some(p)
    })
}

pub(super) fn run_text(run: roxmltree::Node) -> String {
    let mut text = String::new();
    for child in run.children().filter(|n| n.tag_name().namespace() == Some(WML)) {
        match child.tag_name().name() {
            "t" => text.push_str(child.text().unwrap_or("")),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
    text
}

pub(super) fn paragraph_text(p: roxmltree::Node) -> String {
    owned_runs(p).map(run_text).collect()
}

/// Direct run formatting. `None` yields the empty style.
pub(super) fn parse_style(rpr: Option<roxmltree::Node>) -> Style {
    let Some(rpr) = rpr else {
        return Style::default();
    };

    let fonts = wml(rpr, "rFonts")
        .map(|f| {
            let slot = |name: &str| w_attr(f, name).map(str::to_string);
            FontSlots {
                ascii: slot("ascii"),
                east_asia: slot("eastAsia"),
                complex_script: slot("cs"),
                high_ansi: slot("hAnsi"),
            }
        })
        .unwrap_or_default();

    Style {
        style_name: wml_attr(rpr, "rStyle").map(str::to_string),
        fonts,
        size_pt: wml_attr(rpr, "sz").and_then(half_points_to_pt),
        bold: wml_bool(rpr, "b").unwrap_or(false),
        italic: wml_bool(rpr, "i").unwrap_or(false),
        underline: wml_bool(rpr, "u").unwrap_or(false),
        strike: wml_bool(rpr, "strike").unwrap_or(false),
        color: wml_attr(rpr, "color").and_then(hex_color),
        background_color: wml(rpr, "shd")
            .and_then(|s| w_attr(s, "fill"))
            .and_then(hex_color),
        spacing_cm: wml_attr(rpr, "spacing").and_then(twips_to_cm),
    }
}

fn measure(node: roxmltree::Node, attr: &str) -> Option<Measure> {
    w_attr(node, attr).map(|raw| Measure {
        raw: raw.to_string(),
        cm: twips_to_cm(raw),
    })
}

fn on_off(node: roxmltree::Node, attr: &str) -> bool {
    matches!(w_attr(node, attr), Some("1" | "true" | "on"))
}

fn parse_spacing(sp: roxmltree::Node) -> ParagraphSpacing {
    let line_rule = w_attr(sp, "lineRule").map(str::to_string);
    let proportional = line_rule.as_deref().is_none_or(|r| r == "auto");
    // Auto spacing stores the line height in 240ths of a line.
    let line_multiple = if proportional {
        w_attr(sp, "line")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .map(|v| round_to(v / 240.0, 2))
    } else {
        None
    };
    ParagraphSpacing {
        before: measure(sp, "before"),
        after: measure(sp, "after"),
        line: if proportional { None } else { measure(sp, "line") },
        line_rule,
        line_multiple,
        before_auto: on_off(sp, "beforeAutospacing"),
        after_auto: on_off(sp, "afterAutospacing"),
    }
}

fn parse_indentation(ind: roxmltree::Node) -> Indentation {
    Indentation {
        left: measure(ind, "left").or_else(|| measure(ind, "start")),
        right: measure(ind, "right").or_else(|| measure(ind, "end")),
        first_line: measure(ind, "firstLine"),
        hanging: measure(ind, "hanging"),
    }
}

fn parse_tab_stops(ppr: roxmltree::Node) -> Vec<TabStop> {
    let Some(tabs) = wml(ppr, "tabs") else {
        return vec![];
    };
    let mut stops: Vec<TabStop> = tabs
        .children()
        .filter(|n| is_wml(*n, "tab"))
        .filter_map(|n| {
            let position_pt = w_attr(n, "pos").and_then(twips_to_pt)?;
            let alignment = match w_attr(n, "val").unwrap_or("left") {
                "center" => TabAlignment::Center,
                "right" | "end" => TabAlignment::Right,
                "decimal" => TabAlignment::Decimal,
                "bar" => TabAlignment::Bar,
                "clear" => TabAlignment::Clear,
                _ => TabAlignment::Left,
            };
            let leader = match w_attr(n, "leader") {
                Some("dot") => TabLeader::Dot,
                Some("hyphen") => TabLeader::Hyphen,
                Some("underscore") => TabLeader::Underscore,
                Some("heavy") => TabLeader::Heavy,
                Some("middleDot") => TabLeader::MiddleDot,
                _ => TabLeader::None,
            };
            Some(TabStop {
                position_pt,
                position_cm: pt_to_cm(position_pt),
                alignment,
                leader,
            })
        })
        .collect();
    stops.sort_by(|a, b| a.position_pt.total_cmp(&b.position_pt));
    stops
}

pub(super) fn parse_paragraph_properties(ppr: roxmltree::Node) -> ParagraphProperties {
    let alignment = wml_attr(ppr, "jc").and_then(|jc| match jc {
        "left" | "start" => Some(Alignment::Left),
        "center" => Some(Alignment::Center),
        "right" | "end" => Some(Alignment::Right),
        "both" | "justify" => Some(Alignment::Justify),
        "distribute" => Some(Alignment::Distribute),
        _ => None,
    });

    let numbering = wml(ppr, "numPr").map(|num| NumberingRef {
        num_id: wml_attr(num, "numId").map(str::to_string),
        level: wml_attr(num, "ilvl").and_then(|l| l.parse::<u8>().ok()),
    });

    ParagraphProperties {
        style_name: wml_attr(ppr, "pStyle").map(str::to_string),
        alignment,
        spacing: wml(ppr, "spacing").map(parse_spacing),
        indent: wml(ppr, "ind").map(parse_indentation),
        tab_stops: parse_tab_stops(ppr),
        numbering,
    }
}
