//! DrawingML / w14 color, fill, outline and effect decoding.
//!
//! Text effects use the same local names in the `a:` and `w14:` namespaces
//! (`w14:glow` vs `a:glow`, `w14:val` vs `val`), so lookups here go by local name.

use crate::model::{
    Bevel, Color, ColorModifier, EffectBundle, Extrusion, Fill, Glow, GradientStop, Outline,
    Reflection, Shadow, SoftEdge,
};
use crate::units::{angle_to_deg, emu_to_pt, percent_to_ratio};

use super::{attr_local, child_local, descendant_local};

const COLOR_NODES: &[&str] = &["srgbClr", "schemeClr", "sysClr", "prstClr", "hslClr", "scrgbClr"];
const FILL_NODES: &[&str] = &["solidFill", "gradFill", "pattFill", "noFill"];

fn is_color_node(node: roxmltree::Node) -> bool {
    node.is_element() && COLOR_NODES.contains(&node.tag_name().name())
}

/// First color child (direct) of `node`.
fn color_child<'a>(node: roxmltree::Node<'a, 'a>) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_color_node(*n))
}

/// First color node anywhere below `node`.
fn color_below<'a>(node: roxmltree::Node<'a, 'a>) -> Option<roxmltree::Node<'a, 'a>> {
    node.descendants().skip(1).find(|n| is_color_node(*n))
}

pub(super) fn parse_color(node: roxmltree::Node) -> Option<Color> {
    let kind = node.tag_name().name();
    let val = attr_local(node, "val");
    match kind {
        "srgbClr" => {
            let hex = val.filter(|v| !v.is_empty())?;
            Some(Color::Rgb {
                value: format!("#{}", hex.to_ascii_uppercase()),
            })
        }
        "schemeClr" => Some(Color::Scheme {
            scheme: val.map(str::to_string),
            modifiers: node
                .children()
                .filter(|n| n.is_element())
                .map(|m| ColorModifier {
                    name: m.tag_name().name().to_string(),
                    value: attr_local(m, "val").map(str::to_string),
                })
                .collect(),
        }),
        "sysClr" => Some(Color::Other {
            kind: kind.to_string(),
            value: attr_local(node, "lastClr").or(val).map(str::to_string),
        }),
        _ => Some(Color::Other {
            kind: kind.to_string(),
            value: val.map(str::to_string),
        }),
    }
}

fn parse_fill_node(node: roxmltree::Node) -> Option<Fill> {
    match node.tag_name().name() {
        "solidFill" => Some(Fill::Solid {
            color: color_child(node).and_then(parse_color),
        }),
        "gradFill" => {
            let stops = descendant_local(node, "gsLst")
                .map(|lst| {
                    lst.children()
                        .filter(|n| n.tag_name().name() == "gs")
                        .map(|gs| GradientStop {
                            position: attr_local(gs, "pos").and_then(percent_to_ratio),
                            color: color_child(gs).and_then(parse_color),
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(Fill::Gradient {
                stops,
                linear_angle_deg: child_local(node, "lin")
                    .and_then(|lin| attr_local(lin, "ang"))
                    .and_then(angle_to_deg),
                path: child_local(node, "path")
                    .and_then(|p| attr_local(p, "path"))
                    .map(str::to_string),
            })
        }
        "pattFill" => {
            let side = |name: &str| {
                child_local(node, name)
                    .and_then(color_child)
                    .and_then(parse_color)
            };
            Some(Fill::Pattern {
                preset: attr_local(node, "prst").map(str::to_string),
                foreground: side("fgClr"),
                background: side("bgClr"),
            })
        }
        "noFill" => Some(Fill::NoFill),
        _ => None,
    }
}

/// Fill declared directly on `container` (`a:spPr`, `a:rPr`, `a:ln`, `w14:textFill`, ...).
pub(super) fn interpret_fill(container: roxmltree::Node) -> Option<Fill> {
    if FILL_NODES.contains(&container.tag_name().name()) {
        return parse_fill_node(container);
    }
    container
        .children()
        .find(|n| FILL_NODES.contains(&n.tag_name().name()))
        .and_then(parse_fill_node)
}

/// `a:ln` or `w14:textOutline`.
pub(super) fn interpret_outline(ln: roxmltree::Node) -> Outline {
    Outline {
        width_pt: attr_local(ln, "w").and_then(emu_to_pt),
        cap: attr_local(ln, "cap").map(str::to_string),
        compound: attr_local(ln, "cmpd").map(str::to_string),
        alignment: attr_local(ln, "algn").map(str::to_string),
        dash: child_local(ln, "prstDash")
            .and_then(|d| attr_local(d, "val"))
            .map(str::to_string),
        fill: interpret_fill(ln),
    }
}

/// `outerShdw`, `innerShdw`, `prstShdw` or `w14:shadow`.
pub(super) fn interpret_shadow(node: roxmltree::Node) -> Shadow {
    Shadow {
        outer: node.tag_name().name() != "innerShdw",
        distance_pt: attr_local(node, "dist").and_then(emu_to_pt),
        blur_pt: attr_local(node, "blurRad").and_then(emu_to_pt),
        direction_deg: attr_local(node, "dir").and_then(angle_to_deg),
        alignment: attr_local(node, "algn").map(str::to_string),
        color: color_below(node).and_then(parse_color),
    }
}

pub(super) fn interpret_glow(node: roxmltree::Node) -> Glow {
    Glow {
        radius_pt: attr_local(node, "rad").and_then(emu_to_pt),
        color: color_below(node).and_then(parse_color),
    }
}

pub(super) fn interpret_reflection(node: roxmltree::Node) -> Reflection {
    Reflection {
        distance_pt: attr_local(node, "dist").and_then(emu_to_pt),
        blur_pt: attr_local(node, "blurRad").and_then(emu_to_pt),
        start_alpha: attr_local(node, "stA").and_then(percent_to_ratio),
        end_alpha: attr_local(node, "endA").and_then(percent_to_ratio),
        scale_x: attr_local(node, "sx").and_then(percent_to_ratio),
        scale_y: attr_local(node, "sy").and_then(percent_to_ratio),
    }
}

pub(super) fn interpret_soft_edge(node: roxmltree::Node) -> SoftEdge {
    SoftEdge {
        radius_pt: attr_local(node, "rad").and_then(emu_to_pt),
    }
}

/// `a:sp3d` or `w14:props3d`.
pub(super) fn interpret_3d(node: roxmltree::Node) -> Extrusion {
    let bevel = |name: &str| {
        child_local(node, name).map(|b| Bevel {
            width_pt: attr_local(b, "w").and_then(emu_to_pt),
            height_pt: attr_local(b, "h").and_then(emu_to_pt),
        })
    };
    let side_color = |name: &str| {
        child_local(node, name)
            .and_then(color_child)
            .and_then(parse_color)
    };
    Extrusion {
        bevel_top: bevel("bevelT"),
        bevel_bottom: bevel("bevelB"),
        extrusion_height_pt: attr_local(node, "extrusionH").and_then(emu_to_pt),
        contour_width_pt: attr_local(node, "contourW").and_then(emu_to_pt),
        extrusion_color: side_color("extrusionClr"),
        contour_color: side_color("contourClr"),
        material: attr_local(node, "prstMaterial").map(str::to_string),
    }
}

/// Collects the first occurrence of every effect found below `scope`.
///
/// Fill is only read from property containers, so a fill nested inside an outline
/// or glow is never taken for the body fill.
pub(super) fn interpret_effects(scope: roxmltree::Node) -> EffectBundle {
    let mut bundle = EffectBundle::default();
    for node in scope.descendants() {
        if !node.is_element() {
            continue;
        }
        match node.tag_name().name() {
            "prstTxWarp" if bundle.warp.is_none() => {
                bundle.warp = attr_local(node, "prst")
                    .filter(|p| *p != "textNoShape")
                    .map(str::to_string);
            }
            "spPr" | "rPr" | "defRPr" | "textFill" | "textEffect" if bundle.fill.is_none() => {
                bundle.fill = interpret_fill(node);
            }
            "ln" | "textOutline" if bundle.outline.is_none() => {
                bundle.outline = Some(interpret_outline(node));
            }
            "outerShdw" | "innerShdw" | "prstShdw" | "shadow" if bundle.shadow.is_none() => {
                bundle.shadow = Some(interpret_shadow(node));
            }
            "glow" if bundle.glow.is_none() => bundle.glow = Some(interpret_glow(node)),
            "reflection" if bundle.reflection.is_none() => {
                bundle.reflection = Some(interpret_reflection(node));
            }
            "softEdge" if bundle.soft_edge.is_none() => {
                bundle.soft_edge = Some(interpret_soft_edge(node));
            }
            "sp3d" | "props3d" if bundle.extrusion.is_none() => {
                bundle.extrusion = Some(interpret_3d(node));
            }
            _ => {}
        }
    }
    bundle
}
