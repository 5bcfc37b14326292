use crate::model::{
    Border, CellProperties, ConditionalFormatting, Run, Table, TableBorders, TableCell,
    TableFeature, TableProperties, TableStats,
};
use crate::units::{eighth_points_to_pt, fiftieths_to_percent, round_to, twips_to_pt};

use super::paragraph::{owned_runs, paragraph_text, parse_style, run_text};
use super::{
    WML, collect_block_nodes, elements, hex_color, in_fallback, is_wml, w_attr, wml, wml_attr,
};

/// Every table in the part, nested tables included as their own entries.
pub(super) fn parse_tables(source: &str, root: roxmltree::Node) -> Vec<Table> {
    let mut tables = Vec::new();
    for tbl in elements(root, WML, "tbl") {
        let Some(table) = parse_table(source, tables.len() + 1, tbl) else {
            log::debug!("{source}: skipping table without rows");
            continue;
        };
        tables.push(table);
    }
    tables
}

fn children_named<'a>(
    parent: roxmltree::Node<'a, 'a>,
    name: &str,
) -> Vec<roxmltree::Node<'a, 'a>> {
    collect_block_nodes(parent)
        .into_iter()
        .filter(|n| is_wml(*n, name))
        .collect()
}

fn parse_table(source: &str, index: usize, tbl: roxmltree::Node) -> Option<Table> {
    let rows = children_named(tbl, "tr");
    if rows.is_empty() {
        return None;
    }

    let grid: Vec<Vec<TableCell>> = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            children_named(*row, "tc")
                .into_iter()
                .enumerate()
                .map(|(c, cell)| parse_cell(r + 1, c + 1, cell))
                .collect()
        })
        .collect();

    // Later rows may be shorter or longer through merges; the first row decides.
    let column_count = grid.first().map_or(0, Vec::len);

    Some(Table {
        source: source.to_string(),
        index,
        row_count: grid.len(),
        column_count,
        stats: table_stats(&grid),
        rows: grid,
        properties: wml(tbl, "tblPr")
            .map(parse_table_properties)
            .unwrap_or_default(),
        features: find_features(tbl),
    })
}

fn parse_cell(row: usize, column: usize, cell: roxmltree::Node) -> TableCell {
    // Paragraphs of nested tables belong to the enclosing cell too.
    let paragraphs: Vec<_> = elements(cell, WML, "p").collect();

    let text = paragraphs
        .iter()
        .map(|p| paragraph_text(*p))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    let runs = paragraphs
        .iter()
        .flat_map(|p| owned_runs(*p))
        .filter_map(|r| {
            let text = run_text(r);
            (!text.is_empty()).then(|| Run {
                text,
                style: parse_style(wml(r, "rPr")),
            })
        })
        .collect();

    TableCell {
        row,
        column,
        is_empty: text.is_empty(),
        text,
        runs,
        properties: wml(cell, "tcPr")
            .map(parse_cell_properties)
            .unwrap_or_default(),
    }
}

fn parse_cell_properties(tc_pr: roxmltree::Node) -> CellProperties {
    // A bare merge marker continues the previous cell.
    let merge = |name: &str| wml(tc_pr, name).map(|m| w_attr(m, "val").unwrap_or("continue").to_string());
    CellProperties {
        width_pt: wml(tc_pr, "tcW")
            .filter(|w| w_attr(*w, "type") == Some("dxa"))
            .and_then(|w| w_attr(w, "w"))
            .and_then(twips_to_pt),
        vertical_alignment: wml_attr(tc_pr, "vAlign").map(str::to_string),
        shading: wml(tc_pr, "shd")
            .and_then(|s| w_attr(s, "fill"))
            .and_then(hex_color),
        h_merge: merge("hMerge"),
        v_merge: merge("vMerge"),
        grid_span: wml_attr(tc_pr, "gridSpan").and_then(|v| v.parse::<u32>().ok()),
    }
}

fn parse_border(node: roxmltree::Node) -> Border {
    Border {
        color: w_attr(node, "color")
            .and_then(hex_color)
            .unwrap_or_else(|| "#000000".to_string()),
        size_pt: w_attr(node, "sz").and_then(eighth_points_to_pt),
        style: w_attr(node, "val").unwrap_or("single").to_string(),
    }
}

fn parse_borders(borders: roxmltree::Node) -> TableBorders {
    let edge = |name: &str| wml(borders, name).map(parse_border);
    TableBorders {
        top: edge("top"),
        left: edge("left").or_else(|| edge("start")),
        bottom: edge("bottom"),
        right: edge("right").or_else(|| edge("end")),
        inside_h: edge("insideH"),
        inside_v: edge("insideV"),
    }
}

fn parse_table_properties(tbl_pr: roxmltree::Node) -> TableProperties {
    let width = wml(tbl_pr, "tblW");
    let width_of = |kind: &str| {
        width
            .filter(|w| w_attr(*w, "type") == Some(kind))
            .and_then(|w| w_attr(w, "w"))
    };

    let conditional = wml(tbl_pr, "tblLook").map(|look| {
        let flag = |name: &str| matches!(w_attr(look, name), Some("1" | "true" | "on"));
        ConditionalFormatting {
            first_row: flag("firstRow"),
            last_row: flag("lastRow"),
            first_column: flag("firstColumn"),
            last_column: flag("lastColumn"),
        }
    });

    TableProperties {
        style_name: wml_attr(tbl_pr, "tblStyle").map(str::to_string),
        width_percent: width_of("pct").and_then(fiftieths_to_percent),
        width_pt: width_of("dxa").and_then(twips_to_pt),
        alignment: wml_attr(tbl_pr, "jc").map(str::to_string),
        borders: wml(tbl_pr, "tblBorders").map(parse_borders),
        cell_spacing_pt: wml(tbl_pr, "tblCellSpacing")
            .and_then(|s| w_attr(s, "w"))
            .and_then(twips_to_pt),
        conditional,
    }
}

fn table_stats(grid: &[Vec<TableCell>]) -> TableStats {
    let cells = grid.iter().flatten();
    let total_cells = cells.clone().count();
    let filled: Vec<usize> = cells
        .filter(|c| !c.is_empty)
        .map(|c| c.text.chars().count())
        .collect();
    let filled_cells = filled.len();

    let average_text_length = if filled_cells == 0 {
        0.0
    } else {
        round_to(filled.iter().sum::<usize>() as f64 / filled_cells as f64, 2)
    };
    let fill_ratio = if total_cells == 0 {
        0.0
    } else {
        round_to(filled_cells as f64 / total_cells as f64 * 100.0, 2)
    };

    TableStats {
        total_cells,
        empty_cells: total_cells - filled_cells,
        filled_cells,
        average_text_length,
        fill_ratio,
    }
}

fn find_features(tbl: roxmltree::Node) -> Vec<TableFeature> {
    let nodes: Vec<_> = tbl
        .descendants()
        .filter(|n| n.is_element() && !in_fallback(*n))
        .collect();

    let mut features = Vec::new();
    if nodes.iter().any(|n| is_wml(*n, "drawing")) {
        features.push(TableFeature::Image);
    }
    if !super::drawing::scan(tbl).is_empty() {
        features.push(TableFeature::WordArt);
    }
    if nodes
        .iter()
        .any(|n| is_wml(*n, "shd") && w_attr(*n, "fill").and_then(hex_color).is_some())
    {
        features.push(TableFeature::Shading);
    }
    features
}
