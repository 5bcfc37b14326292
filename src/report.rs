//! Plain-text rendering of a [`DocumentAnalysis`].

use std::fmt::{self, Display, Formatter};

use crate::analysis::DocumentAnalysis;
use crate::model::WordArtEra;

const RULE: &str = "============================================================";

pub fn render(analysis: &DocumentAnalysis) -> String {
    Report(analysis).to_string()
}

struct Report<'a>(&'a DocumentAnalysis);

fn era_label(era: WordArtEra) -> &'static str {
    match era {
        WordArtEra::LegacyVector => "legacy (VML)",
        WordArtEra::IntermediateDrawing => "intermediate (DrawingML)",
        WordArtEra::ModernTextEffect => "modern (w14)",
    }
}

fn join<T>(items: &[T], label: impl Fn(&T) -> &str) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items.iter().map(label).collect::<Vec<_>>().join(", ")
}

/// At most 20 characters of WordArt text.
fn short(text: &str) -> String {
    match text.char_indices().nth(20) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let a = self.0;
        let o = &a.overview;

        writeln!(f, "{RULE}")?;
        writeln!(f, "Document structure report")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "Overview")?;
        writeln!(f, "  paragraphs: {}", o.paragraph_count)?;
        writeln!(f, "  WordArt: {}", o.word_art_count)?;
        writeln!(f, "  images: {}", o.image_count)?;
        writeln!(f, "  tables: {}", o.table_count)?;
        writeln!(f, "  fonts: {}", join(&o.main_fonts, |s| s.as_str()))?;
        writeln!(f, "  average font size: {}pt", o.average_font_size_pt)?;
        writeln!(f, "  complexity: {}", o.complexity.as_str())?;

        if !a.paragraphs.is_empty() {
            writeln!(f)?;
            writeln!(f, "Paragraphs")?;
            for p in &a.paragraphs {
                writeln!(f, "  [{}] {}", p.number, p.preview)?;
                write!(f, "      length {}, runs {}", p.text_length, p.run_count)?;
                if let Some(size) = p.average_font_size_pt {
                    write!(f, ", size {size}pt")?;
                }
                if let Some(font) = &p.main_font {
                    write!(f, ", font {font}")?;
                }
                writeln!(f)?;
                if !p.features.is_empty() {
                    writeln!(f, "      features: {}", join(&p.features, |x| x.label()))?;
                }
            }
        }

        if !a.images.is_empty() {
            writeln!(f)?;
            writeln!(f, "Images")?;
            for img in &a.images {
                let version = if img.legacy { "VML" } else { "DrawingML" };
                writeln!(f, "  [{}] {version}, {}", img.number, img.size)?;
                if !img.effects.is_empty() {
                    writeln!(f, "      effects: {}", join(&img.effects, |e| *e))?;
                }
            }
        }

        if !a.tables.is_empty() {
            writeln!(f)?;
            writeln!(f, "Tables")?;
            for t in &a.tables {
                writeln!(f, "  [{}] {}, {}% filled", t.number, t.structure, t.fill_ratio)?;
                if t.has_cell_shading {
                    writeln!(f, "      shaded cells")?;
                }
            }
        }

        if !a.word_art.is_empty() {
            writeln!(f)?;
            writeln!(f, "WordArt")?;
            for w in &a.word_art {
                writeln!(f, "  [{}] \"{}\" {}", w.number, short(&w.text), era_label(w.era))?;
                writeln!(f, "      effects: {}", join(&w.effects, |e| e.label()))?;
                if !w.visual_effects.is_empty() {
                    writeln!(f, "      visual effects: {}", join(&w.visual_effects, |e| *e))?;
                }
            }
        }

        let s = &a.styles;
        writeln!(f)?;
        writeln!(f, "Styles")?;
        for u in &s.font_usage {
            writeln!(f, "  font {}: {}", u.name, u.count)?;
        }
        for u in &s.color_usage {
            writeln!(f, "  color {}: {}", u.name, u.count)?;
        }
        writeln!(f, "  format diversity: {}", s.format_diversity)?;

        let q = &a.assessment.quality;
        writeln!(f)?;
        writeln!(f, "Assessment")?;
        writeln!(f, "  total score: {}/100", q.total)?;
        writeln!(
            f,
            "  content {}/30, creative {}/40, visual {}/20, variety {}/10",
            q.content, q.creative, q.visual, q.variety
        )?;
        write!(f, "{RULE}")
    }
}
