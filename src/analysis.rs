//! Document-level statistics and assessment derived from a [`DocumentSummary`].

use serde::Serialize;

use crate::merge::OrderedSet;
use crate::model::{
    Alignment, DocumentSummary, ImageFlag, ImageKind, Paragraph, Run, TableFeature, WordArtElement,
    WordArtEra,
};

const PREVIEW_CHARS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Classifies by the plain sum of paragraphs, WordArt, images and tables.
    pub fn from_element_count(count: usize) -> Self {
        if count > 50 {
            Complexity::High
        } else if count > 20 {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overview {
    pub paragraph_count: usize,
    pub word_art_count: usize,
    pub image_count: usize,
    pub table_count: usize,
    /// Every font named by a run, first-seen order.
    pub main_fonts: Vec<String>,
    pub average_font_size_pt: f64,
    pub complexity: Complexity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphFeature {
    Centered,
    RightAligned,
    Justified,
    Bold,
    Italic,
    Underline,
    Strike,
    ColoredText,
    Background,
    CustomSpacing,
    CustomIndent,
}

impl ParagraphFeature {
    pub fn label(self) -> &'static str {
        match self {
            ParagraphFeature::Centered => "centered",
            ParagraphFeature::RightAligned => "right aligned",
            ParagraphFeature::Justified => "justified",
            ParagraphFeature::Bold => "bold",
            ParagraphFeature::Italic => "italic",
            ParagraphFeature::Underline => "underline",
            ParagraphFeature::Strike => "strikethrough",
            ParagraphFeature::ColoredText => "colored text",
            ParagraphFeature::Background => "background color",
            ParagraphFeature::CustomSpacing => "custom spacing",
            ParagraphFeature::CustomIndent => "custom indent",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParagraphAnalysis {
    pub number: usize,
    pub source: String,
    pub preview: String,
    pub text_length: usize,
    pub run_count: usize,
    pub average_font_size_pt: Option<f64>,
    pub main_font: Option<String>,
    pub features: Vec<ParagraphFeature>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageAnalysis {
    pub number: usize,
    pub legacy: bool,
    pub size: String,
    pub effects: Vec<&'static str>,
    pub flags: Vec<ImageFlag>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableAnalysis {
    pub number: usize,
    pub structure: String,
    pub fill_ratio: f64,
    pub features: Vec<TableFeature>,
    pub has_cell_shading: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordArtEffect {
    Fill,
    Outline,
    Rotation,
    Kerning,
    Basic,
}

impl WordArtEffect {
    pub fn label(self) -> &'static str {
        match self {
            WordArtEffect::Fill => "fill",
            WordArtEffect::Outline => "outline",
            WordArtEffect::Rotation => "rotation",
            WordArtEffect::Kerning => "kerning",
            WordArtEffect::Basic => "basic",
        }
    }

    pub fn describe(art: &WordArtElement) -> Vec<WordArtEffect> {
        let mut effects = Vec::new();
        if art.style.fill_color.is_some() {
            effects.push(WordArtEffect::Fill);
        }
        if art.style.outline_color.is_some() {
            effects.push(WordArtEffect::Outline);
        }
        if art
            .geometry()
            .and_then(|g| g.rotation_deg)
            .is_some_and(|r| r != 0.0)
        {
            effects.push(WordArtEffect::Rotation);
        }
        if art.style.kerning_pt.is_some_and(|k| k != 0.0) {
            effects.push(WordArtEffect::Kerning);
        }
        if effects.is_empty() {
            effects.push(WordArtEffect::Basic);
        }
        effects
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordArtAnalysis {
    pub number: usize,
    pub text: String,
    pub era: WordArtEra,
    pub effects: Vec<WordArtEffect>,
    /// Shadow, glow and similar effects of the drawing or text effect.
    pub visual_effects: Vec<&'static str>,
    pub size: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Usage {
    pub name: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleAnalysis {
    pub font_usage: Vec<Usage>,
    pub color_usage: Vec<Usage>,
    pub format_diversity: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityScore {
    pub total: u32,
    pub content: u32,
    pub creative: u32,
    pub visual: u32,
    pub variety: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreativeElement {
    WordArt,
    Images,
    Tables,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TechnicalComplexity {
    pub distinct_fonts: usize,
    pub image_effects: usize,
    pub style_variations: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Assessment {
    pub quality: QualityScore,
    pub creative_elements: Vec<CreativeElement>,
    pub technical: TechnicalComplexity,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocumentAnalysis {
    pub overview: Overview,
    pub paragraphs: Vec<ParagraphAnalysis>,
    pub images: Vec<ImageAnalysis>,
    pub tables: Vec<TableAnalysis>,
    pub word_art: Vec<WordArtAnalysis>,
    pub styles: StyleAnalysis,
    pub assessment: Assessment,
}

impl DocumentAnalysis {
    pub fn from_summary(summary: &DocumentSummary) -> Self {
        let runs = || summary.paragraphs.iter().flat_map(|p| p.runs.iter());
        let main_fonts: Vec<String> = runs()
            .flat_map(|r| r.style.fonts.names())
            .map(str::to_string)
            .collect::<OrderedSet<_>>()
            .iter()
            .cloned()
            .collect();

        let element_count = summary.paragraphs.len()
            + summary.word_art.len()
            + summary.images.len()
            + summary.tables.len();

        let overview = Overview {
            paragraph_count: summary.paragraphs.len(),
            word_art_count: summary.word_art.len(),
            image_count: summary.images.len(),
            table_count: summary.tables.len(),
            average_font_size_pt: average_size(runs()).unwrap_or(0.0),
            complexity: Complexity::from_element_count(element_count),
            main_fonts,
        };

        let assessment = assess(summary, &overview);

        DocumentAnalysis {
            paragraphs: summary
                .paragraphs
                .iter()
                .enumerate()
                .map(|(i, p)| analyze_paragraph(i + 1, p))
                .collect(),
            images: summary
                .images
                .iter()
                .enumerate()
                .map(|(i, img)| {
                    let (legacy, size, effects) = match &img.kind {
                        ImageKind::Modern(d) => (
                            false,
                            format!(
                                "{} cm x {} cm",
                                d.geometry.width_cm.unwrap_or(0.0),
                                d.geometry.height_cm.unwrap_or(0.0)
                            ),
                            d.effects.effect_names(),
                        ),
                        ImageKind::Legacy(v) => (
                            true,
                            format!(
                                "{} x {}",
                                v.width.as_deref().unwrap_or("?"),
                                v.height.as_deref().unwrap_or("?")
                            ),
                            Vec::new(),
                        ),
                    };
                    ImageAnalysis {
                        number: i + 1,
                        legacy,
                        size,
                        effects,
                        flags: img.flags.clone(),
                    }
                })
                .collect(),
            tables: summary
                .tables
                .iter()
                .enumerate()
                .map(|(i, t)| TableAnalysis {
                    number: i + 1,
                    structure: format!("{} rows x {} columns", t.row_count, t.column_count),
                    fill_ratio: t.stats.fill_ratio,
                    features: t.features.clone(),
                    has_cell_shading: t
                        .rows
                        .iter()
                        .flatten()
                        .any(|c| c.properties.shading.is_some()),
                })
                .collect(),
            word_art: summary
                .word_art
                .iter()
                .enumerate()
                .map(|(i, art)| {
                    let geometry = art.geometry();
                    WordArtAnalysis {
                        number: i + 1,
                        text: art.text.clone(),
                        era: art.era(),
                        effects: WordArtEffect::describe(art),
                        visual_effects: art
                            .effects()
                            .map(|e| e.effect_names())
                            .unwrap_or_default(),
                        size: format!(
                            "{} cm x {} cm",
                            geometry.and_then(|g| g.width_cm).unwrap_or(0.0),
                            geometry.and_then(|g| g.height_cm).unwrap_or(0.0)
                        ),
                    }
                })
                .collect(),
            styles: analyze_styles(summary),
            overview,
            assessment,
        }
    }
}

fn average_size<'a>(runs: impl Iterator<Item = &'a Run>) -> Option<f64> {
    let sizes: Vec<f64> = runs.filter_map(|r| r.style.size_pt).filter(|s| *s > 0.0).collect();
    if sizes.is_empty() {
        return None;
    }
    let avg = sizes.iter().sum::<f64>() / sizes.len() as f64;
    Some(crate::units::round_to(avg, 2))
}

fn is_colored(color: Option<&str>) -> bool {
    color.is_some_and(|c| c != "#000000")
}

/// First `PREVIEW_CHARS` characters, with an ellipsis when cut.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn analyze_paragraph(number: usize, p: &Paragraph) -> ParagraphAnalysis {
    // Most common primary font; ties go to the font seen first.
    let mut counts: Vec<Usage> = Vec::new();
    for font in p.runs.iter().filter_map(|r| r.style.fonts.primary()) {
        count(&mut counts, font);
    }
    let main_font = counts
        .iter()
        .fold(None::<&Usage>, |best, u| match best {
            Some(b) if b.count >= u.count => Some(b),
            _ => Some(u),
        })
        .map(|u| u.name.clone());

    let mut features = Vec::new();
    match p.properties.alignment {
        Some(Alignment::Center) => features.push(ParagraphFeature::Centered),
        Some(Alignment::Right) => features.push(ParagraphFeature::RightAligned),
        Some(Alignment::Justify) => features.push(ParagraphFeature::Justified),
        _ => {}
    }
    let any = |f: fn(&Run) -> bool| p.runs.iter().any(f);
    if any(|r| r.style.bold) {
        features.push(ParagraphFeature::Bold);
    }
    if any(|r| r.style.italic) {
        features.push(ParagraphFeature::Italic);
    }
    if any(|r| r.style.underline) {
        features.push(ParagraphFeature::Underline);
    }
    if any(|r| r.style.strike) {
        features.push(ParagraphFeature::Strike);
    }
    if any(|r| is_colored(r.style.color.as_deref())) {
        features.push(ParagraphFeature::ColoredText);
    }
    if any(|r| r.style.background_color.is_some()) {
        features.push(ParagraphFeature::Background);
    }
    if p.properties.spacing.is_some() {
        features.push(ParagraphFeature::CustomSpacing);
    }
    if p.properties.indent.is_some() {
        features.push(ParagraphFeature::CustomIndent);
    }

    ParagraphAnalysis {
        number,
        source: p.source.clone(),
        preview: preview(&p.text),
        text_length: p.text.chars().count(),
        run_count: p.runs.len(),
        average_font_size_pt: average_size(p.runs.iter()),
        main_font,
        features,
    }
}

fn count(usage: &mut Vec<Usage>, name: &str) {
    match usage.iter_mut().find(|u| u.name == name) {
        Some(u) => u.count += 1,
        None => usage.push(Usage {
            name: name.to_string(),
            count: 1,
        }),
    }
}

fn analyze_styles(summary: &DocumentSummary) -> StyleAnalysis {
    let mut font_usage = Vec::new();
    let mut color_usage = Vec::new();
    let mut formats: OrderedSet<&str> = OrderedSet::new();

    for run in summary.paragraphs.iter().flat_map(|p| p.runs.iter()) {
        let style = &run.style;
        for font in style.fonts.names() {
            count(&mut font_usage, font);
        }
        if let Some(color) = &style.color {
            count(&mut color_usage, color);
        }
        if style.bold {
            formats.insert("bold");
        }
        if style.italic {
            formats.insert("italic");
        }
        if style.underline {
            formats.insert("underline");
        }
        if style.strike {
            formats.insert("strike");
        }
        if is_colored(style.color.as_deref()) {
            formats.insert("colored");
        }
    }
    for art in &summary.word_art {
        if let Some(fill) = &art.style.fill_color {
            count(&mut color_usage, fill);
        }
        formats.extend(WordArtEffect::describe(art).into_iter().map(WordArtEffect::label));
    }

    StyleAnalysis {
        font_usage,
        color_usage,
        format_diversity: formats.len(),
    }
}

fn capped(value: usize, weight: u32, cap: u32) -> u32 {
    (value as u32).saturating_mul(weight).min(cap)
}

fn assess(summary: &DocumentSummary, overview: &Overview) -> Assessment {
    let paragraphs = summary.paragraphs.len();
    let word_art = summary.word_art.len();
    let images = summary.images.len();
    let tables = summary.tables.len();
    let variety = overview.main_fonts.len();

    let total = (paragraphs as u32)
        .saturating_mul(2)
        .saturating_add((word_art as u32).saturating_mul(10))
        .saturating_add((images as u32).saturating_mul(5))
        .saturating_add((tables as u32).saturating_mul(8))
        .saturating_add((variety as u32).saturating_mul(3))
        .min(100);

    let mut creative_elements = Vec::new();
    if word_art > 0 {
        creative_elements.push(CreativeElement::WordArt);
    }
    if images > 0 {
        creative_elements.push(CreativeElement::Images);
    }
    if tables > 0 {
        creative_elements.push(CreativeElement::Tables);
    }

    Assessment {
        quality: QualityScore {
            total,
            content: capped(paragraphs, 2, 30),
            creative: capped(word_art, 10, 40),
            visual: capped(images + tables, 5, 20),
            variety: capped(variety, 3, 10),
        },
        creative_elements,
        technical: TechnicalComplexity {
            distinct_fonts: variety,
            image_effects: summary
                .images
                .iter()
                .map(|img| match &img.kind {
                    ImageKind::Modern(d) => d.effects.effect_names().len(),
                    ImageKind::Legacy(_) => 0,
                })
                .sum(),
            style_variations: summary.paragraphs.iter().map(|p| p.runs.len()).sum(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSlots, ParagraphProperties, Style};
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str, runs: Vec<Run>) -> Paragraph {
        Paragraph {
            source: "word/document.xml".to_string(),
            index: 1,
            text: text.to_string(),
            runs,
            properties: ParagraphProperties::default(),
        }
    }

    fn run(text: &str, font: &str, size: f64) -> Run {
        Run {
            text: text.to_string(),
            style: Style {
                fonts: FontSlots {
                    ascii: Some(font.to_string()),
                    ..Default::default()
                },
                size_pt: Some(size),
                ..Default::default()
            },
        }
    }

    #[test]
    fn complexity_thresholds() {
        assert_eq!(Complexity::from_element_count(0), Complexity::Low);
        assert_eq!(Complexity::from_element_count(20), Complexity::Low);
        assert_eq!(Complexity::from_element_count(21), Complexity::Medium);
        assert_eq!(Complexity::from_element_count(51), Complexity::High);
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "字".repeat(120);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 103);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn overview_and_scores() {
        let summary = DocumentSummary {
            paragraphs: vec![
                paragraph("ab", vec![run("a", "Arial", 12.0), run("b", "Calibri", 11.0)]),
                paragraph("c", vec![run("c", "Arial", 14.0)]),
            ],
            ..Default::default()
        };
        let analysis = DocumentAnalysis::from_summary(&summary);
        assert_eq!(analysis.overview.main_fonts, vec!["Arial", "Calibri"]);
        assert_eq!(analysis.overview.average_font_size_pt, 12.33);
        assert_eq!(analysis.overview.complexity, Complexity::Low);
        assert_eq!(analysis.paragraphs[0].main_font.as_deref(), Some("Arial"));
        assert_eq!(analysis.paragraphs[0].average_font_size_pt, Some(11.5));
        assert_eq!(
            analysis.styles.font_usage,
            vec![
                Usage { name: "Arial".into(), count: 2 },
                Usage { name: "Calibri".into(), count: 1 },
            ]
        );
        // 2 paragraphs * 2 + 2 fonts * 3
        assert_eq!(analysis.assessment.quality.total, 10);
        assert_eq!(analysis.assessment.quality.content, 4);
        assert_eq!(analysis.assessment.quality.variety, 6);
        assert_eq!(analysis.assessment.technical.style_variations, 3);
        assert!(analysis.assessment.creative_elements.is_empty());
    }

    #[test]
    fn score_is_capped() {
        let summary = DocumentSummary {
            paragraphs: (0..60).map(|_| paragraph("x", vec![])).collect(),
            ..Default::default()
        };
        let analysis = DocumentAnalysis::from_summary(&summary);
        assert_eq!(analysis.assessment.quality.total, 100);
        assert_eq!(analysis.assessment.quality.content, 30);
        assert_eq!(analysis.overview.complexity, Complexity::High);
    }
}
