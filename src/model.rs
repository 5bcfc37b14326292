use serde::Serialize;

use crate::merge::MergedTextStyles;

#[derive(Clone, Debug, Default, Serialize)]
pub struct DocumentSummary {
    pub paragraphs: Vec<Paragraph>,
    pub word_art: Vec<WordArtElement>,
    pub tables: Vec<Table>,
    pub images: Vec<Image>,
    pub merged_text_styles: MergedTextStyles,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Info,
    PartParseFailure,
    ElementSkipped,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub source: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn info(source: &str, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Info,
            source: Some(source.to_string()),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind != DiagnosticKind::Info
    }
}

// ---- paragraphs & runs ----

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FontSlots {
    pub ascii: Option<String>,
    pub east_asia: Option<String>,
    pub complex_script: Option<String>,
    pub high_ansi: Option<String>,
}

impl FontSlots {
    /// Non-empty font names in slot order (ascii, eastAsia, cs, hAnsi).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [
            &self.ascii,
            &self.east_asia,
            &self.complex_script,
            &self.high_ansi,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .filter(|f| !f.is_empty())
    }

    /// The font Word would pick for Latin text.
    pub fn primary(&self) -> Option<&str> {
        [&self.ascii, &self.high_ansi, &self.east_asia]
            .into_iter()
            .find_map(|f| f.as_deref().filter(|f| !f.is_empty()))
    }
}

/// Direct run formatting (`w:rPr`). A run without `w:rPr` has `Style::default()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Style {
    pub style_name: Option<String>,
    pub fonts: FontSlots,
    pub size_pt: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub spacing_cm: Option<f64>,
}

impl Style {
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub style: Style,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabAlignment {
    Left,
    Center,
    Right,
    Decimal,
    Bar,
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabLeader {
    None,
    Dot,
    Hyphen,
    Underscore,
    Heavy,
    MiddleDot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TabStop {
    pub position_pt: f64,
    pub position_cm: f64,
    pub alignment: TabAlignment,
    pub leader: TabLeader,
}

/// A length attribute kept verbatim next to its centimeter value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measure {
    pub raw: String,
    pub cm: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParagraphSpacing {
    pub before: Option<Measure>,
    pub after: Option<Measure>,
    /// Exact/at-least line height; `None` for auto spacing (see `line_multiple`).
    pub line: Option<Measure>,
    pub line_rule: Option<String>,
    pub line_multiple: Option<f64>,
    pub before_auto: bool,
    pub after_auto: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Indentation {
    pub left: Option<Measure>,
    pub right: Option<Measure>,
    pub first_line: Option<Measure>,
    pub hanging: Option<Measure>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumberingRef {
    pub num_id: Option<String>,
    pub level: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParagraphProperties {
    pub style_name: Option<String>,
    pub alignment: Option<Alignment>,
    pub spacing: Option<ParagraphSpacing>,
    pub indent: Option<Indentation>,
    pub tab_stops: Vec<TabStop>,
    pub numbering: Option<NumberingRef>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Paragraph {
    pub source: String,
    pub index: usize,
    pub text: String,
    pub runs: Vec<Run>,
    pub properties: ParagraphProperties,
}

// ---- drawing geometry, shared by WordArt and images ----

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Geometry {
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub rotation_deg: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AxisPosition {
    pub relative_from: Option<String>,
    pub align: Option<String>,
    pub offset_cm: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Position {
    /// `wp:anchor` (floating) rather than `wp:inline`.
    pub anchored: bool,
    pub horizontal: AxisPosition,
    pub vertical: AxisPosition,
    pub relative_height: Option<String>,
}

// ---- colors & effects ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorModifier {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Color {
    /// `#RRGGBB`
    Rgb { value: String },
    Scheme {
        scheme: Option<String>,
        modifiers: Vec<ColorModifier>,
    },
    Other { kind: String, value: Option<String> },
}

impl Color {
    pub fn rgb(&self) -> Option<&str> {
        match self {
            Color::Rgb { value } => Some(value),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    pub position: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    Solid {
        color: Option<Color>,
    },
    Gradient {
        stops: Vec<GradientStop>,
        linear_angle_deg: Option<f64>,
        path: Option<String>,
    },
    Pattern {
        preset: Option<String>,
        foreground: Option<Color>,
        background: Option<Color>,
    },
    NoFill,
}

impl Fill {
    pub fn solid_rgb(&self) -> Option<&str> {
        match self {
            Fill::Solid { color: Some(c) } => c.rgb(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Outline {
    pub width_pt: Option<f64>,
    pub cap: Option<String>,
    pub compound: Option<String>,
    pub alignment: Option<String>,
    pub dash: Option<String>,
    pub fill: Option<Fill>,
}

impl Outline {
    pub fn rgb(&self) -> Option<&str> {
        self.fill.as_ref().and_then(Fill::solid_rgb)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shadow {
    pub outer: bool,
    pub distance_pt: Option<f64>,
    pub blur_pt: Option<f64>,
    pub direction_deg: Option<f64>,
    pub alignment: Option<String>,
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Glow {
    pub radius_pt: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reflection {
    pub distance_pt: Option<f64>,
    pub blur_pt: Option<f64>,
    pub start_alpha: Option<f64>,
    pub end_alpha: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SoftEdge {
    pub radius_pt: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bevel {
    pub width_pt: Option<f64>,
    pub height_pt: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Extrusion {
    pub bevel_top: Option<Bevel>,
    pub bevel_bottom: Option<Bevel>,
    pub extrusion_height_pt: Option<f64>,
    pub contour_width_pt: Option<f64>,
    pub extrusion_color: Option<Color>,
    pub contour_color: Option<Color>,
    pub material: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EffectBundle {
    /// `a:prstTxWarp/@prst`
    pub warp: Option<String>,
    pub fill: Option<Fill>,
    pub outline: Option<Outline>,
    pub shadow: Option<Shadow>,
    pub glow: Option<Glow>,
    pub reflection: Option<Reflection>,
    pub soft_edge: Option<SoftEdge>,
    pub extrusion: Option<Extrusion>,
}

impl EffectBundle {
    /// Any visual effect beyond plain fill/outline.
    pub fn is_decorative(&self) -> bool {
        self.warp.is_some()
            || self.shadow.is_some()
            || self.glow.is_some()
            || self.reflection.is_some()
            || self.soft_edge.is_some()
            || self.extrusion.is_some()
    }

    pub fn effect_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.shadow.is_some() {
            names.push("shadow");
        }
        if self.glow.is_some() {
            names.push("glow");
        }
        if self.soft_edge.is_some() {
            names.push("soft_edge");
        }
        if self.reflection.is_some() {
            names.push("reflection");
        }
        if self.extrusion.is_some() {
            names.push("3d");
        }
        names
    }
}

// ---- WordArt ----

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordArtEra {
    /// VML `v:textpath`, Word 2003-2007.
    LegacyVector,
    /// DrawingML shapes with `a:prstTxWarp` or text boxes, Word 2010-2016.
    IntermediateDrawing,
    /// `w14:textEffect`, Word 2019+.
    ModernTextEffect,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WordArtStyle {
    pub font: Option<String>,
    pub size_pt: Option<f64>,
    pub fill_color: Option<String>,
    pub outline_color: Option<String>,
    pub kerning_pt: Option<f64>,
    /// `kern` attribute verbatim (hundredths of a point).
    #[serde(skip)]
    pub kern_raw: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "era", rename_all = "snake_case")]
pub enum WordArtKind {
    LegacyVector {
        shape_type: Option<String>,
    },
    IntermediateDrawing {
        text_box: bool,
        geometry: Geometry,
        position: Position,
        effects: EffectBundle,
    },
    ModernTextEffect {
        variant: Option<String>,
        effects: EffectBundle,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordArtElement {
    pub source: String,
    pub index: usize,
    pub text: String,
    pub style: WordArtStyle,
    pub kind: WordArtKind,
}

impl WordArtElement {
    pub fn era(&self) -> WordArtEra {
        match self.kind {
            WordArtKind::LegacyVector { .. } => WordArtEra::LegacyVector,
            WordArtKind::IntermediateDrawing { .. } => WordArtEra::IntermediateDrawing,
            WordArtKind::ModernTextEffect { .. } => WordArtEra::ModernTextEffect,
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.kind {
            WordArtKind::IntermediateDrawing { geometry, .. } => Some(geometry),
            _ => None,
        }
    }

    pub fn effects(&self) -> Option<&EffectBundle> {
        match &self.kind {
            WordArtKind::IntermediateDrawing { effects, .. }
            | WordArtKind::ModernTextEffect { effects, .. } => Some(effects),
            WordArtKind::LegacyVector { .. } => None,
        }
    }
}

// ---- tables ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Border {
    pub color: String,
    pub size_pt: Option<f64>,
    pub style: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TableBorders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
    pub inside_h: Option<Border>,
    pub inside_v: Option<Border>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConditionalFormatting {
    pub first_row: bool,
    pub last_row: bool,
    pub first_column: bool,
    pub last_column: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TableProperties {
    pub style_name: Option<String>,
    pub width_percent: Option<f64>,
    pub width_pt: Option<f64>,
    pub alignment: Option<String>,
    pub borders: Option<TableBorders>,
    pub cell_spacing_pt: Option<f64>,
    pub conditional: Option<ConditionalFormatting>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CellProperties {
    pub width_pt: Option<f64>,
    pub vertical_alignment: Option<String>,
    pub shading: Option<String>,
    /// Merge markers verbatim (`restart` / `continue`), not resolved into spans.
    pub h_merge: Option<String>,
    pub v_merge: Option<String>,
    pub grid_span: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableCell {
    pub row: usize,
    pub column: usize,
    pub text: String,
    pub runs: Vec<Run>,
    pub properties: CellProperties,
    pub is_empty: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TableStats {
    pub total_cells: usize,
    pub empty_cells: usize,
    pub filled_cells: usize,
    pub average_text_length: f64,
    pub fill_ratio: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFeature {
    Image,
    WordArt,
    Shading,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Table {
    pub source: String,
    pub index: usize,
    pub row_count: usize,
    /// Cell count of the first row.
    pub column_count: usize,
    pub rows: Vec<Vec<TableCell>>,
    pub properties: TableProperties,
    pub stats: TableStats,
    pub features: Vec<TableFeature>,
}

// ---- images ----

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ImageMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub transparency: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawingImage {
    pub geometry: Geometry,
    pub position: Position,
    pub metadata: ImageMetadata,
    pub effects: EffectBundle,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VmlImage {
    /// Lengths from the inline style string, verbatim.
    pub width: Option<String>,
    pub height: Option<String>,
    pub coord_size: Option<String>,
    pub style: Vec<(String, String)>,
    pub fill_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_weight: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "version", rename_all = "snake_case")]
pub enum ImageKind {
    Modern(DrawingImage),
    Legacy(VmlImage),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFlag {
    Cropped,
    Rotated,
    HasEffects,
    HasTextFrame,
    HasRotation,
    HasFill,
    HasStroke,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Image {
    pub source: String,
    pub index: usize,
    pub relationship_id: String,
    pub kind: ImageKind,
    pub flags: Vec<ImageFlag>,
}

impl Image {
    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.kind {
            ImageKind::Modern(img) => Some(&img.geometry),
            ImageKind::Legacy(_) => None,
        }
    }
}
