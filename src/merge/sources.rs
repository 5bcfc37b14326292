//! Cross-part aggregation of styling facts per distinct text.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::model::{Geometry, Paragraph, ParagraphProperties, WordArtElement};
use crate::units::hundredths_to_pt;

/// A set that remembers insertion order. Sets here hold a handful of values, so a
/// linear scan beats hashing and keeps `f64` members usable.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedSet<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> OrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.items.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: PartialEq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: PartialEq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for OrderedSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

/// Everything observed for one text across all parts.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MergedStyleEntry {
    pub text: String,
    pub sources: OrderedSet<String>,
    pub fonts: OrderedSet<String>,
    pub sizes_pt: OrderedSet<f64>,
    /// Run colors and WordArt fill colors.
    pub colors: OrderedSet<String>,
    pub outline_colors: OrderedSet<String>,
    pub background_colors: OrderedSet<String>,
    /// Run spacing in cm and WordArt kerning in pt.
    pub spacings: OrderedSet<f64>,
    pub is_word_art: bool,
    /// Geometry of the last WordArt occurrence.
    pub geometry: Option<Geometry>,
    /// Properties of the last paragraph occurrence.
    pub paragraph_properties: Option<ParagraphProperties>,
}

/// Text -> entry, iterated in the order texts were first seen.
#[derive(Clone, Debug, Default)]
pub struct MergedTextStyles {
    entries: Vec<MergedStyleEntry>,
    index: HashMap<String, usize>,
}

impl MergedTextStyles {
    pub fn get(&self, text: &str) -> Option<&MergedStyleEntry> {
        self.index.get(text).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergedStyleEntry> {
        self.entries.iter()
    }

    /// Position of `text`, creating an empty entry on first sight.
    fn slot(&mut self, text: &str) -> usize {
        if let Some(&i) = self.index.get(text) {
            return i;
        }
        self.entries.push(MergedStyleEntry {
            text: text.to_string(),
            ..Default::default()
        });
        self.index.insert(text.to_string(), self.entries.len() - 1);
        self.entries.len() - 1
    }
}

impl Serialize for MergedTextStyles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|e| (&e.text, e)))
    }
}

/// A spacing observation before unit normalisation.
enum Spacing {
    Centimeters(f64),
    /// `kern` as written, hundredths of a point.
    Kerning(String),
}

/// Builds the text -> style index. Paragraphs are visited before WordArt; blank texts
/// are ignored. The inputs are only read.
pub fn merge_sources(paragraphs: &[Paragraph], word_art: &[WordArtElement]) -> MergedTextStyles {
    let mut merged = MergedTextStyles::default();
    let mut spacings: Vec<Vec<Spacing>> = Vec::new();

    for p in paragraphs {
        let text = p.text.trim();
        if text.is_empty() {
            continue;
        }
        let i = merged.slot(text);
        spacings.resize_with(merged.len(), Vec::new);
        let entry = &mut merged.entries[i];
        entry.sources.insert(p.source.clone());
        for run in &p.runs {
            let style = &run.style;
            entry.fonts.extend(style.fonts.names().map(str::to_string));
            entry.sizes_pt.extend(style.size_pt);
            entry.colors.extend(style.color.clone());
            entry.background_colors.extend(style.background_color.clone());
        }
        entry.paragraph_properties = Some(p.properties.clone());
        spacings[i].extend(
            p.runs
                .iter()
                .filter_map(|r| r.style.spacing_cm)
                .map(Spacing::Centimeters),
        );
    }

    for art in word_art {
        let text = art.text.trim();
        if text.is_empty() {
            continue;
        }
        let i = merged.slot(text);
        spacings.resize_with(merged.len(), Vec::new);
        let entry = &mut merged.entries[i];
        entry.sources.insert(art.source.clone());
        entry.fonts.extend(art.style.font.clone());
        entry.sizes_pt.extend(art.style.size_pt);
        entry.colors.extend(art.style.fill_color.clone());
        entry.outline_colors.extend(art.style.outline_color.clone());
        entry.is_word_art = true;
        entry.geometry = art.geometry().cloned();
        spacings[i].extend(art.style.kern_raw.clone().map(Spacing::Kerning));
    }

    // Kerning arrives as hundredths of a point; everything else is already numeric.
    for (entry, samples) in merged.entries.iter_mut().zip(spacings) {
        entry.spacings.extend(samples.into_iter().filter_map(|s| match s {
            Spacing::Centimeters(cm) => Some(cm),
            Spacing::Kerning(raw) => hundredths_to_pt(&raw),
        }));
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Run, Style, WordArtKind, WordArtStyle};
    use pretty_assertions::assert_eq;

    fn paragraph(source: &str, text: &str, color: &str) -> Paragraph {
        Paragraph {
            source: source.to_string(),
            index: 1,
            text: text.to_string(),
            runs: vec![Run {
                text: text.to_string(),
                style: Style {
                    color: Some(color.to_string()),
                    size_pt: Some(16.0),
                    spacing_cm: Some(0.1),
                    ..Default::default()
                },
            }],
            properties: ParagraphProperties::default(),
        }
    }

    #[test]
    fn same_text_in_two_parts() {
        let paragraphs = vec![
            paragraph("word/document.xml", "標題", "#FF0000"),
            paragraph("word/header1.xml", " 標題 ", "#0000FF"),
            paragraph("word/document.xml", "body", "#000000"),
        ];
        let merged = merge_sources(&paragraphs, &[]);
        assert_eq!(merged.len(), 2);
        let entry = merged.get("標題").unwrap();
        assert_eq!(entry.colors.len(), 2);
        assert_eq!(entry.sources.len(), 2);
        assert_eq!(entry.sizes_pt.len(), 1);
        assert!(!entry.is_word_art);
        let texts: Vec<&str> = merged.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["標題", "body"]);
    }

    #[test]
    fn word_art_kerning_is_normalised() {
        let paragraphs = vec![paragraph("word/document.xml", "Sale", "#FF0000")];
        let art = WordArtElement {
            source: "word/header1.xml".to_string(),
            index: 1,
            text: "Sale".to_string(),
            style: WordArtStyle {
                fill_color: Some("#00FF00".to_string()),
                kern_raw: Some("250".to_string()),
                ..Default::default()
            },
            kind: WordArtKind::ModernTextEffect {
                variant: None,
                effects: Default::default(),
            },
        };
        let before = paragraphs.clone();
        let merged = merge_sources(&paragraphs, std::slice::from_ref(&art));
        assert_eq!(paragraphs, before);

        let entry = merged.get("Sale").unwrap();
        assert!(entry.is_word_art);
        assert_eq!(entry.spacings.iter().copied().collect::<Vec<_>>(), vec![0.1, 2.5]);
        assert_eq!(
            entry.colors.iter().cloned().collect::<Vec<_>>(),
            vec!["#FF0000".to_string(), "#00FF00".to_string()]
        );
        assert!(entry.geometry.is_none());
    }

    #[test]
    fn ordered_set_keeps_first_insertion() {
        let set: OrderedSet<&str> = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["b","a","c"]"#);
    }
}
