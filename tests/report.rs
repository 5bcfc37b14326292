mod common;

use docx_summary::analysis::{Complexity, CreativeElement, WordArtEffect};
use docx_summary::{AnalyzeOptions, DocumentAnalysis, analyze_bytes, report};
use pretty_assertions::assert_eq;

use common::*;

fn analysis_of(body: &str) -> DocumentAnalysis {
    init_logger();
    let summary = analyze_bytes(&docx(body), &AnalyzeOptions::default()).unwrap();
    DocumentAnalysis::from_summary(&summary)
}

fn sample_body() -> String {
    [
        styled_paragraph(
            "Heading",
            r#"<w:rFonts w:ascii="Arial"/><w:b/><w:sz w:val="32"/><w:color w:val="C00000"/>"#,
        ),
        styled_paragraph("Body", r#"<w:rFonts w:ascii="Calibri"/><w:sz w:val="22"/>"#),
        modern_word_art("Sale"),
        picture(r#"<a:blip r:embed="rId1"/>"#),
        "<w:tbl><w:tr><w:tc><w:p/></w:tc><w:tc><w:p><w:r><w:t>x</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"
            .to_string(),
    ]
    .concat()
}

#[test]
fn analysis_counts_and_scores() {
    let analysis = analysis_of(&sample_body());
    let overview = &analysis.overview;

    // Heading, Body, the picture's paragraph and the table cell paragraphs.
    assert_eq!(overview.paragraph_count, 5);
    assert_eq!(overview.word_art_count, 1);
    assert_eq!(overview.image_count, 1);
    assert_eq!(overview.table_count, 1);
    assert_eq!(overview.main_fonts, vec!["Arial", "Calibri"]);
    assert_eq!(overview.complexity, Complexity::Low);

    let heading = &analysis.paragraphs[0];
    assert_eq!(heading.main_font.as_deref(), Some("Arial"));
    assert_eq!(heading.average_font_size_pt, Some(16.0));
    let labels: Vec<&str> = heading.features.iter().map(|f| f.label()).collect();
    assert_eq!(labels, vec!["bold", "colored text"]);

    assert_eq!(analysis.word_art[0].text, "Sale");
    assert_eq!(
        analysis.word_art[0].effects,
        vec![WordArtEffect::Fill, WordArtEffect::Outline, WordArtEffect::Kerning]
    );
    assert_eq!(analysis.images[0].size, "5 cm x 2.5 cm");
    assert_eq!(analysis.tables[0].structure, "1 rows x 2 columns");
    assert_eq!(analysis.tables[0].fill_ratio, 50.0);

    // 5*2 + 1*10 + 1*5 + 1*8 + 2*3
    let quality = &analysis.assessment.quality;
    assert_eq!(quality.total, 39);
    assert_eq!(quality.content, 10);
    assert_eq!(quality.creative, 10);
    assert_eq!(quality.visual, 10);
    assert_eq!(quality.variety, 6);
    assert_eq!(
        analysis.assessment.creative_elements,
        vec![
            CreativeElement::WordArt,
            CreativeElement::Images,
            CreativeElement::Tables
        ]
    );
}

#[test]
fn report_lists_every_section() {
    let text = report::render(&analysis_of(&sample_body()));
    for heading in ["Overview", "Paragraphs", "Images", "Tables", "WordArt", "Assessment"] {
        assert!(text.contains(heading), "missing {heading} in:\n{text}");
    }
    assert!(text.contains("\"Sale\" modern (w14)"));
    assert!(text.contains("total score: 39/100"));
}

#[test]
fn analysis_serializes() {
    let analysis = analysis_of(&paragraph("only"));
    let value = serde_json::to_value(&analysis).unwrap();
    assert_eq!(value["overview"]["complexity"], "low");
    assert_eq!(value["paragraphs"][0]["preview"], "only");
}

#[test]
fn word_art_visual_effects_are_listed() {
    let shaded = r#"<w:p><w:r><w:drawing><wp:anchor>
        <wp:extent cx="1800000" cy="360000"/>
        <a:graphic><a:graphicData><wps:wsp>
            <wps:spPr><a:effectLst><a:outerShdw blurRad="40000" dist="20000"/></a:effectLst></wps:spPr>
            <wps:txbx><w:txbxContent><w:p><w:r><w:t>Shade</w:t></w:r></w:p></w:txbxContent></wps:txbx>
        </wps:wsp></a:graphicData></a:graphic>
    </wp:anchor></w:drawing></w:r></w:p>"#;
    let analysis = analysis_of(&[shaded.to_string(), legacy_word_art("Old")].concat());

    assert_eq!(analysis.word_art[0].text, "Shade");
    assert_eq!(analysis.word_art[0].visual_effects, vec!["shadow"]);
    assert!(analysis.word_art[1].visual_effects.is_empty());
    assert!(report::render(&analysis).contains("visual effects: shadow"));
}
