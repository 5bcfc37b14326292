//! Invariants checked over generated documents and run sequences.

mod common;

use docx_summary::units::{emu_to_cm, half_points_to_pt, twips_to_cm};
use docx_summary::{AnalyzeOptions, Run, Style, analyze_bytes, merge_runs};
use proptest::prelude::*;

fn run_xml(text: &str, bold: bool, size: u8) -> String {
    let mut rpr = String::new();
    if bold {
        rpr.push_str("<w:b/>");
    }
    if size > 0 {
        rpr.push_str(&format!(r#"<w:sz w:val="{size}"/>"#));
    }
    format!("<w:r><w:rPr>{rpr}</w:rPr><w:t>{text}</w:t></w:r>")
}

fn run_strategy() -> impl Strategy<Value = (String, bool, u8)> {
    ("[a-zA-Z0-9]{0,6}", any::<bool>(), prop_oneof![Just(0u8), Just(24u8), Just(28u8)])
}

#[test]
fn unit_conversions() {
    assert_eq!(emu_to_cm("360000"), Some(1.0));
    assert_eq!(emu_to_cm("1260000"), Some(3.5));
    assert_eq!(half_points_to_pt("24"), Some(12.0));
    assert_eq!(half_points_to_pt("48"), Some(24.0));
    assert_eq!(twips_to_cm("567"), Some(1.0));
    assert_eq!(emu_to_cm("wide"), None);
}

/// Paragraph text is the concatenation of its runs, with and without run merging.
#[test]
fn proptest_paragraph_text_is_run_concatenation() {
    common::init_logger();
    proptest!(|(paragraphs in prop::collection::vec(prop::collection::vec(run_strategy(), 0..8), 1..6),
                merge in any::<bool>())| {
        let body: String = paragraphs
            .iter()
            .map(|runs| {
                let runs: String = runs.iter().map(|(t, b, s)| run_xml(t, *b, *s)).collect();
                format!("<w:p>{runs}</w:p>")
            })
            .collect();
        let bytes = common::docx(&body);
        let options = AnalyzeOptions::new().with_merge_runs(merge);
        let summary = analyze_bytes(&bytes, &options).unwrap();

        prop_assert_eq!(summary.paragraphs.len(), paragraphs.len());
        for (p, generated) in summary.paragraphs.iter().zip(&paragraphs) {
            let joined: String = p.runs.iter().map(|r| r.text.as_str()).collect();
            prop_assert_eq!(&joined, &p.text);
            let expected: String = generated.iter().map(|(t, _, _)| t.as_str()).collect();
            prop_assert_eq!(&p.text, &expected);
            if merge {
                prop_assert!(p.runs.iter().all(|r| !r.text.is_empty()));
            }
        }
    });
}

/// Merging an already merged sequence changes nothing.
#[test]
fn proptest_merge_runs_is_idempotent() {
    proptest!(|(runs in prop::collection::vec(run_strategy(), 0..16))| {
        let runs: Vec<Run> = runs
            .into_iter()
            .map(|(text, bold, size)| Run {
                text,
                style: Style {
                    bold,
                    size_pt: (size > 0).then(|| f64::from(size) / 2.0),
                    ..Default::default()
                },
            })
            .collect();
        let once = merge_runs(&runs);
        let twice = merge_runs(&once);
        prop_assert_eq!(&once, &twice);

        let before: String = runs.iter().map(|r| r.text.as_str()).collect();
        let after: String = once.iter().map(|r| r.text.as_str()).collect();
        prop_assert_eq!(before, after);
        for pair in once.windows(2) {
            prop_assert!(pair[0].style != pair[1].style);
        }
    });
}
