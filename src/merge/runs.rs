use crate::model::{Run, Style};

/// The fields two runs must share to be merged. Font slots compare as a set of
/// names, so `ascii=Arial` and `hAnsi=Arial` are the same font.
#[derive(PartialEq)]
struct StyleKey<'a> {
    style_name: Option<&'a str>,
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    size_pt: Option<f64>,
    color: Option<&'a str>,
    background_color: Option<&'a str>,
    spacing_cm: Option<f64>,
    fonts: Vec<&'a str>,
}

impl<'a> StyleKey<'a> {
    fn of(style: &'a Style) -> Self {
        let mut fonts: Vec<&str> = style.fonts.names().collect();
        fonts.sort_unstable();
        fonts.dedup();
        Self {
            style_name: style.style_name.as_deref(),
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strike: style.strike,
            size_pt: style.size_pt,
            color: style.color.as_deref(),
            background_color: style.background_color.as_deref(),
            spacing_cm: style.spacing_cm,
            fonts,
        }
    }
}

/// Collapses adjacent runs with the same style key.
///
/// Empty runs are dropped without ending the run being built, so `a`, `""`, `b`
/// with one style becomes `ab`. The output never holds an empty run and merging it
/// again returns it unchanged.
pub fn merge_runs(runs: &[Run]) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs.iter().filter(|r| !r.text.is_empty()) {
        match merged.last_mut() {
            Some(last) if StyleKey::of(&last.style) == StyleKey::of(&run.style) => {
                last.text.push_str(&run.text);
            }
            _ => merged.push(run.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontSlots;
    use pretty_assertions::assert_eq;

    fn run(text: &str, style: &Style) -> Run {
        Run {
            text: text.to_string(),
            style: style.clone(),
        }
    }

    fn bold() -> Style {
        Style {
            bold: true,
            ..Default::default()
        }
    }

    #[test]
    fn adjacent_equal_styles_merge() {
        let plain = Style::default();
        let runs = vec![
            run("Hel", &plain),
            run("lo ", &plain),
            run("big", &bold()),
            run("", &plain),
            run(" end", &plain),
        ];
        let merged = merge_runs(&runs);
        let texts: Vec<&str> = merged.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello ", "big", " end"]);
    }

    #[test]
    fn empty_run_does_not_split_a_merge() {
        let b = bold();
        let runs = vec![run("a", &b), run("", &Style::default()), run("b", &b)];
        let merged = merge_runs(&runs);
        assert_eq!(merged, vec![run("ab", &b)]);
    }

    #[test]
    fn font_slots_compare_as_a_set() {
        let ascii = Style {
            fonts: FontSlots {
                ascii: Some("Arial".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let both = Style {
            fonts: FontSlots {
                ascii: Some("Arial".into()),
                high_ansi: Some("Arial".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = merge_runs(&[run("x", &ascii), run("y", &both)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "xy");
    }

    #[test]
    fn missing_and_present_differ() {
        let sized = Style {
            size_pt: Some(12.0),
            ..Default::default()
        };
        let merged = merge_runs(&[run("x", &Style::default()), run("y", &sized)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merging_twice_changes_nothing() {
        let runs = vec![run("a", &bold()), run("b", &bold()), run("c", &Style::default())];
        let once = merge_runs(&runs);
        assert_eq!(merge_runs(&once), once);
    }
}
