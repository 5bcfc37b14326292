//! Conversions from the OOXML native units into centimeters, points, degrees and ratios.
//!
//! Every function takes the raw attribute text and returns `None` when the input is
//! missing or not a finite number.

pub const EMU_PER_CM: f64 = 360_000.0;
pub const EMU_PER_PT: f64 = 12_700.0;
pub const PT_TO_CM: f64 = 0.035_277_8;

fn number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// English Metric Units to centimeters, 3 decimals.
pub fn emu_to_cm(raw: &str) -> Option<f64> {
    number(raw).map(|emu| round_to(emu / EMU_PER_CM, 3))
}

pub fn emu_to_pt(raw: &str) -> Option<f64> {
    number(raw).map(|emu| round_to(emu / EMU_PER_PT, 2))
}

/// `w:sz` and friends: half-points to points.
pub fn half_points_to_pt(raw: &str) -> Option<f64> {
    number(raw).map(|hp| round_to(hp * 0.5, 2))
}

pub fn twips_to_pt(raw: &str) -> Option<f64> {
    number(raw).map(|tw| tw / 20.0)
}

pub fn twips_to_cm(raw: &str) -> Option<f64> {
    twips_to_pt(raw).map(pt_to_cm)
}

pub fn pt_to_cm(pt: f64) -> f64 {
    round_to(pt * PT_TO_CM, 3)
}

/// Eighths of a point (border widths).
pub fn eighth_points_to_pt(raw: &str) -> Option<f64> {
    number(raw).map(|v| round_to(v / 8.0, 2))
}

/// Hundredths of a point (`kern`, DrawingML `a:rPr/@sz`).
pub fn hundredths_to_pt(raw: &str) -> Option<f64> {
    number(raw).map(|v| round_to(v / 100.0, 2))
}

/// Angles are stored in 1/60000 of a degree.
pub fn angle_to_deg(raw: &str) -> Option<f64> {
    number(raw).map(|v| round_to(v / 60_000.0, 2))
}

/// Percentages stored as 1/100000 (100000 = 1.0).
pub fn percent_to_ratio(raw: &str) -> Option<f64> {
    number(raw).map(|v| round_to(v / 100_000.0, 2))
}

/// Table `pct` widths are fiftieths of a percent (5000 = 100%).
pub fn fiftieths_to_percent(raw: &str) -> Option<f64> {
    number(raw).map(|v| round_to(v / 50.0, 2))
}

/// VML style lengths such as `40pt`, `1.5in`, `2cm`, `12px` or a bare number (points).
pub fn css_length_to_pt(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(raw.len());
    let (value, unit) = raw.split_at(split);
    let value = number(value)?;
    let pt = match unit {
        "" | "pt" => value,
        "in" => value * 72.0,
        "cm" => value / PT_TO_CM,
        "mm" => value / PT_TO_CM / 10.0,
        "px" => value * 0.75,
        "pc" => value * 12.0,
        _ => return None,
    };
    Some(round_to(pt, 2))
}
