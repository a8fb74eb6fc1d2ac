//! Natural-language instructions from slider deltas.
use crate::editor::adjustments::AdjustmentSet;

const PREFIX: &str = "Apply the following image adjustments: ";

/// Qualitative strength for an absolute deviation.
pub fn strength_word(deviation: i32) -> &'static str {
    match deviation.abs() {
        0..=20 => "a tiny amount",
        21..=40 => "slightly",
        41..=60 => "moderately",
        61..=80 => "significantly",
        _ => "dramatically",
    }
}

fn direction(delta: i32) -> &'static str {
    if delta > 0 {
        "increase"
    } else {
        "decrease"
    }
}

/// Build the adjustment instruction; empty when nothing deviates.
///
/// Hue is reported without a strength since rotation has no linear
/// magnitude.
pub fn build_adjustment_prompt(adjustments: &AdjustmentSet) -> String {
    let mut clauses: Vec<String> = Vec::new();

    let centred = [
        ("brightness", adjustments.brightness),
        ("contrast", adjustments.contrast),
        ("color saturation", adjustments.saturation),
    ];
    for (name, value) in centred {
        let delta = value - 100;
        if delta != 0 {
            clauses.push(format!("{} the {} {}", direction(delta), name, strength_word(delta)));
        }
    }
    if adjustments.sharpness != 0 {
        clauses.push(format!(
            "{} the sharpness {}",
            direction(adjustments.sharpness),
            strength_word(adjustments.sharpness)
        ));
    }
    if adjustments.vignette > 0 {
        clauses.push(format!("add a {} vignette effect", strength_word(adjustments.vignette)));
    }
    if adjustments.sepia != 0 {
        clauses.push(format!("add a {} sepia tone", strength_word(adjustments.sepia)));
    }
    if adjustments.hue != 0 {
        clauses.push("shift the hue of the colors".to_string());
    }

    if clauses.is_empty() {
        return String::new();
    }
    format!("{}{}.", PREFIX, clauses.join(", "))
}
