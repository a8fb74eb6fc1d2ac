//! Pending slider adjustments and their local preview.
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// The seven editing sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjustment {
    Brightness,
    Contrast,
    Saturation,
    Sepia,
    Hue,
    Sharpness,
    Vignette,
}

impl Adjustment {
    pub const ALL: [Adjustment; 7] = [
        Adjustment::Brightness,
        Adjustment::Contrast,
        Adjustment::Saturation,
        Adjustment::Sepia,
        Adjustment::Hue,
        Adjustment::Sharpness,
        Adjustment::Vignette,
    ];

    pub fn range(self) -> RangeInclusive<i32> {
        match self {
            Adjustment::Brightness | Adjustment::Contrast | Adjustment::Saturation => 0..=200,
            Adjustment::Hue => 0..=360,
            Adjustment::Sepia | Adjustment::Vignette => 0..=100,
            Adjustment::Sharpness => -100..=100,
        }
    }

    pub fn default_value(self) -> i32 {
        match self {
            Adjustment::Brightness | Adjustment::Contrast | Adjustment::Saturation => 100,
            _ => 0,
        }
    }

    /// Whether a local filter can show this slider without a model round trip.
    pub fn is_previewable(self) -> bool {
        self.filter_function().is_some()
    }

    /// CSS filter function and unit; `None` for server-only sliders.
    fn filter_function(self) -> Option<(&'static str, &'static str)> {
        match self {
            Adjustment::Brightness => Some(("brightness", "%")),
            Adjustment::Contrast => Some(("contrast", "%")),
            Adjustment::Saturation => Some(("saturate", "%")),
            Adjustment::Sepia => Some(("sepia", "%")),
            Adjustment::Hue => Some(("hue-rotate", "deg")),
            Adjustment::Sharpness | Adjustment::Vignette => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Adjustment::Brightness => "Brightness",
            Adjustment::Contrast => "Contrast",
            Adjustment::Saturation => "Saturation",
            Adjustment::Sepia => "Sepia",
            Adjustment::Hue => "Hue",
            Adjustment::Sharpness => "Sharpness",
            Adjustment::Vignette => "Vignette",
        }
    }
}

/// Slider values. `Default` is the true no-op configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentSet {
    pub brightness: i32,
    pub contrast: i32,
    pub saturation: i32,
    pub sepia: i32,
    pub hue: i32,
    pub sharpness: i32,
    pub vignette: i32,
}

impl Default for AdjustmentSet {
    fn default() -> Self {
        Self {
            brightness: 100,
            contrast: 100,
            saturation: 100,
            sepia: 0,
            hue: 0,
            sharpness: 0,
            vignette: 0,
        }
    }
}

impl AdjustmentSet {
    pub fn get(&self, adjustment: Adjustment) -> i32 {
        match adjustment {
            Adjustment::Brightness => self.brightness,
            Adjustment::Contrast => self.contrast,
            Adjustment::Saturation => self.saturation,
            Adjustment::Sepia => self.sepia,
            Adjustment::Hue => self.hue,
            Adjustment::Sharpness => self.sharpness,
            Adjustment::Vignette => self.vignette,
        }
    }

    /// Set a slider, clamping into its range.
    pub fn set(&mut self, adjustment: Adjustment, value: i32) {
        let range = adjustment.range();
        let value = value.clamp(*range.start(), *range.end());
        let slot = match adjustment {
            Adjustment::Brightness => &mut self.brightness,
            Adjustment::Contrast => &mut self.contrast,
            Adjustment::Saturation => &mut self.saturation,
            Adjustment::Sepia => &mut self.sepia,
            Adjustment::Hue => &mut self.hue,
            Adjustment::Sharpness => &mut self.sharpness,
            Adjustment::Vignette => &mut self.vignette,
        };
        *slot = value;
    }

    pub fn with(mut self, adjustment: Adjustment, value: i32) -> Self {
        self.set(adjustment, value);
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sliders that differ from their defaults.
    pub fn changed(&self) -> impl Iterator<Item = Adjustment> + '_ {
        Adjustment::ALL
            .into_iter()
            .filter(move |a| self.get(*a) != a.default_value())
    }

    /// CSS-style filter string for the previewable sliders only.
    pub fn preview_filter(&self) -> String {
        Adjustment::ALL
            .into_iter()
            .filter_map(|a| a.filter_function().map(|(name, unit)| format!("{}({}{})", name, self.get(a), unit)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
