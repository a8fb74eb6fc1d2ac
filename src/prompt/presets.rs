//! Fixed edit instructions offered by the editor panels.
use serde::Serialize;

use crate::error::AppResult;
use crate::prompt::constructor::PromptConstructor;
use crate::prompt::suggestions::SuggestionKind;

/// The editor's tool panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Adjustments,
    Actions,
    Custom,
    Card,
    Lut,
}

impl Panel {
    pub const ALL: [Panel; 5] = [Panel::Adjustments, Panel::Actions, Panel::Lut, Panel::Custom, Panel::Card];

    pub fn label(self) -> &'static str {
        match self {
            Panel::Adjustments => "Adjust",
            Panel::Actions => "Actions",
            Panel::Custom => "Edit",
            Panel::Card => "Card",
            Panel::Lut => "LUT",
        }
    }

    /// Server suggestion that can seed this panel's text, if any.
    pub fn suggestion(self) -> Option<SuggestionKind> {
        match self {
            Panel::Card => Some(SuggestionKind::Inspiration),
            Panel::Lut => Some(SuggestionKind::Lut),
            Panel::Actions => Some(SuggestionKind::Magic),
            Panel::Adjustments | Panel::Custom => None,
        }
    }

    /// Turn the panel's free text into the instruction sent to the model.
    ///
    /// Returns `None` for blank input and for the adjustments panel, whose
    /// instruction comes from the sliders instead.
    pub fn instruction(self, text: &str) -> AppResult<Option<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let prompt = match self {
            Panel::Adjustments => return Ok(None),
            Panel::Actions | Panel::Custom => text.to_string(),
            Panel::Card => card_prompt(text)?,
            Panel::Lut => lut_prompt(text)?,
        };
        Ok(Some(prompt))
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickAction {
    pub name: &'static str,
    pub label: &'static str,
    /// `None` means the instruction is generated by the server.
    pub prompt: Option<&'static str>,
}

const ENHANCE_PROMPT: &str = "You are an expert photo retoucher focused on technical accuracy and realism, not artistic interpretation. \
Never darken the overall image or add any dark veil unless it is clearly and severely overexposed; if the image is dark, make it brighter and clearer in a natural way. \
First analyse the image as if reading a histogram and a vectorscope: exposure and contrast, white balance and colour casts, saturation, sharpness and detail. \
Then correct only what the analysis found: lift underexposed midtones and open shadows without noise, recover only blown highlights, add subtle contrast to flat images, \
neutralise colour casts, raise vibrance gently on dull colours, and apply fine sharpening to soft images without halos. \
Leave every parameter that is already correct untouched. The result must look clean, balanced and realistic, never filtered.";

pub static QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction { name: "enhance", label: "Enhance", prompt: Some(ENHANCE_PROMPT) },
    QuickAction { name: "magic", label: "Magic", prompt: None },
    QuickAction {
        name: "bw",
        label: "Black & White",
        prompt: Some("Convert this image to high-contrast black and white."),
    },
    QuickAction {
        name: "remove-background",
        label: "Remove Background",
        prompt: Some("Remove the background from this image perfectly, leaving only the main subject. Make the background transparent."),
    },
    QuickAction {
        name: "day-to-night",
        label: "Day > Night",
        prompt: Some("Turn this photo from day to night. Add realistic moonlight, shadows and perhaps a few stars in the sky."),
    },
    QuickAction {
        name: "golden-hour",
        label: "Golden Hour",
        prompt: Some("Bathe this image in the warm, soft, low light of golden hour just before sunset. Enhance warm tones and create long, soft shadows."),
    },
    QuickAction {
        name: "color-splash",
        label: "Color Splash",
        prompt: Some("Convert this image to black and white, but keep the main subject in its original vivid colours."),
    },
    QuickAction {
        name: "sketch",
        label: "Sketch",
        prompt: Some("Turn this photo into a detailed pencil sketch. It should look hand drawn with clean lines and shading on a paper-like texture."),
    },
];

pub fn quick_action(name: &str) -> Option<&'static QuickAction> {
    QUICK_ACTIONS.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LutPreset {
    pub name: &'static str,
    pub look: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LutCategory {
    pub name: &'static str,
    pub luts: &'static [LutPreset],
}

pub static LUT_CATEGORIES: &[LutCategory] = &[
    LutCategory {
        name: "Cinematic",
        luts: &[
            LutPreset {
                name: "Teal & Orange",
                look: "A cinematic teal and orange grade: shadows and cool tones pushed toward cyan, skin tones and highlights toward orange for a vibrant, contrasty look.",
            },
            LutPreset {
                name: "Matrix",
                look: "The iconic green cast of The Matrix across shadows and midtones, higher contrast and slightly desaturated other colours for a cold, technological feel.",
            },
            LutPreset {
                name: "Wes Anderson",
                look: "A pastel palette dominated by yellows, pinks and light blues, slightly raised saturation and balanced contrast for a clean, symmetrical look.",
            },
            LutPreset {
                name: "Dune",
                look: "An almost monochrome palette of sand, ochre and grey, desaturated colours and soft contrast for a vast, majestic atmosphere.",
            },
            LutPreset {
                name: "Modern Blockbuster",
                look: "Raised contrast, slightly desaturated colours except the primaries, a subtle vignette and deep shadows with a cool cast.",
            },
        ],
    },
    LutCategory {
        name: "Vintage Film",
        luts: &[
            LutPreset {
                name: "Kodachrome '70s",
                look: "A 1970s Kodachrome look: warm yellows and reds, slightly desaturated blues, a touch more contrast and very fine film grain.",
            },
            LutPreset {
                name: "Faded Polaroid",
                look: "An old Polaroid: lowered contrast with milky blacks, a warm yellow-magenta cast and slightly desaturated colours.",
            },
            LutPreset {
                name: "Portra 400",
                look: "Kodak Portra 400: very natural skin tones, warm colours, fine grain and soft contrast.",
            },
            LutPreset {
                name: "Cross Processing",
                look: "Cross-processed film: raised contrast, blue-green shadows, yellow-red highlights and boosted saturation.",
            },
        ],
    },
    LutCategory {
        name: "Creative",
        luts: &[
            LutPreset {
                name: "Moody Forest",
                look: "Desaturated yellows and reds, deeper greens and blues, light contrast and a damp, mysterious mood.",
            },
            LutPreset {
                name: "Light & Airy",
                look: "Much brighter exposure, lifted shadows for lower contrast and a light pastel pink or peach cast.",
            },
            LutPreset {
                name: "Cyberpunk Neon",
                look: "Higher contrast, deep blacks and neon magenta, cyan and electric blue reflections in dark and lit areas.",
            },
            LutPreset {
                name: "Split Toning",
                look: "Classic split toning with cool blue shadows and warm orange highlights for depth and a cinematic feel.",
            },
        ],
    },
    LutCategory {
        name: "Black & White",
        luts: &[
            LutPreset {
                name: "Film Noir",
                look: "Dramatic high-contrast black and white with deep blacks, bright but not clipped highlights and extra sharpness.",
            },
            LutPreset {
                name: "Soft Portrait",
                look: "Soft, flattering black and white with slightly reduced contrast and gentle tonal transitions on skin.",
            },
            LutPreset {
                name: "Selenium Toning",
                look: "Black and white with a very slight purple cast in the deepest shadows for added tonal richness.",
            },
        ],
    },
];

pub fn find_lut(name: &str) -> Option<&'static LutPreset> {
    LUT_CATEGORIES
        .iter()
        .flat_map(|c| c.luts.iter())
        .find(|l| l.name.eq_ignore_ascii_case(name))
}

const CARD_TEMPLATE: &str = "Using the main subject (person, pet, etc.) of the provided image, create a beautiful, modern greeting card. \
The theme is: \"{{theme}}\". Integrate the subject seamlessly into the new scene. The card must be visually stunning and well composed.";

const LUT_TEMPLATE: &str = "You are a professional colorist. Apply a color grade (LUT) to the image based on this description: \"{{look}}\". \
Focus on changing colours, contrast and overall mood to reach this look while keeping the details of the original image.";

pub fn card_prompt(theme: &str) -> AppResult<String> {
    PromptConstructor::new().with("theme", theme.trim()).construct_prompt(CARD_TEMPLATE)
}

pub fn lut_prompt(look: &str) -> AppResult<String> {
    PromptConstructor::new().with("look", look.trim()).construct_prompt(LUT_TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_and_lut_wrap_their_text() {
        let card = card_prompt("  birthday on the moon ").unwrap();
        assert!(card.contains("\"birthday on the moon\""));
        let lut = lut_prompt(find_lut("matrix").unwrap().look).unwrap();
        assert!(lut.starts_with("You are a professional colorist."));
        assert!(lut.contains("green cast"));
    }

    #[test]
    fn panels_route_text_to_instructions() {
        assert_eq!(Panel::Custom.instruction("  make it pop ").unwrap().as_deref(), Some("make it pop"));
        assert_eq!(Panel::Custom.instruction("   ").unwrap(), None);
        assert_eq!(Panel::Adjustments.instruction("ignored").unwrap(), None);
        assert!(Panel::Card.instruction("holidays").unwrap().unwrap().contains("greeting card"));
        assert_eq!(Panel::Lut.suggestion(), Some(SuggestionKind::Lut));
        assert_eq!(Panel::Custom.suggestion(), None);
        let labels: Vec<_> = Panel::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["Adjust", "Actions", "LUT", "Edit", "Card"]);
    }

    #[test]
    fn quick_actions_are_unique_and_findable() {
        for action in QUICK_ACTIONS {
            assert!(std::ptr::eq(quick_action(action.name).unwrap(), action));
            assert_eq!(QUICK_ACTIONS.iter().filter(|a| a.name == action.name).count(), 1);
        }
        for category in LUT_CATEGORIES {
            for lut in category.luts {
                assert!(std::ptr::eq(find_lut(lut.name).unwrap(), lut));
            }
        }
        assert!(quick_action("MAGIC").unwrap().prompt.is_none());
        assert!(quick_action("nope").is_none());
    }
}
