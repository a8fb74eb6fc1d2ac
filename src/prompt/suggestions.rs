//! Meta-prompts asking the text model for fresh edit ideas.
//!
//! Each request combines a few randomly picked ingredients so repeated
//! calls produce different suggestions.
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::prompt::constructor::PromptConstructor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Greeting-card idea for a theme.
    Inspiration,
    /// A surprising magical effect for an existing photo.
    Magic,
    /// A color grade description.
    Lut,
}

impl SuggestionKind {
    pub fn path(self) -> &'static str {
        match self {
            SuggestionKind::Inspiration => "/api/inspiration",
            SuggestionKind::Magic => "/api/magic",
            SuggestionKind::Lut => "/api/lut",
        }
    }

    /// Used by the client when the server cannot provide a suggestion.
    pub fn fallback(self, theme: &str) -> String {
        match self {
            SuggestionKind::Inspiration => format!(
                "An error prevented generating an idea. Try: a scene themed around {}.",
                theme.trim()
            ),
            SuggestionKind::Magic => "Apply a magical, almost fantasy-like effect to this image.".to_string(),
            SuggestionKind::Lut => "Cinematic mood with warm colours and deep shadows.".to_string(),
        }
    }

    /// Message returned when the model blocks this kind of suggestion.
    pub fn safety_message(self) -> &'static str {
        match self {
            SuggestionKind::Inspiration => "Generating the suggestion was blocked for safety reasons.",
            SuggestionKind::Magic => "Generating the magic suggestion was blocked for safety reasons.",
            SuggestionKind::Lut => "Generating the LUT suggestion was blocked for safety reasons.",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            SuggestionKind::Inspiration => "The inspiration response from the API was empty.",
            SuggestionKind::Magic => "The magic suggestion response from the API was empty.",
            SuggestionKind::Lut => "The LUT inspiration response from the API was empty.",
        }
    }
}

/// Greeting-card themes offered as one-click inspiration.
pub const CARD_THEMES: &[&str] = &["Birthday", "Holidays", "Thank You", "Romantic", "Congratulations", "Friendship"];

const STYLES: &[&str] = &[
    "watercolor", "epic fantasy", "minimalist and modern", "neon cyberpunk", "fairy-tale and enchanted",
    "abstract art", "vintage comic", "photorealistic and cinematic", "surreal and dreamlike", "pixel art",
    "art deco", "steampunk", "impressionist",
];

const SETTINGS: &[&str] = &[
    "on a tropical beach at sunset", "in a magic forest lit by lanterns", "in a futuristic metropolis",
    "on a snowy mountain peak", "inside a medieval castle", "in a secret flower garden",
    "on the moon with the Earth in the background", "in a cosy Parisian cafe", "underwater among glowing corals",
    "in a vast sunflower field", "in an orbiting space station", "in a picturesque village", "in the desert at night",
];

const MOODS: &[&str] = &[
    "joyful and celebratory", "serene and peaceful", "mysterious and intriguing", "energetic and vibrant",
    "nostalgic and dreamy", "warm and cosy", "adventurous and exciting", "elegant and sophisticated",
    "witty and fun", "epic and grand", "calm and relaxing",
];

const MAGICAL_STYLES: &[&str] = &[
    "ethereal and luminous", "dark and mysterious", "enchanted and fairy-tale", "cosmic and celestial",
    "crystalline and iridescent", "gothic and spectral", "steampunk with glowing gears", "organic and bioluminescent",
];

const MAGICAL_ELEMENTS: &[&str] = &[
    "dancing light particles", "coloured enchanted mist", "an aura of crackling energy",
    "floating crystals refracting light", "flowers blooming instantly", "rainbow energy trails",
    "ancient runes glowing faintly", "gently falling stardust",
];

const MAGICAL_MOODS: &[&str] = &[
    "dreamy and surreal", "powerful and epic", "serene and calm", "playful and whimsical",
    "ancient and solemn", "melancholic but beautiful",
];

const PALETTES: &[&str] = &[
    "warm earth tones (ochre, terracotta, brown)", "cool desaturated tones (steel blue, grey, cyan)",
    "dreamy pastels (pink, lavender, mint)", "monochrome palette with a single accent colour",
    "vibrant neon colours (magenta, acid green, electric blue)", "autumn tones (rust, gold, burgundy)",
];

const LIGHTING: &[&str] = &[
    "soft diffused overcast light", "strong dramatic contrast from direct sunlight",
    "dark mysterious atmosphere with deep shadows", "warm golden sunset light",
    "ethereal backlighting", "matte look with lifted shadows",
];

const FILM_STOCKS: &[&str] = &[
    "modern cinema film emulation", "faded vintage film", "high-contrast black and white",
    "clean commercial look", "fine organic film grain",
];

const INSPIRATION_TEMPLATE: &str = "You are an extremely creative idea generator. Your job is to write a prompt for another AI that generates images. \
Write a short, original and visually striking description for a greeting card.\n\n\
Strict rules:\n\
1. The description must always be different and unexpected.\n\
2. At most 15 words.\n\
3. Reply ONLY with the description, nothing else.\n\n\
Combine these elements creatively:\n\
- Main theme: \"{{theme}}\"\n\
- Art style: \"{{style}}\"\n\
- Setting: \"{{setting}}\"\n\
- Mood: \"{{mood}}\"\n\n\
Example output: \"A cat celebrates its birthday on the moon in watercolor style.\"\n\nNow it's your turn. Be bold.";

const MAGIC_TEMPLATE: &str = "You craft visual spells for a photo-editing AI. Write a short, descriptive prompt (at most 15 words) \
that transforms an existing photo with a unique, surprising magical effect. The prompt must be a direct, clear instruction for the AI performing the edit. \
Reply ONLY with the prompt, nothing else. Combine a '{{style}}' style, elements like '{{element}}' and a '{{mood}}' mood in an original way. \
Example output: Wrap the subject in an ethereal aura of dancing light particles.";

const LUT_TEMPLATE: &str = "You are a professional colorist. Write a descriptive prompt for an AI that will apply a color grade (LUT) to an image. \
Be evocative and technical.\n\n\
Rules:\n\
1. At most 20 words.\n\
2. Reply ONLY with the description, nothing else.\n\n\
Combine these elements creatively:\n\
- Colour palette: \"{{palette}}\"\n\
- Lighting style: \"{{lighting}}\"\n\
- Film inspiration: \"{{film}}\"\n\n\
Example: A cinematic look with warm earth tones and deep, cool shadows.\n\nYour turn.";

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Build the instruction sent to the text model for `kind`.
pub fn meta_prompt<R: Rng + ?Sized>(kind: SuggestionKind, theme: &str, rng: &mut R) -> AppResult<String> {
    let constructor = match kind {
        SuggestionKind::Inspiration => PromptConstructor::new()
            .with("theme", theme.trim())
            .with("style", pick(rng, STYLES))
            .with("setting", pick(rng, SETTINGS))
            .with("mood", pick(rng, MOODS)),
        SuggestionKind::Magic => PromptConstructor::new()
            .with("style", pick(rng, MAGICAL_STYLES))
            .with("element", pick(rng, MAGICAL_ELEMENTS))
            .with("mood", pick(rng, MAGICAL_MOODS)),
        SuggestionKind::Lut => PromptConstructor::new()
            .with("palette", pick(rng, PALETTES))
            .with("lighting", pick(rng, LIGHTING))
            .with("film", pick(rng, FILM_STOCKS)),
    };
    let template = match kind {
        SuggestionKind::Inspiration => INSPIRATION_TEMPLATE,
        SuggestionKind::Magic => MAGIC_TEMPLATE,
        SuggestionKind::Lut => LUT_TEMPLATE,
    };
    constructor.construct_prompt(template)
}

/// Trim model output and drop quote characters.
pub fn clean_suggestion(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != '"' && *c != '\'').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn meta_prompts_fill_every_placeholder() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in [SuggestionKind::Inspiration, SuggestionKind::Magic, SuggestionKind::Lut] {
            let prompt = meta_prompt(kind, "Birthday", &mut rng).unwrap();
            assert!(!prompt.contains("{{"), "{:?} left a placeholder", kind);
        }
        let card = meta_prompt(SuggestionKind::Inspiration, " Romantic ", &mut rng).unwrap();
        assert!(card.contains("\"Romantic\""));
    }

    #[test]
    fn cleaning_strips_quotes_and_whitespace() {
        assert_eq!(clean_suggestion("  \"A cat's party on the moon\"\n"), "A cats party on the moon");
        assert_eq!(clean_suggestion("  "), "");
    }

    #[test]
    fn kinds_map_to_relay_paths() {
        assert_eq!(SuggestionKind::Magic.path(), "/api/magic");
        assert!(SuggestionKind::Inspiration.fallback("Friendship").contains("Friendship"));
    }
}
