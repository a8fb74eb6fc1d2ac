pub mod adjustments;
pub mod constructor;
pub mod presets;
pub mod suggestions;
