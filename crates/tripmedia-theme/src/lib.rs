//! Light/dark display preference controller.
//!
//! Resolves the effective theme with the precedence stored choice ->
//! system color-scheme signal -> light, applies it to a presentation sink,
//! and persists explicit user toggles under the durable `"theme"` key.
//! Viewing alone never creates a stored preference.

pub mod controller;
pub mod store;

pub use controller::{
    ColorSchemeProbe, EnvColorSchemeProbe, NoopThemeSink, ThemeController, ThemeSink,
};
pub use store::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceResult,
    PreferenceStore, THEME_KEY,
};
