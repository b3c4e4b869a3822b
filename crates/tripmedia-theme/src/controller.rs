//! Theme resolution and application.

use std::str::FromStr;
use std::sync::Arc;

use tripmedia_core::Theme;

use crate::store::{PreferenceResult, PreferenceStore, THEME_KEY};

/// System-level color-scheme signal (the `prefers-color-scheme` analogue).
pub trait ColorSchemeProbe: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

/// Probe backed by an environment variable; dark iff its value is `dark`.
#[derive(Debug, Clone)]
pub struct EnvColorSchemeProbe {
    var: String,
}

impl EnvColorSchemeProbe {
    pub const DEFAULT_VAR: &'static str = "TRIPMEDIA_COLOR_SCHEME";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvColorSchemeProbe {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl ColorSchemeProbe for EnvColorSchemeProbe {
    fn prefers_dark(&self) -> bool {
        std::env::var(&self.var)
            .map(|value| value.eq_ignore_ascii_case("dark"))
            .unwrap_or(false)
    }
}

/// Presentation surface consuming the active theme (the document-attribute
/// analogue). Applying is idempotent and infallible.
pub trait ThemeSink: Send + Sync {
    fn apply(&self, theme: Theme);
}

/// Sink for hosts with no presentation surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThemeSink;

impl ThemeSink for NoopThemeSink {
    fn apply(&self, _theme: Theme) {}
}

/// Resolves, applies, and persists the display theme.
///
/// The effective theme comes from the stored preference when one exists,
/// else the color-scheme probe, else light. Only [`ThemeController::toggle`]
/// writes to storage; resolving and applying never do.
pub struct ThemeController {
    store: Arc<dyn PreferenceStore>,
    probe: Arc<dyn ColorSchemeProbe>,
    sink: Arc<dyn ThemeSink>,
}

impl ThemeController {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        probe: Arc<dyn ColorSchemeProbe>,
        sink: Arc<dyn ThemeSink>,
    ) -> Self {
        Self { store, probe, sink }
    }

    /// Resolve and apply the effective theme. Called once at startup; does
    /// not write a preference.
    pub fn init(&self) -> PreferenceResult<Theme> {
        let theme = self.preferred_theme()?;
        self.sink.apply(theme);
        Ok(theme)
    }

    /// Stored preference if present, else the color-scheme signal, else
    /// light. No side effects.
    pub fn preferred_theme(&self) -> PreferenceResult<Theme> {
        if let Some(stored) = self.store.get(THEME_KEY)? {
            match Theme::from_str(&stored) {
                Ok(theme) => return Ok(theme),
                Err(_) => {
                    tracing::warn!(value = %stored, "Ignoring unrecognized stored theme");
                }
            }
        }

        if self.probe.prefers_dark() {
            Ok(Theme::Dark)
        } else {
            Ok(Theme::Light)
        }
    }

    /// Apply `theme` to the presentation surface. No storage write.
    pub fn set_theme(&self, theme: Theme) {
        self.sink.apply(theme);
    }

    /// Flip the preferred theme, persist the new value, and apply it.
    pub fn toggle(&self) -> PreferenceResult<Theme> {
        let next = self.preferred_theme()?.toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.sink.apply(next);

        tracing::debug!(theme = %next, "Persisted theme preference");
        Ok(next)
    }
}
