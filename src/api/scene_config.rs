use serde::{Deserialize, Serialize};

use crate::core::Easing;
use crate::core::geometry::Size;
use crate::error::{SceneError, SceneResult};

/// Public scene bootstrap configuration.
///
/// This type is serializable so host applications can persist/load scene setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub surface_width: f64,
    pub surface_height: f64,
    /// Used by states that do not set their own duration.
    #[serde(default)]
    pub default_transition_duration_ms: f64,
    #[serde(default)]
    pub default_easing: Easing,
    /// Toggle `hover`/`default` states on pointer over/out.
    #[serde(default = "default_hover_states_enabled")]
    pub hover_states_enabled: bool,
}

fn default_hover_states_enabled() -> bool {
    true
}

impl SceneConfig {
    /// Creates a config for a host surface of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            surface_width: width,
            surface_height: height,
            default_transition_duration_ms: 0.0,
            default_easing: Easing::Linear,
            hover_states_enabled: default_hover_states_enabled(),
        }
    }

    /// Sets the fallback transition duration for states.
    #[must_use]
    pub fn with_default_transition_duration_ms(mut self, duration_ms: f64) -> Self {
        self.default_transition_duration_ms = duration_ms;
        self
    }

    /// Sets the fallback easing for states.
    #[must_use]
    pub fn with_default_easing(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        self
    }

    #[must_use]
    pub fn with_hover_states_enabled(mut self, enabled: bool) -> Self {
        self.hover_states_enabled = enabled;
        self
    }

    #[must_use]
    pub fn surface(self) -> Size {
        Size::new(self.surface_width, self.surface_height)
    }

    pub fn validate(self) -> SceneResult<()> {
        if !self.surface_width.is_finite()
            || !self.surface_height.is_finite()
            || self.surface_width <= 0.0
            || self.surface_height <= 0.0
        {
            return Err(SceneError::InvalidSurface {
                width: self.surface_width,
                height: self.surface_height,
            });
        }
        if !self.default_transition_duration_ms.is_finite()
            || self.default_transition_duration_ms < 0.0
        {
            return Err(SceneError::InvalidConfig(
                "default transition duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}
