use crate::core::easing::Easing;
use crate::core::property::{PropertyKey, PropertyValue};

/// Active interpolation of one property toward a target value.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub key: PropertyKey,
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub start_time_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

/// Value produced by sampling a [`Transition`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSample {
    pub value: PropertyValue,
    pub finished: bool,
}

impl Transition {
    #[must_use]
    pub fn new(
        key: PropertyKey,
        from: PropertyValue,
        to: PropertyValue,
        start_time_ms: f64,
        duration_ms: f64,
        easing: Easing,
    ) -> Self {
        Self {
            key,
            from,
            to,
            start_time_ms,
            duration_ms: if duration_ms.is_finite() {
                duration_ms.max(0.0)
            } else {
                0.0
            },
            easing,
        }
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_time_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Value at `now_ms`. Settles exactly on `to` once finished.
    ///
    /// Non-interpolable values hold `from` until the end, except a switch to
    /// `visible: true`, which happens immediately so the fade-in is seen.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> TransitionSample {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return TransitionSample {
                value: self.to.clone(),
                finished: true,
            };
        }

        let eased = self.easing.apply(progress);
        let value = self
            .from
            .interpolate(&self.to, eased)
            .unwrap_or_else(|| {
                if self.switches_at_start() {
                    self.to.clone()
                } else {
                    self.from.clone()
                }
            });
        TransitionSample {
            value,
            finished: false,
        }
    }

    fn switches_at_start(&self) -> bool {
        self.key == PropertyKey::Visible && self.to == PropertyValue::Bool(true)
    }
}
