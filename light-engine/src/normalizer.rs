use crate::state::Envelope;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct NormalizerConfig {
    /// Value assigned to an intensity at `envelope.low`.
    pub out_low: f32,
    /// Value assigned to an intensity at `envelope.high`.
    pub out_high: f32,
    /// Envelopes narrower than this carry no usable signal.
    pub min_width: f32,
}

/// Result of mapping one intensity through its envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Normalized {
    Level(f32),
    /// The envelope collapsed or the input was not a number.
    Degenerate,
}

impl Normalized {
    /// The level in `[0, 1]`; degenerate inputs map to 0.
    pub fn value(self) -> f32 {
        match self {
            Normalized::Level(level) => level,
            Normalized::Degenerate => 0.0,
        }
    }

    pub fn is_degenerate(self) -> bool {
        matches!(self, Normalized::Degenerate)
    }
}

/// Linear map from the envelope onto `[out_low, out_high]`, clamped to
/// `[0, 1]`.
///
/// The output interval is deliberately wider than `[0, 1]`: intensities near
/// the tracked extremes clip a little early instead of sitting exactly on the
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, raw_intensity: f32, envelope: &Envelope) -> Normalized {
        let width = envelope.width();
        // Also catches NaN widths and inverted envelopes.
        if !(width >= self.config.min_width) || !raw_intensity.is_finite() {
            return Normalized::Degenerate;
        }

        let t = (raw_intensity - envelope.low) / width;
        let scaled = self.config.out_low + t * (self.config.out_high - self.config.out_low);
        if scaled.is_nan() {
            return Normalized::Degenerate;
        }
        Normalized::Level(scaled.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MIN_ENVELOPE_WIDTH, NORMALIZED_OUT_HIGH, NORMALIZED_OUT_LOW};
    use approx::assert_abs_diff_eq;
    use rand::Rng;

    fn reference() -> Normalizer {
        Normalizer::new(NormalizerConfig {
            out_low: NORMALIZED_OUT_LOW,
            out_high: NORMALIZED_OUT_HIGH,
            min_width: MIN_ENVELOPE_WIDTH,
        })
    }

    #[test]
    fn test_linear_map_with_headroom() {
        let normalizer = reference();
        let envelope = Envelope::new(0.0, 100.0);

        assert_eq!(normalizer.normalize(0.0, &envelope), Normalized::Level(0.0));
        assert_eq!(normalizer.normalize(100.0, &envelope), Normalized::Level(1.0));
        // -0.2 + 0.5 * 1.7 = 0.65
        assert_abs_diff_eq!(normalizer.normalize(50.0, &envelope).value(), 0.65, epsilon = 1e-6);
        // Full brightness is reached before the tracked maximum.
        assert_eq!(normalizer.normalize(71.0, &envelope), Normalized::Level(1.0));
        // And darkness before the tracked minimum.
        assert_eq!(normalizer.normalize(11.0, &envelope), Normalized::Level(0.0));
    }

    #[test]
    fn test_degenerate_envelopes() {
        let normalizer = reference();

        for envelope in [
            Envelope::new(5.0, 5.0),
            Envelope::new(5.0, 5.0 + 1e-7),
            Envelope::new(6.0, 5.0),
            Envelope::new(f32::NAN, 5.0),
        ] {
            let normalized = normalizer.normalize(5.0, &envelope);
            assert!(normalized.is_degenerate(), "{envelope:?}");
            assert_eq!(normalized.value(), 0.0);
        }

        let envelope = Envelope::new(0.0, 1.0);
        assert!(normalizer.normalize(f32::NAN, &envelope).is_degenerate());
        assert!(normalizer.normalize(f32::INFINITY, &envelope).is_degenerate());
    }

    #[test]
    fn test_output_always_clamped() {
        let normalizer = reference();
        let mut rng = rand::rng();

        for _ in 0..10_000 {
            let a: f32 = rng.random_range(-1.0e4..1.0e4);
            let b: f32 = rng.random_range(-1.0e4..1.0e4);
            let raw: f32 = rng.random_range(-1.0e5..1.0e5);
            let envelope = Envelope::new(a.min(b), a.max(b));

            let value = normalizer.normalize(raw, &envelope).value();
            assert!((0.0..=1.0).contains(&value), "{raw} in {envelope:?} -> {value}");
        }
    }
}
