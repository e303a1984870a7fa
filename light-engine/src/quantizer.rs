/// Converts a smoothed level into the brightness byte sent to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    max_brightness: u8,
}

impl Quantizer {
    pub fn new(max_brightness: u8) -> Self {
        Self { max_brightness }
    }

    /// `round(level * 255)`, clamped to `[0, max_brightness]`.
    pub fn quantize(&self, level: f32) -> u8 {
        let code = libm::roundf(level * 255.0);
        // NaN saturates to 0 in the cast.
        code.clamp(0.0, self.max_brightness as f32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_BRIGHTNESS;

    #[test]
    fn test_full_level_is_clamped_below_headers() {
        let quantizer = Quantizer::new(MAX_BRIGHTNESS);
        assert_eq!(quantizer.quantize(1.0), 247);
        assert_eq!(quantizer.quantize(0.0), 0);
    }

    #[test]
    fn test_rounds_to_nearest() {
        let quantizer = Quantizer::new(MAX_BRIGHTNESS);
        assert_eq!(quantizer.quantize(0.5), 128); // 127.5
        assert_eq!(quantizer.quantize(0.1), 26); // 25.5
        assert_eq!(quantizer.quantize(100.0 / 255.0), 100);
    }

    #[test]
    fn test_bounded_for_every_level() {
        let quantizer = Quantizer::new(MAX_BRIGHTNESS);
        for step in 0..=10_000 {
            let level = step as f32 / 10_000.0;
            assert!(quantizer.quantize(level) <= MAX_BRIGHTNESS);
        }
        assert_eq!(quantizer.quantize(-3.0), 0);
        assert_eq!(quantizer.quantize(f32::NAN), 0);
    }
}
