/// Retain factors of the two smoothing regimes.
///
/// Each frame the smoothed value keeps `retain` of itself and takes
/// `1 - retain` of the new level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct SmoothingConfig {
    /// Used while the level rises.
    pub attack: f32,
    /// Used while the level falls or holds.
    pub release: f32,
}

/// Two-regime exponential filter: fast attack so beats land on the frame
/// they occur, slow release so lights fade instead of snapping off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    attack: f32,
    release: f32,
}

impl Smoother {
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            attack: config.attack,
            release: config.release,
        }
    }

    /// Fold `target` into `smoothed` and return the new value.
    pub fn smooth(&self, smoothed: &mut f32, target: f32) -> f32 {
        let retain = if target > *smoothed {
            self.attack
        } else {
            self.release
        };
        *smoothed = retain * *smoothed + (1.0 - retain) * target;
        *smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ATTACK_RETAIN, RELEASE_RETAIN};

    fn reference() -> Smoother {
        Smoother::new(SmoothingConfig {
            attack: ATTACK_RETAIN,
            release: RELEASE_RETAIN,
        })
    }

    #[test]
    fn test_step_up_takes_half() {
        let smoother = reference();
        let mut smoothed = 0.0;
        assert_eq!(smoother.smooth(&mut smoothed, 1.0), 0.5);
        assert_eq!(smoothed, 0.5);
    }

    #[test]
    fn test_step_down_keeps_most() {
        let smoother = reference();
        let mut smoothed = 1.0;
        assert_eq!(smoother.smooth(&mut smoothed, 0.0), 0.97);
    }

    #[test]
    fn test_regime_is_chosen_every_frame() {
        let smoother = reference();
        let mut smoothed = 0.0;
        smoother.smooth(&mut smoothed, 1.0); // 0.5
        smoother.smooth(&mut smoothed, 0.2); // falls slowly
        assert!(smoothed > 0.49);
        smoother.smooth(&mut smoothed, 1.0); // rises fast again
        assert!(smoothed > 0.74);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let smoother = reference();

        for target in [0.0, 0.3, 0.77, 1.0] {
            for start in [0.0, 0.5, 1.0] {
                let mut smoothed: f32 = start;
                for _ in 0..2_000 {
                    smoother.smooth(&mut smoothed, target);
                    if start <= target {
                        assert!(smoothed <= target + 1e-6);
                    } else {
                        assert!(smoothed >= target - 1e-6);
                    }
                }
                assert!((smoothed - target).abs() < 1e-5, "{start} -> {target}: {smoothed}");
            }
        }
    }
}
