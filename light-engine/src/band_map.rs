use core::fmt;
use core::ops::Range;

/// How the spectrum is split into channel bands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum BandSpread {
    /// Equal-width bands, back to back, starting at `first_bin`.
    Contiguous { first_bin: usize, width: usize },
    /// Bands growing geometrically from `first_bin` up to `last_bin`
    /// (exclusive). `exp_factor == 1.0` degenerates to an even split.
    Exponential {
        first_bin: usize,
        last_bin: usize,
        exp_factor: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum BandMapError {
    NoChannels,
    /// The first band reaches into the DC bin.
    IncludesDc,
    EmptyBand { channel: usize },
    Overlap { channel: usize },
    OutOfSpectrum { channel: usize, end: usize, spectrum_len: usize },
    /// Not enough bins between `first_bin` and `last_bin` to give every
    /// channel at least one.
    TooNarrow { bins: usize, channels: usize },
    ExpFactor { exp_factor: f32 },
}

impl fmt::Display for BandMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandMapError::NoChannels => write!(f, "at least one channel is required"),
            BandMapError::IncludesDc => write!(f, "bands must not include the DC bin"),
            BandMapError::EmptyBand { channel } => write!(f, "band {channel} is empty"),
            BandMapError::Overlap { channel } => {
                write!(f, "band {channel} overlaps the previous band")
            }
            BandMapError::OutOfSpectrum {
                channel,
                end,
                spectrum_len,
            } => write!(
                f,
                "band {channel} ends at bin {end}, past the {spectrum_len}-bin spectrum"
            ),
            BandMapError::TooNarrow { bins, channels } => {
                write!(f, "{bins} bins cannot be split into {channels} bands")
            }
            BandMapError::ExpFactor { exp_factor } => write!(
                f,
                "exponential factor must be greater than 0. Got: {exp_factor}"
            ),
        }
    }
}

/// Static assignment of spectrum bins to channels.
///
/// Band `i` covers bins `ranges[i].0 .. ranges[i].1`. Bands are ascending,
/// non-empty, never overlap and never touch bin 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandMap<const C: usize> {
    ranges: [(u16, u16); C],
}

impl<const C: usize> BandMap<C> {
    pub fn new(spread: &BandSpread, spectrum_len: usize) -> Result<Self, BandMapError> {
        if C == 0 {
            return Err(BandMapError::NoChannels);
        }

        let ranges = match *spread {
            BandSpread::Contiguous { first_bin, width } => {
                Self::calculate_contiguous_bands(first_bin, width, spectrum_len)?
            }
            BandSpread::Exponential {
                first_bin,
                last_bin,
                exp_factor,
            } => {
                if exp_factor <= 0.0 || !exp_factor.is_finite() {
                    return Err(BandMapError::ExpFactor { exp_factor });
                }
                let bins = last_bin.saturating_sub(first_bin);
                if bins < C {
                    return Err(BandMapError::TooNarrow { bins, channels: C });
                }
                if last_bin > spectrum_len {
                    return Err(BandMapError::OutOfSpectrum {
                        channel: C - 1,
                        end: last_bin,
                        spectrum_len,
                    });
                }
                Self::calculate_exponential_bands(first_bin, last_bin, exp_factor, spectrum_len)?
            }
        };

        Self::from_ranges(ranges, spectrum_len)
    }

    /// Validate an explicit list of `(start, end)` bin ranges.
    pub fn from_ranges(ranges: [(u16, u16); C], spectrum_len: usize) -> Result<Self, BandMapError> {
        if C == 0 {
            return Err(BandMapError::NoChannels);
        }
        if ranges.first().is_some_and(|&(start, _)| start == 0) {
            return Err(BandMapError::IncludesDc);
        }

        let mut previous_end = 0;
        for (channel, &(start, end)) in ranges.iter().enumerate() {
            if start >= end {
                return Err(BandMapError::EmptyBand { channel });
            }
            if start < previous_end {
                return Err(BandMapError::Overlap { channel });
            }
            if end as usize > spectrum_len {
                return Err(BandMapError::OutOfSpectrum {
                    channel,
                    end: end as usize,
                    spectrum_len,
                });
            }
            previous_end = end;
        }

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[(u16, u16); C] {
        &self.ranges
    }

    /// Spectrum indices feeding `channel`.
    pub fn band(&self, channel: usize) -> Range<usize> {
        let (start, end) = self.ranges[channel];
        start as usize..end as usize
    }

    /// Lowest bin used by any channel.
    pub fn first_bin(&self) -> usize {
        self.ranges[0].0 as usize
    }

    /// One past the highest bin used by any channel.
    pub fn end_bin(&self) -> usize {
        self.ranges[C - 1].1 as usize
    }

    fn calculate_contiguous_bands(
        first_bin: usize,
        width: usize,
        spectrum_len: usize,
    ) -> Result<[(u16, u16); C], BandMapError> {
        let mut band_ranges = [(0, 0); C];

        for (channel, range) in band_ranges.iter_mut().enumerate() {
            let start = channel
                .checked_mul(width)
                .and_then(|offset| first_bin.checked_add(offset));
            let end = start.and_then(|start| start.checked_add(width));
            let (Some(start), Some(end)) = (start, end) else {
                return Err(BandMapError::OutOfSpectrum {
                    channel,
                    end: usize::MAX,
                    spectrum_len,
                });
            };
            *range = (
                to_bin(channel, start, spectrum_len)?,
                to_bin(channel, end, spectrum_len)?,
            );
        }

        Ok(band_ranges)
    }

    fn calculate_exponential_bands(
        first_bin: usize,
        last_bin: usize,
        exp_factor: f32,
        spectrum_len: usize,
    ) -> Result<[(u16, u16); C], BandMapError> {
        let bins = last_bin - first_bin;
        let linear = libm::fabsf(exp_factor - 1.0) < 1e-6;
        let boundary = |i: usize| -> usize {
            let fraction = i as f32 / C as f32;
            let scaled = if linear {
                fraction
            } else {
                (libm::powf(exp_factor, fraction) - 1.0) / (exp_factor - 1.0)
            };
            first_bin + ((scaled * bins as f32) as usize).min(bins)
        };

        let mut band_ranges = [(0, 0); C];
        let mut start = first_bin;
        for (channel, range) in band_ranges.iter_mut().enumerate() {
            let remaining = C - channel - 1;
            let end = if remaining == 0 {
                last_bin
            } else {
                // Keep every band at least one bin wide.
                boundary(channel + 1).max(start + 1).min(last_bin - remaining)
            };
            *range = (
                to_bin(channel, start, spectrum_len)?,
                to_bin(channel, end, spectrum_len)?,
            );
            start = end;
        }
        Ok(band_ranges)
    }
}

/// Bin index of a band edge, rejected if it lies past the spectrum or does
/// not fit the compact `u16` storage.
fn to_bin(channel: usize, bin: usize, spectrum_len: usize) -> Result<u16, BandMapError> {
    if bin > spectrum_len {
        return Err(BandMapError::OutOfSpectrum {
            channel,
            end: bin,
            spectrum_len,
        });
    }
    u16::try_from(bin).map_err(|_| BandMapError::OutOfSpectrum {
        channel,
        end: bin,
        spectrum_len: u16::MAX as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_contiguous_bands() {
        let map = BandMap::<8>::new(&BandSpread::Contiguous { first_bin: 2, width: 3 }, 1024).unwrap();
        assert_eq!(
            map.ranges(),
            &[(2, 5), (5, 8), (8, 11), (11, 14), (14, 17), (17, 20), (20, 23), (23, 26)]
        );
        assert_eq!(map.first_bin(), 2);
        assert_eq!(map.end_bin(), 26);
        assert_eq!(map.band(7), 23..26);
    }

    #[test]
    fn test_calculate_exponential_spread_bands() {
        let map = BandMap::<4>::new(
            &BandSpread::Exponential { first_bin: 1, last_bin: 33, exp_factor: 7.0 },
            512,
        )
        .unwrap();
        assert_eq!(map.ranges(), &[(1, 4), (4, 9), (9, 18), (18, 33)]);
    }

    #[test]
    fn test_exponential_factor_one_is_even() {
        let map = BandMap::<4>::new(
            &BandSpread::Exponential { first_bin: 4, last_bin: 20, exp_factor: 1.0 },
            512,
        )
        .unwrap();
        assert_eq!(map.ranges(), &[(4, 8), (8, 12), (12, 16), (16, 20)]);
    }

    #[test]
    fn test_exponential_keeps_low_bands_non_empty() {
        // A steep curve would collapse the first bands onto the same bin.
        let map = BandMap::<8>::new(
            &BandSpread::Exponential { first_bin: 2, last_bin: 12, exp_factor: 1000.0 },
            512,
        )
        .unwrap();
        let mut previous_end = 2;
        for &(start, end) in map.ranges() {
            assert_eq!(start, previous_end);
            assert!(end > start);
            previous_end = end;
        }
        assert_eq!(previous_end, 12);
    }

    #[test]
    fn test_exponential_rejects_bad_input() {
        let narrow = BandMap::<8>::new(
            &BandSpread::Exponential { first_bin: 2, last_bin: 6, exp_factor: 2.0 },
            512,
        );
        assert_eq!(narrow, Err(BandMapError::TooNarrow { bins: 4, channels: 8 }));

        let factor = BandMap::<2>::new(
            &BandSpread::Exponential { first_bin: 2, last_bin: 60, exp_factor: -1.0 },
            512,
        );
        assert_eq!(factor, Err(BandMapError::ExpFactor { exp_factor: -1.0 }));
    }

    #[test]
    fn test_rejects_dc_and_spectrum_overflow() {
        let dc = BandMap::<2>::new(&BandSpread::Contiguous { first_bin: 0, width: 3 }, 512);
        assert_eq!(dc, Err(BandMapError::IncludesDc));

        let overflow = BandMap::<8>::new(&BandSpread::Contiguous { first_bin: 2, width: 3 }, 20);
        assert!(matches!(overflow, Err(BandMapError::OutOfSpectrum { channel: 6, .. })));

        let empty = BandMap::<2>::new(&BandSpread::Contiguous { first_bin: 2, width: 0 }, 512);
        assert_eq!(empty, Err(BandMapError::EmptyBand { channel: 0 }));
    }

    #[test]
    fn test_huge_width_is_rejected_without_overflow() {
        let result = BandMap::<8>::new(
            &BandSpread::Contiguous { first_bin: 2, width: usize::MAX / 4 },
            1024,
        );
        assert!(matches!(result, Err(BandMapError::OutOfSpectrum { channel: 0, .. })));

        let result = BandMap::<8>::new(
            &BandSpread::Contiguous { first_bin: usize::MAX - 1, width: 3 },
            1024,
        );
        assert!(matches!(result, Err(BandMapError::OutOfSpectrum { channel: 0, .. })));

        let result = BandMap::<4>::new(
            &BandSpread::Exponential { first_bin: 2, last_bin: usize::MAX, exp_factor: 2.0 },
            1024,
        );
        assert!(matches!(result, Err(BandMapError::OutOfSpectrum { channel: 3, .. })));
    }

    #[test]
    fn test_from_ranges_allows_gaps_but_not_overlap() {
        assert!(BandMap::from_ranges([(2, 4), (6, 9)], 16).is_ok());
        assert_eq!(
            BandMap::from_ranges([(2, 5), (4, 9)], 16),
            Err(BandMapError::Overlap { channel: 1 })
        );
    }

    #[test]
    fn test_zero_channels() {
        assert_eq!(
            BandMap::<0>::from_ranges([], 16),
            Err(BandMapError::NoChannels)
        );
    }
}
