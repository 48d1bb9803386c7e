/// Output sample formats the engine can write.
///
/// `from_unit` takes a value in [-1, 1] and scales it to half of the format's
/// full range. The spare 6 dB keeps driving transients from clipping.
pub trait OutputSample: Copy + Send + 'static {
    fn from_unit(value: f64) -> Self;
}

/// Scale for signed 16-bit PCM: `i16::MAX / 2`.
pub const I16_HALF_SCALE: f64 = (i16::MAX / 2) as f64;

impl OutputSample for i16 {
    #[inline]
    fn from_unit(value: f64) -> Self {
        // `as` saturates and maps NaN to 0.
        (value * I16_HALF_SCALE).round() as i16
    }
}

impl OutputSample for f32 {
    #[inline]
    fn from_unit(value: f64) -> Self {
        (value * 0.5) as f32
    }
}
