//! Control surface vocabulary and the channel that carries it to the render
//! thread.
//!
//! Every slider works on a log scale: the widget moves a raw exponent and the
//! physical value is `10^raw`, scaled by `2π` for the two frequencies so users
//! think in Hz while the integrator works in rad/s. Mapping lives here so any
//! front end (TUI, MIDI, tests) shares it.

/// Lock-free `f64` cell built on `AtomicU64`.
pub mod atomic;
/// Single-writer parameter store plus the impulse accumulator.
pub mod channel;

use std::{f64::consts::TAU, ops::RangeInclusive};

use crate::SAMPLE_RATE;

pub use channel::{channel, ParamReceiver, ParamSender};

/// One of the five continuous controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    NaturalFrequency,
    Damping,
    DrivingAmplitude,
    DrivingFrequency,
    PingStrength,
}

/// A discrete event coming out of the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Move a slider to a raw (log10) position.
    Set { kind: ControlKind, raw: f64 },
    /// Kick the pendulum by the current ping strength.
    Ping,
}

impl ControlKind {
    pub const ALL: [ControlKind; 5] = [
        ControlKind::NaturalFrequency,
        ControlKind::Damping,
        ControlKind::DrivingAmplitude,
        ControlKind::DrivingFrequency,
        ControlKind::PingStrength,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Raw slider bounds. The frequency sliders stop at Nyquist.
    pub fn range(self) -> RangeInclusive<f64> {
        let nyquist = (SAMPLE_RATE as f64 / 2.0).log10();
        match self {
            ControlKind::NaturalFrequency | ControlKind::DrivingFrequency => 0.0..=nyquist,
            ControlKind::Damping => -2.0..=4.0,
            ControlKind::DrivingAmplitude => -2.0..=10.0,
            ControlKind::PingStrength => 0.0..=6.0,
        }
    }

    /// Map a raw slider position to the value stored in the oscillator.
    ///
    /// Not clamped: the slider is responsible for staying within `range()`.
    pub fn map(self, raw: f64) -> f64 {
        let value = 10f64.powf(raw);
        match self {
            ControlKind::NaturalFrequency | ControlKind::DrivingFrequency => TAU * value,
            ControlKind::Damping | ControlKind::DrivingAmplitude | ControlKind::PingStrength => {
                value
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlKind::NaturalFrequency => "Natural frequency (Hz)",
            ControlKind::Damping => "Damping coefficient",
            ControlKind::DrivingAmplitude => "Driving amplitude",
            ControlKind::DrivingFrequency => "Driving frequency (Hz)",
            ControlKind::PingStrength => "Ping strength",
        }
    }

    /// Fine slider increment in raw units.
    pub fn step(self) -> f64 {
        match self {
            ControlKind::PingStrength => 0.1,
            _ => 0.001,
        }
    }

    /// Coarse slider increment: one decade.
    pub fn page(self) -> f64 {
        1.0
    }

    /// Display precision at raw = 0.
    pub fn digits(self) -> usize {
        match self {
            ControlKind::PingStrength => 1,
            _ => 3,
        }
    }

    /// Clamp a raw position into this control's range.
    pub fn clamp(self, raw: f64) -> f64 {
        let range = self.range();
        raw.clamp(*range.start(), *range.end())
    }
}

/// Format a log-scale slider position as `10^raw`.
///
/// Precision shrinks by one decimal per decade so labels keep a constant
/// number of significant digits.
pub fn format_log(raw: f64, digits: usize) -> String {
    let precision = (digits as f64 - raw.floor()).max(0.0) as usize;
    format!("{:.*}", precision, 10f64.powf(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    #[test]
    fn damping_maps_decades() {
        assert_eq!(ControlKind::Damping.map(0.0), 1.0);
        assert!(close(ControlKind::Damping.map(2.0), 100.0));
        assert!(close(ControlKind::Damping.map(-2.0), 0.01));
        assert!(close(ControlKind::Damping.map(4.0), 10_000.0));
    }

    #[test]
    fn frequencies_map_to_angular_units() {
        assert_eq!(ControlKind::NaturalFrequency.map(0.0), TAU);
        let top = *ControlKind::DrivingFrequency.range().end();
        assert!(close(ControlKind::DrivingFrequency.map(top), TAU * 24_000.0));
    }

    #[test]
    fn amplitude_and_ping_bounds() {
        assert!(close(ControlKind::DrivingAmplitude.map(-2.0), 0.01));
        assert!(close(ControlKind::DrivingAmplitude.map(10.0), 1.0e10));
        assert_eq!(ControlKind::PingStrength.map(0.0), 1.0);
        assert!(close(ControlKind::PingStrength.map(6.0), 1.0e6));
    }

    #[test]
    fn ranges_match_slider_layout() {
        assert_eq!(ControlKind::Damping.range(), -2.0..=4.0);
        assert_eq!(ControlKind::DrivingAmplitude.range(), -2.0..=10.0);
        assert_eq!(ControlKind::PingStrength.range(), 0.0..=6.0);
        let nyquist = ControlKind::NaturalFrequency.range();
        assert_eq!(*nyquist.start(), 0.0);
        assert!(close(*nyquist.end(), 24_000f64.log10()));
    }

    #[test]
    fn index_matches_all_order() {
        for (i, kind) in ControlKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn clamp_respects_bounds() {
        assert_eq!(ControlKind::Damping.clamp(9.0), 4.0);
        assert_eq!(ControlKind::PingStrength.clamp(-1.0), 0.0);
        assert_eq!(ControlKind::DrivingAmplitude.clamp(3.5), 3.5);
    }

    #[test]
    fn log_labels_keep_significant_digits() {
        assert_eq!(format_log(0.0, 3), "1.000");
        assert_eq!(format_log(2.0, 3), "100.0");
        assert_eq!(format_log(4.0, 3), "10000");
        assert_eq!(format_log(-2.0, 3), "0.01000");
        assert_eq!(format_log(6.0, 1), "1000000");
    }
}
