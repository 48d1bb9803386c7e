//! Cross-thread parameter store.
//!
//! The control thread owns every control field (single writer) and the render
//! thread only reads them. Each field is an `AtomicF64`, so a store is one
//! 64-bit write and can never tear. Relaxed ordering is enough: the render
//! thread picks up new values at its next block, and no field depends on
//! another.
//!
//! Impulses need more than visibility. A ping must land exactly once even if
//! the render thread is mid-block, so triggers are summed into a pending
//! accumulator with an atomic read-modify-write and the render thread swaps it
//! back to zero. A trigger that races a swap lands in either this block's sum
//! or the next one, never both and never neither.

use std::sync::{atomic::Ordering, Arc};

use super::{atomic::AtomicF64, ControlEvent, ControlKind};
use crate::dsp::PendulumParams;

#[derive(Debug)]
struct Shared {
    natural_frequency: AtomicF64,
    damping: AtomicF64,
    driving_amplitude: AtomicF64,
    driving_frequency: AtomicF64,
    ping_strength: AtomicF64,
    pending_impulse: AtomicF64,
}

impl Shared {
    fn field(&self, kind: ControlKind) -> &AtomicF64 {
        match kind {
            ControlKind::NaturalFrequency => &self.natural_frequency,
            ControlKind::Damping => &self.damping,
            ControlKind::DrivingAmplitude => &self.driving_amplitude,
            ControlKind::DrivingFrequency => &self.driving_frequency,
            ControlKind::PingStrength => &self.ping_strength,
        }
    }

    fn snapshot(&self) -> PendulumParams {
        PendulumParams {
            natural_frequency: self.natural_frequency.load(Ordering::Relaxed),
            damping: self.damping.load(Ordering::Relaxed),
            driving_amplitude: self.driving_amplitude.load(Ordering::Relaxed),
            driving_frequency: self.driving_frequency.load(Ordering::Relaxed),
            ping_strength: self.ping_strength.load(Ordering::Relaxed),
        }
    }
}

/// Create a connected sender/receiver pair seeded with `initial`.
pub fn channel(initial: PendulumParams) -> (ParamSender, ParamReceiver) {
    let shared = Arc::new(Shared {
        natural_frequency: AtomicF64::new(initial.natural_frequency),
        damping: AtomicF64::new(initial.damping),
        driving_amplitude: AtomicF64::new(initial.driving_amplitude),
        driving_frequency: AtomicF64::new(initial.driving_frequency),
        ping_strength: AtomicF64::new(initial.ping_strength),
        pending_impulse: AtomicF64::new(0.0),
    });

    (
        ParamSender {
            shared: Arc::clone(&shared),
        },
        ParamReceiver { shared },
    )
}

/// Control-thread half. Deliberately not `Clone`: one writer per field.
#[derive(Debug)]
pub struct ParamSender {
    shared: Arc<Shared>,
}

impl ParamSender {
    /// Store the mapped value of a raw slider position.
    pub fn set_parameter(&self, kind: ControlKind, raw: f64) {
        self.set_value(kind, kind.map(raw));
    }

    /// Store a value already in physical units.
    pub fn set_value(&self, kind: ControlKind, value: f64) {
        self.shared.field(kind).store(value, Ordering::Relaxed);
    }

    /// Queue one kick of the current ping strength.
    pub fn trigger_impulse(&self) {
        let strength = self.shared.ping_strength.load(Ordering::Relaxed);
        self.shared
            .pending_impulse
            .fetch_add(strength, Ordering::AcqRel);
    }

    pub fn apply(&self, event: ControlEvent) {
        match event {
            ControlEvent::Set { kind, raw } => self.set_parameter(kind, raw),
            ControlEvent::Ping => self.trigger_impulse(),
        }
    }

    /// Current control values as last written.
    pub fn params(&self) -> PendulumParams {
        self.shared.snapshot()
    }
}

/// Render-thread half. Never blocks.
#[derive(Debug)]
pub struct ParamReceiver {
    shared: Arc<Shared>,
}

impl ParamReceiver {
    #[inline]
    pub fn snapshot(&self) -> PendulumParams {
        self.shared.snapshot()
    }

    /// Take every impulse triggered since the last call.
    #[inline]
    pub fn take_impulse(&self) -> f64 {
        self.shared.pending_impulse.swap(0.0, Ordering::AcqRel)
    }
}
