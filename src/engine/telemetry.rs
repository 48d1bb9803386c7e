//! Render-thread tap for visualisation.
//!
//! Two SPSC rings: raw unit samples (before output scaling) and one state
//! snapshot per rendered block. Pushes never block; when the UI falls behind
//! the newest data is dropped.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::dsp::PendulumState;

/// Capacity of the per-block state ring.
pub const STATE_RING_CAPACITY: usize = 64;

/// Producer half, owned by the render engine.
pub struct Telemetry {
    samples: Producer<f32>,
    states: Producer<PendulumState>,
}

/// Consumer half, owned by the UI.
pub struct TelemetryReceiver {
    samples: Consumer<f32>,
    states: Consumer<PendulumState>,
}

/// Create a tap that can hold `sample_capacity` unread samples.
pub fn telemetry(sample_capacity: usize) -> (Telemetry, TelemetryReceiver) {
    let (sample_tx, sample_rx) = RingBuffer::new(sample_capacity);
    let (state_tx, state_rx) = RingBuffer::new(STATE_RING_CAPACITY);

    (
        Telemetry {
            samples: sample_tx,
            states: state_tx,
        },
        TelemetryReceiver {
            samples: sample_rx,
            states: state_rx,
        },
    )
}

impl Telemetry {
    #[inline]
    pub(crate) fn push_sample(&mut self, sample: f32) {
        let _ = self.samples.push(sample);
    }

    #[inline]
    pub(crate) fn push_state(&mut self, state: PendulumState) {
        let _ = self.states.push(state);
    }
}

impl TelemetryReceiver {
    /// Append every available sample to `out`. Returns how many were read.
    pub fn drain_samples(&mut self, out: &mut Vec<f32>) -> usize {
        let mut read = 0;
        while let Ok(sample) = self.samples.pop() {
            out.push(sample);
            read += 1;
        }
        read
    }

    /// Most recent state snapshot, discarding older ones.
    pub fn latest_state(&mut self) -> Option<PendulumState> {
        let mut latest = None;
        while let Ok(state) = self.states.pop() {
            latest = Some(state);
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_drops_instead_of_blocking() {
        let (mut tx, mut rx) = telemetry(4);
        for i in 0..10 {
            tx.push_sample(i as f32);
        }

        let mut out = Vec::new();
        assert_eq!(rx.drain_samples(&mut out), 4);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn latest_state_keeps_newest() {
        let (mut tx, mut rx) = telemetry(4);
        assert_eq!(rx.latest_state(), None);

        tx.push_state(PendulumState::new(0.1, 0.0, 0.0));
        tx.push_state(PendulumState::new(0.2, 0.0, 0.0));
        assert_eq!(rx.latest_state(), Some(PendulumState::new(0.2, 0.0, 0.0)));
        assert_eq!(rx.latest_state(), None);
    }
}
