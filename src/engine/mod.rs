//! The realtime render loop.
//!
//! `RenderEngine` is moved into the audio backend's callback and asked to fill
//! one buffer at a time. At the top of every call it snapshots the control
//! parameters and folds in any pending impulse; then it steps the pendulum
//! once per frame. Nothing here allocates, locks or blocks.

/// Conversion from unit samples to device sample formats.
pub mod sample;
/// Non-blocking sample and state tap for the UI.
#[cfg(feature = "rtrb")]
pub mod telemetry;

use crate::{
    control::ParamReceiver,
    dsp::{PendulumParams, PendulumState},
    SAMPLE_RATE,
};

pub use sample::OutputSample;
#[cfg(feature = "rtrb")]
pub use telemetry::{telemetry, Telemetry, TelemetryReceiver};

pub struct RenderEngine {
    state: PendulumState,
    rx: ParamReceiver,
    /// Parameters seen by the last rendered block.
    params: PendulumParams,
    dt: f64,
    #[cfg(feature = "rtrb")]
    telemetry: Option<Telemetry>,
}

impl RenderEngine {
    pub fn new(rx: ParamReceiver) -> Self {
        let params = rx.snapshot();
        Self {
            state: PendulumState::default(),
            rx,
            params,
            dt: 1.0 / SAMPLE_RATE as f64,
            #[cfg(feature = "rtrb")]
            telemetry: None,
        }
    }

    /// Start from a given dynamic state instead of rest.
    pub fn with_state(mut self, state: PendulumState) -> Self {
        self.state = state;
        self
    }

    /// Feed rendered samples and per-block states to a UI.
    #[cfg(feature = "rtrb")]
    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Fill a mono buffer, one integrator step per sample.
    pub fn render_block<S: OutputSample>(&mut self, out: &mut [S]) {
        self.render_interleaved(out, 1);
    }

    /// Fill an interleaved buffer, writing each mono frame to every channel.
    pub fn render_interleaved<S: OutputSample>(&mut self, out: &mut [S], channels: usize) {
        self.params = self.rx.snapshot();
        self.state.kick(self.rx.take_impulse());

        let params = self.params;
        let dt = self.dt;
        for frame in out.chunks_mut(channels.max(1)) {
            let value = self.state.step(&params, dt);
            frame.fill(S::from_unit(value));

            #[cfg(feature = "rtrb")]
            if let Some(telemetry) = self.telemetry.as_mut() {
                telemetry.push_sample(value as f32);
            }
        }

        #[cfg(feature = "rtrb")]
        if let Some(telemetry) = self.telemetry.as_mut() {
            telemetry.push_state(self.state);
        }
    }

    pub fn state(&self) -> PendulumState {
        self.state
    }

    pub fn params(&self) -> PendulumParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{channel, ControlKind};

    #[test]
    fn one_step_per_frame() {
        let (_tx, rx) = channel(PendulumParams::default());
        let start = PendulumState::new(1.0, 3.0, 0.0);
        let mut engine = RenderEngine::new(rx).with_state(start);

        let mut out = [0i16; 64];
        engine.render_block(&mut out);

        let mut expected = start;
        let params = PendulumParams::default();
        for &sample in &out {
            let value = expected.step(&params, 1.0 / 48_000.0);
            assert_eq!(sample, i16::from_unit(value));
        }
        assert_eq!(engine.state(), expected);
    }

    #[test]
    fn interleaved_duplicates_frames() {
        let (_tx, rx) = channel(PendulumParams::default());
        let mut engine = RenderEngine::new(rx).with_state(PendulumState::new(1.0, 0.0, 0.0));

        let mut out = [0.0f32; 32];
        engine.render_interleaved(&mut out, 2);

        for frame in out.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(out[0] > 0.4);
    }

    #[test]
    fn parameter_change_lands_on_next_block() {
        let (tx, rx) = channel(PendulumParams::default());
        let mut engine = RenderEngine::new(rx);
        let mut out = [0i16; 16];

        engine.render_block(&mut out);
        tx.set_parameter(ControlKind::Damping, 2.0);
        assert_eq!(engine.params().damping, 1.0);

        engine.render_block(&mut out);
        assert!((engine.params().damping - 100.0).abs() < 1e-9);
    }

    #[test]
    fn impulse_applied_once_at_block_start() {
        let (tx, rx) = channel(PendulumParams {
            natural_frequency: 0.0,
            damping: 0.0,
            driving_amplitude: 0.0,
            ..PendulumParams::default()
        });
        let mut engine = RenderEngine::new(rx);
        let mut out = [0i16; 8];

        tx.trigger_impulse();
        engine.render_block(&mut out);
        engine.render_block(&mut out);

        assert_eq!(engine.state().velocity, 1.0);
    }

    #[test]
    fn empty_buffer_still_folds_impulse() {
        let (tx, rx) = channel(PendulumParams::default());
        let mut engine = RenderEngine::new(rx);

        tx.trigger_impulse();
        engine.render_block::<i16>(&mut []);

        assert_eq!(engine.state().velocity, 1.0);
        assert_eq!(engine.state().angle, 0.0);
    }
}
