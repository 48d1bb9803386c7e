//! PendulumApp - builder, audio setup and run loop

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat, SampleRate, SizedSample, StreamConfig, SupportedStreamConfig,
};

use pendulum_dsp::{
    control::{channel, ControlKind},
    dsp::PendulumParams,
    engine::{telemetry, OutputSample, RenderEngine},
    MAX_BLOCK_SIZE, SAMPLE_RATE,
};

use super::ui::UiApp;

/// Capacity in blocks for the render→UI sample ring
const TAP_BLOCKS: usize = 16;

/// Main application builder
pub struct PendulumApp {
    /// Raw slider positions; `None` leaves the default parameter in place.
    sliders: [Option<f64>; 5],
}

impl PendulumApp {
    pub fn new() -> Self {
        Self {
            sliders: [None; 5],
        }
    }

    /// Start with a slider moved to `raw` (clamped to its range).
    #[allow(dead_code)]
    pub fn control(mut self, kind: ControlKind, raw: f64) -> Self {
        self.sliders[kind.index()] = Some(kind.clamp(raw));
        self
    }

    /// Open the audio stream and hand the terminal to the control surface.
    ///
    /// Any failure to open or start the stream is fatal.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = pick_output_config(&device)?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();

        println!("=== Driven pendulum simulator ===");
        println!("Device: {}", device.name().unwrap_or_else(|_| "unknown".into()));
        println!("Sample rate: {} Hz", config.sample_rate.0);
        println!("Channels: {}", config.channels);
        println!("Format: {:?}", sample_format);
        println!();

        let (tx, rx) = channel(PendulumParams::default());
        for kind in ControlKind::ALL {
            if let Some(raw) = self.sliders[kind.index()] {
                tx.set_parameter(kind, raw);
            }
        }

        let (tap, tap_rx) = telemetry(MAX_BLOCK_SIZE * TAP_BLOCKS);
        let engine = RenderEngine::new(rx).with_telemetry(tap);

        let stream = match sample_format {
            SampleFormat::I16 => build_stream::<i16>(&device, &config, engine)?,
            SampleFormat::F32 => build_stream::<f32>(&device, &config, engine)?,
            other => return Err(eyre!("unsupported sample format {other:?}")),
        };
        stream.play().wrap_err("failed to start output stream")?;

        let sliders = self.sliders.map(|raw| raw.unwrap_or(0.0));
        let mut terminal = ratatui::init();
        let res = UiApp::new(tx, tap_rx, sliders).run(&mut terminal);
        ratatui::restore();

        drop(stream);
        res
    }
}

impl Default for PendulumApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick a 48 kHz output config, preferring mono and native i16.
fn pick_output_config(device: &cpal::Device) -> EyreResult<SupportedStreamConfig> {
    let rate = SampleRate(SAMPLE_RATE);
    let mut candidates: Vec<_> = device
        .supported_output_configs()
        .wrap_err("failed to query output configs")?
        .filter(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
        .filter(|range| matches!(range.sample_format(), SampleFormat::I16 | SampleFormat::F32))
        .collect();

    candidates.sort_by_key(|range| {
        (
            range.channels(),
            range.sample_format() != SampleFormat::I16,
        )
    });

    candidates
        .into_iter()
        .next()
        .map(|range| range.with_sample_rate(rate))
        .ok_or_else(|| eyre!("output device cannot run at {SAMPLE_RATE} Hz with i16 or f32 samples"))
}

fn build_stream<S>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut engine: RenderEngine,
) -> EyreResult<cpal::Stream>
where
    S: OutputSample + SizedSample,
{
    let channels = config.channels as usize;

    device
        .build_output_stream(
            config,
            move |data: &mut [S], _| engine.render_interleaved(data, channels),
            |err| eprintln!("Stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")
}
