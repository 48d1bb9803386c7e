pub mod control; // Parameter mapping and the cross-thread channel
pub mod dsp;
pub mod engine; // Realtime render loop

/// Fixed output sample rate (Hz). The integrator step is `1 / SAMPLE_RATE`.
pub const SAMPLE_RATE: u32 = 48_000;
pub const MAX_BLOCK_SIZE: usize = 2048;
