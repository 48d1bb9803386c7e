//! Status panel - pendulum state and output levels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pendulum_dsp::{
    dsp::{PendulumParams, PendulumState},
    SAMPLE_RATE,
};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

fn row(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<14}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Render the status panel
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    state: &PendulumState,
    params: &PendulumParams,
    stats: &AudioStats,
    pings: u64,
) {
    let block = Block::default().title(" Pendulum ").borders(Borders::ALL);

    // Energy is normalized against w0; meaningless when it is zero.
    let energy = if params.natural_frequency > 0.0 {
        format!("{:.4}", state.energy(params.natural_frequency))
    } else {
        "-".to_string()
    };

    let lines = vec![
        row("Angle", format!("{:+.4} rad", state.angle), Color::Cyan),
        row("Velocity", format!("{:+.3} rad/s", state.velocity), Color::Cyan),
        row("Drive phase", format!("{:+.4} rad", state.driving_phase), Color::Cyan),
        row("Energy", energy, Color::Yellow),
        row(
            "Output",
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Color::Magenta,
        ),
        row(
            "Stream",
            format!("{:.1}kHz  pings: {pings}", SAMPLE_RATE as f32 / 1000.0),
            Color::DarkGray,
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
