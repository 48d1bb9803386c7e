//! Oscilloscope of the unscaled pendulum output

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use pendulum_dsp::SAMPLE_RATE;

/// Render `sin(angle)` over the last buffer, x axis in milliseconds
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let span_ms = audio_buffer.len() as f64 * 1000.0 / SAMPLE_RATE as f64;
    let block = Block::default()
        .title(format!(" sin(angle) - last {span_ms:.1} ms "))
        .borders(Borders::ALL);

    let data: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 * 1000.0 / SAMPLE_RATE as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, span_ms.max(1.0)])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
