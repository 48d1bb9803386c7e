//! Slider panel - one log-scale gauge per control

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use pendulum_dsp::control::{format_log, ControlKind};

/// Render the five sliders, highlighting `selected`
pub fn render_controls(frame: &mut Frame, area: Rect, sliders: &[f64; 5], selected: usize) {
    let block = Block::default().title(" Controls ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 5])
        .split(inner);

    for (kind, row) in ControlKind::ALL.into_iter().zip(rows.iter()) {
        let raw = sliders[kind.index()];
        let range = kind.range();
        let ratio = ((raw - range.start()) / (range.end() - range.start())).clamp(0.0, 1.0);

        let is_selected = kind.index() == selected;
        let (title, style) = if is_selected {
            (
                format!(" > {} ", kind.label()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                format!("   {} ", kind.label()),
                Style::default().fg(Color::DarkGray),
            )
        };

        let gauge = Gauge::default()
            .block(Block::default().title(title).borders(Borders::ALL))
            .gauge_style(style)
            .ratio(ratio)
            .label(format_log(raw, kind.digits()));
        frame.render_widget(gauge, *row);
    }
}
