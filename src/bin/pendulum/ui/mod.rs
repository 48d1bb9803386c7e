//! TUI control surface for the pendulum
//!
//! Five log-scale sliders and a ping trigger on the left, live output on the
//! right. Every edit goes straight into the parameter channel; the render
//! thread picks it up at its next block.

mod controls;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;

use pendulum_dsp::{
    control::{ControlEvent, ControlKind, ParamSender},
    dsp::PendulumState,
    engine::TelemetryReceiver,
};

use controls::render_controls;
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    /// Control-thread half of the parameter channel
    tx: ParamSender,
    /// Samples and state snapshots from the render thread
    tap_rx: TelemetryReceiver,
    /// Raw (log10) slider positions, indexed by `ControlKind::index`
    sliders: [f64; 5],
    /// Highlighted slider
    selected: usize,
    /// Most recent samples for the oscilloscope
    audio_buffer: Vec<f32>,
    /// Latest pendulum state reported by the render thread
    state: PendulumState,
    /// Pings sent this session
    pings: u64,
    should_quit: bool,
}

impl UiApp {
    pub fn new(tx: ParamSender, tap_rx: TelemetryReceiver, sliders: [f64; 5]) -> Self {
        Self {
            tx,
            tap_rx,
            sliders,
            selected: 0,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            state: PendulumState::default(),
            pings: 0,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            if let Some(state) = self.tap_rx.latest_state() {
                self.state = state;
            }

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Pull new samples, keeping only the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        if self.tap_rx.drain_samples(&mut self.audio_buffer) > 0
            && self.audio_buffer.len() > VIS_BUFFER_SIZE
        {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let kind = ControlKind::ALL[self.selected];
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + ControlKind::ALL.len() - 1) % ControlKind::ALL.len();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % ControlKind::ALL.len();
            }
            KeyCode::Left | KeyCode::Char('h') => self.nudge(kind, -kind.step()),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(kind, kind.step()),
            KeyCode::PageDown => self.nudge(kind, -kind.page()),
            KeyCode::PageUp => self.nudge(kind, kind.page()),
            KeyCode::Home => self.move_slider(kind, *kind.range().start()),
            KeyCode::End => self.move_slider(kind, *kind.range().end()),
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                self.tx.apply(ControlEvent::Ping);
                self.pings += 1;
            }
            _ => {}
        }
    }

    fn nudge(&mut self, kind: ControlKind, delta: f64) {
        self.move_slider(kind, self.sliders[kind.index()] + delta);
    }

    fn move_slider(&mut self, kind: ControlKind, raw: f64) {
        // Snap to the slider increment so repeated nudges don't drift.
        let step = kind.step();
        let raw = kind.clamp((raw / step).round() * step);
        self.sliders[kind.index()] = raw;
        self.tx.apply(ControlEvent::Set { kind, raw });
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(17), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(9)])
            .split(columns[1]);

        render_controls(frame, columns[0], &self.sliders, self.selected);
        render_waveform(frame, right[0], &self.audio_buffer);
        render_status(
            frame,
            right[1],
            &self.state,
            &self.tx.params(),
            &AudioStats::from_buffer(&self.audio_buffer),
            self.pings,
        );

        let help = Paragraph::new(
            " [↑/↓] Select  [←/→] Fine  [PgUp/PgDn] Decade  [Space] Ping  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[1]);
    }
}
