use std::time::Duration;

use color_eyre::eyre::Result;
use futures::{FutureExt, StreamExt};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind},
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::ui::{MIN_HEIGHT, MIN_WIDTH};

#[derive(Clone, Debug)]
pub enum TuiEvent {
    Init,
    Error,
    Tick,
    Render,
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Owns the terminal and a background task that turns terminal input, ticks
/// and render deadlines into [`TuiEvent`]s.
pub struct Tui {
    terminal: DefaultTerminal,
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<TuiEvent>,
    event_tx: UnboundedSender<TuiEvent>,
    frame_rate: f64,
    tick_rate: f64,
    active: bool,
}

impl Tui {
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            terminal: ratatui::init(),
            task: None,
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate: 30.0,
            tick_rate: 4.0,
            active: true,
        }
    }

    pub fn tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Spawns the event pump, replacing any pump already running.
    fn start(&mut self) {
        self.cancellation_token.cancel();
        self.cancellation_token = CancellationToken::new();

        let tick_delay = Duration::from_secs_f64(1.0 / self.tick_rate);
        let render_delay = Duration::from_secs_f64(1.0 / self.frame_rate);
        let cancellation_token = self.cancellation_token.clone();
        let event_tx = self.event_tx.clone();

        self.task = Some(tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_delay);
            let mut render_interval = tokio::time::interval(render_delay);
            let _ = event_tx.send(TuiEvent::Init);
            loop {
                let event = tokio::select! {
                    _ = cancellation_token.cancelled() => break,
                    maybe_event = reader.next().fuse() => match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            Some(TuiEvent::Key(key))
                        }
                        Some(Ok(CrosstermEvent::Resize(x, y))) => Some(TuiEvent::Resize(x, y)),
                        Some(Ok(_)) => None,
                        Some(Err(_)) => Some(TuiEvent::Error),
                        None => break,
                    },
                    _ = tick_interval.tick() => Some(TuiEvent::Tick),
                    _ = render_interval.tick() => Some(TuiEvent::Render),
                };
                if let Some(event) = event {
                    if event_tx.send(event).is_err() {
                        break; // Receiver dropped.
                    }
                }
            }
        }));
    }

    fn stop(&mut self) {
        self.cancellation_token.cancel();
        let Some(task) = self.task.take() else {
            return;
        };
        for waited in 0..100 {
            if task.is_finished() {
                return;
            }
            if waited == 50 {
                task.abort();
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        log::error!("Event task did not stop within 100 milliseconds");
    }

    pub fn enter(&mut self) -> Result<()> {
        self.warn_if_too_small()?;
        self.start();
        Ok(())
    }

    /// Stops the event pump and restores the terminal. Safe to call twice.
    pub fn exit(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.stop();
        ratatui::restore();
        log::info!("Turn tracker exit: {}", chrono::Local::now());
    }

    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.event_rx.recv().await
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    fn warn_if_too_small(&self) -> Result<()> {
        let size = self.terminal.size()?;
        if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
            log::warn!(
                "Terminal is {}x{}, below the {MIN_WIDTH}x{MIN_HEIGHT} minimum",
                size.width,
                size.height
            );
        }
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.exit();
    }
}
