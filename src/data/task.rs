//! One-shot background work whose result is picked up by the UI thread.
//!
//! The worker never touches UI state. It sends its result over a channel and
//! the app polls the handle once per frame, applying the result on its own turn.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::LogPlotError;

/// Outcome of polling a [`BackgroundTask`].
#[derive(Debug)]
pub enum TaskPoll<T> {
    Pending,
    Ready(T),
    /// The worker ended without sending (it panicked).
    Lost,
}

pub struct BackgroundTask<T> {
    name: String,
    rx: Receiver<T>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    /// Run `work` on a named thread. If `repaint` is given, a repaint is
    /// requested once the result has been sent.
    pub fn spawn<F>(name: &str, repaint: Option<egui::Context>, work: F) -> Result<Self, LogPlotError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let result = work();
                let _ = tx.send(result);
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            })
            .map_err(LogPlotError::TaskSpawn)?;
        log::debug!("spawned background task {name}");
        Ok(Self {
            name: name.to_string(),
            rx,
        })
    }
}

impl<T> BackgroundTask<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-blocking check for the result.
    pub fn poll(&self) -> TaskPoll<T> {
        match self.rx.try_recv() {
            Ok(v) => TaskPoll::Ready(v),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }
}
