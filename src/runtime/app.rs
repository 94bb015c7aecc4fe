use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::commands::Cmd;
use crate::grid::{PageResponse, ViewportObserver, VisibilityObserver};
use crate::messages::{DataMsg, Msg};
use crate::model::GridModel;
use crate::source::DataSource;
use crate::update::update;

/// Headless host: owns the model, runs effects, feeds results back in
pub struct App {
    model: GridModel,
    source: Arc<dyn DataSource>,
    observer: ViewportObserver,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    redraws: usize,
}

impl App {
    /// `window_rows` is the height of the simulated viewport in rows
    pub fn new(model: GridModel, source: Arc<dyn DataSource>, window_rows: usize) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();

        let sentinel_tx = msg_tx.clone();
        let observer = ViewportObserver::new(window_rows, move |target| {
            tracing::debug!("Sentinel visible at presented row {}", target.position);
            let _ = sentinel_tx.send(Msg::Data(DataMsg::SentinelVisible));
        });

        Self {
            model,
            source,
            observer,
            msg_tx,
            msg_rx,
            redraws: 0,
        }
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn observer(&self) -> &ViewportObserver {
        &self.observer
    }

    /// Number of redraws requested so far
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Kick off the initial load
    pub fn start(&mut self) {
        if let Some(cmd) = self.model.init() {
            self.process_cmd(cmd);
        }
    }

    /// Run a message through update and execute the resulting command
    pub fn dispatch(&mut self, msg: impl Into<Msg>) -> bool {
        match update(&mut self.model, msg.into()) {
            Some(cmd) => {
                let needs_redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                needs_redraw
            }
            None => false,
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {
                self.redraws += 1;
            }
            Cmd::FetchPage(request) => {
                let tx = self.msg_tx.clone();
                let source = Arc::clone(&self.source);
                std::thread::spawn(move || {
                    let result = source.fetch_page(&request);
                    let response = PageResponse::for_request(&request, result);
                    let _ = tx.send(Msg::Data(DataMsg::PageLoaded(response)));
                });
            }
            Cmd::WatchSentinel(target) => {
                self.observer.disconnect();
                if let Some(target) = target {
                    self.observer.observe(target);
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    /// Drain every queued message, returning whether a redraw is needed
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            if self.dispatch(msg) {
                needs_redraw = true;
            }
        }
        needs_redraw
    }

    /// Block for the next message (up to `timeout`), then drain the queue
    ///
    /// Returns `false` when nothing arrived in time.
    pub fn wait_for_message(&mut self, timeout: Duration) -> bool {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.dispatch(msg);
                self.process_async_messages();
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            // App holds a sender, so the channel never disconnects while it lives
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Scroll the simulated viewport to `top` and handle any sentinel firing
    pub fn scroll_to(&mut self, top: usize) -> bool {
        self.observer.scroll_to(top);
        self.process_async_messages()
    }

    /// Scroll to the bottom of the presented rows
    pub fn scroll_to_end(&mut self) -> bool {
        let presented = self.model.view().rows.len();
        self.observer.scroll_to_end(presented);
        self.process_async_messages()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("model", &self.model)
            .field("observer", &self.observer)
            .field("redraws", &self.redraws)
            .finish()
    }
}
