use crate::render::Renderer;
use std::io::{self, BufRead, Write};
use tokio::sync::{oneshot, watch};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    Elapsed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Line(String),
    Cancelled,
    Closed,
}

/// Everything the break loop needs from the user's terminal.
#[allow(async_fn_in_trait)]
pub trait Console {
    /// Shows the countdown and waits one second, or until the user cancels.
    async fn tick(&mut self, remaining_secs: u64, total_secs: u64) -> Tick;

    fn clear_countdown(&mut self);

    async fn read_reply(&mut self, prompt: &str) -> Reply;
}

/// Fan-out of Ctrl+C presses. Each press bumps the counter.
#[derive(Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<u64>,
}

impl CancelSignal {
    /// Installs the process-wide Ctrl+C listener. Requires a running tokio runtime.
    pub fn install() -> Self {
        let (tx, rx) = watch::channel(0u64);
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("cancel signal received");
                tx.send_modify(|presses| *presses += 1);
            }
        });
        CancelSignal { rx }
    }

    #[cfg(test)]
    pub fn manual() -> (watch::Sender<u64>, Self) {
        let (tx, rx) = watch::channel(0u64);
        (tx, CancelSignal { rx })
    }

    /// Forgets presses that happened before now.
    pub fn reset(&mut self) {
        self.rx.mark_unchanged();
    }

    /// Resolves on the next press not yet observed.
    pub async fn cancelled(&mut self) {
        if self.rx.changed().await.is_err() {
            // Listener gone: never resolve.
            std::future::pending::<()>().await;
        }
    }
}

pub struct TerminalConsole {
    cancel: CancelSignal,
    renderer: Renderer,
}

impl TerminalConsole {
    pub fn new(mut cancel: CancelSignal) -> Self {
        cancel.reset();
        TerminalConsole {
            cancel,
            renderer: Renderer::new(),
        }
    }
}

impl Console for TerminalConsole {
    async fn tick(&mut self, remaining_secs: u64, total_secs: u64) -> Tick {
        if let Err(e) = self.renderer.draw(remaining_secs, total_secs) {
            tracing::debug!(error = %e, "countdown redraw failed");
        }
        tokio::select! {
            _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => Tick::Elapsed,
            _ = self.cancel.cancelled() => Tick::Cancelled,
        }
    }

    fn clear_countdown(&mut self) {
        let _ = self.renderer.clear();
    }

    async fn read_reply(&mut self, prompt: &str) -> Reply {
        print!("{prompt}");
        let _ = io::stdout().flush();

        // Stdin reads can't be abandoned; a detached thread keeps shutdown unblocked.
        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            let mut line = String::new();
            let read = io::stdin().lock().read_line(&mut line);
            let _ = tx.send(read.map(|n| (n, line)));
        });

        tokio::select! {
            read = rx => match read {
                Ok(Ok((0, _))) => Reply::Closed,
                Ok(Ok((_, line))) => Reply::Line(line),
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "failed to read reply");
                    Reply::Closed
                }
                Err(_) => Reply::Closed,
            },
            _ = self.cancel.cancelled() => Reply::Cancelled,
        }
    }
}
