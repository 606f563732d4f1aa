//! Terminal stop signal for the timer.
//!
//! A line on stdin stops the timer. Ctrl-C, or stdin closing before a line
//! arrives, cancels it. Both sources feed one channel and the caller blocks
//! on it until the first answer.
//!
//! Nothing is installed until [`StopSignal::wait`] is called, so an
//! interrupt during the project lookup still ends the process right away.

use std::io::{self, BufRead, BufReader, Stdin};
use std::sync::mpsc::{self, Sender};
use std::thread;

use crate::commands::start::{StopReason, StopSignal};

#[derive(Debug)]
pub struct ConsoleStop<R = BufReader<Stdin>> {
    reader: Option<R>,
    handle_interrupts: bool,
}

impl ConsoleStop {
    /// Stop signal reading stdin and treating Ctrl-C as cancel.
    pub fn new() -> Self {
        Self {
            reader: Some(BufReader::new(io::stdin())),
            handle_interrupts: true,
        }
    }
}

impl Default for ConsoleStop {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead + Send + 'static> ConsoleStop<R> {
    /// Stop signal reading `reader`, without a Ctrl-C handler.
    pub const fn from_reader(reader: R) -> Self {
        Self {
            reader: Some(reader),
            handle_interrupts: false,
        }
    }
}

impl<R: BufRead + Send + 'static> StopSignal for ConsoleStop<R> {
    /// Arms the Ctrl-C handler and the reader, then blocks.
    ///
    /// Only one wait per process: the Ctrl-C handler cannot be installed twice.
    fn wait(&mut self) -> io::Result<StopReason> {
        let (tx, rx) = mpsc::channel();
        if self.handle_interrupts {
            let interrupt = tx.clone();
            ctrlc::set_handler(move || {
                let _ = interrupt.send(StopReason::Cancelled);
            })
            .map_err(io::Error::other)?;
        }
        if let Some(reader) = self.reader.take() {
            spawn_reader(reader, tx);
        }
        rx.recv().map_err(io::Error::other)
    }
}

fn spawn_reader<R: BufRead + Send + 'static>(reader: R, tx: Sender<StopReason>) {
    thread::spawn(move || {
        let _ = tx.send(read_stop(reader));
    });
}

/// Maps one line of input to a stop reason.
fn read_stop<R: BufRead>(mut reader: R) -> StopReason {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => {
            tracing::debug!("stdin closed before the timer was stopped");
            StopReason::Cancelled
        }
        Ok(_) => StopReason::Confirmed,
        Err(err) => {
            tracing::warn!(%err, "failed to read stdin");
            StopReason::Cancelled
        }
    }
}
