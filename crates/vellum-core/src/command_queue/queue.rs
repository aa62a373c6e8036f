// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::renderer::error::OverlayError;
use std::fmt;

type Command<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

enum Message<S> {
    Execute(Command<S>),
    Shutdown,
}

/// Creates a connected queue/receiver pair over an unbounded channel.
///
/// `S` is the state owned by the render thread, usually a struct holding the
/// overlay context.
pub fn render_command_channel<S: 'static>() -> (RenderCommandQueue<S>, RenderCommandReceiver<S>) {
    let (sender, receiver) = flume::unbounded();
    log::debug!("Render command channel created.");
    (
        RenderCommandQueue { sender },
        RenderCommandReceiver { receiver },
    )
}

/// The submitting end of the render command channel.
///
/// Cheap to clone; every clone feeds the same render thread.
pub struct RenderCommandQueue<S> {
    sender: flume::Sender<Message<S>>,
}

impl<S> Clone for RenderCommandQueue<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S> fmt::Debug for RenderCommandQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCommandQueue")
            .field("pending", &self.sender.len())
            .finish()
    }
}

impl<S: 'static> RenderCommandQueue<S> {
    /// Queues `command` and returns immediately.
    ///
    /// ## Returns
    /// `Err(OverlayError::RenderThreadDisconnected)` when the receiver is gone.
    /// A command accepted here may still be dropped unexecuted if the render
    /// thread shuts down before reaching it.
    pub fn enqueue<F>(&self, command: F) -> Result<(), OverlayError>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        log::trace!("Enqueuing a render command.");
        self.sender
            .send(Message::Execute(Box::new(command)))
            .map_err(|_| {
                log::error!("Failed to enqueue render command: receiver disconnected.");
                OverlayError::RenderThreadDisconnected
            })
    }

    /// Queues `command` and blocks until the render thread has run it.
    ///
    /// Must not be called from the render thread itself, which would wait on
    /// its own queue forever.
    ///
    /// ## Returns
    /// The closure's result, or `Err(OverlayError::RenderThreadDisconnected)`
    /// if the command was dropped without running (shutdown, or a panic on the
    /// render thread).
    pub fn enqueue_blocking<F, R>(&self, command: F) -> Result<R, OverlayError>
    where
        F: FnOnce(&mut S) -> R + Send + 'static,
        R: Send + 'static,
    {
        // The reply sender lives inside the boxed command; if the command is
        // dropped without running, the reply channel disconnects.
        let (reply_tx, reply_rx) = flume::bounded(1);
        self.enqueue(move |state| {
            let _ = reply_tx.send(command(state));
        })?;
        reply_rx
            .recv()
            .map_err(|_| OverlayError::RenderThreadDisconnected)
    }
}

impl<S> RenderCommandQueue<S> {
    /// Asks the render thread to stop after the command it is currently running.
    ///
    /// Commands queued behind the request are dropped.
    pub fn request_shutdown(&self) -> Result<(), OverlayError> {
        log::debug!("Render thread shutdown requested.");
        self.sender
            .send(Message::Shutdown)
            .map_err(|_| OverlayError::RenderThreadDisconnected)
    }

    /// The number of messages waiting to be processed.
    pub fn pending(&self) -> usize {
        self.sender.len()
    }

    /// Returns `true` once the receiving end has been dropped.
    pub fn is_disconnected(&self) -> bool {
        self.sender.is_disconnected()
    }
}

/// The render-thread end of the render command channel.
pub struct RenderCommandReceiver<S> {
    receiver: flume::Receiver<Message<S>>,
}

impl<S> fmt::Debug for RenderCommandReceiver<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCommandReceiver")
            .field("pending", &self.receiver.len())
            .finish()
    }
}

impl<S> RenderCommandReceiver<S> {
    /// Runs every command already queued, without blocking.
    ///
    /// This is the per-frame entry point for a render loop that does its own
    /// scheduling. A shutdown request encountered here drops the rest of the
    /// queue.
    ///
    /// ## Returns
    /// The number of commands executed, and whether shutdown was requested.
    pub fn execute_pending(&self, state: &mut S) -> (usize, bool) {
        let mut executed = 0;
        while let Ok(message) = self.receiver.try_recv() {
            match message {
                Message::Execute(command) => {
                    command(state);
                    executed += 1;
                }
                Message::Shutdown => {
                    self.drop_pending();
                    return (executed, true);
                }
            }
        }
        (executed, false)
    }

    /// Blocks, running commands as they arrive, until shutdown is requested or
    /// every queue has been dropped.
    ///
    /// ## Returns
    /// The number of commands executed.
    pub fn run(&self, state: &mut S) -> usize {
        let mut executed = 0;
        while let Ok(message) = self.receiver.recv() {
            match message {
                Message::Execute(command) => {
                    command(state);
                    executed += 1;
                }
                Message::Shutdown => {
                    self.drop_pending();
                    break;
                }
            }
        }
        executed
    }

    fn drop_pending(&self) {
        let dropped = self
            .receiver
            .try_iter()
            .filter(|m| matches!(m, Message::Execute(_)))
            .count();
        if dropped > 0 {
            log::debug!("Dropped {dropped} render command(s) queued behind shutdown.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_execute_pending_runs_in_order() {
        let (queue, receiver) = render_command_channel::<Vec<u32>>();
        queue.enqueue(|v| v.push(1)).unwrap();
        queue.enqueue(|v| v.push(2)).unwrap();

        let mut state = Vec::new();
        let (executed, shutdown) = receiver.execute_pending(&mut state);
        assert_eq!(executed, 2);
        assert!(!shutdown);
        assert_eq!(state, vec![1, 2]);
        assert_eq!(receiver.execute_pending(&mut state), (0, false));
    }

    #[test]
    fn test_blocking_returns_closure_result() {
        let (queue, receiver) = render_command_channel::<u32>();
        let render = thread::spawn(move || {
            let mut counter = 40;
            receiver.run(&mut counter);
            counter
        });

        let seen = queue
            .enqueue_blocking(|c| {
                *c += 2;
                *c
            })
            .unwrap();
        assert_eq!(seen, 42);

        queue.request_shutdown().unwrap();
        assert_eq!(render.join().unwrap(), 42);
    }

    #[test]
    fn test_commands_behind_shutdown_are_dropped() {
        let (queue, receiver) = render_command_channel::<u32>();
        queue.enqueue(|c| *c += 1).unwrap();
        queue.request_shutdown().unwrap();
        queue.enqueue(|c| *c += 100).unwrap();

        let mut state = 0;
        assert_eq!(receiver.execute_pending(&mut state), (1, true));
        assert_eq!(state, 1);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_blocking_after_receiver_dropped_is_error() {
        let (queue, receiver) = render_command_channel::<()>();
        drop(receiver);
        assert!(queue.is_disconnected());
        assert!(matches!(
            queue.enqueue_blocking(|_| 1),
            Err(OverlayError::RenderThreadDisconnected)
        ));
    }

    #[test]
    fn test_blocking_command_dropped_on_shutdown_unblocks_caller() {
        let (queue, receiver) = render_command_channel::<()>();
        queue.request_shutdown().unwrap();

        let submitter = {
            let queue = queue.clone();
            thread::spawn(move || queue.enqueue_blocking(|_| 7))
        };
        // Give the submitter time to queue its command behind the shutdown.
        while queue.pending() < 2 && !submitter.is_finished() {
            thread::yield_now();
        }
        receiver.run(&mut ());
        assert!(matches!(
            submitter.join().unwrap(),
            Err(OverlayError::RenderThreadDisconnected)
        ));
    }
}
