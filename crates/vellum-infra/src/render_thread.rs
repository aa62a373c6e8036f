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

//! A dedicated render thread driven by the render command queue.

use std::any::Any;
use std::thread::{self, JoinHandle};
use vellum_core::command_queue::{render_command_channel, RenderCommandQueue};
use vellum_core::OverlayError;

/// Owns a thread that builds its render state and then runs queued commands
/// against it until shut down.
///
/// The state is created *on* the render thread by the factory passed to
/// [`RenderThread::spawn`], so it never needs to be `Send`, and everything
/// that checks its owning thread (such as the MiniGUI context) sees the render
/// thread as its owner.
pub struct RenderThread<S> {
    queue: RenderCommandQueue<S>,
    handle: Option<JoinHandle<()>>,
}

impl<S: 'static> RenderThread<S> {
    /// Spawns the render thread.
    ///
    /// ## Arguments
    /// * `name` - The OS thread name.
    /// * `factory` - Builds the state the commands run against.
    pub fn spawn<F>(name: &str, factory: F) -> Result<Self, OverlayError>
    where
        F: FnOnce() -> S + Send + 'static,
    {
        let (queue, receiver) = render_command_channel::<S>();
        let handle = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || {
                log::info!("Render thread started.");
                let mut state = factory();
                let executed = receiver.run(&mut state);
                log::info!("Render thread stopped after {executed} command(s).");
            })?;
        Ok(Self {
            queue,
            handle: Some(handle),
        })
    }

    /// A queue feeding this thread. Clones can be handed to other threads.
    pub fn queue(&self) -> RenderCommandQueue<S> {
        self.queue.clone()
    }

    /// Queues a command without waiting for it.
    pub fn enqueue<F>(&self, command: F) -> Result<(), OverlayError>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.queue.enqueue(command)
    }

    /// Queues a command and waits for its result.
    pub fn enqueue_blocking<F, R>(&self, command: F) -> Result<R, OverlayError>
    where
        F: FnOnce(&mut S) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.queue.enqueue_blocking(command)
    }

    /// Stops the thread after the command it is running and waits for it.
    ///
    /// Commands still queued are dropped.
    ///
    /// ## Returns
    /// `Err(OverlayError::RenderThreadPanicked)` if a command or the state
    /// factory panicked.
    pub fn shutdown(mut self) -> Result<(), OverlayError> {
        self.stop()
    }
}

impl<S> RenderThread<S> {
    fn stop(&mut self) -> Result<(), OverlayError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        // A disconnected queue means the thread is already gone.
        let _ = self.queue.request_shutdown();
        handle
            .join()
            .map_err(|payload| OverlayError::RenderThreadPanicked(panic_message(payload.as_ref())))
    }
}

impl<S> Drop for RenderThread<S> {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::error!("{err}");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
