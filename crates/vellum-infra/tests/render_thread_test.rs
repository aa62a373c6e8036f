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

//! Integration tests for the render thread and its command queue.

use std::thread;
use vellum_core::OverlayError;
use vellum_infra::RenderThread;

#[test]
fn test_commands_run_on_the_render_thread_in_order() {
    let render = RenderThread::spawn("overlay-render", Vec::<u32>::new).unwrap();
    render.enqueue(|v| v.push(1)).unwrap();
    render.enqueue(|v| v.push(2)).unwrap();

    let (seen, name) = render
        .enqueue_blocking(|v| {
            v.push(3);
            (v.clone(), thread::current().name().map(str::to_owned))
        })
        .unwrap();
    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(name.as_deref(), Some("overlay-render"));

    render.shutdown().unwrap();
}

#[test]
fn test_queue_clones_feed_the_same_thread() {
    let render = RenderThread::spawn("overlay-render", || 0u64).unwrap();
    let submitters: Vec<_> = (0..4)
        .map(|_| {
            let queue = render.queue();
            thread::spawn(move || {
                for _ in 0..25 {
                    queue.enqueue(|n| *n += 1).unwrap();
                }
            })
        })
        .collect();
    for submitter in submitters {
        submitter.join().unwrap();
    }

    assert_eq!(render.enqueue_blocking(|n| *n).unwrap(), 100);
    render.shutdown().unwrap();
}

#[test]
fn test_panicking_command_is_reported_on_shutdown() {
    let render = RenderThread::spawn("overlay-render", || ()).unwrap();
    render.enqueue(|_| panic!("boom")).unwrap();

    match render.shutdown() {
        Err(OverlayError::RenderThreadPanicked(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected a panic report, got {other:?}"),
    }
}

#[test]
fn test_blocking_after_shutdown_is_disconnected() {
    let render = RenderThread::spawn("overlay-render", || ()).unwrap();
    let queue = render.queue();
    render.shutdown().unwrap();

    assert!(queue.is_disconnected());
    assert!(matches!(
        queue.enqueue_blocking(|_| 1),
        Err(OverlayError::RenderThreadDisconnected)
    ));
}
