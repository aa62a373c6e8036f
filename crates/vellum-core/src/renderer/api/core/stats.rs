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

/// Why a batch was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlushReason {
    /// The caller asked for it, or the outermost manual-flush scope closed.
    Requested,
    /// A draw call finished outside any manual-flush scope.
    Immediate,
    /// A draw call needed a different batch type or texture.
    StateChange,
}

/// Counters describing the overlay work submitted since the last reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStats {
    /// The number of draw calls issued to the command list.
    pub draw_calls: u32,
    /// The total number of vertices uploaded through those draw calls.
    pub vertices_submitted: u64,
    /// Flushes caused by a batch-type or texture change rather than by the caller.
    pub forced_flushes: u32,
    /// Non-empty batches thrown away by `clear_state` or teardown.
    pub discarded_batches: u32,
}

impl OverlayStats {
    /// Records one submitted batch.
    pub fn record_draw(&mut self, vertex_count: u32, reason: FlushReason) {
        self.draw_calls += 1;
        self.vertices_submitted += u64::from(vertex_count);
        if reason == FlushReason::StateChange {
            self.forced_flushes += 1;
        }
    }

    /// Records a batch that was dropped without being drawn.
    pub fn record_discard(&mut self) {
        self.discarded_batches += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_state_changes_count_as_forced() {
        let mut stats = OverlayStats::default();
        stats.record_draw(6, FlushReason::Immediate);
        stats.record_draw(12, FlushReason::StateChange);
        stats.record_draw(3, FlushReason::Requested);
        stats.record_discard();
        assert_eq!(stats.draw_calls, 3);
        assert_eq!(stats.vertices_submitted, 21);
        assert_eq!(stats.forced_flushes, 1);
        assert_eq!(stats.discarded_batches, 1);
    }
}
