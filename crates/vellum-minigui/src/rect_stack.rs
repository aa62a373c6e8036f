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

//! Nested clip regions and the local-to-viewport coordinate transform.
//!
//! Every 2D draw call is expressed in the coordinate space of the innermost
//! pushed rect. Translation moves a rect into viewport space by that rect's
//! origin; clipping intersects it with that rect's bounds.

use vellum_core::math::{Rect, Vec2};

/// A stack of nested clip rects, stored in viewport space.
#[derive(Debug, Clone)]
pub struct RectStack {
    stack: Vec<Rect>,
    top: Rect,
    viewport: Rect,
}

impl RectStack {
    /// Creates an empty stack covering a `width` x `height` viewport.
    pub fn new(width: u32, height: u32) -> Self {
        let viewport = Self::viewport_rect(width, height);
        Self {
            stack: Vec::new(),
            top: viewport,
            viewport,
        }
    }

    fn viewport_rect(width: u32, height: u32) -> Rect {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Rect::new(0, clamp(width), 0, clamp(height))
    }

    /// Resets to an empty stack over a new viewport size.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.stack.clear();
        self.viewport = Self::viewport_rect(width, height);
        self.top = self.viewport;
    }

    /// Pushes `rect`, given in the current local space, as the new innermost region.
    pub fn push(&mut self, rect: Rect) {
        let translated = self.translate(rect);
        self.stack.push(translated);
        self.top = translated;
    }

    /// Removes the innermost region, returning it in viewport space.
    ///
    /// Returns `None` when the stack is already empty.
    pub fn pop(&mut self) -> Option<Rect> {
        let popped = self.stack.pop()?;
        self.top = self.stack.last().copied().unwrap_or(self.viewport);
        Some(popped)
    }

    /// The innermost region in viewport space, or the full viewport when empty.
    #[inline]
    pub fn top(&self) -> Rect {
        self.top
    }

    /// The number of pushed regions.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` when no region is pushed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Moves a local rect into viewport space.
    #[inline]
    pub fn translate(&self, rect: Rect) -> Rect {
        rect.offset(self.top.left, self.top.top)
    }

    /// Moves a viewport-space rect back into local space.
    #[inline]
    pub fn untranslate(&self, rect: Rect) -> Rect {
        rect.offset(self.top.left.saturating_neg(), self.top.top.saturating_neg())
    }

    /// Clips a viewport-space rect to the innermost region.
    #[inline]
    pub fn clip(&self, rect: Rect) -> Rect {
        rect.intersect(&self.top)
    }

    /// Translates a local rect into viewport space and clips it.
    #[inline]
    pub fn translate_and_clip(&self, rect: Rect) -> Rect {
        self.clip(self.translate(rect))
    }

    /// Moves a local point into viewport space.
    #[inline]
    pub fn translate_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x + self.top.left as f32,
            point.y + self.top.top as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack_is_viewport() {
        let stack = RectStack::new(200, 100);
        assert_eq!(stack.top(), Rect::new(0, 200, 0, 100));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_push_translates_by_parent_origin() {
        let mut stack = RectStack::new(800, 600);
        stack.push(Rect::new(100, 300, 50, 250));
        stack.push(Rect::new(10, 20, 10, 20));
        assert_eq!(stack.top(), Rect::new(110, 120, 60, 70));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_pop_restores_parent_then_viewport() {
        let mut stack = RectStack::new(800, 600);
        stack.push(Rect::new(100, 300, 50, 250));
        stack.push(Rect::new(10, 20, 10, 20));

        assert_eq!(stack.pop(), Some(Rect::new(110, 120, 60, 70)));
        assert_eq!(stack.top(), Rect::new(100, 300, 50, 250));
        stack.pop();
        assert_eq!(stack.top(), Rect::new(0, 800, 0, 600));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_nested_clip_scenario() {
        let mut stack = RectStack::new(200, 200);
        stack.push(Rect::new(0, 100, 0, 100));
        let clipped = stack.translate_and_clip(Rect::new(-20, 50, -20, 50));
        assert_eq!(clipped, Rect::new(0, 50, 0, 50));
        assert_eq!(stack.untranslate(clipped), Rect::new(0, 50, 0, 50));
    }

    #[test]
    fn test_clip_is_idempotent_under_translation() {
        let mut stack = RectStack::new(640, 480);
        stack.push(Rect::new(40, 240, 30, 130));
        let once = stack.translate_and_clip(Rect::new(-100, 500, 20, 60));
        assert_eq!(stack.clip(once), once);
        assert_eq!(once, Rect::new(40, 240, 50, 90));
    }

    #[test]
    fn test_translate_round_trip() {
        let mut stack = RectStack::new(640, 480);
        stack.push(Rect::new(7, 100, 9, 100));
        let r = Rect::new(1, 2, 3, 4);
        assert_eq!(stack.untranslate(stack.translate(r)), r);
        assert_eq!(stack.translate_point(Vec2::new(1.0, 1.0)), Vec2::new(8.0, 10.0));
    }

    #[test]
    fn test_extreme_pushes_saturate() {
        let mut stack = RectStack::new(640, 480);
        stack.push(Rect::from_xywh(i32::MAX - 10, 0, 100, 10));
        stack.push(Rect::new(50, 60, 0, 5));
        assert_eq!(stack.top(), Rect::new(i32::MAX, i32::MAX, 0, 5));
        assert_eq!(stack.untranslate(stack.top()), Rect::new(0, 0, 0, 5));
        assert_eq!(stack.translate_and_clip(Rect::new(0, 10, 0, 5)).width(), 0);
    }

    #[test]
    fn test_reset_clears_stack() {
        let mut stack = RectStack::new(640, 480);
        stack.push(Rect::new(7, 100, 9, 100));
        stack.reset(320, 240);
        assert!(stack.is_empty());
        assert_eq!(stack.top(), Rect::new(0, 320, 0, 240));
    }
}
