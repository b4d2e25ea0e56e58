// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::branching::Decision;

/// A frame-structured LIFO stack of pending decisions.
///
/// Each frame holds the alternatives still open at one decision level;
/// `pop` never reaches below the current frame.
#[derive(Clone, Debug, Default)]
pub struct DecisionStack {
    entries: Vec<Decision>,
    frames: Vec<usize>,
}

impl DecisionStack {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ensure_capacity(&mut self, num_variables: usize) {
        let entry_capacity = 2 * (num_variables + 1);
        if self.entries.capacity() < entry_capacity {
            self.entries.reserve(entry_capacity - self.entries.len());
        }
        if self.frames.capacity() < num_variables + 1 {
            self.frames.reserve(num_variables + 1 - self.frames.len());
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Discards the innermost frame and whatever it still holds.
    #[inline]
    pub fn pop_frame(&mut self) {
        if let Some(start) = self.frames.pop() {
            self.entries.truncate(start);
        }
    }

    #[inline]
    pub fn push(&mut self, decision: Decision) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `DecisionStack::push` without an open frame"
        );
        self.entries.push(decision);
    }

    /// Pops the next decision of the current frame.
    #[inline]
    pub fn pop(&mut self) -> Option<Decision> {
        let start = *self.frames.last()?;
        if self.entries.len() > start {
            self.entries.pop()
        } else {
            None
        }
    }

    #[inline]
    pub fn is_current_level_empty(&self) -> bool {
        self.frames
            .last()
            .is_none_or(|&start| self.entries.len() <= start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bicrystal_model::index::VariableIndex;

    #[test]
    fn test_pop_stays_within_frame() {
        let mut stack = DecisionStack::new();
        stack.push_frame();
        stack.push(Decision::new(VariableIndex::new(0), false));
        stack.push_frame();
        assert!(stack.is_current_level_empty());
        assert_eq!(stack.pop(), None);

        stack.push(Decision::new(VariableIndex::new(1), true));
        assert_eq!(stack.pop(), Some(Decision::new(VariableIndex::new(1), true)));
        stack.pop_frame();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.pop(), Some(Decision::new(VariableIndex::new(0), false)));
    }
}
