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

use bicrystal_model::index::VariableIndex;

/// A linear undo log of fixed variables with frame markers.
///
/// `push_frame` opens a decision level; every fixing made afterwards,
/// whether decided or propagated, is undone by the matching `backtrack`.
#[derive(Debug, Clone, Default)]
pub struct SearchTrail {
    entries: Vec<VariableIndex>,
    /// `frames[i]` is the position in `entries` where level `i` began.
    frames: Vec<usize>,
}

impl SearchTrail {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves room for `num_variables` entries and levels.
    pub fn ensure_capacity(&mut self, num_variables: usize) {
        if self.entries.capacity() < num_variables {
            self.entries.reserve(num_variables - self.entries.len());
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
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    #[inline]
    pub fn push(&mut self, variable: VariableIndex) {
        self.entries.push(variable);
    }

    /// Pops the innermost frame, handing every variable fixed inside it to
    /// `undo` in reverse order. Returns `false` if no frame was open.
    pub fn backtrack<F>(&mut self, mut undo: F) -> bool
    where
        F: FnMut(VariableIndex),
    {
        let Some(start) = self.frames.pop() else {
            return false;
        };
        while self.entries.len() > start {
            if let Some(variable) = self.entries.pop() {
                undo(variable);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VariableIndex {
        VariableIndex::new(i)
    }

    #[test]
    fn test_backtrack_undoes_innermost_frame_in_reverse() {
        let mut trail = SearchTrail::new();
        trail.push_frame();
        trail.push(v(0));
        trail.push_frame();
        trail.push(v(1));
        trail.push(v(2));

        let mut undone = Vec::new();
        assert!(trail.backtrack(|x| undone.push(x)));
        assert_eq!(undone, vec![v(2), v(1)]);
        assert_eq!(trail.num_entries(), 1);
        assert_eq!(trail.depth(), 1);

        undone.clear();
        assert!(trail.backtrack(|x| undone.push(x)));
        assert_eq!(undone, vec![v(0)]);
        assert!(!trail.backtrack(|_| {}));
    }
}
