/// A half-open range of page indexes, `[start, end)`.
///
/// Edits move one boundary by exactly one page. Each edit checks adjacency and returns
/// `false` (leaving the window untouched) when the requested index is not on the matching
/// edge; callers decide how to recover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalWindow {
    start: usize,
    end: usize,
}

impl IntervalWindow {
    /// An empty window anchored at `index`.
    pub const fn empty_at(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Whether `index` is the first or last page inside the window.
    pub fn is_boundary(&self, index: usize) -> bool {
        !self.is_empty() && (index == self.start || index + 1 == self.end)
    }

    /// Whether `index` can be added with a single `extend_*` call.
    pub fn is_adjacent(&self, index: usize) -> bool {
        index == self.end || (self.start > 0 && index == self.start - 1)
    }

    /// Grows the window to include `index == start - 1`.
    pub fn extend_left(&mut self, index: usize) -> bool {
        if self.start == 0 || index != self.start - 1 {
            return false;
        }
        self.start = index;
        true
    }

    /// Grows the window to include `index == end`.
    pub fn extend_right(&mut self, index: usize) -> bool {
        if index != self.end {
            return false;
        }
        self.end = index + 1;
        true
    }

    /// Drops `index == start` from the window.
    pub fn shrink_left(&mut self, index: usize) -> bool {
        if self.is_empty() || index != self.start {
            return false;
        }
        self.start = index + 1;
        true
    }

    /// Drops `index == end - 1` from the window.
    pub fn shrink_right(&mut self, index: usize) -> bool {
        if self.is_empty() || index + 1 != self.end {
            return false;
        }
        self.end = index;
        true
    }

    /// Collapses the window to `[index, index)`.
    pub fn reset(&mut self, index: usize) {
        self.start = index;
        self.end = index;
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }
}
