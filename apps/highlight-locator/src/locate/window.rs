//! Bounded sliding window over text runs
//!
//! Keeps the last `capacity` runs together with their concatenated,
//! lowercased text. Front eviction is O(1) on the run deque; the text buffer
//! drops the evicted run's prefix, which is bounded by the window size.
//!
//! Lowercasing can turn one char into several (`İ` becomes `i` plus a
//! combining dot), so each run remembers which original char every lowered
//! char came from. Offsets handed out by `runs_for_range` are in the run's
//! own content, not in the lowered buffer.

use std::collections::VecDeque;

use crate::document::TextRun;

/// Default number of runs a match may span
pub const DEFAULT_WINDOW_RUNS: usize = 20;

#[derive(Debug)]
struct WindowEntry<'a> {
    run: &'a TextRun,
    /// Length of the lowercased content in bytes
    bytes: usize,
    /// Original char index for each lowered char
    origin: Vec<usize>,
}

impl WindowEntry<'_> {
    /// Length of the lowercased content in chars
    fn chars(&self) -> usize {
        self.origin.len()
    }
}

/// Lowercase char by char, the same way snippets are normalized
pub(crate) fn lowercase_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Rolling window of runs and their lowercase concatenation
#[derive(Debug)]
pub struct RunWindow<'a> {
    entries: VecDeque<WindowEntry<'a>>,
    text: String,
    total_chars: usize,
    capacity: usize,
}

impl<'a> RunWindow<'a> {
    /// Create a window holding at most `capacity` runs (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            text: String::new(),
            total_chars: 0,
            capacity,
        }
    }

    /// Append a run, evicting the oldest one when the window is full
    pub fn push(&mut self, run: &'a TextRun) {
        let before = self.text.len();
        let mut origin = Vec::with_capacity(run.content.len());
        for (index, c) in run.content.chars().enumerate() {
            for lowered in c.to_lowercase() {
                self.text.push(lowered);
                origin.push(index);
            }
        }
        let entry = WindowEntry {
            run,
            bytes: self.text.len() - before,
            origin,
        };
        self.total_chars += entry.chars();
        self.entries.push_back(entry);

        if self.entries.len() > self.capacity {
            self.evict_front();
        }
    }

    fn evict_front(&mut self) {
        if let Some(front) = self.entries.pop_front() {
            self.text.drain(..front.bytes);
            self.total_chars -= front.chars();
        }
    }

    /// Concatenated lowercase text of the runs in the window
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total length of the window text in chars
    pub fn char_len(&self) -> usize {
        self.total_chars
    }

    /// Runs covering the char range `start..end` of the window text
    ///
    /// The first run is the first whose cumulative length exceeds `start`,
    /// the last is the first whose cumulative length reaches `end`. Returns
    /// the runs plus the start offset in the first run's content and the
    /// exclusive end offset in the last run's content, both in chars.
    pub fn runs_for_range(&self, start: usize, end: usize) -> Option<(Vec<&'a TextRun>, usize, usize)> {
        if start >= end || end > self.total_chars {
            return None;
        }

        let mut runs = Vec::new();
        let mut first_offset = None;
        let mut cumulative = 0;

        for entry in &self.entries {
            let run_start = cumulative;
            cumulative += entry.chars();

            if cumulative <= start {
                continue;
            }
            if first_offset.is_none() {
                first_offset = entry.origin.get(start - run_start).copied();
            }
            runs.push(entry.run);

            if cumulative >= end {
                // end > run_start here, so the last matched char exists
                let last = entry.origin.get(end - run_start - 1)?;
                return first_offset.map(|first| (runs, first, last + 1));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str) -> TextRun {
        TextRun::new(content, 0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_window_concatenates_lowercase() {
        let runs = [run("Total"), run(" DUE")];
        let mut window = RunWindow::new(4);
        for r in &runs {
            window.push(r);
        }
        assert_eq!(window.text(), "total due");
        assert_eq!(window.len(), 2);
        assert_eq!(window.char_len(), 9);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let runs = [run("a"), run("bb"), run("ccc")];
        let mut window = RunWindow::new(2);
        for r in &runs {
            window.push(r);
        }
        assert_eq!(window.len(), 2);
        assert_eq!(window.text(), "bbccc");
        assert_eq!(window.char_len(), 5);
    }

    #[test]
    fn test_eviction_with_multibyte_content() {
        let runs = [run("Größe"), run("ÉTÉ"), run("x")];
        let mut window = RunWindow::new(2);
        for r in &runs {
            window.push(r);
        }
        assert_eq!(window.text(), "étéx");
        assert_eq!(window.char_len(), 4);
    }

    #[test]
    fn test_runs_for_range_spanning() {
        let runs = [run("GAP"), run(" Premium:"), run(" $500")];
        let mut window = RunWindow::new(20);
        for r in &runs {
            window.push(r);
        }
        // "gap premium: $500", match "premium: $500" at chars 4..17
        let (matched, start, end) = window.runs_for_range(4, 17).unwrap();
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].content, " Premium:");
        assert_eq!(matched[1].content, " $500");
        assert_eq!(start, 1);
        assert_eq!(end, 5);
    }

    #[test]
    fn test_runs_for_range_within_single_run() {
        let runs = [run("abc"), run("defgh")];
        let mut window = RunWindow::new(20);
        for r in &runs {
            window.push(r);
        }
        let (matched, start, end) = window.runs_for_range(4, 6).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].content, "defgh");
        assert_eq!((start, end), (1, 3));
    }

    #[test]
    fn test_runs_for_range_maps_expanding_lowercase() {
        // "İ" lowercases to two chars
        let runs = [run("İstanbul Premium"), run(" $500")];
        let mut window = RunWindow::new(20);
        for r in &runs {
            window.push(r);
        }
        assert_eq!(window.char_len(), 22);

        // "premium" sits at lowered chars 10..17
        let (matched, start, end) = window.runs_for_range(10, 17).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!((start, end), (9, 16));

        // "premium $5" continues into the second run
        let (matched, start, end) = window.runs_for_range(10, 20).unwrap();
        assert_eq!(matched.len(), 2);
        assert_eq!((start, end), (9, 3));
    }

    #[test]
    fn test_runs_for_range_rejects_bad_range() {
        let runs = [run("abc")];
        let mut window = RunWindow::new(20);
        window.push(&runs[0]);
        assert!(window.runs_for_range(2, 2).is_none());
        assert!(window.runs_for_range(0, 4).is_none());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let runs = [run("a"), run("b")];
        let mut window = RunWindow::new(0);
        for r in &runs {
            window.push(r);
        }
        assert_eq!(window.len(), 1);
        assert_eq!(window.text(), "b");
    }
}
