//! Fixed-size pagination arithmetic.
//!
//! All operations are pure: they take the current [`PageState`] and the
//! length of the filtered, sorted sequence and return the next state.

use crate::model::ConfigError;
use std::ops::Range;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Number of pages for `len` rows. Never less than 1.
pub fn page_count(len: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    len.div_ceil(size).max(1)
}

/// Current page position. `size` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    index: usize,
    size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// First page with the given size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPageSize`] if `size` is 0.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(Self { index: 0, size })
    }

    /// Zero-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rows per page.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Pages needed for `len` rows.
    pub fn page_count(&self, len: usize) -> usize {
        page_count(len, self.size)
    }

    /// Clamp the index into `[0, page_count - 1]`.
    pub fn clamped(self, len: usize) -> Self {
        let last = self.page_count(len) - 1;
        Self {
            index: self.index.min(last),
            ..self
        }
    }

    /// Row range of the (clamped) current page within `len` rows.
    pub fn range(&self, len: usize) -> Range<usize> {
        let page = self.clamped(len);
        let start = page.index * page.size;
        let end = (start + page.size).min(len);
        start.min(end)..end
    }

    /// Back to the first page.
    pub fn first(self) -> Self {
        Self { index: 0, ..self }
    }

    /// Jump to the last page.
    pub fn last(self, len: usize) -> Self {
        Self {
            index: self.page_count(len) - 1,
            ..self
        }
    }

    /// Advance one page, stopping at the last.
    pub fn next(self, len: usize) -> Self {
        Self {
            index: self.index + 1,
            ..self
        }
        .clamped(len)
    }

    /// Go back one page, stopping at the first.
    pub fn prev(self) -> Self {
        Self {
            index: self.index.saturating_sub(1),
            ..self
        }
    }

    /// Jump to `index`, clamped.
    pub fn with_index(self, index: usize, len: usize) -> Self {
        Self { index, ..self }.clamped(len)
    }

    /// Change the page size, keeping the first visible row visible.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPageSize`] if `size` is 0.
    pub fn resized(self, size: usize, len: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        let first_row = self.range(len).start;
        Ok(Self {
            index: first_row / size,
            size,
        }
        .clamped(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_at_least_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
    }

    #[test]
    fn zero_size_is_a_configuration_error() {
        assert_eq!(PageState::new(0), Err(ConfigError::ZeroPageSize));
        let page = PageState::new(10).unwrap();
        assert_eq!(page.resized(0, 5), Err(ConfigError::ZeroPageSize));
    }

    #[test]
    fn clamp_pulls_index_back_when_rows_shrink() {
        let page = PageState::new(10).unwrap().with_index(2, 25);
        assert_eq!(page.index(), 2);
        assert_eq!(page.range(25), 20..25);

        let shrunk = page.clamped(5);

        assert_eq!(shrunk.index(), 0);
        assert_eq!(shrunk.range(5), 0..5);
    }

    #[test]
    fn range_never_reports_empty_page_when_rows_exist() {
        let page = PageState::new(10).unwrap().with_index(2, 25);

        assert_eq!(page.range(11), 10..11);
        assert_eq!(page.range(0), 0..0);
    }

    #[test]
    fn next_and_prev_stop_at_bounds() {
        let page = PageState::new(10).unwrap();

        assert_eq!(page.prev().index(), 0);
        assert_eq!(page.next(25).next(25).next(25).index(), 2);
        assert_eq!(page.last(25).index(), 2);
        assert_eq!(page.last(25).first().index(), 0);
    }

    #[test]
    fn resize_keeps_first_visible_row_visible() {
        let page = PageState::new(10).unwrap().with_index(3, 100);
        assert_eq!(page.range(100).start, 30);

        let bigger = page.resized(25, 100).unwrap();
        assert_eq!(bigger.index(), 1);
        assert!(bigger.range(100).contains(&30));

        let smaller = page.resized(5, 100).unwrap();
        assert_eq!(smaller.index(), 6);
        assert_eq!(smaller.range(100).start, 30);
    }
}
