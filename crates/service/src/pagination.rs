//! Offset/limit pagination over an already filtered list.

pub const DEFAULT_LIMIT: usize = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// number of leading items to skip
    pub offset: usize,
    /// maximum number of items returned
    pub limit: usize,
}

impl Pagination {
    pub fn new(offset: Option<usize>, limit: Option<usize>) -> Self {
        Self { offset: offset.unwrap_or(0), limit: limit.unwrap_or(DEFAULT_LIMIT) }
    }

    /// Elements at `[offset, offset + limit)`, clamped to the list bounds.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { offset: 0, limit: DEFAULT_LIMIT } }
}
