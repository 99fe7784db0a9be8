use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `skip`/`limit` window for paged collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

impl Pagination {
    #[must_use]
    pub const fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// Query string including the leading `?`.
    #[must_use]
    pub fn query(&self) -> String {
        format!("?skip={}&limit={}", self.skip, self.limit)
    }
}

/// One fetched page of a collection.
///
/// `pagination` is `None` for collections the API returns in full.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        Self { items, pagination }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Whether a full page came back, i.e. another page may exist.
    #[must_use]
    pub fn may_have_more(&self) -> bool {
        self.pagination
            .is_some_and(|p| u32::try_from(self.items.len()).is_ok_and(|n| n >= p.limit))
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
