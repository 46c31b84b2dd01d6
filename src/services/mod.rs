pub mod artist;
pub mod error;
pub mod schedule;
pub mod search;
pub mod show;
pub mod venue;

use async_graphql::SimpleObject;
use serde::Serialize;

/// One venue or artist in a listing, with its count of upcoming shows.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Listing>,
}

impl From<Vec<Listing>> for SearchResults {
    fn from(data: Vec<Listing>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Blank optional form values are stored as NULL.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
