pub mod artists;
pub mod pages;
pub mod shows;
pub mod venues;

use serde::{Deserialize, Serialize};

use crate::services::SearchResults;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    pub search_term: String,
    pub results: SearchResults,
}
