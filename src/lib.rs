//! Hacker Stories library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which flavour of the search screen to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Search box and result list.
    #[default]
    Classic,
    /// Adds a results-per-page selector that trims the fetched list.
    Paged,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Paged => "paged",
        }
    }
}
