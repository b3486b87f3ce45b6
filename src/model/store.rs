//! Read-only listing store, loaded once at startup

use anyhow::{Context, Result};

use super::listing::{Listing, ListingId};

const BUNDLED_LISTINGS: &str = include_str!("../../assets/listings.json");

/// Ordered, immutable collection of listings backing the feed
#[derive(Clone, Debug, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Load the mock inventory shipped with the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_LISTINGS).context("Failed to parse bundled listings")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let listings: Vec<Listing> = serde_json::from_str(json)?;
        tracing::debug!(count = listings.len(), "Listing store loaded");
        Ok(Self::new(listings))
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Listing> {
        self.listings.get(index)
    }

    pub fn find(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| &l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter()
    }
}
