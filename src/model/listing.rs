//! Listing records and the types they are built from

use std::fmt;

use serde::Deserialize;

/// Identity of a listing within the feed
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dealer or private seller
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
}

/// How a listing's media is played back
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    /// Third-party hosted player addressed by an opaque video id
    Embed,
}

impl MediaKind {
    /// Whether the unit shows a mute control
    pub fn has_audio(self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Embed)
    }
}

/// Media descriptor for a listing
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    /// Image/video URL, or the embed video id for `MediaKind::Embed`
    pub source: String,
    #[serde(default)]
    pub poster: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSpecs {
    pub zero_to_sixty: String,
    pub horsepower: u32,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub mpg: Option<String>,
    #[serde(default)]
    pub top_speed: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub drivetrain: Option<String>,
}

/// A single car for sale. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub trim: String,
    pub year: u16,
    /// Asking price in whole dollars
    pub price: u64,
    pub mileage: String,
    pub media: Media,
    pub description: String,
    pub specs: CarSpecs,
    pub seller: Seller,
    pub likes: u32,
    #[serde(default)]
    pub featured: bool,
}

impl Listing {
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// Public link used by the share sheet, e.g. `https://carfeed.app/porsche-911-gt3`
    pub fn share_url(&self) -> String {
        let slug: String = self
            .title()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("https://carfeed.app/{}", slug)
    }
}
