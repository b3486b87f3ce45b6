//! Listing builders shared by tests

use super::listing::{CarSpecs, Listing, ListingId, Media, MediaKind, Seller};
use super::store::ListingStore;

pub(crate) fn listing(id: &str, kind: MediaKind, likes: u32) -> Listing {
    let source = match kind {
        MediaKind::Embed => format!("vid-{}", id),
        MediaKind::Video => format!("https://media.test/{}.mp4", id),
        MediaKind::Image => format!("https://img.test/{}.jpg", id),
    };
    Listing {
        id: ListingId::new(id),
        make: "Acme".to_string(),
        model: format!("Roadster {}", id),
        trim: "Base".to_string(),
        year: 2020,
        price: 45000,
        mileage: "12,000".to_string(),
        media: Media {
            kind,
            source,
            poster: Some(format!("https://img.test/{}-poster.jpg", id)),
        },
        description: "Test car".to_string(),
        specs: CarSpecs {
            zero_to_sixty: "4.0s".to_string(),
            horsepower: 400,
            engine: None,
            mpg: None,
            top_speed: None,
            transmission: None,
            drivetrain: None,
        },
        seller: Seller {
            id: format!("seller-{}", id),
            name: format!("Seller {}", id),
            avatar_url: "https://img.test/avatar.png".to_string(),
        },
        likes,
        featured: false,
    }
}

/// embed, video, image, image
pub(crate) fn mixed_store() -> ListingStore {
    ListingStore::new(vec![
        listing("e", MediaKind::Embed, 1500),
        listing("v", MediaKind::Video, 950),
        listing("i", MediaKind::Image, 10),
        listing("j", MediaKind::Image, 0),
    ])
}
