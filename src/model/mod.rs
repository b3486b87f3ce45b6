//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `listing`: Listing, seller and media records
//! - `store`: Read-only listing store
//! - `unit`: Per-unit transient state (likes, mute, embed load phase)
//! - `feed`: Feed renderer state and playback synchronisation
//! - `modal`: Overlay state machine and session flag
//! - `app_model`: Main application model tying the pieces together

mod listing;
mod store;
mod unit;
mod feed;
mod modal;
mod app_model;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export all public types for convenient access
pub use listing::{CarSpecs, Listing, ListingId, Media, MediaKind, Seller};

pub use store::ListingStore;

pub use unit::{LoadPhase, UnitState};

pub use feed::{FeedMessage, FeedState};

pub use modal::{ContactOutcome, Modal, ModalController, ShareTarget, SignInOption};

pub use app_model::{AppModel, Notice};
