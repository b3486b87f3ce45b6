//! Overlay state machine and the cosmetic session flag
//!
//! At most one overlay is visible at a time. The overlay is a single enum
//! value, so opening one implicitly replaces whatever was open before.

use super::listing::ListingId;

/// The overlay currently shown on top of the feed
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Auth,
    Share,
    Specs(ListingId),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }
}

/// Sign-in providers offered by the auth sheet. All of them succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInOption {
    Google,
    Facebook,
    TikTok,
    Email,
}

impl SignInOption {
    pub const ALL: [SignInOption; 4] = [
        SignInOption::Google,
        SignInOption::Facebook,
        SignInOption::TikTok,
        SignInOption::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SignInOption::Google => "Continue with Google",
            SignInOption::Facebook => "Continue with Facebook",
            SignInOption::TikTok => "Continue with TikTok",
            SignInOption::Email => "Continue with Email",
        }
    }
}

/// Targets offered by the share sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareTarget {
    WhatsApp,
    Instagram,
    TikTok,
    CopyLink,
    Message,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 5] = [
        ShareTarget::WhatsApp,
        ShareTarget::Instagram,
        ShareTarget::TikTok,
        ShareTarget::CopyLink,
        ShareTarget::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShareTarget::WhatsApp => "WhatsApp",
            ShareTarget::Instagram => "Instagram",
            ShareTarget::TikTok => "TikTok",
            ShareTarget::CopyLink => "Copy Link",
            ShareTarget::Message => "Message",
        }
    }
}

/// Result of asking to contact a seller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Not signed in; the auth sheet is now open
    AuthRequired,
    /// Signed in; the caller should perform the contact side effect
    Contact,
}

/// Owns the overlay state, the session flag and the cursor inside the
/// open sheet. Reset on every process start.
#[derive(Clone, Debug, Default)]
pub struct ModalController {
    modal: Modal,
    authenticated: bool,
    cursor: usize,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Highlighted option inside the auth or share sheet
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn open(&mut self, modal: Modal) {
        tracing::debug!(from = ?self.modal, to = ?modal, "Modal transition");
        self.modal = modal;
        self.cursor = 0;
    }

    pub fn dismiss(&mut self) {
        if self.modal.is_open() {
            self.open(Modal::Closed);
        }
    }

    pub fn open_share(&mut self) {
        self.open(Modal::Share);
    }

    pub fn open_specs(&mut self, listing: ListingId) {
        self.open(Modal::Specs(listing));
    }

    /// Contact gate: opens the auth sheet when signed out, otherwise
    /// leaves the overlay alone and tells the caller to go ahead.
    pub fn contact_seller(&mut self) -> ContactOutcome {
        if self.authenticated {
            ContactOutcome::Contact
        } else {
            self.open(Modal::Auth);
            ContactOutcome::AuthRequired
        }
    }

    /// Contact pressed inside the specs drawer: the drawer closes first.
    pub fn contact_from_specs(&mut self) -> ContactOutcome {
        self.dismiss();
        self.contact_seller()
    }

    /// Any provider counts as a successful sign-in. Ignored unless the
    /// auth sheet is open.
    pub fn sign_in(&mut self, option: SignInOption) -> bool {
        if self.modal != Modal::Auth {
            return false;
        }
        tracing::info!(provider = ?option, "Signed in");
        self.authenticated = true;
        self.open(Modal::Closed);
        true
    }

    /// Picking a share target just closes the sheet.
    pub fn share_to(&mut self, target: ShareTarget) -> bool {
        if self.modal != Modal::Share {
            return false;
        }
        tracing::info!(target = target.label(), "Shared listing");
        self.open(Modal::Closed);
        true
    }

    fn option_count(&self) -> usize {
        match self.modal {
            Modal::Auth => SignInOption::ALL.len(),
            Modal::Share => ShareTarget::ALL.len(),
            _ => 0,
        }
    }

    pub fn cursor_next(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn cursor_prev(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Activate the highlighted option of the open sheet
    pub fn confirm(&mut self) -> bool {
        match self.modal {
            Modal::Auth => self.sign_in(SignInOption::ALL[self.cursor]),
            Modal::Share => self.share_to(ShareTarget::ALL[self.cursor]),
            _ => false,
        }
    }
}
