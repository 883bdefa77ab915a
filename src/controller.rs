//! Page controller
//!
//! A single enumerated current page plus the session constitute all
//! cross-page state. The controller owns the session exclusively; every
//! mutation flows through login/logout or an explicit identity refresh,
//! and consumers only ever see it by shared reference.

use std::fmt;
use tracing::debug;

use crate::catalog::{Catalog, ContentItem, ItemStatus};
use crate::entitlement::{can_access, locked_action, LockedAction};
use crate::identity::{IdentityRecord, Session};

/// The enumerated pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Tutorials,
    Pricing,
    Auth,
    Admin,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Home => write!(f, "home"),
            Page::Tutorials => write!(f, "tutorials"),
            Page::Pricing => write!(f, "pricing"),
            Page::Auth => write!(f, "auth"),
            Page::Admin => write!(f, "admin"),
        }
    }
}

/// Result of a learner opening a catalog item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemAccess {
    /// Access granted; the view was recorded and the detail renders
    Granted(ContentItem),
    /// Premium item denied; the controller navigated to the given page
    Redirected(Page),
    /// No such item visible to this session
    NotFound,
}

/// Holds the current page and session, and routes page requests
#[derive(Debug, Default)]
pub struct SessionController {
    page: Page,
    session: Session,
}

impl SessionController {
    /// Start anonymous on the landing page
    pub fn new() -> Self {
        Self::default()
    }

    /// The current page
    pub fn page(&self) -> Page {
        self.page
    }

    /// The current session, read-only
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Navigate to a page
    ///
    /// Requesting the admin page without an admin identity silently lands
    /// on the landing page; no error is surfaced.
    pub fn navigate(&mut self, target: Page) -> Page {
        self.page = match target {
            Page::Admin if !self.session.is_admin() => {
                debug!("Admin page requested without admin identity, landing on home");
                Page::Home
            }
            page => page,
        };
        self.page
    }

    /// Install a freshly fetched identity and land on the landing page
    pub fn complete_login(&mut self, identity: IdentityRecord) {
        self.session = Session::SignedIn(identity);
        self.page = Page::Home;
    }

    /// Clear the session and land on the landing page
    pub fn logout(&mut self) {
        self.session = Session::Anonymous;
        self.page = Page::Home;
    }

    /// Replace the signed-in identity wholesale (subscription flips,
    /// admin edits). Does nothing for anonymous sessions; the page is
    /// left where it is.
    pub fn refresh_identity(&mut self, identity: IdentityRecord) {
        if self.session.is_signed_in() {
            self.session = Session::SignedIn(identity);
        }
    }

    /// Open a catalog item as the current session
    ///
    /// Granted access records a view. A denied premium item navigates
    /// anonymous visitors to sign-in and free-tier accounts to pricing.
    /// Drafts are invisible to non-admin sessions.
    pub fn open_item(&mut self, catalog: &Catalog, item_id: &str) -> ItemAccess {
        let Some(mut item) = catalog.get(item_id) else {
            return ItemAccess::NotFound;
        };

        if item.status == ItemStatus::Draft && !self.session.is_admin() {
            return ItemAccess::NotFound;
        }

        if can_access(&self.session, &item) {
            if let Some(views) = catalog.record_view(item_id) {
                item.views = views;
            }
            return ItemAccess::Granted(item);
        }

        let target = match locked_action(&self.session) {
            LockedAction::SignIn => Page::Auth,
            LockedAction::Upgrade => Page::Pricing,
        };
        self.page = target;
        ItemAccess::Redirected(target)
    }
}
