//! Role gate.
//!
//! Decides whether a user may open a page. Redirecting is left to the
//! caller; this module only says where to go.

use serde::Serialize;

use crate::domain::{User, UserRole};

/// Pages of the inventory front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Login,
    Dashboard,
    Products,
}

impl Page {
    pub const GUARDED: [Page; 2] = [Page::Dashboard, Page::Products];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "/login",
            Page::Dashboard => "/dashboard",
            Page::Products => "/products",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Login",
            Page::Dashboard => "Dashboard",
            Page::Products => "Products",
        }
    }

    /// `None` means any signed-in user.
    pub fn allowed_roles(&self) -> Option<&'static [UserRole]> {
        match self {
            Page::Login => None,
            Page::Dashboard => Some(&[UserRole::Manager]),
            Page::Products => Some(&[UserRole::Manager, UserRole::Storekeeper]),
        }
    }
}

/// Outcome of [`check_access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    RedirectToLogin,
    /// Signed in but lacking the role; send to this page instead
    RedirectTo(Page),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }

    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            AccessDecision::Granted => None,
            AccessDecision::RedirectToLogin => Some(Page::Login.path()),
            AccessDecision::RedirectTo(page) => Some(page.path()),
        }
    }
}

/// True iff a user is present and either no roles are required or the
/// user's role is among them.
pub fn authorize(user: Option<&User>, allowed_roles: Option<&[UserRole]>) -> bool {
    match (user, allowed_roles) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(user), Some(roles)) => roles.contains(&user.role),
    }
}

/// Like [`authorize`], but says where a refused user should go.
pub fn check_access(user: Option<&User>, allowed_roles: Option<&[UserRole]>) -> AccessDecision {
    if user.is_none() {
        return AccessDecision::RedirectToLogin;
    }
    if authorize(user, allowed_roles) {
        AccessDecision::Granted
    } else {
        AccessDecision::RedirectTo(Page::Products)
    }
}

/// Where a user lands right after signing in.
pub fn landing_page(role: UserRole) -> Page {
    match role {
        UserRole::Manager => Page::Dashboard,
        UserRole::Storekeeper => Page::Products,
    }
}

/// Guarded pages the user may open, in menu order.
pub fn navigation(user: &User) -> Vec<Page> {
    Page::GUARDED
        .into_iter()
        .filter(|page| authorize(Some(user), page.allowed_roles()))
        .collect()
}
