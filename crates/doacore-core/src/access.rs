//! View authorization policy
//!
//! Every navigation target is gated by one declarative table mapping a
//! [`View`] to the audience allowed to see it. [`authorize`] is evaluated on
//! each request; nothing is cached, since the role travels with the session.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Role;

/// Client navigation targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Login,
    Home,
    Dashboard,
    Users,
    Teams,
    Events,
    Donations,
}

impl View {
    /// Default landing view for authenticated sessions
    pub const LANDING: View = View::Home;

    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::Home => "/home",
            View::Dashboard => "/dashboard",
            View::Users => "/usuarios",
            View::Teams => "/equipes",
            View::Events => "/eventos",
            View::Donations => "/doacoes",
        }
    }

    /// Resolve a client route. Trailing slashes and query strings are ignored;
    /// the root path is the landing view.
    pub fn from_path(path: &str) -> Option<View> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(View::LANDING);
        }

        let normalized = if trimmed.starts_with('/') {
            trimmed.to_lowercase()
        } else {
            format!("/{}", trimmed.to_lowercase())
        };

        POLICY
            .iter()
            .map(|(view, _)| *view)
            .find(|view| view.path() == normalized)
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(View),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

#[derive(Debug)]
enum Audience {
    /// Only sessions that are not signed in
    Anonymous,
    /// Any signed-in role
    AnyRole,
    Roles(&'static [Role]),
}

const POLICY: &[(View, Audience)] = &[
    (View::Login, Audience::Anonymous),
    (View::Home, Audience::AnyRole),
    (View::Dashboard, Audience::AnyRole),
    (View::Donations, Audience::AnyRole),
    (View::Users, Audience::Roles(&[Role::Administrator])),
    (View::Teams, Audience::Roles(&[Role::Administrator, Role::Organizer])),
    (View::Events, Audience::Roles(&[Role::Administrator, Role::Organizer])),
];

fn audience(view: View) -> &'static Audience {
    POLICY
        .iter()
        .find(|(v, _)| *v == view)
        .map(|(_, audience)| audience)
        .unwrap_or(&Audience::Roles(&[]))
}

/// Decide whether `role` (or an anonymous visitor) may open `view`.
pub fn authorize(role: Option<Role>, view: View) -> Access {
    match (audience(view), role) {
        (Audience::Anonymous, None) => Access::Allow,
        (Audience::Anonymous, Some(_)) => Access::Redirect(View::LANDING),
        (_, None) => Access::Redirect(View::Login),
        (Audience::AnyRole, Some(_)) => Access::Allow,
        (Audience::Roles(roles), Some(role)) if roles.contains(&role) => Access::Allow,
        (Audience::Roles(_), Some(_)) => Access::Redirect(View::LANDING),
    }
}

/// True when `role` may open at least one of `views`.
pub fn authorize_any(role: Role, views: &[View]) -> bool {
    views
        .iter()
        .any(|view| authorize(Some(role), *view).is_allowed())
}
