//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use doacore_core::{models, View};

/// Registers the bearer session token used by every protected route.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DoaCore API",
        version = "0.1.0",
        description = "Donation management API: accounts and roles, teams, events, and donations with their line items. All endpoints live under /api/."
    ),
    paths(
        handlers::root::api_root,
        // Auth
        handlers::login::login,
        handlers::access::check_access,
        // Users
        handlers::roles::list_roles,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        // Teams
        handlers::teams::list_teams,
        handlers::teams::create_team,
        handlers::teams::delete_team,
        handlers::teams::list_members,
        handlers::teams::add_member,
        handlers::teams::remove_member,
        // Events
        handlers::events::list_events,
        handlers::events::create_event,
        handlers::events::delete_event,
        // Donations
        handlers::donations::create_donation,
        handlers::donations::list_donations,
        handlers::donations::donation_summary,
        handlers::donations::get_donation,
        handlers::donations::list_donation_items,
        handlers::donations::delete_donation,
    ),
    components(
        schemas(
            models::Role,
            models::RoleRecord,
            models::Account,
            models::TeamSummary,
            models::UserProfile,
            models::LoginRequest,
            models::CreateAccountRequest,
            models::UpdateAccountRequest,
            models::Team,
            models::TeamListing,
            models::CreateTeamRequest,
            models::TeamMember,
            models::AddMemberRequest,
            models::Event,
            models::EventListing,
            models::CreateEventRequest,
            models::DonationKind,
            models::Donation,
            models::DonationListing,
            models::DonationDetail,
            models::DonationSubmission,
            models::LineItemSubmission,
            models::LineItem,
            models::KindCount,
            models::DonationSummary,
            View,
            handlers::MessageResponse,
            handlers::login::LoginResponse,
            handlers::access::AccessDecision,
            handlers::donations::DonationCreated,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Service status"),
        (name = "auth", description = "Login and view access checks"),
        (name = "users", description = "Accounts and roles"),
        (name = "teams", description = "Teams and their members"),
        (name = "events", description = "Events that collect donations"),
        (name = "donations", description = "Donations, line items and totals")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_donation_routes() {
        let spec = get_openapi_spec();

        assert!(spec.paths.paths.contains_key("/api/doacoes"));
        assert!(spec.paths.paths.contains_key("/api/doacoes/{id}/itens"));
        assert!(spec.paths.paths.contains_key("/api/login"));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let spec = get_openapi_spec();
        let components = spec.components.unwrap();

        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
