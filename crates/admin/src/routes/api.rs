//! HTMX API fragments.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::{middleware::RequireAdminAuth, state::AppState};

/// Pending-work badges fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/badges.html")]
pub struct BadgesTemplate {
    pub orders: u64,
    pub refunds: u64,
    pub returns: u64,
}

/// Pending-work badges fragment (polled by the shell every 30 seconds).
#[instrument(skip(state))]
pub async fn badges(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let counts = state.badges().snapshot();
    BadgesTemplate {
        orders: counts.orders,
        refunds: counts.refunds,
        returns: counts.returns,
    }
}
