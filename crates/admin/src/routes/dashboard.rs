//! Dashboard route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::{filters, middleware::RequireAdminAuth, state::AppState};

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub pending_orders: u64,
    pub pending_refunds: u64,
    pub pending_returns: u64,
}

/// Dashboard page handler.
///
/// Counts come from the badge poller's last snapshot, not a fresh probe.
#[instrument(skip(state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let counts = state.badges().snapshot();

    let template = DashboardTemplate {
        admin_name: admin.name,
        pending_orders: counts.orders,
        pending_refunds: counts.refunds,
        pending_returns: counts.returns,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
