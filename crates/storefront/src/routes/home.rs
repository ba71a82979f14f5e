//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use pawcart_client::ProductQuery;

use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductCardView>,
}

/// Display the home page with the first page of the catalog as featured
/// products. A backend hiccup degrades to an empty shelf rather than an
/// error page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured = match state.api().list_products(&ProductQuery::default()).await {
        Ok(page) => page
            .products
            .iter()
            .take(8)
            .map(ProductCardView::from)
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to load featured products: {e}");
            Vec::new()
        }
    };

    HomeTemplate { featured }
}
