//! Product browsing route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use pawcart_client::{ApiError, ProductQuery};
use pawcart_core::{Product, ProductId};

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Product display data for listing cards.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub discount_percent: Option<u32>,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price.to_string(),
            compare_at_price: product.compare_at_price.map(|p| p.to_string()),
            discount_percent: product.discount_percent(),
            image: product.featured_image().map(String::from),
            in_stock: product.in_stock(),
        }
    }
}

/// Product display data for the detail page.
pub struct ProductDetailView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub discount_percent: Option<u32>,
    pub category: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub inventory: i64,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            compare_at_price: product.compare_at_price.map(|p| p.to_string()),
            discount_percent: product.discount_percent(),
            category: product.category.clone(),
            images: product.images.clone(),
            tags: product.tags.clone(),
            in_stock: product.in_stock(),
            inventory: product.inventory,
        }
    }
}

/// Listing query string.
#[derive(Debug, Deserialize)]
pub struct ListingParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
}

/// Product not-found template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {}

/// Display the product listing with optional search, category filter, and
/// paging.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = ProductQuery {
        search: params.search.clone().filter(|s| !s.trim().is_empty()),
        category: params.category.clone().filter(|c| !c.trim().is_empty()),
        page: params.page,
    };

    let page = state.api().list_products(&query).await?;

    Ok(ProductIndexTemplate {
        products: page.products.iter().map(ProductCardView::from).collect(),
        search: query.search,
        category: query.category,
        page: page.page,
        total_pages: page.total_pages,
        has_next_page: page.has_next_page(),
    })
}

/// Display a product detail page. Unknown IDs render a friendly
/// not-found page instead of a bare 404.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.api().get_product(&ProductId::new(id)).await {
        Ok(product) => Ok(ProductShowTemplate {
            product: ProductDetailView::from(&product),
        }
        .into_response()),
        Err(ApiError::NotFound(_)) => Ok((
            axum::http::StatusCode::NOT_FOUND,
            ProductNotFoundTemplate {},
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}
