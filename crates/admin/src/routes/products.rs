//! Product management route handlers.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum::{Form, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use pawcart_client::{ProductInput, ProductQuery};
use pawcart_core::{Price, Product, ProductId};

use crate::{filters, middleware::RequireAdminAuth, state::AppState};

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: String,
    pub inventory: i64,
    pub in_stock: bool,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            inventory: product.inventory,
            in_stock: product.in_stock(),
            image_url: product.featured_image().map(String::from),
        }
    }
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
}

/// Product form data. Prices are entered in rupees and converted to paise.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub category: String,
    pub inventory: i64,
    /// Newline-separated image URLs.
    pub images: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
}

impl ProductForm {
    fn into_input(self) -> ProductInput {
        ProductInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: Price::from_rupees(self.price),
            compare_at_price: self
                .compare_at_price
                .filter(|p| *p > 0.0)
                .map(Price::from_rupees),
            category: self.category.trim().to_string(),
            inventory: self.inventory,
            images: self
                .images
                .unwrap_or_default()
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
            tags: self
                .tags
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub page: u32,
    pub total_pages: u32,
    pub search: Option<String>,
}

/// Product form page template, shared by create and edit.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub heading: String,
    pub action: String,
    pub product: Option<ProductFormValues>,
}

/// Current values rendered into the edit form.
pub struct ProductFormValues {
    pub title: String,
    pub description: String,
    pub price_rupees: f64,
    pub compare_at_rupees: Option<f64>,
    pub category: String,
    pub inventory: i64,
    pub images: String,
    pub tags: String,
}

impl From<&Product> for ProductFormValues {
    fn from(product: &Product) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let to_rupees = |p: Price| p.as_paise() as f64 / 100.0;
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price_rupees: to_rupees(product.price),
            compare_at_rupees: product.compare_at_price.map(to_rupees),
            category: product.category.clone(),
            inventory: product.inventory,
            images: product.images.join("\n"),
            tags: product.tags.join(", "),
        }
    }
}

fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Products list page handler.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Html<String> {
    let api_query = ProductQuery {
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        category: None,
        page: query.page,
    };

    let (products, page, total_pages) = match state.api().admin_list_products(&api_query).await {
        Ok(page) => (
            page.products.iter().map(ProductView::from).collect(),
            page.page,
            page.total_pages,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (vec![], 1, 1)
        }
    };

    render(&ProductsIndexTemplate {
        products,
        page,
        total_pages,
        search: query.search,
    })
}

/// New product form.
#[instrument(skip(_admin))]
pub async fn new_form(RequireAdminAuth(_admin): RequireAdminAuth) -> Html<String> {
    render(&ProductFormTemplate {
        heading: "New product".to_string(),
        action: "/products".to_string(),
        product: None,
    })
}

/// Edit product form.
#[instrument(skip(_admin, state))]
pub async fn edit_form(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.api().get_product(&ProductId::new(id.clone())).await {
        Ok(product) => render(&ProductFormTemplate {
            heading: format!("Edit {}", product.title),
            action: format!("/products/{id}"),
            product: Some(ProductFormValues::from(&product)),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch product for edit: {e}");
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
    }
}

/// Create a product.
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    match state.api().admin_create_product(&form.into_input()).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "Product created");
            Redirect::to("/products").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            (StatusCode::BAD_REQUEST, format!("Create failed: {e}")).into_response()
        }
    }
}

/// Update a product.
#[instrument(skip(_admin, state, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    match state
        .api()
        .admin_update_product(&ProductId::new(id), &form.into_input())
        .await
    {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "Product updated");
            Redirect::to("/products").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update product: {e}");
            (StatusCode::BAD_REQUEST, format!("Update failed: {e}")).into_response()
        }
    }
}

/// Archive a product so it disappears from the storefront catalog.
#[instrument(skip(_admin, state))]
pub async fn archive(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.api().admin_archive_product(&ProductId::new(id)).await {
        Ok(()) => Redirect::to("/products").into_response(),
        Err(e) => {
            tracing::error!("Failed to archive product: {e}");
            (StatusCode::BAD_REQUEST, format!("Archive failed: {e}")).into_response()
        }
    }
}
