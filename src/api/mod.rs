// API layer - HTTP endpoints
pub mod health;
pub mod items;

use std::sync::Arc;

pub use health::HealthApi;
pub use items::ItemsApi;
use poem::middleware::{NormalizePath, Tracing, TrailingSlash};
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

use crate::app_data::AppData;

/// Prefix every API operation is nested under
pub const API_PREFIX: &str = "/api/v1";

/// Build the OpenAPI service for all endpoints
pub fn api_service(
    app_data: Arc<AppData>,
    server_url: &str,
) -> OpenApiService<(HealthApi, ItemsApi), ()> {
    OpenApiService::new(
        (HealthApi, ItemsApi::new(app_data)),
        "Itemstash API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url)
}

/// Compose routes: API under `/api/v1` and Swagger UI under `/swagger`
///
/// Trailing slashes are trimmed before routing, so `/api/v1/items/` and
/// `/api/v1/items` reach the same operation.
pub fn build_app(app_data: Arc<AppData>, server_url: &str) -> impl Endpoint {
    let api_service = api_service(app_data, server_url);
    let ui = api_service.swagger_ui();

    Route::new()
        .nest(API_PREFIX, api_service)
        .nest("/swagger", ui)
        .with(NormalizePath::new(TrailingSlash::Trim))
        .with(Tracing)
}
