//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Products and categories over SQLite"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/categories", api = domain_categories::ApiDoc),
        (path = "/products", api = domain_products::ApiDoc)
    )
)]
pub struct ApiDoc;
