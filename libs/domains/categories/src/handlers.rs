use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, DuplicateResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

#[derive(OpenApi)]
#[openapi(
    paths(list_categories, create_category, get_category),
    components(
        schemas(Category, CreateCategory),
        responses(
            NotFoundResponse,
            BadRequestIdResponse,
            BadRequestValidationResponse,
            DuplicateResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Category endpoints")
    )
)]
pub struct ApiDoc;

/// Category routes, mounted by the application under `/categories`.
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/{id}", get(get_category))
        .with_state(shared_service)
}

/// List all categories in insertion order
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
) -> CategoryResult<Json<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = DuplicateResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create_category(input).await?;

    AuditEvent::new(
        "category.create",
        Some(format!("category:{}", category.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "name": category.name }))
    .log();

    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    IdPath(id): IdPath,
) -> CategoryResult<Json<Category>> {
    let category = service.get_category(id).await?;
    Ok(Json(category))
}
