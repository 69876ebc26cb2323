use actix_web::http::{StatusCode, header};
use actix_web::{
    HttpRequest, HttpResponse, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, delete, get, patch, post, put, web,
};
use payloads::responses::{
    ErrorDetail, HealthStatus, SuccessMessage, WineCreated,
};
use payloads::{AdminCredentials, Decision, WineId, WineryId, requests};
use std::sync::{Mutex, MutexGuard};

use crate::catalog::{Catalog, CatalogError};

pub type SharedCatalog = web::Data<Mutex<Catalog>>;

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(list_wines)
        .service(create_wine)
        .service(list_varieties)
        .service(list_vintages)
        .service(pending_wines)
        .service(wine_stats)
        .service(all_wines)
        .service(approve_wine)
        .service(reject_wine)
        .service(update_wine_status)
        .service(get_wine)
        .service(update_wine)
        .service(delete_wine)
        .service(list_wineries)
        .service(get_winery_by_slug)
        .service(get_winery)
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".into(),
        database: Some("connected".into()),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if let Self::UnexpectedError(e) = self {
            tracing::error!("{e:#}");
        }
        let mut response = HttpResponse::build(self.status_code());
        if matches!(self, Self::Unauthorized) {
            response.insert_header((header::WWW_AUTHENTICATE, "Basic"));
        }
        response.json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::WineNotFound | CatalogError::WineryNotFound => {
                ApiError::NotFound(e.to_string())
            }
            CatalogError::InvalidName(_)
            | CatalogError::InvalidTransition(_)
            | CatalogError::StatusUnchanged(_) => {
                ApiError::BadRequest(e.to_string())
            }
        }
    }
}

fn lock(catalog: &SharedCatalog) -> Result<MutexGuard<'_, Catalog>, ApiError> {
    catalog
        .lock()
        .map_err(|_| anyhow::anyhow!("catalog lock poisoned").into())
}

fn is_admin(req: &HttpRequest, admin: &AdminCredentials) -> bool {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(AdminCredentials::from_basic_auth_header)
        .is_some_and(|given| given == *admin)
}

fn require_admin(
    req: &HttpRequest,
    admin: &AdminCredentials,
) -> Result<(), ApiError> {
    if is_admin(req, admin) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

#[tracing::instrument(skip(catalog))]
#[get("/wines/")]
pub async fn list_wines(
    query: web::Query<requests::WineQuery>,
    catalog: SharedCatalog,
) -> Result<HttpResponse, ApiError> {
    let wines = lock(&catalog)?.public_wines(&query);
    Ok(HttpResponse::Ok().json(wines))
}

#[tracing::instrument(skip(req, catalog, admin))]
#[get("/wines/{wine_id}")]
pub async fn get_wine(
    req: HttpRequest,
    wine_id: web::Path<i64>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    let include_unpublished = is_admin(&req, &admin);
    let wine =
        lock(&catalog)?.wine(WineId(*wine_id), include_unpublished)?;
    Ok(HttpResponse::Ok().json(wine))
}

#[tracing::instrument(skip(req, catalog, admin), ret)]
#[post("/wines/")]
pub async fn create_wine(
    req: HttpRequest,
    details: web::Json<requests::CreateWine>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    let id = lock(&catalog)?.insert_wine(details.into_inner())?;
    Ok(HttpResponse::Ok().json(WineCreated {
        id,
        message: "Wine created successfully".into(),
    }))
}

#[tracing::instrument(skip(req, catalog, admin), ret)]
#[put("/wines/{wine_id}")]
pub async fn update_wine(
    req: HttpRequest,
    wine_id: web::Path<i64>,
    details: web::Json<requests::UpdateWine>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    lock(&catalog)?.update_wine(WineId(*wine_id), &details)?;
    Ok(HttpResponse::Ok().json(SuccessMessage {
        message: "Wine updated successfully".into(),
    }))
}

#[tracing::instrument(skip(req, catalog, admin), ret)]
#[delete("/wines/{wine_id}")]
pub async fn delete_wine(
    req: HttpRequest,
    wine_id: web::Path<i64>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    lock(&catalog)?.delete_wine(WineId(*wine_id))?;
    Ok(HttpResponse::Ok().json(SuccessMessage {
        message: "Wine deleted successfully".into(),
    }))
}

#[tracing::instrument(skip(catalog))]
#[get("/wines/varieties/list")]
pub async fn list_varieties(
    catalog: SharedCatalog,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(lock(&catalog)?.varieties()))
}

#[tracing::instrument(skip(catalog))]
#[get("/wines/vintages/list")]
pub async fn list_vintages(
    catalog: SharedCatalog,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(lock(&catalog)?.vintages()))
}

#[tracing::instrument(skip(req, catalog, admin))]
#[get("/wines/admin/pending")]
pub async fn pending_wines(
    req: HttpRequest,
    query: web::Query<requests::PendingQuery>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    Ok(HttpResponse::Ok().json(lock(&catalog)?.pending_wines(&query)))
}

#[tracing::instrument(skip(req, catalog, admin))]
#[get("/wines/admin/stats")]
pub async fn wine_stats(
    req: HttpRequest,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    Ok(HttpResponse::Ok().json(lock(&catalog)?.stats()))
}

#[tracing::instrument(skip(req, catalog, admin))]
#[get("/wines/admin/all")]
pub async fn all_wines(
    req: HttpRequest,
    query: web::Query<requests::AdminWineQuery>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    Ok(HttpResponse::Ok().json(lock(&catalog)?.all_wines(&query)))
}

#[tracing::instrument(skip(req, catalog, admin), ret)]
#[patch("/wines/admin/{wine_id}/approve")]
pub async fn approve_wine(
    req: HttpRequest,
    wine_id: web::Path<i64>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    let outcome =
        lock(&catalog)?.decide(WineId(*wine_id), Decision::Approve)?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[tracing::instrument(skip(req, catalog, admin), ret)]
#[patch("/wines/admin/{wine_id}/reject")]
pub async fn reject_wine(
    req: HttpRequest,
    wine_id: web::Path<i64>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    let outcome = lock(&catalog)?.decide(WineId(*wine_id), Decision::Reject)?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[tracing::instrument(skip(req, catalog, admin), ret)]
#[patch("/wines/admin/{wine_id}/status")]
pub async fn update_wine_status(
    req: HttpRequest,
    wine_id: web::Path<i64>,
    body: web::Json<requests::StatusUpdate>,
    catalog: SharedCatalog,
    admin: web::Data<AdminCredentials>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req, &admin)?;
    let outcome = lock(&catalog)?.set_status(WineId(*wine_id), body.status)?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[tracing::instrument(skip(catalog))]
#[get("/wineries/")]
pub async fn list_wineries(
    catalog: SharedCatalog,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(lock(&catalog)?.wineries()))
}

#[tracing::instrument(skip(catalog))]
#[get("/wineries/slug/{slug}")]
pub async fn get_winery_by_slug(
    slug: web::Path<String>,
    catalog: SharedCatalog,
) -> Result<HttpResponse, ApiError> {
    let winery = lock(&catalog)?.winery_by_slug(&slug)?;
    Ok(HttpResponse::Ok().json(winery))
}

#[tracing::instrument(skip(catalog))]
#[get("/wineries/{winery_id}")]
pub async fn get_winery(
    winery_id: web::Path<i64>,
    catalog: SharedCatalog,
) -> Result<HttpResponse, ApiError> {
    let winery = lock(&catalog)?.winery(WineryId(*winery_id))?;
    Ok(HttpResponse::Ok().json(winery))
}

/// Turn body and query parse failures into `{"detail": ...}` responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    })
}
