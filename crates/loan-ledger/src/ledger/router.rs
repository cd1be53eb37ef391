use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::clock::Clock;
use super::domain::{ApplicationRequest, Confirmation, LoanApplication};
use super::repository::ApplicationStore;
use super::service::ApplicationLedger;
use crate::error::AppError;

/// Intake acknowledgement carrying the stored record alongside its confirmation.
#[derive(Debug, Serialize)]
pub struct ReceiptView {
    pub message: String,
    pub application: LoanApplication,
}

/// Router builder exposing the ledger operations over HTTP.
pub fn ledger_router<S, C>(ledger: Arc<ApplicationLedger<S, C>>) -> Router
where
    S: ApplicationStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            post(add_handler::<S, C>).get(list_handler::<S, C>),
        )
        .route("/api/v1/applications/quote", post(quote_handler::<S, C>))
        .route(
            "/api/v1/applications/:application_id",
            get(get_handler::<S, C>)
                .put(update_handler::<S, C>)
                .delete(delete_handler::<S, C>),
        )
        .with_state(ledger)
}

pub(crate) async fn quote_handler<S, C>(
    State(ledger): State<Arc<ApplicationLedger<S, C>>>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Response, AppError>
where
    S: ApplicationStore + 'static,
    C: Clock + 'static,
{
    let quote = ledger.calculate_amount(request)?;
    let payload = json!({
        "message": quote.to_string(),
        "interest": quote.interest,
        "totalAmount": quote.total_amount,
    });
    Ok((StatusCode::OK, Json(payload)).into_response())
}

pub(crate) async fn add_handler<S, C>(
    State(ledger): State<Arc<ApplicationLedger<S, C>>>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Response, AppError>
where
    S: ApplicationStore + 'static,
    C: Clock + 'static,
{
    let application = ledger.add_application(request)?;
    let view = ReceiptView {
        message: Confirmation::received(&application).to_string(),
        application,
    };
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

pub(crate) async fn list_handler<S, C>(
    State(ledger): State<Arc<ApplicationLedger<S, C>>>,
) -> Result<Json<Vec<LoanApplication>>, AppError>
where
    S: ApplicationStore + 'static,
    C: Clock + 'static,
{
    Ok(Json(ledger.get_all_applications()?))
}

pub(crate) async fn get_handler<S, C>(
    State(ledger): State<Arc<ApplicationLedger<S, C>>>,
    Path(application_id): Path<String>,
) -> Result<Json<LoanApplication>, AppError>
where
    S: ApplicationStore + 'static,
    C: Clock + 'static,
{
    Ok(Json(ledger.get_application(&application_id)?))
}

pub(crate) async fn update_handler<S, C>(
    State(ledger): State<Arc<ApplicationLedger<S, C>>>,
    Path(application_id): Path<String>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Response, AppError>
where
    S: ApplicationStore + 'static,
    C: Clock + 'static,
{
    let confirmation = ledger.update_application(&application_id, request)?;
    Ok(confirmation_response(confirmation))
}

pub(crate) async fn delete_handler<S, C>(
    State(ledger): State<Arc<ApplicationLedger<S, C>>>,
    Path(application_id): Path<String>,
) -> Result<Response, AppError>
where
    S: ApplicationStore + 'static,
    C: Clock + 'static,
{
    let confirmation = ledger.delete_application(&application_id)?;
    Ok(confirmation_response(confirmation))
}

fn confirmation_response(confirmation: Confirmation) -> Response {
    let payload = json!({
        "id": confirmation.id(),
        "message": confirmation.to_string(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}
