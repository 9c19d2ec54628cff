//! axum routes for the cinema service.
//!
//! Routes: `/cinemas/`, `/cinemas/films`,
//! `/cinemas/films/{title}`, `/cinemas/{cinema}` and `/cinemas/{cinema}/{film}`.

use crate::app::service::CinemaService;
use crate::domain::model::{
    BookSeatsRequest, BusySeatsResponse, CinemasResponse, FilmsResponse, ReasonResponse,
    RegisterCinemasRequest, SeatsResponse,
};
use crate::utils::error::{CinemaError, Result};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Body reason for every rejected registration, whatever the cause.
pub const REGISTRATION_FAILED: &str = "Failed to add cinema";

pub type AppState = Arc<CinemaService>;

pub fn build_router(service: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/cinemas", get(list_cinemas).post(register_cinemas))
        .route("/cinemas/", get(list_cinemas).post(register_cinemas))
        .route("/cinemas/films", get(list_all_films))
        .route("/cinemas/films/:film", get(cinemas_showing))
        .route("/cinemas/:cinema", get(films_of))
        .route("/cinemas/:cinema/:film", get(list_seats).post(book_seats))
        .fallback(not_found)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serves until ctrl-c.
pub async fn serve(listener: TcpListener, service: AppState) -> Result<()> {
    axum::serve(listener, build_router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Wraps a `CinemaError` for conversion into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CinemaError);

impl From<CinemaError> for ApiError {
    fn from(e: CinemaError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            CinemaError::RegistrationRejected(_) => {
                (StatusCode::BAD_REQUEST, Json(ReasonResponse::new(REGISTRATION_FAILED)))
                    .into_response()
            }
            CinemaError::SeatsBusy { busy_seats } => {
                (StatusCode::BAD_REQUEST, Json(BusySeatsResponse { busy_seats })).into_response()
            }
            CinemaError::InvalidRequest { message } => {
                (StatusCode::BAD_REQUEST, Json(ReasonResponse::new(message))).into_response()
            }
            e @ (CinemaError::CinemaNotFound { .. } | CinemaError::FilmNotFound { .. }) => {
                (StatusCode::NOT_FOUND, Json(ReasonResponse::new(e.to_string()))).into_response()
            }
            e => {
                tracing::error!(error = %e, category = ?e.category(), "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ReasonResponse::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found() -> (StatusCode, Json<ReasonResponse>) {
    (StatusCode::NOT_FOUND, Json(ReasonResponse::new("Not found")))
}

async fn register_cinemas(
    State(service): State<AppState>,
    payload: std::result::Result<Json<RegisterCinemasRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Unreadable cinema batch: {}", rejection.body_text());
        ApiError(CinemaError::InvalidRequest {
            message: REGISTRATION_FAILED.to_string(),
        })
    })?;

    service.register_cinemas(request.cinemas).await?;
    Ok(StatusCode::CREATED)
}

async fn list_cinemas(State(service): State<AppState>) -> Json<CinemasResponse> {
    Json(CinemasResponse {
        cinemas: service.list_cinema_names(),
    })
}

async fn films_of(
    State(service): State<AppState>,
    Path(cinema): Path<String>,
) -> ApiResult<Json<FilmsResponse>> {
    Ok(Json(FilmsResponse {
        films: service.films_of(&cinema)?,
    }))
}

async fn list_all_films(State(service): State<AppState>) -> Json<FilmsResponse> {
    Json(FilmsResponse {
        films: service.all_films(),
    })
}

async fn cinemas_showing(
    State(service): State<AppState>,
    Path(film): Path<String>,
) -> Json<CinemasResponse> {
    Json(CinemasResponse {
        cinemas: service.cinemas_showing(&film),
    })
}

#[derive(Debug, Default, Deserialize)]
struct SeatsQuery {
    #[serde(default)]
    available: bool,
}

async fn list_seats(
    State(service): State<AppState>,
    Path((cinema, film)): Path<(String, String)>,
    Query(query): Query<SeatsQuery>,
) -> ApiResult<Json<SeatsResponse>> {
    let seats = if query.available {
        service.available_seats(&cinema, &film)?
    } else {
        service.list_seats(&cinema, &film)?
    };
    Ok(Json(SeatsResponse { seats }))
}

async fn book_seats(
    State(service): State<AppState>,
    Path((cinema, film)): Path<(String, String)>,
    payload: std::result::Result<Json<BookSeatsRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError(CinemaError::InvalidRequest {
            message: rejection.body_text(),
        })
    })?;

    service.book_seats(&cinema, &film, &request.seats).await?;
    Ok(StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::PolicyViolation;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let response = ApiError(CinemaError::RegistrationRejected(PolicyViolation::EmptyName))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "reason": "Failed to add cinema" })
        );

        let response = ApiError(CinemaError::SeatsBusy {
            busy_seats: vec!["0row0seat".to_string()],
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "busy_seats": ["0row0seat"] })
        );

        let response = ApiError(CinemaError::CinemaNotFound {
            name: "Nowhere".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError(CinemaError::SnapshotError {
            message: "disk full".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
