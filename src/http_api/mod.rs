use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::json;

use crate::calendar::DATE_FORMAT;
use crate::{
    Configuration, ConfigurationPatch, Coordinator, DeviceInfo, EntityView, HolidayRecord,
    HolidayTable, StatusSnapshot, device_info, entity_views, resolve,
};

pub const DEFAULT_ENTRY_ID: &str = "default";

#[derive(Clone)]
pub struct AppState {
    coordinator: Coordinator,
    table: Arc<HolidayTable>,
    entry_id: Arc<str>,
}

impl AppState {
    pub fn new(table: HolidayTable, config: Configuration) -> Self {
        let table = Arc::new(table);
        let coordinator = Coordinator::with_config(table.clone(), config);
        Self::with_shared(coordinator, table)
    }

    /// Share a coordinator that is also driven by the daily scheduler.
    pub fn with_shared(coordinator: Coordinator, table: Arc<HolidayTable>) -> Self {
        Self {
            coordinator,
            table,
            entry_id: Arc::from(DEFAULT_ENTRY_ID),
        }
    }

    pub fn with_entry_id(mut self, entry_id: &str) -> Self {
        self.entry_id = Arc::from(entry_id);
        self
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    NotReady(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::NotReady(message) => {
                let body = Json(ErrorBody {
                    error: "not_ready",
                    message,
                });
                (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct EntitiesBody {
    device: DeviceInfo,
    entities: Vec<EntityView>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(get_status))
        .route("/entities", get(list_entities))
        .route("/holidays", get(list_holidays))
        .route("/resolve/:date", get(resolve_date))
        .route("/config", get(get_config).put(update_config))
        .route("/refresh", post(refresh_status))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_status(State(state): State<AppState>) -> Result<Json<StatusSnapshot>, ApiError> {
    match state.coordinator.current() {
        Some(snapshot) => Ok(Json(snapshot.as_ref().clone())),
        None => Err(ApiError::NotReady("status has not been computed yet".into())),
    }
}

async fn list_entities(State(state): State<AppState>) -> Json<EntitiesBody> {
    let config = state.coordinator.settings().get();
    let snapshot = state.coordinator.current();
    Json(EntitiesBody {
        device: device_info(&state.entry_id, config.language),
        entities: entity_views(&state.entry_id, &config, snapshot.as_deref()),
    })
}

async fn list_holidays(State(state): State<AppState>) -> Json<Vec<HolidayRecord>> {
    Json(state.table.records().to_vec())
}

async fn resolve_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<StatusSnapshot>, ApiError> {
    let day = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|err| ApiError::invalid(format!("invalid date '{date}': {err}")))?;
    let config = state.coordinator.settings().get();
    let snapshot = resolve(day, &state.table, &config, Local::now().naive_local());
    Ok(Json(snapshot))
}

async fn get_config(State(state): State<AppState>) -> Json<Configuration> {
    Json(state.coordinator.settings().get())
}

async fn update_config(
    State(state): State<AppState>,
    Json(patch): Json<ConfigurationPatch>,
) -> Json<Configuration> {
    let config = state.coordinator.settings().update(&patch);
    tracing::info!(?config, "configuration updated");
    state.coordinator.refresh();
    Json(config)
}

async fn refresh_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    let snapshot = state.coordinator.refresh();
    Json(snapshot.as_ref().clone())
}
