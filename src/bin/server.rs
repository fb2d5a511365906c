//! Stowage HTTP server
//!
//! Thin JSON front end over the stowage engine. All routing and status-code
//! mapping lives here; the engine only sees typed inputs.

use std::net::SocketAddr;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use stowage_rs::api::{
    decode_records, ErrorResponse, ExportResponse, ImportRequest, ImportResponse, ItemRequest,
    LogsResponse, PlaceRequest, PlaceResponse, PlacementRequest, PlacementResponse,
    RetrieveResponse, SearchResponse, TimeRequest, TimeResponse, WasteResponse,
};
use stowage_rs::{ErrorKind, SharedStowage, Stowage, StowageError};

#[derive(Parser, Debug)]
#[command(name = "stowage-server")]
#[command(about = "HTTP front end for the stowage engine")]
struct Args {
    /// Bind address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number
    #[arg(short = 'P', long, default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut engine = Stowage::new();
    engine.record_startup("Stowage engine starting up");
    let shared = engine.into_shared();

    let app = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/placement", post(placement))
        .route("/api/search", get(search))
        .route("/api/retrieve", post(retrieve))
        .route("/api/place", post(place))
        .route("/api/waste", post(waste))
        .route("/api/time", post(time))
        .route("/api/import", post(import))
        .route("/api/export", get(export))
        .route("/api/logs", get(logs))
        .with_state(shared);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("stowage-server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn error_response(err: StowageError) -> Response {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::NoCapacity => StatusCode::CONFLICT,
        ErrorKind::InvalidState | ErrorKind::MissingField | ErrorKind::MalformedInput => {
            StatusCode::BAD_REQUEST
        }
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

async fn home() -> Json<serde_json::Value> {
    Json(json!({"message": "Stowage Engine API"}))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy"}))
}

async fn placement(
    State(engine): State<SharedStowage>,
    Json(request): Json<PlacementRequest>,
) -> Response {
    let result = engine
        .write()
        .allocate_batch(request.containers, request.items);
    Json(PlacementResponse::from(result)).into_response()
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
    #[serde(rename = "type")]
    scope: Option<String>,
    zone: Option<String>,
}

async fn search(
    State(engine): State<SharedStowage>,
    Query(params): Query<SearchParams>,
) -> Response {
    let scope = match params.scope.as_deref().unwrap_or("all").parse() {
        Ok(scope) => scope,
        Err(err) => return error_response(err),
    };
    let results = engine
        .read()
        .search(&params.query, scope, params.zone.as_deref());
    Json(SearchResponse {
        success: true,
        results,
    })
    .into_response()
}

async fn retrieve(
    State(engine): State<SharedStowage>,
    Json(request): Json<ItemRequest>,
) -> Response {
    let item_id = match request.item_id() {
        Ok(id) => id.to_string(),
        Err(err) => return error_response(err),
    };
    match engine.write().retrieve(&item_id) {
        Ok(retrieval) => Json(RetrieveResponse {
            success: true,
            retrieval,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

async fn place(
    State(engine): State<SharedStowage>,
    Json(request): Json<PlaceRequest>,
) -> Response {
    let item_id = match request.item_id.as_deref() {
        Some(id) => id,
        None => return error_response(StowageError::MissingField("itemId")),
    };
    let container_id = match request.container_id.as_deref() {
        Some(id) => id,
        None => return error_response(StowageError::MissingField("containerId")),
    };
    match engine.write().place(item_id, container_id, request.coordinates) {
        Ok(placement) => Json(PlaceResponse {
            success: true,
            placement,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

async fn waste(State(engine): State<SharedStowage>, Json(request): Json<ItemRequest>) -> Response {
    let item_id = match request.item_id() {
        Ok(id) => id.to_string(),
        Err(err) => return error_response(err),
    };
    match engine.write().dispose(&item_id) {
        Ok(disposal) => Json(WasteResponse {
            success: true,
            waste_management: disposal,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

async fn time(State(engine): State<SharedStowage>, Json(request): Json<TimeRequest>) -> Response {
    let hours = match request.hours {
        Some(hours) => hours,
        None => return error_response(StowageError::MissingField("hours")),
    };
    match engine.write().advance_time(hours) {
        Ok(advance) => Json(TimeResponse {
            success: true,
            time_simulation: advance,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

async fn import(
    State(engine): State<SharedStowage>,
    Json(request): Json<ImportRequest>,
) -> Response {
    let (containers, containers_attempted) = decode_records(request.containers);
    let (items, items_attempted) = decode_records(request.items);
    let summary = engine
        .write()
        .import(containers, items, (containers_attempted, items_attempted));
    Json(ImportResponse {
        success: true,
        import: summary,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
struct ExportParams {
    #[serde(rename = "type")]
    scope: Option<String>,
}

async fn export(
    State(engine): State<SharedStowage>,
    Query(params): Query<ExportParams>,
) -> Response {
    let scope = match params.scope.as_deref().unwrap_or("all").parse() {
        Ok(scope) => scope,
        Err(err) => return error_response(err),
    };
    let snapshot = engine.read().export(scope);
    Json(ExportResponse {
        success: true,
        export: snapshot,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
struct LogParams {
    action: Option<String>,
    limit: Option<usize>,
}

async fn logs(State(engine): State<SharedStowage>, Query(params): Query<LogParams>) -> Response {
    let entries = engine.read().logs(params.action.as_deref(), params.limit);
    Json(LogsResponse {
        success: true,
        logs: entries,
    })
    .into_response()
}
