// Pink Morsel Visualiser - Dashboard Server
// Serves the interactive sales chart and the aggregation API behind it

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use clap::Parser;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use morsel_visualiser::{aggregate_sales, load_extract, AggregatedPoint, RegionFilter, SalesPoint, PRICE_INCREASE_DATE};

/// Serve the Pink Morsel sales dashboard over a local web endpoint
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path of the formatted sales extract to visualise
    #[arg(long, default_value = "output.csv")]
    data: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,
}

/// Shared application state: the extract is loaded once at startup and
/// every chart redraw aggregates from this in-memory table.
#[derive(Clone)]
struct AppState {
    data: Arc<Vec<SalesPoint>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

/// Everything one chart redraw needs: the selected region, the marker
/// date, and the date-sorted series.
#[derive(Serialize)]
struct SalesResponse {
    region: &'static str,
    price_increase_date: &'static str,
    points: Vec<AggregatedPoint>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/sales/:region - Aggregated sales series for a region filter
async fn get_sales(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> impl IntoResponse {
    match RegionFilter::parse(&region) {
        Some(filter) => {
            let response = SalesResponse {
                region: filter.name(),
                price_increase_date: PRICE_INCREASE_DATE,
                points: aggregate_sales(&state.data, filter),
            };

            (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "unknown region '{region}' (expected all, north, east, south or west)"
            ))),
        )
            .into_response(),
    }
}

/// GET / - Serve the dashboard page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();

    println!("🌐 Pink Morsel Visualiser - Dashboard Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if !args.data.exists() {
        eprintln!("❌ Sales extract not found at {:?}", args.data);
        eprintln!("   Run: cargo run --bin morsel-visualiser");
        eprintln!("   to build the extract first.");
        std::process::exit(1);
    }

    let points = match load_extract(&args.data) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            std::process::exit(1);
        }
    };
    println!("✓ Loaded {} sales rows from {:?}", points.len(), args.data);

    // Create shared state
    let state = AppState {
        data: Arc::new(points),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/sales/:region", get(get_sales))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Dashboard running on http://{}", args.addr);
    println!("   API: http://{}/api/sales/all", args.addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
