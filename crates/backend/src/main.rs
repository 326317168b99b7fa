mod alerts;
mod config;
mod guidelines;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderValue, StatusCode};
use axum::{response::Html, routing::get, Json, Router};
use safety_shared::models::{Coordinate, ErrorBody, GuidelineSet, HazardCategory, SafetyReport};
use safety_shared::paths::{CHECK_SAFETY_ROUTE, GUIDELINES_ROUTE};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use guidelines::Guidelines;

#[derive(Clone)]
struct AppState {
    guidelines: Arc<Guidelines>,
    dist_dir: Arc<PathBuf>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

async fn check_safety(
    UrlPath((lat, lon)): UrlPath<(f64, f64)>,
) -> Result<Json<SafetyReport>, ApiError> {
    let origin = Coordinate::new(lat, lon);
    if !alerts::is_valid(origin) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Coordinate out of range: {lat}, {lon}"),
        ));
    }
    let report = alerts::report_for(origin);
    tracing::info!(
        lat,
        lon,
        alerts = report.alerts.len(),
        safe_zones = report.total_safe_zones(),
        "Safety check"
    );
    Ok(Json(report))
}

async fn safety_guidelines(
    State(state): State<AppState>,
    UrlPath(category): UrlPath<String>,
) -> Result<Json<GuidelineSet>, ApiError> {
    let set = HazardCategory::parse(&category).and_then(|c| state.guidelines.get(c));
    match set {
        Some(set) => Ok(Json(set.clone())),
        None => {
            tracing::debug!(%category, "Unknown guideline category");
            Err(api_error(
                StatusCode::NOT_FOUND,
                format!("No guidelines for category {category:?}"),
            ))
        }
    }
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(state: AppState, static_dir: &Path) -> Router {
    // Static file routers are stateless, merge them before adding app state
    let static_files = Router::new()
        .nest("/static", cached_static_router(static_dir, CACHE_1DAY))
        .nest(
            "/assets",
            cached_static_router(&state.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route(CHECK_SAFETY_ROUTE, get(check_safety))
        .route(GUIDELINES_ROUTE, get(safety_guidelines))
        .route("/", get(serve_index))
        .with_state(state)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("safety_backend=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(2);
        }
    };

    let state = AppState {
        guidelines: Arc::new(Guidelines::load_or_builtin(&config.static_dir)),
        dist_dir: Arc::new(config.dist_dir.clone()),
    };
    let app = build_app(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", config.bind_addr(), e));
    tracing::info!(port = config.port, "Server running at http://localhost:{}", config.port);
    axum::serve(listener, app).await.expect("Server error");
}

async fn serve_index(State(state): State<AppState>) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(state.dist_dir.join("index.html")).await {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Disaster Safety Portal</title></head>
<body>
<h1>Disaster Safety Portal</h1>
<p>Frontend not built yet. The API answers at <code>/check-safety/{lat}/{lon}</code> and <code>/safety-guidelines/{category}</code>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state(dist_dir: &Path) -> AppState {
        AppState {
            guidelines: Arc::new(Guidelines::builtin()),
            dist_dir: Arc::new(dist_dir.to_path_buf()),
        }
    }

    /// Create a temp dir with a test file and return the dir path.
    fn temp_dir_with_file(file_name: &str, content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(file_name), content).unwrap();
        dir
    }

    async fn get_response(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_check_safety_returns_alerts_around_position() {
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), dist.path());

        let resp = get_response(app, "/check-safety/12.97/77.59").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let report: SafetyReport = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(report.alerts.len(), 3);
        assert_eq!(report.alerts[0].hazard_type, "flood");
        let zone = &report.alerts[0].safe_zones[0];
        assert!((zone.lat - 13.07).abs() < 1e-9);
        assert!((zone.lon - 77.69).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_check_safety_rejects_non_numeric_coordinates() {
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), dist.path());

        let resp = get_response(app, "/check-safety/north/77.59").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_safety_rejects_out_of_range_coordinates() {
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), dist.path());

        let resp = get_response(app, "/check-safety/95.0/10.0").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert!(body.error.contains("out of range"));
    }

    #[tokio::test]
    async fn test_guidelines_for_known_category() {
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), dist.path());

        let resp = get_response(app, "/safety-guidelines/earthquake").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let set: GuidelineSet = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(set.immediate[0], "Drop, Cover, and Hold On");
        assert_eq!(set.preparation.len(), 3);
    }

    #[tokio::test]
    async fn test_guidelines_category_is_case_insensitive() {
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), dist.path());

        let resp = get_response(app, "/safety-guidelines/HeavyRain").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guidelines_unknown_category_is_404() {
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), dist.path());

        let resp = get_response(app, "/safety-guidelines/tsunami").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert!(body.error.contains("tsunami"));
    }

    #[tokio::test]
    async fn test_index_served_from_dist() {
        let dist = temp_dir_with_file("index.html", "<html>portal</html>");
        let app = build_app(test_state(dist.path()), dist.path());

        let resp = get_response(app, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_bytes(resp).await, b"<html>portal</html>");
    }

    #[tokio::test]
    async fn test_index_fallback_when_not_built() {
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), dist.path());

        let resp = get_response(app, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(body_bytes(resp).await).unwrap();
        assert!(body.contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_static_assets_have_1day_cache() {
        let static_dir = temp_dir_with_file("guidelines.json", "{}");
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), static_dir.path());

        let resp = get_response(app, "/static/guidelines.json").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_dist_assets_have_immutable_cache() {
        let dist = tempfile::tempdir().unwrap();
        std::fs::create_dir(dist.path().join("assets")).unwrap();
        std::fs::write(dist.path().join("assets/portal-abc123.js"), "bundle()").unwrap();
        let static_dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), static_dir.path());

        let resp = get_response(app, "/assets/portal-abc123.js").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let static_dir = temp_dir_with_file("guidelines.json", "{}");
        let dist = tempfile::tempdir().unwrap();
        let app = build_app(test_state(dist.path()), static_dir.path());

        let resp = get_response(app, "/static/nonexistent.txt").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
