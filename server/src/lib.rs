use axum::{extract::State, http::StatusCode, response::{Html, IntoResponse, Response}, routing::get, Json, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vidrec_core::{CorpusStatus, Recommender, VectorizerOptions, DEFAULT_KEYWORDS, TOP_N};

/// Startup outcome. Nothing mutates after construction.
pub enum ServiceState {
    Ready(Recommender),
    Degraded { reason: String },
}

pub struct AppContext {
    pub state: ServiceState,
    pub keywords: String,
}

impl AppContext {
    /// Load and fit synchronously. A load failure degrades the service instead of failing.
    pub fn load<P: AsRef<Path>>(data_path: P, keywords: impl Into<String>, options: VectorizerOptions) -> Self {
        let state = match CorpusStatus::load(data_path) {
            CorpusStatus::Loaded(corpus) => ServiceState::Ready(Recommender::fit(corpus, options)),
            CorpusStatus::Unavailable(reason) => ServiceState::Degraded { reason },
        };
        Self { state, keywords: keywords.into() }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ServiceState::Ready(_))
    }
}

pub type AppState = Arc<AppContext>;

pub fn build_app(ctx: AppContext) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/health", get(|| async { "ok" }))
        .route("/api/recommendations", get(recommendations_handler))
        .with_state(Arc::new(ctx))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Convenience for binaries and tests: load `data_path` with the curated keywords.
pub fn build_app_from_path<P: AsRef<Path>>(data_path: P) -> Router {
    build_app(AppContext::load(data_path, DEFAULT_KEYWORDS, VectorizerOptions::default()))
}

async fn home() -> Html<&'static str> {
    Html("<h1>Recommendation backend is running!</h1><p>The recommendation data is available at /api/recommendations</p>")
}

pub async fn recommendations_handler(State(ctx): State<AppState>) -> Response {
    match &ctx.state {
        ServiceState::Ready(recommender) => Json(recommender.recommend(&ctx.keywords, TOP_N)).into_response(),
        ServiceState::Degraded { reason } => {
            tracing::warn!(%reason, "recommendations requested while data unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Data could not be loaded." })),
            )
                .into_response()
        }
    }
}
