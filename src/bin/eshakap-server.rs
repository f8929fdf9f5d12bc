//! eshakap-server — the Eshakap dictionary HTTP API.
//!
//! **Dictionary:**
//! - `GET  /names` — every stored word
//! - `GET  /fetch?q=&f=` — records by search text and/or type filter code
//! - `GET  /word?q=` — records whose word equals `q`
//! - `GET  /max` — record count
//! - `POST /add` — insert a word (bearer token required)
//!
//! **Script:**
//! - `GET  /convert?q=` — text → syllable glyphs
//! - `GET  /order` — canonical alphabet order
//!
//! **Health:**
//! - `GET  /` — greeting
//! - `GET  /health` — server status
//!
//! Build and run: `cargo run --features server --bin eshakap-server`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use eshakap::auth::TokenVerifier;
use eshakap::config::ServerConfig;
use eshakap::error::{AuthError, EshakapError, LexiconError};
use eshakap::lexicon::{Lexicon, WordRecord};
use eshakap::script::{Converter, ORDER, Syllable};

// ── Server state ──────────────────────────────────────────────────────────

struct ServerState {
    lexicon: Lexicon,
    converter: Converter,
    verifier: Arc<dyn TokenVerifier>,
}

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn lexicon_error(err: LexiconError) -> ApiError {
    match err {
        LexiconError::InvalidData { ref reason } => {
            tracing::debug!(%reason, "rejected word payload");
            api_error(StatusCode::BAD_REQUEST, err.to_string())
        }
        LexiconError::Filter(ref e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string(), "code": "InvalidFilter" })),
        ),
        LexiconError::Store(ref e) => {
            tracing::error!(error = %e, "store failure");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "storage error")
        }
    }
}

fn unauthorized(err: &AuthError) -> ApiError {
    tracing::warn!(error = %err, "authentication failed");
    api_error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

fn eshakap_error(err: EshakapError) -> ApiError {
    match err {
        EshakapError::Auth(e) => unauthorized(&e),
        EshakapError::Lexicon(e) => lexicon_error(e),
        EshakapError::Store(e) => lexicon_error(e.into()),
        EshakapError::Filter(e) => lexicon_error(e.into()),
        EshakapError::Config(e) => {
            tracing::error!(error = %e, "configuration failure");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "configuration error")
        }
    }
}

// ── Request / response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    f: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    words: usize,
}

#[derive(Serialize)]
struct CountResponse {
    max: usize,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn home() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Connected to Eshakap API".to_string(),
    })
}

async fn health(State(state): State<Arc<ServerState>>) -> ApiResult<HealthResponse> {
    let words = state.lexicon.count().map_err(lexicon_error)?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        words,
    }))
}

async fn names(State(state): State<Arc<ServerState>>) -> ApiResult<Vec<String>> {
    state.lexicon.names().map(Json).map_err(lexicon_error)
}

async fn fetch_words(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<WordRecord>> {
    state
        .lexicon
        .fetch(&params.q, Some(params.f.as_str()))
        .map(Json)
        .map_err(lexicon_error)
}

async fn get_word(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<WordRecord>> {
    state
        .lexicon
        .lookup(&params.q)
        .map(Json)
        .map_err(lexicon_error)
}

async fn word_count(State(state): State<Arc<ServerState>>) -> ApiResult<CountResponse> {
    let max = state.lexicon.count().map_err(lexicon_error)?;
    Ok(Json(CountResponse { max }))
}

async fn convert_to_script(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Syllable>> {
    let text = params.q.to_lowercase();
    let syllables = state.converter.convert(&text);
    tracing::debug!(input = %text, syllables = syllables.len(), "convert");
    Json(syllables)
}

async fn script_order() -> Json<Vec<String>> {
    Json(ORDER.iter().map(|c| c.to_string()).collect())
}

async fn add_word(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<MessageResponse> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // The provider call blocks on network I/O.
    let state = Arc::clone(&state);
    let added = tokio::task::spawn_blocking(move || {
        state
            .lexicon
            .add_authorized(state.verifier.as_ref(), header_value.as_deref(), &body)
    })
    .await;

    let (user, record) = match added {
        Ok(result) => result.map_err(eshakap_error)?,
        Err(e) => {
            tracing::error!(error = %e, "add-word task panicked");
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error"));
        }
    };
    tracing::info!(user = %user.id, word = %record.word, "word added via API");

    Ok(Json(MessageResponse {
        message: "Word added".to_string(),
    }))
}

// ── Main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("failed to load configuration: {e}");
        std::process::exit(1);
    });

    let storage_dir = config.storage_dir();
    let lexicon = Lexicon::open(storage_dir.as_deref()).unwrap_or_else(|e| {
        tracing::error!("failed to open word store: {e}");
        std::process::exit(1);
    });

    let state = Arc::new(ServerState {
        lexicon,
        converter: Converter::new(config.glyph_set()),
        verifier: config.verifier(),
    });

    tracing::info!(
        data_dir = ?storage_dir,
        glyph_base = %config.glyph_base,
        "eshakap server initialized"
    );

    let app = Router::new()
        // Health.
        .route("/", get(home))
        .route("/health", get(health))
        // Dictionary.
        .route("/names", get(names))
        .route("/fetch", get(fetch_words))
        .route("/word", get(get_word))
        .route("/max", get(word_count))
        .route("/add", post(add_word))
        // Script.
        .route("/convert", get(convert_to_script))
        .route("/order", get(script_order))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = config.addr();
    tracing::info!("eshakap server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        });
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
