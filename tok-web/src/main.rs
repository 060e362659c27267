//! Servidor web Axum com WebSocket para tokenização e avaliação interativas

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tok_core::{
    corpus::parse_tokenized_line,
    evaluate,
    pipeline::{PipelineEvent, TokenizePipeline},
    TokenizerMode,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Estado compartilhado da aplicação
#[derive(Default)]
struct AppState {
    default_mode: TokenizerMode,
}

impl AppState {
    fn pipeline(&self, mode: Option<TokenizerMode>) -> TokenizePipeline {
        TokenizePipeline::new(mode.unwrap_or(self.default_mode))
    }
}

#[derive(Deserialize)]
struct TokenizeRequest {
    text: String,
    #[serde(default)]
    mode: Option<TokenizerMode>,
}

/// Linhas no mesmo formato dos arquivos: tokens separados por espaço no último campo tab.
#[derive(Deserialize)]
struct EvaluateRequest {
    gold: Vec<String>,
    predicted: Vec<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = std::env::var("TOK_WEB_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let state = Arc::new(AppState::default());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Servidor de tokenização iniciado em http://{addr}");
    axum::serve(listener, app(state)).await
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/tokenize", post(tokenize_handler))
        .route("/evaluate", post(evaluate_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

/// Tokenização via HTTP POST (sem streaming)
async fn tokenize_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenizeRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Texto vazio"})),
        )
            .into_response();
    }

    Json(state.pipeline(req.mode).analyze(&req.text)).into_response()
}

/// Avaliação de uma tokenização predita contra a gold
async fn evaluate_handler(Json(req): Json<EvaluateRequest>) -> impl IntoResponse {
    let gold: Vec<Vec<String>> = req.gold.iter().map(|l| parse_tokenized_line(l)).collect();
    let predicted: Vec<Vec<String>> = req.predicted.iter().map(|l| parse_tokenized_line(l)).collect();

    let result = tokio::task::spawn_blocking(move || evaluate(&gold, &predicted)).await;
    match result {
        Ok(Ok(report)) => Json(report).into_response(),
        Ok(Err(err)) => {
            warn!("avaliação rejeitada: {err}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "error": err.to_string(),
                    "usage": err.is_usage(),
                })),
            )
                .into_response()
        }
        Err(join_err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": join_err.to_string()})),
        )
            .into_response(),
    }
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

#[derive(Deserialize)]
struct WsRequest {
    text: String,
    #[serde(default)]
    mode: Option<TokenizerMode>,
}

/// Lógica do WebSocket: recebe texto, executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Tenta parsear como JSON {text, mode}; senão usa como texto puro
                let (text_str, mode) = match serde_json::from_str::<WsRequest>(&text) {
                    Ok(req) => (req.text, req.mode),
                    Err(_) => (text.to_string(), None),
                };
                if text_str.trim().is_empty() {
                    continue;
                }

                let pipeline = state.pipeline(mode);
                info!("Tokenizando via WebSocket [{:?}]: {} chars", pipeline.mode, text_str.len());

                let (tx, rx) = std::sync::mpsc::channel::<PipelineEvent>();
                let handle = tokio::task::spawn_blocking(move || {
                    pipeline.analyze_streaming(&text_str, tx);
                });
                handle.await.ok();

                let events: Vec<PipelineEvent> = rx.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // cliente desconectou
                        }
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
