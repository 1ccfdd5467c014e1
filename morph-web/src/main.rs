//! Servidor web Axum com WebSocket para acompanhar a desambiguação passo a passo

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use morph_core::{
    corpus::get_demo_corpus,
    sentence::WordRecord,
    AutoDisambiguator, DisambiguationEvent, DisambiguationReport, DisambiguatorConfig, InMemoryStore,
    ParseError, RuleBasedDisambiguator, Sentence, Word,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const EMPTY_SENTENCE: &str = "Sentença vazia";

/// Estado compartilhado da aplicação
struct AppState {
    disambiguator: RuleBasedDisambiguator,
}

/// Corpo de `POST /disambiguate` e de cada mensagem do WebSocket.
#[derive(Deserialize)]
struct DisambiguateRequest {
    words: Vec<WordRecord>,
}

impl DisambiguateRequest {
    fn into_sentence(self) -> Result<Sentence, ParseError> {
        let words = self
            .words
            .into_iter()
            .map(Word::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sentence::new(words))
    }
}

#[derive(Serialize)]
struct DisambiguateResponse {
    sentence: Sentence,
    report: DisambiguationReport,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("MORPH_CONFIG") {
        Ok(path) => {
            info!(%path, "carregando configuração");
            DisambiguatorConfig::from_json_file(&path)?
        }
        Err(_) => DisambiguatorConfig::default(),
    };
    let disambiguator = RuleBasedDisambiguator::from_config(config)?;
    info!(rules = disambiguator.table().len(), "tabela de regras carregada");
    let state = Arc::new(AppState { disambiguator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/disambiguate", post(disambiguate_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-sentences", get(demo_sentences_handler))
        .route("/rules", get(rules_handler))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    let addr = std::env::var("MORPH_WEB_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Servidor de desambiguação iniciado em http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Interpreta uma mensagem do WebSocket; sentença vazia também é erro.
fn parse_ws_request(text: &str) -> Result<Sentence, String> {
    let req = serde_json::from_str::<DisambiguateRequest>(text).map_err(|e| e.to_string())?;
    if req.words.is_empty() {
        return Err(EMPTY_SENTENCE.to_string());
    }
    req.into_sentence().map_err(|e| e.to_string())
}

/// Quadro de erro no mesmo formato `{type, data}` dos eventos.
fn error_frame(message: &str) -> String {
    serde_json::json!({ "type": "Error", "data": { "message": message } }).to_string()
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Desambiguação via HTTP POST (sem streaming)
async fn disambiguate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DisambiguateRequest>,
) -> Response {
    if req.words.is_empty() {
        return bad_request(EMPTY_SENTENCE.to_string());
    }
    let mut sentence = match req.into_sentence() {
        Ok(sentence) => sentence,
        Err(e) => {
            warn!(error = %e, "análise rejeitada");
            return bad_request(e.to_string());
        }
    };

    let mut store = InMemoryStore::new();
    match state.disambiguator.auto_disambiguate(&mut sentence, &mut store) {
        Ok(report) => Json(DisambiguateResponse { sentence, report }).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Sentenças de demonstração, já no formato de requisição
async fn demo_sentences_handler() -> impl IntoResponse {
    let demos: Vec<serde_json::Value> = get_demo_corpus()
        .iter()
        .map(|demo| {
            let words: Vec<serde_json::Value> = demo
                .words
                .iter()
                .map(|(surface, analyses)| serde_json::json!({ "surface": surface, "analyses": analyses }))
                .collect();
            serde_json::json!({
                "text": demo.text,
                "phenomenon": demo.phenomenon,
                "words": words,
            })
        })
        .collect();
    Json(demos)
}

/// Assinaturas conhecidas e as palavras de exemplo de cada uma
async fn rules_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rules: Vec<serde_json::Value> = state
        .disambiguator
        .table()
        .rules()
        .iter()
        .map(|rule| {
            serde_json::json!({
                "signature": rule.signature,
                "examples": rule.examples,
                "choices": rule.choices.len(),
            })
        })
        .collect();
    Json(rules)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Recebe uma sentença, desambigua e envia os eventos em tempo real
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let mut sentence = match parse_ws_request(&text) {
                    Ok(sentence) => sentence,
                    Err(e) => {
                        warn!(error = %e, "mensagem WebSocket rejeitada");
                        if socket.send(Message::Text(error_frame(&e))).await.is_err() {
                            return;
                        }
                        continue;
                    }
                };

                info!(words = sentence.len(), "desambiguando via WebSocket");

                // o orquestrador é síncrono: roda fora do runtime
                let (tx, rx) = std::sync::mpsc::channel::<DisambiguationEvent>();
                let worker = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    let mut store = InMemoryStore::new();
                    worker
                        .disambiguator
                        .auto_disambiguate_streaming(&mut sentence, &mut store, tx)
                });
                let failure = match handle.await {
                    Ok(Ok(_)) => None,
                    Ok(Err(e)) => {
                        warn!(error = %e, "falha ao salvar a sentença");
                        Some(e.to_string())
                    }
                    Err(e) => {
                        error!(error = %e, "tarefa de desambiguação interrompida");
                        Some("desambiguação interrompida".to_string())
                    }
                };

                let events: Vec<DisambiguationEvent> = rx.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                        // pausa para a animação passo a passo
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
                if let Some(message) = failure {
                    if socket.send(Message::Text(error_frame(&message))).await.is_err() {
                        return;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_request_rejects_empty_sentence() {
        assert_eq!(parse_ws_request(r#"{"words": []}"#).unwrap_err(), EMPTY_SENTENCE);
        assert!(parse_ws_request("não é json").is_err());
    }

    #[test]
    fn test_ws_request_accepts_analyzer_output() {
        let sentence = parse_ws_request(
            r#"{"words": [{"surface": "evdeki", "analyses": ["ev+NOUN+A3SG+PNON+LOC^DB+ADJ+REL"]},
                          {"surface": "ABD", "analyses": ["abd+NOUN+ABBR+A3SG+PNON+NOM"]}]}"#,
        )
        .unwrap();
        assert_eq!(sentence.len(), 2);
    }

    #[test]
    fn test_error_frame_shape() {
        let frame: serde_json::Value = serde_json::from_str(&error_frame(EMPTY_SENTENCE)).unwrap();
        assert_eq!(frame["type"], "Error");
        assert_eq!(frame["data"]["message"], EMPTY_SENTENCE);
    }
}
