//! Web form for generating podcasts from a browser.
//!
//! Serves a single page with the three API key fields and a URL field,
//! a JSON endpoint for scripted use, and the generated audio files.

use crate::audio::DOWNLOAD_NAME;
use crate::cli::{preflight, Output};
use crate::config::{Credentials, Settings};
use crate::orchestrator::{Orchestrator, PodcastResult};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};

/// Shared application state.
struct AppState {
    settings: Settings,
    /// Keys from flags/env, used when a form field is left empty.
    server_credentials: Credentials,
}

/// Run the web server.
pub async fn run_serve(
    host: &str,
    port: u16,
    credentials: Credentials,
    settings: Settings,
) -> anyhow::Result<()> {
    let output_dir = settings.output_dir();
    std::fs::create_dir_all(&output_dir)?;

    let state = Arc::new(AppState {
        settings,
        server_credentials: credentials,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/generate", post(generate_form))
        .route("/api/podcasts", post(generate_json))
        .nest_service("/audio", ServeDir::new(&output_dir))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Blogcast Web");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Form", "GET  /");
    Output::kv("Generate (form)", "POST /generate");
    Output::kv("Generate (JSON)", "POST /api/podcasts");
    Output::kv("Audio", "GET  /audio/:file");
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    url: String,
    #[serde(default)]
    openai_api_key: String,
    #[serde(default)]
    elevenlabs_api_key: String,
    #[serde(default)]
    firecrawl_api_key: String,
}

impl GenerateRequest {
    /// Request keys, falling back to the server's own keys per field.
    fn credentials(&self, fallback: &Credentials) -> Credentials {
        fn pick<'a>(given: &'a str, fallback: &'a str) -> &'a str {
            if given.trim().is_empty() {
                fallback
            } else {
                given
            }
        }

        Credentials::new(
            pick(&self.openai_api_key, &fallback.openai_api_key),
            pick(&self.elevenlabs_api_key, &fallback.elevenlabs_api_key),
            pick(&self.firecrawl_api_key, &fallback.firecrawl_api_key),
        )
    }
}

#[derive(Serialize)]
struct GenerateResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    podcast: Option<PodcastResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.server_credentials, "", None))
}

async fn generate_form(
    State(state): State<Arc<AppState>>,
    Form(req): Form<GenerateRequest>,
) -> impl IntoResponse {
    let credentials = req.credentials(&state.server_credentials);

    let outcome = match run_once(&state, &credentials, &req.url).await {
        Ok(result) => Outcome::Success(result),
        Err(message) => Outcome::Failure(message),
    };

    Html(render_page(&credentials, &req.url, Some(&outcome)))
}

async fn generate_json(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> impl IntoResponse {
    let credentials = req.credentials(&state.server_credentials);

    match run_once(&state, &credentials, &req.url).await {
        Ok(result) => Json(GenerateResponse {
            success: true,
            audio_url: Some(format!("/audio/{}", result.file_name)),
            podcast: Some(result),
            error: None,
        })
        .into_response(),
        Err(message) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(GenerateResponse {
                success: false,
                podcast: None,
                audio_url: None,
                error: Some(message),
            }),
        )
            .into_response(),
    }
}

/// One generation run. Every failure becomes a user-facing message.
async fn run_once(
    state: &AppState,
    credentials: &Credentials,
    url: &str,
) -> std::result::Result<PodcastResult, String> {
    preflight::check(credentials, url).map_err(|e| e.to_string())?;

    let orchestrator = Orchestrator::new(&state.settings, credentials).map_err(|e| {
        error!("Failed to set up pipeline: {}", e);
        format!("An error occurred: {}", e)
    })?;

    match orchestrator.generate(url).await {
        Ok(result) => {
            info!("Generated {} for {}", result.file_name, result.url);
            Ok(result)
        }
        Err(e) => {
            error!("Podcast generation failed for {}: {}", url, e);
            Err(format!("An error occurred: {}", e))
        }
    }
}

// === Rendering ===

enum Outcome {
    Success(PodcastResult),
    Failure(String),
}

fn render_page(credentials: &Credentials, url: &str, outcome: Option<&Outcome>) -> String {
    let keys_notice = if credentials.is_complete() {
        String::new()
    } else {
        r#"<p class="warn">Please enter all required API keys to enable podcast generation.</p>"#
            .to_string()
    };

    let result_html = match outcome {
        None => String::new(),
        Some(Outcome::Failure(message)) => {
            format!(r#"<p class="error">{}</p>"#, escape_html(message))
        }
        Some(Outcome::Success(result)) => {
            let audio_url = format!("/audio/{}", escape_html(&result.file_name));
            let summary = result
                .summary
                .as_deref()
                .map(|s| format!("<blockquote>{}</blockquote>", escape_html(s)))
                .unwrap_or_default();
            format!(
                r#"<p class="ok">Podcast generated successfully! Detected {source}.</p>
<audio controls><source src="{audio_url}" type="{mime}"></audio>
<p><a href="{audio_url}" download="{download}">Download Podcast</a></p>
{summary}"#,
                source = escape_html(&result.source.to_string()),
                audio_url = audio_url,
                mime = result.mime_type,
                download = DOWNLOAD_NAME,
                summary = summary,
            )
        }
    };

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Blog/YouTube to Podcast</title>
<style>
body {{ font-family: sans-serif; max-width: 720px; margin: 2rem auto; }}
label {{ display: block; margin-top: .8rem; }}
input {{ width: 100%; padding: .4rem; }}
.warn {{ color: #a36b00; }} .error {{ color: #b00020; }} .ok {{ color: #1b7f3b; }}
</style>
</head>
<body>
<h1>Blog/YouTube to Podcast</h1>
<form method="post" action="/generate">
<fieldset>
<legend>API Keys</legend>
<label>OpenAI API Key <input type="password" name="openai_api_key" placeholder="{openai}"></label>
<label>ElevenLabs API Key <input type="password" name="elevenlabs_api_key" placeholder="{elevenlabs}"></label>
<label>Firecrawl API Key <input type="password" name="firecrawl_api_key" placeholder="{firecrawl}"></label>
</fieldset>
<label>Enter the Blog or YouTube URL: <input type="url" name="url" value="{url}"></label>
<p><button type="submit">Generate Podcast</button></p>
</form>
{keys_notice}
{result_html}
</body>
</html>"#,
        openai = placeholder(&credentials.openai_api_key),
        elevenlabs = placeholder(&credentials.elevenlabs_api_key),
        firecrawl = placeholder(&credentials.firecrawl_api_key),
        url = escape_html(url),
        keys_notice = keys_notice,
        result_html = result_html,
    )
}

/// Placeholder text for a key field: hints that a server key exists without revealing it.
fn placeholder(key: &str) -> &'static str {
    if key.trim().is_empty() {
        ""
    } else {
        "configured on server"
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
