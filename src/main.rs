//! Memory Keeper server binary.
//!
//! Loads configuration, resolves the optional providers once and serves the
//! HTTP API until Ctrl-C.

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use tracing_subscriber::EnvFilter;

use memory_keeper::adapters::ai::{
    AnthropicConfig, AnthropicProvider, FailoverAIProvider, OpenAIConfig, OpenAIProvider,
};
use memory_keeper::adapters::http::{app_router, MemoryAppState, MemoryServices};
use memory_keeper::adapters::pdf::{CommandPdfRenderer, PlainTextPdfRenderer};
use memory_keeper::adapters::speech::{OpenAISpeechConfig, OpenAISpeechSynthesizer};
use memory_keeper::adapters::storage::{
    JsonAnswerStore, JsonExportLog, LocalAudioStore, LocalExportStorage,
};
use memory_keeper::application::{RendererChain, StoryPolisher};
use memory_keeper::config::{AiConfig, AiProvider, AppConfig, ExportConfig, ServerConfig};
use memory_keeper::domain::memory::{Prompts, DEFAULT_PROMPTS, DEFAULT_TITLE};
use memory_keeper::ports::{AIProvider, SpeechSynthesizer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let polisher = StoryPolisher::new(build_ai_provider(&config.ai)).with_timeout(config.ai.timeout());
    let synthesizer = build_synthesizer(&config);
    let renderers = build_renderers(&config.export);
    tracing::info!(renderers = ?renderers.names(), "PDF renderers configured");

    let state = MemoryAppState::new(MemoryServices {
        prompts: Prompts::new(DEFAULT_PROMPTS),
        title: DEFAULT_TITLE.to_string(),
        answer_store: Arc::new(JsonAnswerStore::new(config.storage.answers_path())),
        polisher,
        export_storage: Arc::new(LocalExportStorage::new(&config.export.export_dir)),
        export_log: Arc::new(JsonExportLog::new(config.export.log_path())),
        renderers,
        synthesizer,
        audio_store: Arc::new(LocalAudioStore::new(config.storage.audio_path())),
    });
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, environment = ?config.server.environment, "Memory Keeper listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// JSON lines in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if server.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn usable(key: &Secret<String>) -> Option<String> {
    let key = key.expose_secret();
    (!key.is_empty()).then(|| key.clone())
}

fn provider_for(kind: AiProvider, ai: &AiConfig) -> Option<Arc<dyn AIProvider>> {
    let built: Result<Arc<dyn AIProvider>, _> = match kind {
        AiProvider::OpenAI => {
            let key = ai.openai_api_key.as_ref().and_then(usable)?;
            OpenAIProvider::new(
                OpenAIConfig::new(key)
                    .with_model(&ai.openai_model)
                    .with_timeout(ai.timeout())
                    .with_max_retries(ai.max_retries),
            )
            .map(|p| Arc::new(p) as Arc<dyn AIProvider>)
        }
        AiProvider::Anthropic => {
            let key = ai.anthropic_api_key.as_ref().and_then(usable)?;
            AnthropicProvider::new(
                AnthropicConfig::new(key)
                    .with_model(&ai.anthropic_model)
                    .with_timeout(ai.timeout())
                    .with_max_retries(ai.max_retries),
            )
            .map(|p| Arc::new(p) as Arc<dyn AIProvider>)
        }
    };

    match built {
        Ok(provider) => Some(provider),
        Err(err) => {
            tracing::warn!(provider = ?kind, error = %err, "Could not build AI provider");
            None
        }
    }
}

/// Primary provider, wrapped for failover when a fallback is also usable.
/// A fallback whose key is present stands in for a primary that is not.
fn build_ai_provider(ai: &AiConfig) -> Option<Arc<dyn AIProvider>> {
    let fallback = ai
        .fallback_provider
        .filter(|kind| *kind != ai.primary_provider)
        .and_then(|kind| provider_for(kind, ai));

    match (provider_for(ai.primary_provider, ai), fallback) {
        (Some(primary), Some(fallback)) => {
            Some(Arc::new(FailoverAIProvider::new(primary).with_fallback(fallback)))
        }
        (Some(primary), None) => Some(primary),
        (None, Some(fallback)) => {
            tracing::info!(
                primary = ?ai.primary_provider,
                fallback = %fallback.provider_info().name,
                "Primary AI provider has no key, polishing with the fallback"
            );
            Some(fallback)
        }
        (None, None) => None,
    }
}

fn build_synthesizer(config: &AppConfig) -> Option<Arc<dyn SpeechSynthesizer>> {
    let Some(key) = config
        .speech
        .resolve_key(config.ai.openai_api_key.as_ref())
        .and_then(usable)
    else {
        tracing::info!("No speech API key configured, read aloud is disabled");
        return None;
    };

    let speech = OpenAISpeechConfig::new(key)
        .with_model(&config.speech.model)
        .with_voice(&config.speech.voice)
        .with_timeout(config.speech.timeout());
    match OpenAISpeechSynthesizer::new(speech) {
        Ok(synthesizer) => {
            tracing::info!(model = %config.speech.model, voice = %config.speech.voice, "Read aloud enabled");
            Some(Arc::new(synthesizer))
        }
        Err(err) => {
            tracing::warn!(error = %err, "Could not build speech synthesizer");
            None
        }
    }
}

fn build_renderers(export: &ExportConfig) -> RendererChain {
    let mut chain = RendererChain::new();
    if export.has_renderer_command() {
        let mut command = CommandPdfRenderer::new(export.renderer_command.trim())
            .with_timeout(export.render_timeout());
        if let Some(args) = export.renderer_args() {
            command = command.with_args(args);
        }
        chain = chain.then(Arc::new(command));
    }
    if export.fallback_enabled {
        chain = chain.then(Arc::new(PlainTextPdfRenderer::new().with_title(DEFAULT_TITLE)));
    }
    chain
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
