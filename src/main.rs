//! plaza server entry point.

use std::sync::Arc;

use plaza::board::BoardService;
use plaza::consultation::ConsultationService;
use plaza::notify::{NoopNotifier, Notifier, WebhookNotifier};
use plaza::web::{create_router, AppState};
use plaza::{Config, Database, FieldCodec, Result};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Config::load validates the encryption key; a bad key stops the
    // process here, before anything is served.
    let config = Arc::new(Config::load(&config_path)?);

    plaza::logging::init(&config.logging)?;
    tracing::info!("Starting plaza (config: {})", config_path);

    let codec = Arc::new(FieldCodec::from_hex(&config.security.encryption_key)?);
    let db = Database::open(&config.database).await?;

    let notifier: Arc<dyn Notifier> = if config.notifier.webhook_url.is_empty() {
        tracing::info!("No webhook URL configured; notifications are disabled");
        Arc::new(NoopNotifier)
    } else {
        Arc::new(WebhookNotifier::new(config.notifier.webhook_url.clone()))
    };

    let board = BoardService::new(
        db.pool().clone(),
        codec.clone(),
        notifier.clone(),
        config.site.company_id,
    );
    let consultation = ConsultationService::new(db.pool().clone(), codec, notifier);

    let state = Arc::new(AppState::new(board, consultation, config.clone()));
    let router = create_router(state);

    plaza::web::server::serve(&config.server, router).await
}
