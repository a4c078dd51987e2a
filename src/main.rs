use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use studykit::config::AppConfig;
use studykit::core::grammar::GrammarService;
use studykit::core::logging;
use studykit::core::summarize::Summarizer;
use studykit::core::synonyms::Thesaurus;
use studykit::database::Database;
use studykit::server::{ApiServer, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = logging::init();
    log::info!("StudyKit v{} starting", studykit::VERSION);

    let config = AppConfig::load();

    let db = Database::new(&config.data_dir())
        .await
        .context("failed to open database")?;

    let state = Arc::new(AppState {
        db,
        grammar: Arc::new(GrammarService::from_config(&config.grammar)),
        summarizer: Summarizer::new(config.summarize.ratio, config.summarize.min_sentences),
        thesaurus: Arc::new(Thesaurus::bundled()),
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    let mut server = ApiServer::new(addr, state);
    server.start().await.context("failed to start API server")?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    log::info!("Shutdown signal received");
    server.stop();

    Ok(())
}
