mod config;
mod handler;
mod http;
mod logger;
mod server;
mod store;

use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Startup precondition: the document must exist before the server
    // accepts its first connection. Failure here is fatal.
    let store = store::DocumentStore::open(&cfg.storage.document_path).map_err(|e| {
        logger::log_error(&format!(
            "cannot stat or create document '{}': {e}",
            cfg.storage.document_path
        ));
        e
    })?;

    let listener = server::create_reusable_listener(addr).map_err(|e| {
        logger::log_error(&format!("cannot bind {addr}: {e}"));
        e
    })?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg, store));
    server::run(listener, state).await
}
