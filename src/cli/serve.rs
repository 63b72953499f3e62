//! Serve CLI command

use crate::api;
use crate::api::auth::ServerAuth;
use crate::api::state::AppState;
use crate::config;
use crate::store::TaskStore;

/// Execute the serve command. Flags override the config file.
pub async fn execute(port: Option<u16>, host: Option<String>, demo: bool) {
    let config = config::load_config();
    let port = port.unwrap_or(config.server.port);
    let host = host.unwrap_or(config.server.host);

    let store = if demo {
        tracing::info!("seeding demo tasks");
        TaskStore::with_demo_data()
    } else {
        TaskStore::new()
    };

    let state = AppState::new(store, ServerAuth::presence_only());

    println!("taskdeck API: http://{}:{}/api/tasks", host, port);

    if let Err(e) = api::start_server(&host, port, state).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
