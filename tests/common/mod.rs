//! Shared harness for integration tests.

use std::sync::Arc;
use tokio::net::TcpListener;

use cars_service::config::ServiceConfig;
use cars_service::http::AppState;
use cars_service::security::RoleProvider;
use cars_service::store::{parse_dataset, CarStore, MemoryStore};
use cars_service::{HttpServer, Shutdown};

/// A running service seeded with the sample dataset.
pub struct TestService {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    shutdown: Shutdown,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Drop every record, as before a test that needs a blank store.
    #[allow(dead_code)]
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service on an ephemeral port with the four-car dataset.
pub async fn spawn_service() -> TestService {
    start(None).await
}

/// Same as [`spawn_service`], resolving roles through `roles`.
#[allow(dead_code)]
pub async fn spawn_service_with_roles(roles: Arc<dyn RoleProvider>) -> TestService {
    start(Some(roles)).await
}

async fn start(roles: Option<Arc<dyn RoleProvider>>) -> TestService {
    let dataset = parse_dataset(include_str!("../../fixtures/cars.toml")).unwrap();
    let store = Arc::new(MemoryStore::new());
    store.seed(dataset.cars).unwrap();

    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut state = AppState::new(&config, store.clone());
    if let Some(roles) = roles {
        state.roles = roles;
    }

    let shutdown = Shutdown::new();
    let server = HttpServer::with_state(config, state);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestService {
        base_url: format!("http://{}", addr),
        store,
        shutdown,
    }
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
