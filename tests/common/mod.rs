//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::mpsc;

use note_studio::config::AppConfig;
use note_studio::http::HttpServer;
use note_studio::lifecycle::Shutdown;

/// A server running in the background on a fixed address.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub config_tx: mpsc::UnboundedSender<AppConfig>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the server with `config` bound to `addr`.
pub async fn start_server(addr: SocketAddr, mut config: AppConfig) -> TestServer {
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    TestServer {
        addr,
        shutdown,
        config_tx,
    }
}

/// Client that does not follow redirects or use a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
