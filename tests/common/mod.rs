//! Shared doubles and helpers for the API integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use edge_control::engine::{CollaboratorError, Engine, ModuleSpec, PortAllocator};
use edge_control::{ApiServer, ServerConfig, Shutdown};

/// Engine double with scripted outcomes and recorded calls.
#[derive(Default)]
pub struct ScriptedEngine {
    pub accept_credentials: AtomicBool,
    pub fail_start: AtomicBool,
    pub fail_stop: AtomicBool,
    pub started: Mutex<Vec<ModuleSpec>>,
    pub stopped: Mutex<Vec<String>>,
    pub seen_credentials: Mutex<Vec<(String, String)>>,
}

impl ScriptedEngine {
    pub fn accepting() -> Arc<Self> {
        let engine = Self::default();
        engine.accept_credentials.store(true, Ordering::SeqCst);
        Arc::new(engine)
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl Engine for ScriptedEngine {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        self.seen_credentials
            .lock()
            .unwrap()
            .push((username.to_string(), password.to_string()));
        self.accept_credentials.load(Ordering::SeqCst)
    }

    fn start(&self, spec: ModuleSpec) -> Result<(), CollaboratorError> {
        if self.fail_start.load(Ordering::SeqCst) {
            return Err("engine refused to start".into());
        }
        self.started.lock().unwrap().push(spec);
        Ok(())
    }

    fn stop(&self, name: &str) -> Result<(), CollaboratorError> {
        if self.fail_stop.load(Ordering::SeqCst) {
            return Err("engine refused to stop".into());
        }
        self.stopped.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

/// Port allocator double returning a fixed port.
#[derive(Default)]
pub struct ScriptedPorts {
    pub port: u16,
    pub fail: AtomicBool,
    pub hosts: Mutex<Vec<String>>,
}

impl ScriptedPorts {
    pub fn with_port(port: u16) -> Arc<Self> {
        Arc::new(Self {
            port,
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        let ports = Self::default();
        ports.fail.store(true, Ordering::SeqCst);
        Arc::new(ports)
    }
}

impl PortAllocator for ScriptedPorts {
    fn available_port(&self, host: &str) -> Result<u16, CollaboratorError> {
        self.hosts.lock().unwrap().push(host.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err("no free port".into());
        }
        Ok(self.port)
    }
}

/// Bind on an ephemeral port and run the server in the background.
pub async fn spawn_server(
    engine: Arc<ScriptedEngine>,
    ports: Arc<ScriptedPorts>,
) -> (SocketAddr, Shutdown) {
    init_tracing();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = ApiServer::new(ServerConfig::default(), engine, ports);

    let handle = shutdown.clone();
    tokio::spawn(async move {
        let _ = server.run(listener, &handle).await;
    });

    (addr, shutdown)
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edge_control=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
