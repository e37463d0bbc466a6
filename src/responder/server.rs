//! Listener lifecycle
//!
//! Binding is separate from serving so a port conflict surfaces before the
//! banner is printed, and so tests can bind port 0 and read the real address.

use std::future::Future;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::infrastructure::config::{BackendConfig, Config};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::metrics::RequestMetrics;
use crate::infrastructure::shutdown::{shutdown_signal, Shutdown};
use crate::responder::handler::router;
use crate::{BackendError, Result};

/// A bound, not yet serving, static responder
pub struct StubServer {
    config: BackendConfig,
    listener: TcpListener,
    metrics: Arc<RequestMetrics>,
}

impl StubServer {
    /// Bind the backend's address
    ///
    /// # Errors
    /// `BackendError::Bind` if the address is unavailable (e.g. port in use).
    pub async fn bind(config: BackendConfig) -> Result<Self> {
        let addr = config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| BackendError::Bind { addr, source })?;

        Ok(Self {
            config,
            listener,
            metrics: Arc::new(RequestMetrics::new()),
        })
    }

    /// Address actually bound (differs from config when port is 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.metrics.clone()
    }

    /// Write the startup line for the bound port
    pub fn announce<W: Write>(&self, out: &mut W) -> Result<()> {
        let port = self.local_addr()?.port();
        writeln!(out, "{}", self.config.banner(port))?;
        out.flush()?;
        Ok(())
    }

    /// Print the banner and serve until `shutdown` resolves
    ///
    /// Connection-level failures (resets, broken pipes while writing) end
    /// only that connection; the accept loop keeps running.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        let app = router(&self.config, self.metrics.clone());

        self.announce(&mut std::io::stdout())?;
        tracing::info!(backend = %self.config.name, "Listening on {}", addr);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            backend = %self.config.name,
            served = snapshot.served,
            uptime_seconds = snapshot.uptime_seconds,
            request_rate = snapshot.request_rate,
            "Stopped"
        );

        Ok(())
    }
}

/// Run one backend as a standalone process
///
/// Uses the config.toml entry named like `preset`, falling back to the preset.
pub async fn run_backend(preset: BackendConfig) -> Result<()> {
    let config = Config::load()?;
    let backend = config.backend_or(preset);
    let _guards = init_logging(&config.log, &backend.name);

    let server = StubServer::bind(backend).await.inspect_err(|e| {
        tracing::error!("{}", e);
    })?;

    server.run(shutdown_signal()).await
}

/// Bind every backend, then serve them all until `shutdown` fires
///
/// All binds happen before any banner is printed, so one conflicting port
/// aborts startup as a whole. If a server fails while running, the others
/// are told to stop and the first error is returned.
pub async fn serve_all(backends: Vec<BackendConfig>, shutdown: Shutdown) -> Result<()> {
    let mut servers = Vec::with_capacity(backends.len());
    for backend in backends {
        servers.push(StubServer::bind(backend).await?);
    }

    let mut tasks = JoinSet::new();
    for server in servers {
        tasks.spawn(server.run(shutdown.wait()));
    }

    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.map_err(|e| BackendError::Io(std::io::Error::other(e)))?;
        if let Err(e) = outcome {
            tracing::error!("Backend failed: {}", e);
            shutdown.trigger();
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
