//! The adapter: one handler exposed over HTTP
//!
//! # Examples
//!
//! ```no_run
//! use agent_adapter::adapter::Adapter;
//! use agent_adapter::api::example_handler;
//!
//! Adapter::new(example_handler).serve("0.0.0.0", 8787).unwrap();
//! ```

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;
use tiny_http::Server;

use crate::api::Handler;
use crate::server;

/// Errors that stop the adapter from serving
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listening socket could not be opened
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Wraps a [`Handler`] and serves it on `/health` and `/run-case`
pub struct Adapter<H> {
    handler: H,
}

impl<H> fmt::Debug for Adapter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter").finish_non_exhaustive()
    }
}

impl<H: Handler> Adapter<H> {
    /// Create an adapter around `handler`
    pub const fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Bind to `(host, port)` without serving yet
    ///
    /// Port 0 asks the OS for a free port; see [`Listener::local_addr`].
    pub fn bind(self, host: &str, port: u16) -> Result<Listener<H>, ServeError> {
        let server = Server::http((host, port)).map_err(|source| ServeError::Bind {
            addr: format!("{host}:{port}"),
            source,
        })?;

        let listener = Listener {
            handler: self.handler,
            server,
            host: host.to_string(),
        };
        log::info!("bound {}", listener.display_addr());
        Ok(listener)
    }

    /// Bind and serve until the process exits
    ///
    /// Prints the listening address to stdout once bound. Requests are
    /// handled one at a time on the calling thread.
    pub fn serve(self, host: &str, port: u16) -> Result<(), ServeError> {
        self.bind(host, port)?.run();
        Ok(())
    }
}

/// An adapter bound to a socket
pub struct Listener<H> {
    handler: H,
    server: Server,
    host: String,
}

impl<H> fmt::Debug for Listener<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("host", &self.host)
            .field("local_addr", &self.local_addr())
            .finish_non_exhaustive()
    }
}

impl<H> Listener<H> {
    /// The bound socket address, if listening on IP
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// `http://host:port` with the port actually bound
    pub fn display_addr(&self) -> String {
        let port = self.local_addr().map_or(0, |addr| addr.port());
        format!("http://{}:{port}", self.host)
    }
}

impl<H: Handler> Listener<H> {
    /// Serve requests forever, one at a time
    pub fn run(self) {
        println!("agent-adapter listening on {}", self.display_addr());

        for mut request in self.server.incoming_requests() {
            let response = server::handle_request(&self.handler, &mut request);
            if let Err(e) = request.respond(response) {
                log::warn!("failed to write response: {e}");
            }
        }
    }
}
