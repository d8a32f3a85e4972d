// Connection handling module
// Accepts a TCP connection and serves HTTP/1.1 on it in a spawned task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::handler;
use crate::logger;

/// Accept a connection and hand it to a spawned serving task.
///
/// Requests on one connection never block another; each task only shares
/// the immutable configuration.
pub fn accept_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, config: &Arc<Config>) {
    handle_connection(stream, Arc::clone(config), peer_addr);
}

/// Serve a single connection:
/// 1. Wrap the TCP stream in `TokioIo`
/// 2. Configure HTTP/1.1 keep-alive from the performance settings
/// 3. Serve requests through the router
/// 4. Bound the whole connection by the configured timeout
fn handle_connection(stream: tokio::net::TcpStream, config: Arc<Config>, peer_addr: SocketAddr) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let keep_alive_timeout = config.performance.keep_alive_timeout;
        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            config.performance.read_timeout,
            config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        if keep_alive_timeout > 0 {
            builder.keep_alive(true);
        }

        let service_config = Arc::clone(&config);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let config = Arc::clone(&service_config);
                async move { handler::handle_request(req, config, peer_addr).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}
