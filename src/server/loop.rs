// Server loop module
// Accept loop with graceful shutdown

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop until a shutdown signal arrives
///
/// Accepted connections are served on `spawn_local` tasks; when the loop
/// exits, in-flight connections finish on their own.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                if signals.shutdown_requested.load(Ordering::SeqCst) {
                    logger::log_shutdown(active_connections.load(Ordering::SeqCst));
                    break;
                }
            }
        }
    }
}
