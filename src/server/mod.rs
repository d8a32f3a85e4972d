// Server module entry point
// Listener creation, connection handling, shutdown signals, and the
// best-effort local address discovery used by the startup banner

pub mod connection;
pub mod listener;
pub mod netinfo;
pub mod signal;

// Re-export commonly used items
pub use connection::accept_connection;
pub use listener::create_listener;
