use std::sync::Arc;

use spa_serve::config::Config;
use spa_serve::logger;
use spa_serve::server;

fn main() {
    let mut cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[ERROR] Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // A single positional argument overrides the port; anything
    // unparsable warns and keeps the default
    let port_arg = std::env::args().nth(1);
    if let Some(warning) = cfg.apply_port_arg(port_arg.as_deref()) {
        eprintln!("[WARN] {warning}");
    }

    if let Err(e) = logger::init(&cfg) {
        eprintln!("[ERROR] Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    // Validate the serve root before binding any socket
    if let Err(message) = cfg.ensure_serve_root() {
        logger::log_error(&message);
        logger::log_error("Run your web build first (e.g. `flutter build web --release`)");
        std::process::exit(1);
    }

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = match runtime_builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            logger::log_error(&format!("Failed to build runtime: {e}"));
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(async_main(cfg)) {
        logger::log_error(&format!("{e}"));
        std::process::exit(1);
    }
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;
    let cfg = Arc::new(cfg);

    let local_ip = server::netinfo::discover_local_ip();
    logger::log_server_start(&cfg, local_ip);

    let shutdown = server::signal::start_signal_handler();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        server::accept_connection(stream, peer_addr, &cfg);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            // Graceful stop: quit accepting, let in-flight tasks finish
            _ = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    Ok(())
}
