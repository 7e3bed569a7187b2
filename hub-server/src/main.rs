use hub_server::{Config, Server, print_banner, setup_environment};

#[tokio::main]
async fn main() {
    if let Err(e) = setup_environment() {
        eprintln!("Failed to set up environment: {}", e);
        std::process::exit(1);
    }

    print_banner();

    let config = Config::from_env();
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        port = config.http_port,
        "Starting hub server"
    );

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
