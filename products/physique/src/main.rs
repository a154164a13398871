use physique::{AppState, Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    match config.log_dir() {
        Some(dir) => base::init_file_logger(dir)?,
        None => base::init_stdout_logger(),
    }

    proportion::validate_landmarks()?;

    log::info!("Physique server");
    match config.meshgen().script_path() {
        Ok(script) => log::info!("Mesh engine script: {}", script.display()),
        Err(e) => log::warn!("Cannot resolve mesh engine script: {}", e),
    }
    match config.meshgen().timeout() {
        Some(limit) => log::info!("Generation timeout: {:?}", limit),
        None => log::info!("Generation timeout: none"),
    }

    let server = Server::bind(config.addr(), AppState::from_config(&config)).await?;
    log::info!("Listening on {}", server.local_addr());

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down");
        })
        .await?;

    Ok(())
}
