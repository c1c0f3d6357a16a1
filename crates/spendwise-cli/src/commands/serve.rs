//! Server command implementation

use anyhow::Result;

pub async fn cmd_serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = spendwise_server::ServerConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    println!("🚀 Starting Spendwise suggestion server...");
    println!("   Listening: http://{}", config.bind_addr());
    if config.allowed_origins.is_empty() {
        println!("   🌐 CORS: any origin");
    } else {
        println!(
            "   🔒 CORS: {} ({})",
            config.allowed_origins.join(", "),
            spendwise_server::ALLOWED_ORIGINS_ENV
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    spendwise_server::serve(config).await
}
