use api::{
    Config, build,
    clock::Clock,
    telemetry::{get_subscriber, init_subscriber},
};

/// Time Zone Range Converter server
///
/// Environment variables can be set directly or loaded from a .env file in
/// the project root.
///
/// Required environment variables:
/// - IP_ADDRESS: Server bind address (127.0.0.1 for local, 0.0.0.0 for public)
/// - PORT: Server port
/// - ASSETS_DIR: Directory with the built wasm controller bundle
///   (optional, defaults to ./assets)
///
/// Example development command:
/// IP_ADDRESS=127.0.0.1 PORT=8000 cargo run
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file if available
    // This will silently ignore if the file doesn't exist
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber);

    let mut config = Config::from_env();

    #[cfg(not(feature = "mock-time"))]
    let clock = Clock::new();
    #[cfg(feature = "mock-time")]
    let clock = Clock::new(jiff::Timestamp::now());

    let server = build(&mut config, clock).await?;
    tracing::info!("listening on {}:{}", config.ip, config.port);
    server.await
}
