pub mod clock;
pub mod engine;
pub mod render;
pub mod routes;
pub mod telemetry;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;

use crate::clock::Clock;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub async fn build(
    config: &mut Config,
    clock: Clock,
) -> std::io::Result<Server> {
    let clock = web::Data::new(clock);
    let assets_dir = config.assets_dir.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        App::new()
            .service(routes::services())
            // the wasm controller bundle, built separately with trunk
            .service(actix_files::Files::new("/assets", assets_dir.clone()))
            .app_data(clock.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// directory holding the built wasm controller bundle
    pub assets_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        use std::env::var;

        Config {
            ip: var("IP_ADDRESS").unwrap(),
            port: var("PORT").unwrap().parse().unwrap(),
            assets_dir: var("ASSETS_DIR")
                .unwrap_or_else(|_| "./assets".to_string()),
        }
    }
}
