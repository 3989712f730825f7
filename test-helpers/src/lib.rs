use api::clock::Clock;
use api::{Config, telemetry};
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: payloads::ApiClient,
    pub clock: Clock,
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    // pinned so query defaults are deterministic
    #[cfg(feature = "mock-time")]
    let clock = Clock::new("2025-01-01T00:00:00Z".parse().unwrap());

    #[cfg(not(feature = "mock-time"))]
    let clock = Clock::new();

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        assets_dir: "./assets".into(),
    };

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let server = api::build(&mut config, clock.clone()).await.unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: payloads::ApiClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: client,
        },
        clock,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}
