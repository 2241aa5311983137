use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, App, HttpServer};
use greenquest_backend::config::realtime::RealtimeConfig;
use greenquest_backend::config::session::SessionConfig;
use greenquest_backend::infra::state::build_state;
use greenquest_backend::middleware::cors::cors_middleware;
use greenquest_backend::middleware::rate_limit::token_rate_limit_config;
use greenquest_backend::middleware::request_trace::RequestTrace;
use greenquest_backend::middleware::structured_logger::StructuredLogger;
use greenquest_backend::routes;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    println!("🚀 Starting GreenQuest Backend on http://{}:{}", host, port);

    let realtime_cfg = match RealtimeConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let session_cfg = match SessionConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_http_gateways(session_cfg, realtime_cfg)
        .and_then(|builder| builder.build())
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    // Shared across workers so limits apply per IP, not per worker
    let rate_limit_backend = InMemoryBackend::builder().build();

    HttpServer::new(move || {
        let rate_limiter = RateLimiter::builder(
            rate_limit_backend.clone(),
            token_rate_limit_config().build(),
        )
        .add_headers()
        .build();

        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .service(
                web::scope("/api/realtime")
                    .wrap(rate_limiter)
                    .configure(routes::realtime::configure_routes),
            )
            .configure(routes::health::configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
