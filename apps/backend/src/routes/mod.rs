use actix_web::web;

pub mod health;
pub mod realtime;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production, `main.rs` wires the realtime scope with rate limiting on
/// top; tests register the same paths without that wrapper so endpoint
/// behavior can be exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/realtime").configure(realtime::configure_routes));
    cfg.configure(health::configure_routes);
}
