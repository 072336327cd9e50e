use actix_web::HttpResponse;

/// Liveness probe: `200 OK` with an empty body as long as the server accepts connections.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
