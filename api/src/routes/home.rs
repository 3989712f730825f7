use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, get, web};
use payloads::ConversionParams;

use super::ApiError;
use crate::engine::{self, ConversionRequest};
use crate::render;
use crate::clock::Clock;

/// The main page. Serves the full document for both plain page views and
/// the controller's partial-update fetches; the client extracts the results
/// region from the response itself.
#[tracing::instrument(skip(req, clock))]
#[get("/")]
pub async fn home(
    req: HttpRequest,
    clock: web::Data<Clock>,
) -> Result<HttpResponse, ApiError> {
    let params = ConversionParams::from_query_string(req.query_string());
    let request = ConversionRequest::resolve(&params, clock.now());
    let rows = engine::convert(&request)?;
    tracing::debug!(
        base_zone = %request.base_zone_id,
        rows = rows.len(),
        "converted request"
    );
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render::page(&request, &rows)))
}
