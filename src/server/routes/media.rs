//! Stored media serving endpoint

use crate::server::state::AppState;
use crate::storage::content_etag;
use crate::utils::error::ForgeError;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

/// Serve a stored image by filename
///
/// Responses carry a content-based `ETag`; a matching `If-None-Match`
/// short-circuits to `304` with no body.
pub async fn serve_media(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ForgeError> {
    let filename = path.into_inner();
    debug!("Media request: {}", filename);

    let (content, mime) = state.storage.media().get(&filename).await?;
    let etag = content_etag(&content);

    let if_none_match = req
        .headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok());

    if if_none_match == Some(etag.as_str()) {
        return Ok(HttpResponse::NotModified()
            .insert_header((header::ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header((header::ETAG, etag))
        .insert_header((header::CACHE_CONTROL, "public, max-age=31536000"))
        .body(content))
}
