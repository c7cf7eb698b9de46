//! Media endpoints: upload and image retrieval.

use axum::{
    Json, Router,
    body::Body,
    extract::{Multipart, Path, State},
    http::{HeaderMap, header},
    response::Response,
    routing::{get, post},
};
use chirp_common::{AppError, AppResult};

use crate::{extractors::ApiKey, response::MediaCreatedResponse, state::AppState};

/// Create the media router. Routes here span two prefixes, so the paths
/// are absolute and the router is merged rather than nested.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/medias", post(upload_media))
        .route("/api/images/{file_name}", get(get_image))
}

/// Scheme and host of the inbound request, for building retrieval links.
///
/// Scheme comes from `x-forwarded-proto` when a proxy sets it, defaulting
/// to plain `http`.
fn request_origin(headers: &HeaderMap) -> (String, String) {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http")
        .to_string();
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost")
        .to_string();
    (scheme, host)
}

/// Upload a file via multipart form and record it as media.
async fn upload_media(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<MediaCreatedResponse>> {
    let mut file_name: Option<String> = None;
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(std::string::ToString::to_string);
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec(),
            );
        }
    }

    let data =
        file_data.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let name =
        file_name.ok_or_else(|| AppError::BadRequest("File has no name".to_string()))?;

    let (scheme, host) = request_origin(&headers);
    let media_id = state
        .media_service
        .upload(&key, &name, &data, &scheme, &host)
        .await?;

    Ok(Json(MediaCreatedResponse {
        result: true,
        media_id,
    }))
}

/// Content type for a stored file, guessed from its extension
/// (case-insensitive).
fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Fetch stored file bytes by name.
async fn get_image(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> AppResult<Response> {
    let data = state.media_service.load(&file_name).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, content_type_for(&file_name))
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_content_type_for_ignores_extension_case() {
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("b.PnG"), "image/png");
        assert_eq!(content_type_for("c.WEBP"), "image/webp");
    }

    #[test]
    fn test_request_origin_defaults() {
        let headers = HeaderMap::new();
        let (scheme, host) = request_origin(&headers);
        assert_eq!(scheme, "http");
        assert_eq!(host, "localhost");
    }

    #[test]
    fn test_request_origin_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        headers.insert(header::HOST, "chirp.example".parse().unwrap());

        let (scheme, host) = request_origin(&headers);
        assert_eq!(scheme, "https");
        assert_eq!(host, "chirp.example");
    }
}
