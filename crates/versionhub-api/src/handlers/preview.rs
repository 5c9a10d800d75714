//! Version preview handler.

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Utc};

use versionhub_core::error::AppError;
use versionhub_core::types::PreviewFile;
use versionhub_service::preview::ValidationError;
use versionhub_service::{PreviewOutcome, PreviewQuery, PreviewRejection};

use crate::dto::request::PreviewParams;
use crate::error::PreviewFailure;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/versions/preview?file=&x=&y=&version=&mimeFallback=
pub async fn get_preview(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    params: Result<Query<PreviewParams>, QueryRejection>,
) -> Result<Response, PreviewFailure> {
    let Query(params) = params.map_err(|e| {
        tracing::info!(user = %auth.context().user, error = %e, "Malformed preview query");
        PreviewRejection::from(ValidationError::Malformed(e.body_text()))
    })?;

    let preview_config = &state.config.preview;
    let query = PreviewQuery {
        file: params.file,
        width: params.x.unwrap_or(preview_config.default_width),
        height: params.y.unwrap_or(preview_config.default_height),
        version: params.version,
        mime_fallback: params.mime_fallback,
    };

    let preview = match state.preview_service.get_preview(auth.context(), &query).await? {
        PreviewOutcome::Preview(preview) => preview,
        PreviewOutcome::MimeIcon(url) => return Ok(Redirect::to(&url).into_response()),
    };

    let etag = entity_tag(&preview);
    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| etag_matches(v, &etag));

    let builder = Response::builder()
        .header(header::ETAG, &etag)
        .header(header::LAST_MODIFIED, http_date(preview.modified_at))
        .header(
            header::CACHE_CONTROL,
            format!(
                "private, max-age={}, immutable",
                preview_config.client_cache_seconds
            ),
        );

    let response = if not_modified {
        builder.status(StatusCode::NOT_MODIFIED).body(Body::empty())
    } else {
        builder
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, &preview.mime_type)
            .header(
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", preview.name),
            )
            .header(header::CONTENT_LENGTH, preview.data.len())
            .body(Body::from(preview.data))
    };

    response.map_err(|e| {
        PreviewRejection::Internal(AppError::internal(format!("Response build failed: {e}")))
            .into()
    })
}

/// Strong entity tag of a stored preview.
fn entity_tag(preview: &PreviewFile) -> String {
    format!(
        "\"{}-{:x}\"",
        preview.name,
        preview.modified_at.timestamp_millis()
    )
}

/// Weak comparison of an `If-None-Match` value against `etag`.
fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    let etag = opaque_tag(etag);
    if_none_match
        .split(',')
        .map(str::trim)
        .any(|tag| tag == "*" || opaque_tag(tag) == etag)
}

fn opaque_tag(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

/// Format a timestamp as an RFC 7231 HTTP date.
fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview() -> PreviewFile {
        PreviewFile {
            name: "32-32-crop.png".to_string(),
            mime_type: "image/png".to_string(),
            modified_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            data: Default::default(),
        }
    }

    #[test]
    fn test_http_date() {
        assert_eq!(
            http_date(preview().modified_at),
            "Tue, 14 Nov 2023 22:13:20 GMT"
        );
    }

    #[test]
    fn test_entity_tag_tracks_name_and_mtime() {
        let a = preview();
        let mut b = preview();
        b.modified_at = DateTime::from_timestamp(1_700_000_001, 0).unwrap();

        assert_eq!(entity_tag(&a), "\"32-32-crop.png-18bcfe56800\"");
        assert_ne!(entity_tag(&a), entity_tag(&b));
    }

    #[test]
    fn test_etag_matching() {
        let tag = entity_tag(&preview());

        assert!(etag_matches(&tag, &tag));
        assert!(etag_matches(&format!("W/{tag}"), &tag));
        assert!(etag_matches(&format!("\"other\", W/{tag}"), &tag));
        assert!(etag_matches("*", &tag));
        assert!(!etag_matches("\"other\"", &tag));
        assert!(!etag_matches("", &tag));
    }
}
