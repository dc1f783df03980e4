use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tcline_media::process;
use tcline_state::meta::FileMeta;

use crate::error::ApiError;
use crate::ServerState;

const FILE_TOO_LARGE: &str = "file too large";

pub async fn health() -> &'static str {
    "ok"
}

/// `POST /process`: spools the `file` part to disk and returns the time range
/// it covers.
pub async fn process_upload(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> Result<Json<FileMeta>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("invalid multipart", e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::BadRequest("No selected file".into()));
        }

        let upload = spool_field(field, &filename, state.config.max_upload_bytes).await?;
        tracing::debug!(name = %filename, path = %upload.path().display(), "spooled upload");

        let options = state.options.clone();
        let name = filename.clone();
        let range = tokio::task::spawn_blocking(move || {
            // `upload` is dropped (and deleted) once processing finishes.
            process::process_file(upload.path(), &name, &options)
        })
        .await
        .map_err(|e| {
            tracing::error!("processing task failed: {e}");
            ApiError::Internal
        })??;

        return Ok(Json(FileMeta::new(filename, range.start_ms, range.end_ms)));
    }
    Err(ApiError::BadRequest("No file part".into()))
}

async fn spool_field(
    mut field: Field<'_>,
    filename: &str,
    limit: usize,
) -> Result<tempfile::NamedTempFile, ApiError> {
    let suffix = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut file = tempfile::Builder::new()
        .prefix("tcline-")
        .suffix(&suffix)
        .tempfile()?;

    let mut written = 0usize;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error("upload read error", e))?
    {
        written += chunk.len();
        if written > limit {
            return Err(ApiError::BadRequest(FILE_TOO_LARGE.into()));
        }
        file.write_all(&chunk)?;
    }
    file.flush()?;
    Ok(file)
}

/// Body-limit rejections read as `file too large` whichever layer trips.
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BadRequest(FILE_TOO_LARGE.into())
    } else {
        ApiError::BadRequest(format!("{context}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::router;

    const BOUNDARY: &str = "tcline-test-boundary";

    fn multipart_request(field: &str, filename: &str, contents: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {contents}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/process")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
        send_with(ServerConfig::default(), req).await
    }

    async fn send_with(
        config: ServerConfig,
        req: Request<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let response = router(config).oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn timecode_log_upload_returns_range() {
        let (status, body) =
            send(multipart_request("file", "take_01.tc", "1,10,00,00,0\n1,10,00,05,0\n")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "take_01.tc");
        assert_eq!(body["startTime"], 36_000_000);
        assert_eq!(body["endTime"], 36_005_000);
    }

    #[tokio::test]
    async fn unsupported_type_is_bad_request() {
        let (status, body) = send(multipart_request("file", "notes.txt", "hello")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unsupported file type");
    }

    #[tokio::test]
    async fn missing_file_part_is_bad_request() {
        let (status, body) = send(multipart_request("attachment", "take.tc", "1,0,0,0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file part");
    }

    #[tokio::test]
    async fn empty_filename_is_bad_request() {
        let (status, body) = send(multipart_request("file", "", "1,0,0,0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let config = ServerConfig {
            max_upload_bytes: 8,
            ..ServerConfig::default()
        };
        let req = multipart_request("file", "long.tc", &"1,10,00,00,0\n".repeat(64));
        let (status, body) = send_with(config, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "file too large");
    }

    #[tokio::test]
    async fn broken_timecode_log_is_server_error() {
        let (status, body) = send(multipart_request("file", "broken.tc", "1,2")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("malformed TC line"));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = router(ServerConfig::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
