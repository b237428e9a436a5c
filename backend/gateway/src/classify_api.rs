//! `POST /classify`: multipart upload in, classification JSON out.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use docsift_core::ClassifyResponse;
use docsift_logging::{ClassificationEvent, EventLogger};
use docsift_media::{detect_mime_type, file_extension, file_kind, StagedUpload};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::GatewayState;

/// Name of the multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// A file part pulled out of the multipart body.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Handler for `POST /classify`.
///
/// A request that is not multipart, or has no `file` part with a non-empty
/// filename, is answered with `400 {"error": "No file"}`.
pub async fn classify(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("classify", request_id = %request_id);
    handle(state, multipart, &request_id).instrument(span).await
}

async fn handle(
    state: GatewayState,
    multipart: Result<Multipart, MultipartRejection>,
    request_id: &str,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let upload = match multipart {
        Ok(mut multipart) => read_file_field(&mut multipart).await?,
        Err(_) => None,
    };
    let Some(upload) = upload else {
        EventLogger::log_event(
            request_id,
            ClassificationEvent::Rejected {
                reason: "No file".into(),
            },
        );
        return Err(ApiError::NoFile);
    };

    let bytes = upload.data.len();
    // Dropping the staged upload removes the temp file, on every path.
    let staged = StagedUpload::stage(upload.data, file_extension(&upload.filename)).await?;
    info!(
        bytes,
        kind = %file_kind(&upload.filename),
        mime = detect_mime_type(staged.path()),
        "Received upload"
    );
    let response = state
        .classifier
        .classify_path(staged.path(), staged.extension())
        .await;
    drop(staged);

    EventLogger::log_event(
        request_id,
        ClassificationEvent::classified(&upload.filename, &response),
    );
    Ok(Json(response))
}

/// The first file part named `file`.
///
/// Parts without a `filename` attribute are plain form values and are passed
/// over. If the first file part has an empty filename there is no upload.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Ok(None);
        }
        let data = field.bytes().await?;
        return Ok(Some(UploadedFile { filename, data }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_router;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use docsift_config::{OcrConfig, ServerConfig};
    use docsift_core::DocsiftError;
    use docsift_understanding::{DocumentClassifier, KeywordClassifier, OcrEngine, OcrWord};
    use serde_json::Value;
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "docsift-test-boundary";

    struct FixedOcr(&'static str);

    #[async_trait]
    impl OcrEngine for FixedOcr {
        async fn image_to_string(&self, _image: &Path) -> Result<String, DocsiftError> {
            Ok(self.0.to_string())
        }

        async fn image_to_data(&self, _image: &Path) -> Result<Vec<OcrWord>, DocsiftError> {
            Ok(vec![OcrWord {
                level: 5,
                conf: Some(88.0),
                text: "word".into(),
            }])
        }
    }

    fn app(ocr_text: &'static str) -> axum::Router {
        app_with(ocr_text, &ServerConfig::default())
    }

    fn app_with(ocr_text: &'static str, server: &ServerConfig) -> axum::Router {
        let classifier =
            DocumentClassifier::new(Arc::new(FixedOcr(ocr_text)), KeywordClassifier::builtin());
        let state = GatewayState::new(classifier, OcrConfig::default());
        build_router(state, server)
    }

    fn multipart_parts(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (field, filename, content) in parts {
            let disposition = match filename {
                Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
                None => format!("form-data; name=\"{field}\""),
            };
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_body(field: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
        multipart_parts(&[(field, filename, content)])
    }

    fn classify_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/classify")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn classifies_text_upload() {
        let body = multipart_body(
            "file",
            Some("Resignation.TXT"),
            b"Please accept my resignation. My last working day is May 31.",
        );
        let resp = app("").oneshot(classify_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        assert_eq!(json["document_type"], "exit_letter");
        assert_eq!(json["confidence"], 0.7);
        assert_eq!(json["readable"], true);
        assert!(json["ocr_confidence"].is_null());
        assert!(json["text_length"].is_null());
        assert_eq!(json["quality_reason"], "not_image");
    }

    #[tokio::test]
    async fn classifies_image_upload_with_readability() {
        let body = multipart_body("file", Some("scan.jpg"), b"\xff\xd8\xff");
        let resp = app("HDMF Pag-IBIG Fund Member's Data Form, Pag-IBIG MID Number")
            .oneshot(classify_request(body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        assert_eq!(json["document_type"], "pagibig");
        assert_eq!(json["confidence"], 0.75);
        assert_eq!(json["readable"], true);
        assert_eq!(json["ocr_confidence"], 0.88);
        assert_eq!(json["quality_reason"], "ok");
    }

    #[tokio::test]
    async fn missing_file_field_is_400() {
        let body = multipart_body("document", Some("memo.txt"), b"memorandum");
        let resp = app("").oneshot(classify_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await, serde_json::json!({ "error": "No file" }));
    }

    #[tokio::test]
    async fn empty_filename_is_400() {
        let body = multipart_body("file", Some(""), b"");
        let resp = app("").oneshot(classify_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn only_first_file_part_counts() {
        let body = multipart_parts(&[
            ("file", Some(""), &b""[..]),
            ("file", Some("memo.txt"), &b"memorandum subject: attendance"[..]),
        ]);
        let resp = app("").oneshot(classify_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "No file");
    }

    #[tokio::test]
    async fn plain_form_value_named_file_is_skipped() {
        let body = multipart_parts(&[
            ("file", None, &b"not an upload"[..]),
            ("file", Some("memo.txt"), &b"memorandum subject: attendance"[..]),
        ]);
        let resp = app("").oneshot(classify_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["document_type"], "memo");
    }

    #[tokio::test]
    async fn oversized_upload_is_413() {
        let server = ServerConfig {
            max_upload_bytes: 256,
            ..Default::default()
        };
        let body = multipart_body("file", Some("resume.txt"), &[b'a'; 4096]);
        let resp = app_with("", &server)
            .oneshot(classify_request(body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(json_body(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn non_multipart_request_is_400() {
        let req = Request::builder()
            .method("POST")
            .uri("/classify")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let resp = app("").oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "No file");
    }

    #[tokio::test]
    async fn unsupported_extension_is_others() {
        let body = multipart_body("file", Some("contract.doc"), b"agreement shall");
        let resp = app("").oneshot(classify_request(body)).await.unwrap();
        let json = json_body(resp).await;
        assert_eq!(json["document_type"], "others");
        assert_eq!(json["confidence"], 0.5);
    }

    #[tokio::test]
    async fn health_endpoints() {
        let resp = app("")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");

        let resp = app("")
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = json_body(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["ocr_language"], "eng");
    }

    #[tokio::test]
    async fn cors_allows_configured_origin_only() {
        let preflight = |origin: &str| {
            Request::builder()
                .method("OPTIONS")
                .uri("/classify")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap()
        };

        let resp = app("")
            .oneshot(preflight("https://e201filems.infinityfree.me"))
            .await
            .unwrap();
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://e201filems.infinityfree.me"
        );

        let resp = app("")
            .oneshot(preflight("https://evil.example"))
            .await
            .unwrap();
        assert!(resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
