//! Axum request handlers for the relay HTTP API.
//!
//! Each handler is a pass-through to the generative model; failures are
//! logged here and rendered as `{"error": ...}` by `AppError`.
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::routes::AppState;
use crate::editor::image::strip_data_uri_prefix;
use crate::error::{AppError, AppResult};
use crate::gemini::generate_suggestion;
use crate::prompt::suggestions::SuggestionKind;
use crate::relay::protocol::{EditRequest, EditResponse, HealthResponse, InspirationRequest, PromptResponse};

const MISSING_EDIT_FIELDS: &str = "imageBase64, mimeType and prompt are required.";

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

pub async fn edit_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EditRequest>, JsonRejection>,
) -> AppResult<Json<EditResponse>> {
    // Unreadable bodies get the same 400 as missing fields.
    let Json(payload) = payload.map_err(|rejection| {
        tracing::error!("Rejected edit body: {}", rejection.body_text());
        AppError::Validation(MISSING_EDIT_FIELDS.to_string())
    })?;
    let (Some(image), Some(mime_type), Some(prompt)) = (
        required(&payload.image_base64),
        required(&payload.mime_type),
        required(&payload.prompt),
    ) else {
        return Err(AppError::Validation(MISSING_EDIT_FIELDS.to_string()));
    };

    state.model
        .edit_image(strip_data_uri_prefix(image), mime_type, prompt)
        .await
        .map(|image_base64| Json(EditResponse { image_base64 }))
        .map_err(|e| {
            tracing::error!("Edit error: {}", e);
            e
        })
}

async fn suggestion(state: &AppState, kind: SuggestionKind, theme: &str) -> AppResult<Json<PromptResponse>> {
    generate_suggestion(state.model.as_ref(), kind, theme)
        .await
        .map(|prompt| Json(PromptResponse { prompt }))
        .map_err(|e| {
            tracing::error!(?kind, "Suggestion error: {}", e);
            e
        })
}

pub async fn inspiration(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<InspirationRequest>>,
) -> AppResult<Json<PromptResponse>> {
    let theme = payload.map(|Json(p)| p.theme).unwrap_or_default();
    suggestion(&state, SuggestionKind::Inspiration, &theme).await
}

pub async fn magic(State(state): State<Arc<AppState>>) -> AppResult<Json<PromptResponse>> {
    suggestion(&state, SuggestionKind::Magic, "").await
}

pub async fn lut(State(state): State<Arc<AppState>>) -> AppResult<Json<PromptResponse>> {
    suggestion(&state, SuggestionKind::Lut, "").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::routes::build_router;
    use crate::gemini::GenerativeModel;

    #[derive(Default)]
    struct FakeModel {
        seen: Mutex<Vec<(String, String, String)>>,
        refuse: bool,
        text: String,
    }

    #[async_trait]
    impl GenerativeModel for FakeModel {
        async fn edit_image(&self, image_base64: &str, mime_type: &str, prompt: &str) -> AppResult<String> {
            self.seen
                .lock()
                .unwrap()
                .push((image_base64.to_string(), mime_type.to_string(), prompt.to_string()));
            if self.refuse {
                return Err(AppError::SafetyBlock("Request blocked for safety reasons.".to_string()));
            }
            Ok(format!("data:{};base64,{}", mime_type, image_base64))
        }

        async fn generate_text(&self, _prompt: &str) -> AppResult<String> {
            if self.refuse {
                return Err(AppError::SafetyBlock("blocked".to_string()));
            }
            Ok(self.text.clone())
        }
    }

    fn app(model: Arc<FakeModel>) -> Router {
        build_router(Arc::new(AppState { model }))
    }

    async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.expect("body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let request = Request::get("/health").body(Body::empty()).expect("request");
        let response = app(Arc::default()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = hyper::body::to_bytes(response.into_body()).await.expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn edit_strips_data_uri_prefix_and_returns_data_uri() {
        let model = Arc::new(FakeModel::default());
        let (status, body) = post_json(
            app(model.clone()),
            "/api/edit",
            json!({"imageBase64": "data:image/png;base64,QUJD", "mimeType": "image/png", "prompt": "brighter"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["imageBase64"], "data:image/png;base64,QUJD");
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[0], ("QUJD".to_string(), "image/png".to_string(), "brighter".to_string()));
    }

    #[tokio::test]
    async fn edit_without_required_fields_is_a_400() {
        let model = Arc::new(FakeModel::default());
        let (status, body) =
            post_json(app(model.clone()), "/api/edit", json!({"imageBase64": "QUJD", "prompt": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_EDIT_FIELDS);
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreadable_edit_bodies_are_a_400_with_error_json() {
        let model = Arc::new(FakeModel::default());

        let request = Request::post("/api/edit").body(Body::from("{}")).expect("request");
        let response = app(model.clone()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = hyper::body::to_bytes(response.into_body()).await.expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["error"], MISSING_EDIT_FIELDS);

        let (status, body) = post_json(
            app(model.clone()),
            "/api/edit",
            json!({"imageBase64": "QUJD", "mimeType": "image/png", "prompt": 7}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_EDIT_FIELDS);

        let request = Request::post("/api/edit")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .expect("request");
        let response = app(model.clone()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = hyper::body::to_bytes(response.into_body()).await.expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["error"], MISSING_EDIT_FIELDS);

        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn safety_block_is_a_403_with_message() {
        let model = Arc::new(FakeModel { refuse: true, ..Default::default() });
        let (status, body) = post_json(
            app(model.clone()),
            "/api/edit",
            json!({"imageBase64": "QUJD", "mimeType": "image/png", "prompt": "x"}),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Request blocked for safety reasons.");

        let (status, body) = post_json(app(model), "/api/lut", json!({})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], SuggestionKind::Lut.safety_message());
    }

    #[tokio::test]
    async fn suggestions_are_cleaned() {
        let model = Arc::new(FakeModel { text: "  \"A cat on the moon\" ".to_string(), ..Default::default() });
        let (status, body) = post_json(app(model.clone()), "/api/inspiration", json!({"theme": "Birthday"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prompt"], "A cat on the moon");

        let (status, _) = post_json(app(model), "/api/magic", json!({})).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_suggestion_is_a_500() {
        let model = Arc::new(FakeModel { text: " \"\" ".to_string(), ..Default::default() });
        let (status, body) = post_json(app(model), "/api/magic", json!({})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], SuggestionKind::Magic.empty_message());
    }
}
