use gloo_console::error;
use gloo_file::File;
use gloo_net::http::Request;
use shared::{ChatRequest, ChatResponse, ChatTurn, ErrorResponse, PredictionResponse};

use crate::error::AnalysisError;
use crate::session::SymptomForm;

pub const PREDICT_ENDPOINT: &str = "/predict";
pub const CHAT_ENDPOINT: &str = "/api/chat";

/// Shown when a non-success response carries no usable error message.
pub const GENERIC_ANALYZE_ERROR: &str = "Failed to analyze image";

/// Posts the image plus the intake form to the prediction endpoint as one
/// multipart request. Suspends until the response or a transport error
/// arrives; no timeout is enforced here.
pub async fn request_prediction(
    file: &File,
    form: &SymptomForm,
) -> Result<PredictionResponse, AnalysisError> {
    let form_data = web_sys::FormData::new().expect("failed to construct FormData");
    form_data
        .append_with_blob("file", file.as_ref())
        .expect("failed to append image to FormData");
    form_data
        .append_with_str("age", &form.age)
        .expect("failed to append age to FormData");
    form_data
        .append_with_str("duration", &form.duration.to_string())
        .expect("failed to append duration to FormData");
    let symptoms_json =
        serde_json::to_string(&form.symptoms).expect("failed to encode symptom flags");
    form_data
        .append_with_str("symptoms", &symptoms_json)
        .expect("failed to append symptoms to FormData");
    form_data
        .append_with_str("notes", &form.notes)
        .expect("failed to append notes to FormData");

    let request = Request::post(PREDICT_ENDPOINT)
        .body(form_data)
        .expect("failed to build prediction request");

    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => {
            error!(format!("Prediction request failed: {err:?}"));
            return Err(AnalysisError::Network);
        }
    };

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        error!(format!(
            "Prediction endpoint returned {}: {}",
            response.status(),
            body
        ));
        return Err(AnalysisError::Server(server_error_message(&body)));
    }

    match response.json::<PredictionResponse>().await {
        Ok(result) => Ok(result),
        Err(err) => {
            error!(format!("Malformed prediction response: {err:?}"));
            Err(AnalysisError::malformed_response())
        }
    }
}

/// Extracts the `error` message from a failure body, falling back to a
/// generic message when the body is unparsable or carries none.
pub fn server_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|payload| payload.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_ANALYZE_ERROR.to_string())
}

/// Sends one chat turn with the running history. The caller only needs to
/// know whether a reply arrived; failures are logged here.
pub async fn request_chat_reply(
    message: String,
    history: Vec<ChatTurn>,
) -> Result<ChatResponse, ()> {
    let request = Request::post(CHAT_ENDPOINT)
        .json(&ChatRequest { message, history })
        .map_err(|err| {
            error!(format!("Failed to encode chat request: {err:?}"));
        })?;

    let response = request.send().await.map_err(|err| {
        error!(format!("Chat request failed: {err:?}"));
    })?;

    if !response.ok() {
        error!(format!("Chat endpoint returned {}", response.status()));
        return Err(());
    }

    response.json::<ChatResponse>().await.map_err(|err| {
        error!(format!("Malformed chat response: {err:?}"));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_surfaced() {
        assert_eq!(
            server_error_message(r#"{"error": "bad image"}"#),
            "bad image"
        );
    }

    #[test]
    fn unparsable_error_body_falls_back() {
        assert_eq!(server_error_message("<html>oops</html>"), GENERIC_ANALYZE_ERROR);
        assert_eq!(server_error_message(""), GENERIC_ANALYZE_ERROR);
    }

    #[test]
    fn missing_or_empty_message_falls_back() {
        assert_eq!(server_error_message("{}"), GENERIC_ANALYZE_ERROR);
        assert_eq!(server_error_message(r#"{"error": ""}"#), GENERIC_ANALYZE_ERROR);
        assert_eq!(server_error_message(r#"{"error": null}"#), GENERIC_ANALYZE_ERROR);
    }
}
