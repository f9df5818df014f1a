use crate::config::{AppConfig, WEBHOOK_URL_ENV};
use crate::form::state::{FormState, Notice, Phase};
use crate::form::validate::ValidatedRange;
use crate::webhook::client::SubmissionResult;

pub const STATUS_PLACEHOLDER: &str = "—";
pub const RESPONSE_PLACEHOLDER: &str = "(no response yet)";

/// Display strings for the technical-details panel and the notice line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResultView {
    pub endpoint_line: String,
    pub override_hint: String,
    pub status_line: String,
    pub payload_pretty: String,
    pub response_text: String,
    pub sent_at_line: Option<String>,
    pub notice: Option<Notice>,
    pub submit_label: &'static str,
}

pub fn present(state: &FormState, config: &AppConfig) -> ResultView {
    ResultView {
        endpoint_line: format!("Using: {}", config.webhook_url),
        override_hint: format!("Set {WEBHOOK_URL_ENV} to override."),
        status_line: status_line(&state.result),
        payload_pretty: payload_pretty(state.payload_preview()),
        response_text: response_text(&state.result),
        sent_at_line: state
            .result
            .sent_at
            .map(|at| format!("Last sent at {}", at.format("%H:%M:%S"))),
        notice: state.notice.clone(),
        submit_label: match state.phase {
            Phase::Submitting => "Sending",
            _ => "Submit",
        },
    }
}

pub fn status_line(result: &SubmissionResult) -> String {
    match result.http_status {
        Some(status) => format!("HTTP Status: {status}"),
        None => format!("HTTP Status: {STATUS_PLACEHOLDER}"),
    }
}

pub fn payload_pretty(payload: Option<&ValidatedRange>) -> String {
    let value = match payload {
        Some(range) => range.to_json(),
        None => serde_json::json!({ "startSecond": "", "endSecond": "" }),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

pub fn response_text(result: &SubmissionResult) -> String {
    if result.response_body.is_empty() {
        RESPONSE_PLACEHOLDER.to_string()
    } else {
        result.response_body.clone()
    }
}
