use std::error::Error as StdError;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use reqwest::Url;
use reqwest::blocking::Client;

use crate::form::validate::ValidatedRange;

/// Everything captured from one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub http_status: Option<u16>,
    pub response_body: String,
    pub payload_sent: Option<ValidatedRange>,
    pub sent_at: Option<DateTime<Local>>,
}

impl SubmissionResult {
    pub fn empty() -> Self {
        Self {
            http_status: None,
            response_body: String::new(),
            payload_sent: None,
            sent_at: None,
        }
    }

    pub fn outcome(&self) -> SubmissionOutcome {
        match self.http_status {
            Some(status) if (200..300).contains(&status) => SubmissionOutcome::Delivered(status),
            Some(status) => SubmissionOutcome::HttpError(status),
            None => SubmissionOutcome::TransportError(self.response_body.clone()),
        }
    }
}

impl Default for SubmissionResult {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SubmissionOutcome {
    Delivered(u16),
    HttpError(u16),
    TransportError(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    pub fn notice_text(&self) -> String {
        match self {
            Self::Delivered(status) => format!("Sent to n8n (Status {status})"),
            Self::HttpError(status) => format!("Request failed with status {status}"),
            Self::TransportError(message) => format!("Network error: {message}"),
        }
    }
}

pub trait Submitter: Send + Sync {
    fn submit(&self, range: &ValidatedRange, endpoint: &Url) -> SubmissionResult;
}

pub struct WebhookClient {
    http: Client,
}

impl WebhookClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http })
    }
}

impl Submitter for WebhookClient {
    fn submit(&self, range: &ValidatedRange, endpoint: &Url) -> SubmissionResult {
        let sent_at = Local::now();
        log::info!(
            "POST {endpoint} startSecond={} endSecond={}",
            range.start_second(),
            range.end_second()
        );

        // `json` sets `Content-Type: application/json`.
        let reply = self
            .http
            .post(endpoint.clone())
            .json(range)
            .send()
            .and_then(|response| {
                let status = response.status().as_u16();
                response.text().map(|body| (status, body))
            });

        match reply {
            Ok((status, body)) => {
                log::info!("webhook answered with status {status} ({} bytes)", body.len());
                SubmissionResult {
                    http_status: Some(status),
                    response_body: body,
                    payload_sent: Some(*range),
                    sent_at: Some(sent_at),
                }
            }
            Err(err) => {
                let message = describe_error(&err);
                log::warn!("webhook request failed: {message}");
                SubmissionResult {
                    http_status: None,
                    response_body: message,
                    payload_sent: Some(*range),
                    sent_at: Some(sent_at),
                }
            }
        }
    }
}

fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
