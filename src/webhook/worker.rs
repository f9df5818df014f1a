use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{Context, Result, bail};
use reqwest::Url;

use crate::form::validate::ValidatedRange;
use crate::webhook::client::{SubmissionResult, Submitter};

/// Runs submissions on a background thread, at most one at a time.
pub struct SubmissionWorker {
    submitter: Arc<dyn Submitter>,
    endpoint: Url,
    in_flight: Option<Receiver<SubmissionResult>>,
}

impl SubmissionWorker {
    pub fn new(submitter: Arc<dyn Submitter>, endpoint: Url) -> Self {
        Self {
            submitter,
            endpoint,
            in_flight: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn start(&mut self, range: ValidatedRange) -> Result<()> {
        if self.is_busy() {
            bail!("a submission is already in flight");
        }

        let (tx, rx) = mpsc::channel();
        let submitter = Arc::clone(&self.submitter);
        let endpoint = self.endpoint.clone();
        thread::Builder::new()
            .name("webhook-submit".to_string())
            .spawn(move || {
                let result = submitter.submit(&range, &endpoint);
                let _ = tx.send(result);
            })
            .context("failed to spawn submission thread")?;
        self.in_flight = Some(rx);
        Ok(())
    }

    /// Returns the finished result once the outstanding submission settles.
    pub fn poll(&mut self) -> Option<SubmissionResult> {
        let rx = self.in_flight.as_ref()?;
        match rx.try_recv() {
            Ok(result) => {
                self.in_flight = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.in_flight = None;
                Some(SubmissionResult {
                    response_body: "submission thread exited without a result".to_string(),
                    ..SubmissionResult::empty()
                })
            }
        }
    }

    /// Blocks until the outstanding submission settles.
    pub fn wait(&mut self) -> Option<SubmissionResult> {
        let rx = self.in_flight.take()?;
        Some(rx.recv().unwrap_or_else(|_| SubmissionResult {
            response_body: "submission thread exited without a result".to_string(),
            ..SubmissionResult::empty()
        }))
    }
}
