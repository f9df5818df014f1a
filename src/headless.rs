use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};

use crate::config::AppConfig;
use crate::form::state::{Command, FormEvent, FormState, Phase};
use crate::ui::present::present;
use crate::webhook::client::Submitter;
use crate::webhook::worker::SubmissionWorker;

/// Runs one validate-and-submit pass without opening the window.
pub fn send_once(
    config: &AppConfig,
    submitter: Arc<dyn Submitter>,
    start: &str,
    end: &str,
    out: &mut impl Write,
) -> Result<()> {
    let transition = FormState::default()
        .apply(FormEvent::EditStart(start.to_string()))
        .state
        .apply(FormEvent::EditEnd(end.to_string()))
        .state
        .apply(FormEvent::Submit);

    let Some(Command::Send(range)) = transition.command else {
        let reason = transition
            .state
            .notice
            .map(|notice| notice.text)
            .unwrap_or_else(|| "range rejected".to_string());
        bail!("invalid range: {reason}");
    };

    let view = present(&transition.state, config);
    writeln!(out, "{}", view.endpoint_line)?;
    writeln!(out, "Payload:")?;
    writeln!(out, "{}", view.payload_pretty)?;

    let mut worker = SubmissionWorker::new(submitter, config.webhook_url.clone());
    worker.start(range)?;
    let result = worker
        .wait()
        .ok_or_else(|| anyhow!("submission finished without a result"))?;

    let state = transition.state.apply(FormEvent::Completed(result)).state;
    let view = present(&state, config);
    writeln!(out, "{}", view.status_line)?;
    writeln!(out, "Response:")?;
    writeln!(out, "{}", view.response_text)?;
    out.flush().context("failed to flush output")?;

    let notice = state.notice.map(|notice| notice.text).unwrap_or_default();
    match state.phase {
        Phase::Succeeded => {
            writeln!(out, "{notice}")?;
            Ok(())
        }
        _ => bail!("{notice}"),
    }
}
