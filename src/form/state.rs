use crate::form::validate::{ValidatedRange, ValidationError, validate};
use crate::webhook::client::SubmissionResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Invalid(ValidationError),
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    EditStart(String),
    EditEnd(String),
    Submit,
    Completed(SubmissionResult),
    Reset,
    DismissNotice,
}

/// Side effect requested by a transition; the caller carries it out.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Send(ValidatedRange),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: FormState,
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub start: String,
    pub end: String,
    pub phase: Phase,
    pub result: SubmissionResult,
    pub notice: Option<Notice>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            phase: Phase::Idle,
            result: SubmissionResult::empty(),
            notice: None,
        }
    }
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// The payload most recently sent, or about to be sent.
    pub fn payload_preview(&self) -> Option<&ValidatedRange> {
        self.result.payload_sent.as_ref()
    }

    pub fn apply(self, event: FormEvent) -> Transition {
        match event {
            FormEvent::EditStart(text) => Self {
                start: text,
                ..self
            }
            .after_edit(),
            FormEvent::EditEnd(text) => Self { end: text, ..self }.after_edit(),
            FormEvent::Submit => self.submit(),
            FormEvent::Completed(result) => self.complete(result),
            FormEvent::Reset => Self::default().settle(),
            FormEvent::DismissNotice => Self {
                notice: None,
                ..self
            }
            .settle(),
        }
    }

    fn settle(self) -> Transition {
        Transition {
            state: self,
            command: None,
        }
    }

    fn after_edit(self) -> Transition {
        let phase = match self.phase {
            Phase::Submitting => Phase::Submitting,
            _ => Phase::Idle,
        };
        Self { phase, ..self }.settle()
    }

    fn submit(self) -> Transition {
        if self.is_submitting() {
            return self.settle();
        }

        match validate(&self.start, &self.end) {
            Err(err) => Self {
                phase: Phase::Invalid(err),
                notice: Some(Notice::error(err.to_string())),
                ..self
            }
            .settle(),
            Ok(range) => Transition {
                state: Self {
                    phase: Phase::Submitting,
                    result: SubmissionResult {
                        payload_sent: Some(range),
                        ..SubmissionResult::empty()
                    },
                    notice: None,
                    ..self
                },
                command: Some(Command::Send(range)),
            },
        }
    }

    fn complete(self, result: SubmissionResult) -> Transition {
        if !self.is_submitting() {
            log::debug!("dropping submission result that arrived after reset");
            return self.settle();
        }

        let outcome = result.outcome();
        let (phase, notice) = if outcome.is_success() {
            (Phase::Succeeded, Notice::success(outcome.notice_text()))
        } else {
            (Phase::Failed, Notice::error(outcome.notice_text()))
        };
        Self {
            phase,
            result,
            notice: Some(notice),
            ..self
        }
        .settle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(state: FormState, event: FormEvent) -> FormState {
        state.apply(event).state
    }

    fn filled(start: &str, end: &str) -> FormState {
        let state = step(FormState::default(), FormEvent::EditStart(start.to_string()));
        step(state, FormEvent::EditEnd(end.to_string()))
    }

    fn reply(status: Option<u16>, body: &str) -> SubmissionResult {
        SubmissionResult {
            http_status: status,
            response_body: body.to_string(),
            payload_sent: validate("0", "16").ok(),
            sent_at: None,
        }
    }

    #[test]
    fn valid_submit_emits_send_command() {
        let transition = filled("0", "16").apply(FormEvent::Submit);
        let range = validate("0", "16").expect("range");

        assert_eq!(transition.command, Some(Command::Send(range)));
        assert_eq!(transition.state.phase, Phase::Submitting);
        assert_eq!(transition.state.payload_preview(), Some(&range));
        assert_eq!(transition.state.result.http_status, None);
        assert!(transition.state.result.response_body.is_empty());
    }

    #[test]
    fn invalid_submit_reports_error_without_command() {
        let transition = filled("9", "3").apply(FormEvent::Submit);

        assert_eq!(transition.command, None);
        assert_eq!(
            transition.state.phase,
            Phase::Invalid(ValidationError::RangeInverted)
        );
        let notice = transition.state.notice.expect("notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(
            notice.text,
            "Starting second must be less than or equal to ending second."
        );
    }

    #[test]
    fn submit_while_submitting_is_ignored() {
        let submitting = step(filled("0", "16"), FormEvent::Submit);
        let again = submitting.clone().apply(FormEvent::Submit);

        assert_eq!(again.command, None);
        assert_eq!(again.state, submitting);
    }

    #[test]
    fn success_completion_sets_status_and_notice() {
        let submitting = step(filled("0", "16"), FormEvent::Submit);
        let done = step(submitting, FormEvent::Completed(reply(Some(200), "ok")));

        assert_eq!(done.phase, Phase::Succeeded);
        assert_eq!(done.result.http_status, Some(200));
        assert_eq!(done.result.response_body, "ok");
        assert_eq!(
            done.notice,
            Some(Notice::success("Sent to n8n (Status 200)"))
        );
    }

    #[test]
    fn http_and_transport_failures_land_in_failed() {
        let submitting = step(filled("0", "16"), FormEvent::Submit);
        let http = step(
            submitting.clone(),
            FormEvent::Completed(reply(Some(502), "bad gateway")),
        );
        assert_eq!(http.phase, Phase::Failed);
        assert_eq!(
            http.notice.map(|notice| notice.text),
            Some("Request failed with status 502".to_string())
        );

        let transport = step(
            submitting,
            FormEvent::Completed(reply(None, "dns error: no such host")),
        );
        assert_eq!(transport.phase, Phase::Failed);
        assert_eq!(transport.result.http_status, None);
        assert_eq!(
            transport.notice.map(|notice| notice.text),
            Some("Network error: dns error: no such host".to_string())
        );
    }

    #[test]
    fn edit_after_terminal_state_returns_to_idle() {
        let submitting = step(filled("0", "16"), FormEvent::Submit);
        let done = step(submitting, FormEvent::Completed(reply(Some(200), "ok")));
        let edited = step(done, FormEvent::EditEnd("20".to_string()));

        assert_eq!(edited.phase, Phase::Idle);
        assert_eq!(edited.end, "20");
        assert_eq!(edited.result.http_status, Some(200));

        let invalid = step(filled("", "1"), FormEvent::Submit);
        let edited = step(invalid, FormEvent::EditStart("1".to_string()));
        assert_eq!(edited.phase, Phase::Idle);
    }

    #[test]
    fn edit_while_submitting_keeps_phase() {
        let submitting = step(filled("0", "16"), FormEvent::Submit);
        let edited = step(submitting, FormEvent::EditStart("4".to_string()));
        assert_eq!(edited.phase, Phase::Submitting);
        assert_eq!(edited.start, "4");
    }

    #[test]
    fn reset_clears_everything_from_any_state() {
        let idle = filled("1", "2");
        let invalid = step(filled("x", "2"), FormEvent::Submit);
        let submitting = step(filled("0", "16"), FormEvent::Submit);
        let done = step(
            submitting.clone(),
            FormEvent::Completed(reply(Some(500), "boom")),
        );

        for state in [idle, invalid, submitting, done] {
            let reset = step(state, FormEvent::Reset);
            assert_eq!(reset, FormState::default());
            assert!(reset.start.is_empty() && reset.end.is_empty());
            assert_eq!(reset.result, SubmissionResult::empty());
            assert!(reset.payload_preview().is_none());
        }
    }

    #[test]
    fn late_result_after_reset_is_dropped() {
        let submitting = step(filled("0", "16"), FormEvent::Submit);
        let reset = step(submitting, FormEvent::Reset);
        let late = step(reset, FormEvent::Completed(reply(Some(200), "ok")));
        assert_eq!(late, FormState::default());
    }

    #[test]
    fn dismiss_clears_notice_only() {
        let invalid = step(filled("-1", "5"), FormEvent::Submit);
        assert!(invalid.notice.is_some());
        let dismissed = step(invalid, FormEvent::DismissNotice);
        assert!(dismissed.notice.is_none());
        assert_eq!(dismissed.phase, Phase::Invalid(ValidationError::Negative));
    }
}
