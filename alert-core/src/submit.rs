//! The push-alert submit flow, kept independent of the transport so the
//! UI can drive it with a browser fetch and tests with a stub future.

use crate::form::PushForm;
use std::future::Future;
use thiserror::Error;

/// How a push attempt failed. `Display` is the user-facing banner text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PushError {
    /// The gateway answered with a non-ok status.
    #[error("{}", detail.as_deref().unwrap_or("Failed to push alert"))]
    Rejected { detail: Option<String> },
    /// The request never produced a usable response.
    #[error("An unexpected error occurred")]
    Transport(String),
}

/// Collaborators invoked after a successful push: cache refreshes and
/// closing the form.
pub trait SubmitHooks {
    fn refresh_alerts(&self);
    fn refresh_presets(&self);
    fn closed(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Field validation failed; nothing was sent.
    Invalid,
    /// A previous submit is still pending; nothing was sent.
    InFlight,
    Pushed,
    Failed,
}

/// A validated request ready to hand to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedPush {
    pub source_type: String,
    pub body: String,
}

/// Guard, validate and mark the form in flight. The UI calls this inside
/// a synchronous state update before awaiting the transport.
pub fn begin_submit(form: &mut PushForm) -> Result<PreparedPush, SubmitOutcome> {
    if form.is_submitting() {
        return Err(SubmitOutcome::InFlight);
    }
    form.clear_banner();
    if !form.validate() {
        return Err(SubmitOutcome::Invalid);
    }
    let Some(source) = form.source.clone() else {
        return Err(SubmitOutcome::Invalid);
    };
    form.set_submitting(true);
    Ok(PreparedPush {
        source_type: source.source_type,
        body: form.payload.clone(),
    })
}

/// Fold the transport result back into the form. Success fires both
/// refresh hooks and then closes; failure leaves the form open with a
/// banner. One attempt per submit, no retry.
pub fn finish_submit(
    form: &mut PushForm,
    result: Result<(), PushError>,
    hooks: &dyn SubmitHooks,
) -> SubmitOutcome {
    form.set_submitting(false);
    match result {
        Ok(()) => {
            hooks.refresh_alerts();
            hooks.refresh_presets();
            hooks.closed();
            SubmitOutcome::Pushed
        }
        Err(err) => {
            form.set_banner(err.to_string());
            SubmitOutcome::Failed
        }
    }
}

/// The whole flow in one call, for callers that can hold the form across
/// the await.
pub async fn submit<F, Fut>(form: &mut PushForm, send: F, hooks: &dyn SubmitHooks) -> SubmitOutcome
where
    F: FnOnce(String, String) -> Fut,
    Fut: Future<Output = Result<(), PushError>>,
{
    let prepared = match begin_submit(form) {
        Ok(prepared) => prepared,
        Err(outcome) => return outcome,
    };
    let result = send(prepared.source_type, prepared.body).await;
    finish_submit(form, result, hooks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AlertSource;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingHooks {
        alerts: Cell<usize>,
        presets: Cell<usize>,
        closed: Cell<usize>,
    }

    impl SubmitHooks for CountingHooks {
        fn refresh_alerts(&self) {
            self.alerts.set(self.alerts.get() + 1);
        }
        fn refresh_presets(&self) {
            self.presets.set(self.presets.get() + 1);
        }
        fn closed(&self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    fn filled_form() -> PushForm {
        let mut form = PushForm::new();
        form.select_source(AlertSource {
            name: "Datadog".into(),
            source_type: "datadog".into(),
            alert_example: "{\"title\": \"cpu\"}".into(),
        });
        form
    }

    #[test]
    fn missing_source_sends_nothing() {
        let mut form = PushForm::new();
        form.set_payload("{}");
        let hooks = CountingHooks::default();
        let sent = Cell::new(false);

        let outcome = block_on(submit(
            &mut form,
            |_, _| {
                sent.set(true);
                async { Ok(()) }
            },
            &hooks,
        ));

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(!sent.get());
        assert_eq!(hooks.closed.get(), 0);
    }

    #[test]
    fn malformed_payload_sends_nothing() {
        let mut form = filled_form();
        form.set_payload("{invalid");
        let hooks = CountingHooks::default();
        let sent = Cell::new(false);

        let outcome = block_on(submit(
            &mut form,
            |_, _| {
                sent.set(true);
                async { Ok(()) }
            },
            &hooks,
        ));

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(!sent.get());
    }

    #[test]
    fn success_fires_each_hook_once() {
        let mut form = filled_form();
        let hooks = CountingHooks::default();

        let outcome = block_on(submit(&mut form, |_, _| async { Ok(()) }, &hooks));

        assert_eq!(outcome, SubmitOutcome::Pushed);
        assert_eq!(hooks.alerts.get(), 1);
        assert_eq!(hooks.presets.get(), 1);
        assert_eq!(hooks.closed.get(), 1);
        assert!(!form.is_submitting());
    }

    #[test]
    fn sends_the_selected_source_and_payload() {
        let mut form = filled_form();
        let hooks = CountingHooks::default();

        block_on(submit(
            &mut form,
            |source_type, body| {
                assert_eq!(source_type, "datadog");
                assert_eq!(body, "{\"title\": \"cpu\"}");
                async { Ok(()) }
            },
            &hooks,
        ));
    }

    #[test]
    fn rejection_detail_becomes_the_banner() {
        let mut form = filled_form();
        let hooks = CountingHooks::default();

        let outcome = block_on(submit(
            &mut form,
            |_, _| async {
                Err(PushError::Rejected {
                    detail: Some("bad type".into()),
                })
            },
            &hooks,
        ));

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(form.banner(), Some("bad type"));
        assert_eq!(hooks.closed.get(), 0);
        assert_eq!(hooks.alerts.get(), 0);
    }

    #[test]
    fn rejection_without_detail_uses_the_fallback() {
        let mut form = filled_form();
        let hooks = CountingHooks::default();

        block_on(submit(
            &mut form,
            |_, _| async { Err(PushError::Rejected { detail: None }) },
            &hooks,
        ));

        assert_eq!(form.banner(), Some("Failed to push alert"));
    }

    #[test]
    fn transport_failure_uses_the_generic_banner() {
        let mut form = filled_form();
        let hooks = CountingHooks::default();

        block_on(submit(
            &mut form,
            |_, _| async { Err(PushError::Transport("connection refused".into())) },
            &hooks,
        ));

        assert_eq!(form.banner(), Some("An unexpected error occurred"));
    }

    #[test]
    fn a_pending_submit_blocks_a_second_one() {
        let mut form = filled_form();

        let first = begin_submit(&mut form);
        assert!(first.is_ok());
        assert!(form.is_submitting());

        let second = begin_submit(&mut form);
        assert_eq!(second, Err(SubmitOutcome::InFlight));

        let hooks = CountingHooks::default();
        finish_submit(&mut form, Ok(()), &hooks);
        assert!(!form.is_submitting());
        assert_eq!(hooks.closed.get(), 1);
    }

    #[test]
    fn a_new_submit_clears_the_previous_banner() {
        let mut form = filled_form();
        let hooks = CountingHooks::default();

        block_on(submit(
            &mut form,
            |_, _| async { Err(PushError::Rejected { detail: None }) },
            &hooks,
        ));
        assert!(form.banner().is_some());

        let prepared = begin_submit(&mut form);
        assert!(prepared.is_ok());
        assert!(form.banner().is_none());
    }
}
