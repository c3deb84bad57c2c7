// Triage flow: three questions, then a result.
//
// The run id source and the analytics sink are passed in by the caller so the
// flow itself never touches the environment.

pub mod prompts;
pub mod run_id;
pub mod state_machine;

use statig::prelude::*;
use std::sync::Arc;
use tracing::info;

use crate::analytics::event::{FLOW_RESET, FLOW_STARTED};
use crate::analytics::{AnalyticsEvent, AnalyticsSink, Notifier};
use crate::telemetry::create_run_span;
use crate::triage::{DecisionResult, Location, PartialAnswers, YesNo};

pub use prompts::{Choice, Question, Step};
pub use run_id::{RunIdSource, SequentialRunIds, UuidRunIds};
pub use state_machine::{current_step, FlowInput, FlowState};

/// Drives one triage run at a time and starts a new run on restart
pub struct TriageFlow {
    machine: StateMachine<FlowState>,
    run_ids: Box<dyn RunIdSource>,
    notifier: Notifier,
}

impl TriageFlow {
    pub fn new(run_ids: impl RunIdSource + 'static, sink: Arc<dyn AnalyticsSink>) -> Self {
        let mut run_ids: Box<dyn RunIdSource> = Box::new(run_ids);
        let notifier = Notifier::new(sink);
        let machine = Self::start_run(run_ids.as_mut(), &notifier);

        Self {
            machine,
            run_ids,
            notifier,
        }
    }

    /// Flow with random run ids
    pub fn with_sink(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self::new(UuidRunIds, sink)
    }

    fn start_run(run_ids: &mut dyn RunIdSource, notifier: &Notifier) -> StateMachine<FlowState> {
        let run_id = run_ids.next_run_id();
        info!(run_id = %run_id, "Triage run started");
        notifier.notify(AnalyticsEvent::new(FLOW_STARTED).with("session_id", run_id.as_str()));
        FlowState::new(run_id, notifier.clone()).state_machine()
    }

    pub fn handle(&mut self, input: FlowInput) {
        let span = create_run_span(self.run_id(), self.step().number());
        let _entered = span.enter();
        self.machine.handle(&input);
    }

    pub fn select_location(&mut self, location: Location) {
        self.handle(FlowInput::SelectLocation(location));
    }

    pub fn select_actively_leaking(&mut self, answer: YesNo) {
        self.handle(FlowInput::SelectActivelyLeaking(answer));
    }

    pub fn select_danger_signal(&mut self, answer: YesNo) {
        self.handle(FlowInput::SelectDangerSignal(answer));
    }

    pub fn back(&mut self) {
        self.handle(FlowInput::Back);
    }

    /// Abandon the current run and start a fresh one with a new run id.
    ///
    /// Ignored on a run that has not recorded anything yet.
    pub fn restart(&mut self) {
        if !self.can_restart() {
            return;
        }

        let previous = self.run_id().to_string();
        info!(run_id = %previous, step = self.step().number(), "Triage run reset");
        self.notifier
            .notify(AnalyticsEvent::new(FLOW_RESET).with("session_id", previous.as_str()));
        self.machine = Self::start_run(self.run_ids.as_mut(), &self.notifier);
    }

    pub fn can_restart(&self) -> bool {
        self.step() != Step::Location || !self.answers().is_empty()
    }

    /// Message text for an external clipboard; records the copy action
    pub fn copy_message(&mut self) -> Option<String> {
        self.handle(FlowInput::CopyMessage);
        self.result().map(|result| result.message_template().to_string())
    }

    /// Flip the save panel; returns the new state, or None outside the result step
    pub fn toggle_save(&mut self) -> Option<bool> {
        if self.step() != Step::Result {
            return None;
        }
        self.handle(FlowInput::ToggleSave);
        Some(self.save_open())
    }

    pub fn step(&self) -> Step {
        current_step(&self.machine)
    }

    /// Question for the current step, or None once the result is showing
    pub fn question(&self) -> Option<&'static Question> {
        self.step().question()
    }

    pub fn run_id(&self) -> &str {
        self.machine.inner().run_id()
    }

    pub fn answers(&self) -> &PartialAnswers {
        self.machine.inner().answers()
    }

    pub fn result(&self) -> Option<&DecisionResult> {
        self.machine.inner().result()
    }

    pub fn save_open(&self) -> bool {
        self.machine.inner().save_open()
    }

    pub fn state(&self) -> &FlowState {
        self.machine.inner()
    }
}

impl std::fmt::Debug for TriageFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageFlow")
            .field("run_id", &self.run_id())
            .field("step", &self.step())
            .field("answers", self.answers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::MemorySink;
    use crate::triage::Decision;

    fn flow() -> (TriageFlow, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (TriageFlow::new(SequentialRunIds::new("run"), sink.clone()), sink)
    }

    #[test]
    fn test_new_flow_announces_run() {
        let (flow, sink) = flow();
        assert_eq!(flow.step(), Step::Location);
        assert_eq!(flow.run_id(), "run-1");
        assert_eq!(sink.names(), vec![FLOW_STARTED]);
    }

    #[test]
    fn test_restart_on_untouched_run_is_ignored() {
        let (mut flow, sink) = flow();
        assert!(!flow.can_restart());
        flow.restart();
        assert_eq!(flow.run_id(), "run-1");
        assert_eq!(sink.count(FLOW_RESET), 0);
    }

    #[test]
    fn test_restart_mid_run_starts_fresh() {
        let (mut flow, sink) = flow();
        flow.select_location(Location::Toilet);
        flow.restart();

        assert_eq!(flow.step(), Step::Location);
        assert!(flow.answers().is_empty());
        assert_eq!(flow.run_id(), "run-2");
        assert_eq!(sink.last(FLOW_RESET).unwrap().text("session_id"), Some("run-1"));
        assert_eq!(sink.last(FLOW_STARTED).unwrap().text("session_id"), Some("run-2"));
    }

    #[test]
    fn test_copy_and_save_only_in_result() {
        let (mut flow, _sink) = flow();
        assert_eq!(flow.copy_message(), None);
        assert_eq!(flow.toggle_save(), None);

        flow.select_location(Location::UnderSink);
        flow.select_actively_leaking(YesNo::No);
        flow.select_danger_signal(YesNo::Yes);

        assert_eq!(flow.result().unwrap().decision(), Decision::Escalate);
        let message = flow.copy_message().unwrap();
        assert!(message.contains("under the sink"));
        assert_eq!(flow.toggle_save(), Some(true));
        assert_eq!(flow.toggle_save(), Some(false));
    }
}
