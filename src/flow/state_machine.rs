use statig::prelude::*;
use std::time::Instant;
use tracing::info;

use super::prompts::Step;
use crate::analytics::event::{
    FLOW_COMPLETED, MESSAGE_COPIED, Q1_ANSWERED, Q2_ANSWERED, Q3_ANSWERED, SAVE_TOGGLE, STEP_BACK,
};
use crate::analytics::{AnalyticsEvent, Notifier};
use crate::triage::{evaluate, AnswerSet, DecisionResult, Location, PartialAnswers, YesNo};

/// User input accepted by the flow. Inputs that do not apply to the current step are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowInput {
    SelectLocation(Location),
    SelectActivelyLeaking(YesNo),
    SelectDangerSignal(YesNo),
    Back,
    CopyMessage,
    ToggleSave,
}

/// Everything one run owns. A restart builds a new instance instead of clearing this one.
///
/// `answers` mirrors what the user has picked so far, including a pick that `back` has
/// stepped away from. The answers that feed evaluation travel with the states themselves,
/// so the final step always holds a complete set.
pub struct FlowState {
    run_id: String,
    answers: PartialAnswers,
    outcome: Option<(AnswerSet, DecisionResult)>,
    completion_sent: bool,
    save_open: bool,
    started_at: Instant,
    notifier: Notifier,
}

impl FlowState {
    pub fn new(run_id: String, notifier: Notifier) -> Self {
        Self {
            run_id,
            answers: PartialAnswers::default(),
            outcome: None,
            completion_sent: false,
            save_open: false,
            started_at: Instant::now(),
            notifier,
        }
    }

    fn event(&self, name: &'static str) -> AnalyticsEvent {
        AnalyticsEvent::new(name).with("session_id", self.run_id.as_str())
    }

    fn record_back(&mut self, from: Step, to: Step) {
        info!(run_id = %self.run_id, from = from.number(), to = to.number(), "Stepped back");
        let event = self
            .event(STEP_BACK)
            .with("from_step", from.number())
            .with("to_step", to.number());
        self.notifier.notify(event);
    }
}

#[state_machine(initial = "State::asking_location()", state(derive(Debug, Clone, Copy, PartialEq, Eq)))]
impl FlowState {
    #[state]
    fn asking_location(&mut self, event: &FlowInput) -> Outcome<State> {
        match event {
            FlowInput::SelectLocation(location) => {
                self.answers.location = Some(*location);
                info!(run_id = %self.run_id, location = %location, "Location recorded");
                let event = self.event(Q1_ANSWERED).with("where", location.as_str());
                self.notifier.notify(event);
                Transition(State::asking_active(*location))
            }
            _ => Handled,
        }
    }

    #[state]
    fn asking_active(&mut self, location: &Location, event: &FlowInput) -> Outcome<State> {
        match event {
            FlowInput::SelectActivelyLeaking(answer) => {
                self.answers.actively_leaking = Some(*answer);
                info!(run_id = %self.run_id, actively_leaking = %answer, "Leak activity recorded");
                let event = self.event(Q2_ANSWERED).with("actively", answer.as_str());
                self.notifier.notify(event);
                Transition(State::asking_danger(*location, *answer))
            }
            FlowInput::Back => {
                self.answers.actively_leaking = None;
                self.record_back(Step::ActivelyLeaking, Step::Location);
                Transition(State::asking_location())
            }
            _ => Handled,
        }
    }

    #[state]
    fn asking_danger(
        &mut self,
        location: &Location,
        actively_leaking: &YesNo,
        event: &FlowInput,
    ) -> Outcome<State> {
        match event {
            FlowInput::SelectDangerSignal(answer) => {
                self.answers.danger_signal = Some(*answer);
                info!(run_id = %self.run_id, danger_signal = %answer, "Danger signal recorded");
                let event = self.event(Q3_ANSWERED).with("danger", answer.as_str());
                self.notifier.notify(event);

                let answers = AnswerSet::new(*location, *actively_leaking, *answer);
                self.outcome = Some((answers, evaluate(answers)));
                Transition(State::showing_result())
            }
            FlowInput::Back => {
                self.answers.danger_signal = None;
                self.record_back(Step::DangerSignal, Step::ActivelyLeaking);
                Transition(State::asking_active(*location))
            }
            _ => Handled,
        }
    }

    #[state(entry_action = "enter_result")]
    fn showing_result(&mut self, event: &FlowInput) -> Outcome<State> {
        match event {
            FlowInput::CopyMessage => {
                if let Some((answers, result)) = &self.outcome {
                    info!(run_id = %self.run_id, decision = %result.decision(), "Message copied");
                    let event = self
                        .event(MESSAGE_COPIED)
                        .with("decision", result.decision().as_str())
                        .with("urgency", result.urgency().label())
                        .with("where", answers.location().as_str())
                        .with("actively", answers.actively_leaking().as_str())
                        .with("danger", answers.danger_signal().as_str());
                    self.notifier.notify(event);
                }
                Handled
            }
            FlowInput::ToggleSave => {
                self.save_open = !self.save_open;
                if let Some((_, result)) = &self.outcome {
                    let event = self
                        .event(SAVE_TOGGLE)
                        .with("open", self.save_open)
                        .with("decision", result.decision().as_str())
                        .with("urgency", result.urgency().label());
                    self.notifier.notify(event);
                }
                Handled
            }
            _ => Handled,
        }
    }

    #[action]
    fn enter_result(&mut self) {
        self.save_open = false;
        self.notify_completed();
    }
}

impl FlowState {
    /// Sends the completion notification unless this run already sent it
    fn notify_completed(&mut self) {
        if self.completion_sent {
            return;
        }
        let Some((answers, result)) = &self.outcome else {
            return;
        };

        let duration_ms = u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            run_id = %self.run_id,
            decision = %result.decision(),
            urgency = %result.urgency(),
            duration_ms,
            "Triage completed"
        );
        let event = self
            .event(FLOW_COMPLETED)
            .with("where", answers.location().as_str())
            .with("actively", answers.actively_leaking().as_str())
            .with("danger", answers.danger_signal().as_str())
            .with("decision", result.decision().as_str())
            .with("urgency", result.urgency().label())
            .with("duration_ms", duration_ms);
        self.completion_sent = true;
        self.notifier.notify(event);
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn answers(&self) -> &PartialAnswers {
        &self.answers
    }

    pub fn result(&self) -> Option<&DecisionResult> {
        self.outcome.as_ref().map(|(_, result)| result)
    }

    pub fn save_open(&self) -> bool {
        self.save_open
    }

    pub fn completion_sent(&self) -> bool {
        self.completion_sent
    }
}

/// Step the machine is currently on
pub fn current_step(machine: &StateMachine<FlowState>) -> Step {
    match machine.state() {
        State::AskingLocation { .. } => Step::Location,
        State::AskingActive { .. } => Step::ActivelyLeaking,
        State::AskingDanger { .. } => Step::DangerSignal,
        State::ShowingResult { .. } => Step::Result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::MemorySink;
    use crate::triage::Decision;
    use std::sync::Arc;

    fn machine() -> (StateMachine<FlowState>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let state = FlowState::new("run-1".to_string(), Notifier::new(sink.clone()));
        (state.state_machine(), sink)
    }

    #[test]
    fn test_select_sequence_reaches_result() {
        let (mut sm, _sink) = machine();
        assert_eq!(current_step(&sm), Step::Location);

        sm.handle(&FlowInput::SelectLocation(Location::Toilet));
        assert_eq!(current_step(&sm), Step::ActivelyLeaking);

        sm.handle(&FlowInput::SelectActivelyLeaking(YesNo::Yes));
        assert_eq!(current_step(&sm), Step::DangerSignal);

        sm.handle(&FlowInput::SelectDangerSignal(YesNo::No));
        assert_eq!(current_step(&sm), Step::Result);
        assert_eq!(sm.inner().result().unwrap().decision(), Decision::Submit);
    }

    #[test]
    fn test_out_of_order_inputs_are_ignored() {
        let (mut sm, sink) = machine();

        sm.handle(&FlowInput::SelectDangerSignal(YesNo::Yes));
        sm.handle(&FlowInput::Back);
        sm.handle(&FlowInput::CopyMessage);
        assert_eq!(current_step(&sm), Step::Location);
        assert!(sm.inner().answers().is_empty());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_completion_fires_once() {
        let (mut sm, sink) = machine();
        sm.handle(&FlowInput::SelectLocation(Location::Unknown));
        sm.handle(&FlowInput::SelectActivelyLeaking(YesNo::No));
        sm.handle(&FlowInput::SelectDangerSignal(YesNo::No));
        sm.handle(&FlowInput::ToggleSave);
        sm.handle(&FlowInput::CopyMessage);
        sm.handle(&FlowInput::Back);

        assert!(sm.inner().completion_sent());
        assert_eq!(sink.count(FLOW_COMPLETED), 1);
        assert_eq!(current_step(&sm), Step::Result);
    }

    #[test]
    fn test_back_keeps_location() {
        let (mut sm, _sink) = machine();
        sm.handle(&FlowInput::SelectLocation(Location::CeilingOrWall));
        sm.handle(&FlowInput::SelectActivelyLeaking(YesNo::Yes));
        sm.handle(&FlowInput::Back);

        assert_eq!(current_step(&sm), Step::ActivelyLeaking);
        assert_eq!(sm.inner().answers().location, Some(Location::CeilingOrWall));
        assert_eq!(sm.inner().answers().actively_leaking, Some(YesNo::Yes));
    }

    #[test]
    fn test_answers_travel_with_the_states() {
        let (mut sm, sink) = machine();
        sm.handle(&FlowInput::SelectLocation(Location::CeilingOrWall));
        assert!(matches!(
            sm.state(),
            State::AskingActive { location: Location::CeilingOrWall }
        ));

        sm.handle(&FlowInput::SelectActivelyLeaking(YesNo::No));
        sm.handle(&FlowInput::Back);
        sm.handle(&FlowInput::SelectActivelyLeaking(YesNo::Yes));
        assert!(matches!(
            sm.state(),
            State::AskingDanger {
                location: Location::CeilingOrWall,
                actively_leaking: YesNo::Yes,
            }
        ));

        sm.handle(&FlowInput::SelectDangerSignal(YesNo::No));
        assert_eq!(sm.inner().result().unwrap().decision(), Decision::Submit);
        let completed = sink.last(FLOW_COMPLETED).unwrap();
        assert_eq!(completed.text("where"), Some("ceiling_wall"));
        assert_eq!(completed.text("actively"), Some("yes"));
    }
}
