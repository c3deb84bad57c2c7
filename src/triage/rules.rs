use super::copy;
use super::types::{AnswerSet, Decision, DecisionResult};

/// Pick the decision for a complete answer set.
///
/// Rules are checked in priority order and the first match wins:
/// any danger signal escalates, an active leak is submitted, anything else is monitored.
pub fn decide(answers: AnswerSet) -> Decision {
    if answers.danger_signal().is_yes() {
        Decision::Escalate
    } else if answers.actively_leaking().is_yes() {
        Decision::Submit
    } else {
        Decision::Monitor
    }
}

/// Evaluate a complete answer set. Total over all 16 inputs and free of side effects.
pub fn evaluate(answers: AnswerSet) -> DecisionResult {
    let decision = decide(answers);
    let location = answers.location();

    DecisionResult {
        decision,
        urgency: decision.urgency(),
        responsibility_hint: copy::responsibility_hint(location),
        rationale: copy::rationale(decision),
        next_steps: copy::next_steps(decision),
        message_template: copy::message_template(decision, location),
    }
}
