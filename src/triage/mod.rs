// Leak triage rules: answers in, decision and supporting text out.
// Pure functions only; nothing here keeps state or performs I/O.

pub mod copy;
pub mod rules;
pub mod types;

pub use copy::DISCLAIMER;
pub use rules::{decide, evaluate};
pub use types::{
    AnswerSet, Decision, DecisionResult, Location, ParseAnswerError, PartialAnswers, Urgency, YesNo,
};
