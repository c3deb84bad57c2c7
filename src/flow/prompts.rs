// Question wording and the choices each step offers

use serde::Serialize;

use super::state_machine::FlowInput;
use crate::triage::{Location, YesNo};

/// Position in the three-question flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Location,
    ActivelyLeaking,
    DangerSignal,
    Result,
}

impl Step {
    /// 1-based step index, Result is 4
    pub fn number(self) -> u8 {
        match self {
            Step::Location => 1,
            Step::ActivelyLeaking => 2,
            Step::DangerSignal => 3,
            Step::Result => 4,
        }
    }

    /// Where `back` leads, if anywhere
    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Location | Step::Result => None,
            Step::ActivelyLeaking => Some(Step::Location),
            Step::DangerSignal => Some(Step::ActivelyLeaking),
        }
    }

    pub fn question(self) -> Option<&'static Question> {
        match self {
            Step::Location => Some(&LOCATION_QUESTION),
            Step::ActivelyLeaking => Some(&ACTIVE_QUESTION),
            Step::DangerSignal => Some(&DANGER_QUESTION),
            Step::Result => None,
        }
    }

    pub fn prompt(self) -> Option<&'static str> {
        self.question().map(|q| q.prompt)
    }
}

/// One selectable answer
#[derive(Debug)]
pub struct Choice {
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub input: FlowInput,
}

#[derive(Debug)]
pub struct Question {
    pub step: Step,
    pub prompt: &'static str,
    pub choices: &'static [Choice],
    pub examples: &'static [&'static str],
}

impl Question {
    /// Input for a 1-based choice number
    pub fn input_for(&self, number: usize) -> Option<FlowInput> {
        number
            .checked_sub(1)
            .and_then(|index| self.choices.get(index))
            .map(|choice| choice.input)
    }
}

pub static LOCATION_QUESTION: Question = Question {
    step: Step::Location,
    prompt: "1) Where is the leak?",
    choices: &[
        Choice {
            title: "Under a sink",
            description: Some("Under cabinet, damp or pooling"),
            input: FlowInput::SelectLocation(Location::UnderSink),
        },
        Choice {
            title: "Toilet area",
            description: Some("Running, water near base/valve"),
            input: FlowInput::SelectLocation(Location::Toilet),
        },
        Choice {
            title: "Ceiling / wall stain",
            description: Some("Spot, bubbling paint, damp drywall"),
            input: FlowInput::SelectLocation(Location::CeilingOrWall),
        },
        Choice {
            title: "Not sure",
            description: Some("Intermittent drip, damp smell"),
            input: FlowInput::SelectLocation(Location::Unknown),
        },
    ],
    examples: &[],
};

pub static ACTIVE_QUESTION: Question = Question {
    step: Step::ActivelyLeaking,
    prompt: "2) Is it actively leaking right now?",
    choices: &[
        Choice {
            title: "Yes",
            description: None,
            input: FlowInput::SelectActivelyLeaking(YesNo::Yes),
        },
        Choice {
            title: "No",
            description: None,
            input: FlowInput::SelectActivelyLeaking(YesNo::No),
        },
    ],
    examples: &[],
};

pub static DANGER_QUESTION: Question = Question {
    step: Step::DangerSignal,
    prompt: "3) Any danger signs? (near electrical, ceiling bulging, fast pooling, or you can't stop it)",
    choices: &[
        Choice {
            title: "Yes",
            description: None,
            input: FlowInput::SelectDangerSignal(YesNo::Yes),
        },
        Choice {
            title: "No",
            description: None,
            input: FlowInput::SelectDangerSignal(YesNo::No),
        },
    ],
    examples: &[
        "Water near outlets / lights / electrical panels",
        "Ceiling bulging, sagging, or actively dripping overhead",
        "Water spreading fast / pooling you can't control",
        "You can't shut it off or the source is unclear and worsening",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_question_only_offers_its_own_inputs() {
        for choice in LOCATION_QUESTION.choices {
            assert!(matches!(choice.input, FlowInput::SelectLocation(_)));
        }
        for choice in ACTIVE_QUESTION.choices {
            assert!(matches!(choice.input, FlowInput::SelectActivelyLeaking(_)));
        }
        for choice in DANGER_QUESTION.choices {
            assert!(matches!(choice.input, FlowInput::SelectDangerSignal(_)));
        }
    }

    #[test]
    fn test_every_location_is_offered() {
        let offered: Vec<_> = LOCATION_QUESTION
            .choices
            .iter()
            .filter_map(|choice| match choice.input {
                FlowInput::SelectLocation(location) => Some(location),
                _ => None,
            })
            .collect();
        assert_eq!(offered, Location::ALL.to_vec());
    }

    #[test]
    fn test_input_for_is_one_based() {
        assert_eq!(
            ACTIVE_QUESTION.input_for(1),
            Some(FlowInput::SelectActivelyLeaking(YesNo::Yes))
        );
        assert_eq!(ACTIVE_QUESTION.input_for(0), None);
        assert_eq!(ACTIVE_QUESTION.input_for(3), None);
    }

    #[test]
    fn test_step_navigation() {
        assert_eq!(Step::Location.previous(), None);
        assert_eq!(Step::DangerSignal.previous(), Some(Step::ActivelyLeaking));
        assert!(Step::Result.question().is_none());
        assert_eq!(Step::Result.number(), 4);
        assert_eq!(Step::Location.prompt(), Some("1) Where is the leak?"));
        assert_eq!(Step::Result.prompt(), None);
    }
}
