use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

use super::Command;
use crate::cli::render;
use crate::triage::{evaluate, AnswerSet, DecisionResult};

#[derive(Serialize)]
struct Evaluation<'a> {
    answers: AnswerSet,
    #[serde(flatten)]
    result: &'a DecisionResult,
}

/// One-shot evaluation. No flow and no analytics.
pub struct EvaluateCommand {
    answers: AnswerSet,
    json: bool,
}

impl EvaluateCommand {
    pub fn new(answers: AnswerSet) -> Self {
        Self {
            answers,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let result = evaluate(self.answers);
        tracing::debug!(
            location = %self.answers.location(),
            decision = %result.decision(),
            "Evaluated answers"
        );

        if self.json {
            let evaluation = Evaluation {
                answers: self.answers,
                result: &result,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&evaluation)?)?;
        } else {
            render::result(out, &result)?;
        }
        Ok(())
    }
}

impl Command for EvaluateCommand {
    fn execute(&self) -> Result<()> {
        self.run(&mut io::stdout().lock())
    }
}
