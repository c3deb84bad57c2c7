use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

use super::Command;
use crate::triage::{decide, AnswerSet, Decision, Location, Urgency, YesNo};

#[derive(Debug, Serialize)]
struct MatrixRow {
    location: Location,
    actively_leaking: YesNo,
    danger_signal: YesNo,
    decision: Decision,
    urgency: Urgency,
}

fn rows() -> Vec<MatrixRow> {
    AnswerSet::all()
        .map(|answers| {
            let decision = decide(answers);
            MatrixRow {
                location: answers.location(),
                actively_leaking: answers.actively_leaking(),
                danger_signal: answers.danger_signal(),
                decision,
                urgency: decision.urgency(),
            }
        })
        .collect()
}

/// Decision table over every answer combination
pub struct MatrixCommand {
    pub json: bool,
}

impl MatrixCommand {
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let rows = rows();
        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            return Ok(());
        }

        writeln!(out, "{:<14} {:<8} {:<8} {:<10} {}", "LOCATION", "ACTIVE", "DANGER", "DECISION", "URGENCY")?;
        for row in rows {
            writeln!(
                out,
                "{:<14} {:<8} {:<8} {:<10} {}",
                row.location.as_str(),
                row.actively_leaking.as_str(),
                row.danger_signal.as_str(),
                row.decision.as_str(),
                row.urgency.label()
            )?;
        }
        Ok(())
    }
}

impl Command for MatrixCommand {
    fn execute(&self) -> Result<()> {
        self.run(&mut io::stdout().lock())
    }
}
