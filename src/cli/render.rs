// Plain-text rendering for the terminal host

use std::io::{self, Write};

use crate::flow::{Question, Step};
use crate::triage::{DecisionResult, DISCLAIMER};

pub fn question<W: Write>(out: &mut W, question: &Question) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", question.prompt)?;
    for (index, choice) in question.choices.iter().enumerate() {
        match choice.description {
            Some(description) => writeln!(out, "  [{}] {} - {}", index + 1, choice.title, description)?,
            None => writeln!(out, "  [{}] {}", index + 1, choice.title)?,
        }
    }

    if !question.examples.is_empty() {
        writeln!(out, "  Quick examples:")?;
        for example in question.examples {
            writeln!(out, "    • {example}")?;
        }
    }

    let mut controls = Vec::new();
    if question.step.previous().is_some() {
        controls.push("[b] back");
    }
    if question.step != Step::Location {
        controls.push("[r] start over");
    }
    controls.push("[q] quit");
    writeln!(out, "  {}", controls.join("  "))?;
    Ok(())
}

pub fn result<W: Write>(out: &mut W, result: &DecisionResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", result.decision().badge())?;
    writeln!(out, "Urgency: {}", result.urgency().label())?;
    writeln!(out, "Responsibility: {}", result.responsibility_hint())?;
    writeln!(out)?;
    writeln!(out, "Why: {}", result.rationale())?;
    writeln!(out)?;
    writeln!(out, "Next steps:")?;
    for (index, step) in result.next_steps().iter().enumerate() {
        writeln!(out, "  {}. {step}", index + 1)?;
    }
    writeln!(out)?;
    writeln!(out, "Copy/paste message:")?;
    writeln!(out, "  {}", result.message_template())?;
    writeln!(out)?;
    writeln!(out, "{DISCLAIMER}")?;
    Ok(())
}

/// Actions available while the result is showing
pub fn result_controls<W: Write>(out: &mut W, save_open: bool) -> io::Result<()> {
    writeln!(out)?;
    let save = if save_open {
        "[s] hide save  [w <path>] write result JSON"
    } else {
        "[s] save this result"
    };
    writeln!(out, "  [c] copy message  {save}  [r] start over  [q] quit")?;
    Ok(())
}
