use anyhow::Result;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::Command;
use crate::analytics::AnalyticsSink;
use crate::cli::render;
use crate::flow::{RunIdSource, TriageFlow};
use crate::triage::{AnswerSet, DecisionResult};

/// What the user typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Choose(usize),
    Back,
    Restart,
    Quit,
    Copy,
    ToggleSave,
    Write(PathBuf),
}

fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim();
    if let Some((verb, path)) = line.split_once(char::is_whitespace) {
        if verb.eq_ignore_ascii_case("w") || verb.eq_ignore_ascii_case("write") {
            let path = path.trim();
            return (!path.is_empty()).then(|| Action::Write(PathBuf::from(path)));
        }
    }

    match line.to_ascii_lowercase().as_str() {
        "b" | "back" => Some(Action::Back),
        "r" | "restart" => Some(Action::Restart),
        "q" | "quit" | "exit" => Some(Action::Quit),
        "c" | "copy" => Some(Action::Copy),
        "s" | "save" => Some(Action::ToggleSave),
        other => other.parse::<usize>().ok().map(Action::Choose),
    }
}

/// Saved form of a finished run
#[derive(Serialize)]
struct SavedResult<'a> {
    run_id: &'a str,
    answers: AnswerSet,
    #[serde(flatten)]
    result: &'a DecisionResult,
}

fn save_result(path: &Path, run_id: &str, answers: AnswerSet, result: &DecisionResult) -> Result<()> {
    let saved = SavedResult {
        run_id,
        answers,
        result,
    };
    std::fs::write(path, serde_json::to_string_pretty(&saved)?)?;
    Ok(())
}

pub struct CheckCommand {
    sink: Arc<dyn AnalyticsSink>,
}

impl CheckCommand {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    /// Run one interactive session until quit or end of input
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> Result<()> {
        self.drive(TriageFlow::with_sink(self.sink.clone()), input, out)
    }

    pub fn run_with_ids<I, R, W>(&self, run_ids: I, input: R, out: &mut W) -> Result<()>
    where
        I: RunIdSource + 'static,
        R: BufRead,
        W: Write,
    {
        self.drive(TriageFlow::new(run_ids, self.sink.clone()), input, out)
    }

    fn drive<R: BufRead, W: Write>(&self, mut flow: TriageFlow, mut input: R, out: &mut W) -> Result<()> {
        writeln!(out, "💧 Quick leak check - 3 taps, instant result")?;

        let mut redraw = true;
        loop {
            if redraw {
                Self::draw(&flow, out)?;
            }
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            redraw = true;
            match parse_action(&line) {
                Some(Action::Quit) => break,
                Some(Action::Choose(number)) => {
                    match flow.question().and_then(|question| question.input_for(number)) {
                        Some(selection) => flow.handle(selection),
                        None => redraw = Self::reject(out)?,
                    }
                }
                Some(Action::Back) if flow.step().previous().is_some() => flow.back(),
                Some(Action::Restart) if flow.can_restart() => flow.restart(),
                Some(Action::Copy) => match flow.copy_message() {
                    Some(message) => {
                        writeln!(out)?;
                        writeln!(out, "{message}")?;
                        writeln!(out, "📋 Message ready to paste (printed above)")?;
                        redraw = false;
                    }
                    None => redraw = Self::reject(out)?,
                },
                Some(Action::ToggleSave) => {
                    if flow.toggle_save().is_none() {
                        redraw = Self::reject(out)?;
                    }
                }
                Some(Action::Write(path)) => {
                    redraw = false;
                    match (flow.answers().complete(), flow.result(), flow.save_open()) {
                        (Some(answers), Some(result), true) => {
                            match save_result(&path, flow.run_id(), answers, result) {
                                Ok(()) => writeln!(out, "✅ Saved result to {}", path.display())?,
                                Err(e) => writeln!(out, "❌ Could not save result: {e}")?,
                            }
                        }
                        _ => {
                            Self::reject(out)?;
                        }
                    }
                }
                _ => redraw = Self::reject(out)?,
            }
        }

        Ok(())
    }

    fn draw<W: Write>(flow: &TriageFlow, out: &mut W) -> Result<()> {
        if let Some(question) = flow.question() {
            render::question(out, question)?;
        } else if let Some(result) = flow.result() {
            render::result(out, result)?;
            render::result_controls(out, flow.save_open())?;
        }
        Ok(())
    }

    /// Tell the user the input was not understood; the screen is not redrawn
    fn reject<W: Write>(out: &mut W) -> Result<bool> {
        writeln!(out, "Please choose one of the options above.")?;
        Ok(false)
    }
}

impl Command for CheckCommand {
    fn execute(&self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        self.run(stdin.lock(), &mut stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::event::{FLOW_COMPLETED, MESSAGE_COPIED, Q1_ANSWERED, SAVE_TOGGLE};
    use crate::analytics::MemorySink;
    use crate::flow::SequentialRunIds;
    use std::io::Cursor;

    fn session(script: &str) -> (String, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let command = CheckCommand::new(sink.clone());
        let mut out = Vec::new();
        command
            .run_with_ids(SequentialRunIds::new("cli"), Cursor::new(script.to_string()), &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), sink)
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action(" 2\n"), Some(Action::Choose(2)));
        assert_eq!(parse_action("B"), Some(Action::Back));
        assert_eq!(parse_action("w out.json"), Some(Action::Write(PathBuf::from("out.json"))));
        assert_eq!(parse_action("W out.json"), Some(Action::Write(PathBuf::from("out.json"))));
        assert_eq!(parse_action("write  result.json "), Some(Action::Write(PathBuf::from("result.json"))));
        assert_eq!(parse_action("w   "), None);
        assert_eq!(parse_action("later"), None);
    }

    #[test]
    fn test_full_session_with_copy() {
        let (text, sink) = session("3\n2\n1\nc\nq\n");
        assert!(text.contains("Recommendation: ESCALATE"));
        assert!(text.contains("on the ceiling/wall"));
        assert!(text.contains("📋 Message ready to paste"));
        assert_eq!(sink.count(FLOW_COMPLETED), 1);
        assert_eq!(sink.count(MESSAGE_COPIED), 1);
    }

    #[test]
    fn test_invalid_inputs_keep_step() {
        let (text, sink) = session("9\nb\nc\n1\nq\n");
        assert_eq!(text.matches("Please choose one of the options above.").count(), 3);
        assert_eq!(sink.count(Q1_ANSWERED), 1);
        assert!(text.contains("2) Is it actively leaking right now?"));
    }

    #[test]
    fn test_save_requires_open_panel() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("result.json");
        let script = format!("1\n1\n2\nw {p}\ns\nw {p}\nq\n", p = path.display());
        let (text, sink) = session(&script);

        assert!(text.contains("✅ Saved result to"));
        assert_eq!(sink.count(SAVE_TOGGLE), 1);

        let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["decision"], "submit");
        assert_eq!(saved["urgency"], "medium");
        assert_eq!(saved["run_id"], "cli-1");
        assert_eq!(saved["answers"]["location"], "under_sink");
    }

    #[test]
    fn test_end_of_input_finishes_cleanly() {
        let (text, sink) = session("1\n");
        assert!(text.contains("2) Is it actively leaking right now?"));
        assert_eq!(sink.count(FLOW_COMPLETED), 0);
    }

    #[test]
    fn test_default_run_uses_random_run_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("result.json");
        let sink = Arc::new(MemorySink::new());
        let script = format!("4\n2\n2\ns\nW {}\nq\n", path.display());
        let mut out = Vec::new();
        CheckCommand::new(sink.clone())
            .run(Cursor::new(script), &mut out)
            .unwrap();

        let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let run_id = saved["run_id"].as_str().unwrap();
        assert_eq!(run_id.len(), 36);
        assert_eq!(saved["decision"], "monitor");
        assert_eq!(sink.last(FLOW_COMPLETED).unwrap().text("session_id"), Some(run_id));
    }
}
