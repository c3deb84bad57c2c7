use anyhow::Result;

pub mod check;
pub mod evaluate;
pub mod matrix;

pub use check::CheckCommand;
pub use evaluate::EvaluateCommand;
pub use matrix::MatrixCommand;

pub trait Command {
    fn execute(&self) -> Result<()>;
}

pub fn show_how_to_start() -> Result<()> {
    println!("💧 leak-triage - Quick leak check");
    println!();
    println!("Three questions, instant recommendation (monitor, submit, or escalate):");
    println!("  🔎 leak-triage check                 # Answer the questions interactively");
    println!("  ⚡ leak-triage evaluate --location toilet --active yes --danger no");
    println!("  📋 leak-triage matrix                # Every answer combination at a glance");
    println!();
    println!("💡 If water is near electrical or the ceiling is bulging, escalate right away.");
    Ok(())
}
