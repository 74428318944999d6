use anyhow::Context;
use std::sync::Arc;

use palin::palindrome::{self, ACCEPT_STATE, DEFAULT_ALPHABET, REJECT_STATE, START_STATE};
use palin::{analyze, ActionRecord, Direction, Machine, Snapshot};

use crate::cli::{CheckArgs, Cli, Command, HistoryArgs, OutputFormat, TraceArgs};
use crate::history::{HistoryStore, RunRecord};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Check(ref args) => cmd_check(args, &cli),
        Command::Trace(ref args) => cmd_trace(args, &cli),
        Command::History(ref args) => cmd_history(args, &cli),
    }
}

/// Builds a recognizer over `alphabet`, validating the generated table first.
fn build_machine(alphabet: &str) -> anyhow::Result<Machine> {
    let table = palindrome::table(alphabet);
    analyze(&table, START_STATE, ACCEPT_STATE, REJECT_STATE)
        .context("generated transition table failed validation")?;

    Ok(Machine::new(
        Arc::new(table),
        START_STATE,
        ACCEPT_STATE,
        REJECT_STATE,
        palin::DEFAULT_BLANK_SYMBOL,
    ))
}

fn cmd_check(args: &CheckArgs, cli: &Cli) -> anyhow::Result<()> {
    let alphabet = args.alphabet.as_deref().unwrap_or(DEFAULT_ALPHABET);
    let mut machine = build_machine(alphabet)?;

    machine.load(&args.word);
    let is_palindrome = machine.run();
    let record = RunRecord::new(&args.word, is_palindrome, machine.step_count());

    if !args.no_record {
        HistoryStore::new(&cli.history_file).append(&record)?;
    }

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&record)?),
        OutputFormat::Text => {
            if is_palindrome {
                println!("'{}' is a palindrome ({} steps)", args.word, record.steps);
            } else {
                println!("'{}' is not a palindrome ({} steps)", args.word, record.steps);
            }
        }
    }

    Ok(())
}

fn cmd_trace(args: &TraceArgs, cli: &Cli) -> anyhow::Result<()> {
    let alphabet = args.alphabet.as_deref().unwrap_or(DEFAULT_ALPHABET);
    let mut machine = build_machine(alphabet)?;
    machine.load(&args.word);

    print_snapshot(&machine.snapshot(), machine.step_count(), &cli.format)?;

    while !machine.is_halted() {
        let record = machine.step();
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&record)?),
            OutputFormat::Text => println!("  {}", describe(&record)),
        }
        print_snapshot(&machine.snapshot(), machine.step_count(), &cli.format)?;
    }

    let is_palindrome = machine.state() == ACCEPT_STATE;
    if cli.format == OutputFormat::Text {
        if is_palindrome {
            println!("\n'{}' is a palindrome ({} steps)", args.word, machine.step_count());
        } else {
            println!(
                "\n'{}' is not a palindrome ({} steps)",
                args.word,
                machine.step_count()
            );
        }
    }

    Ok(())
}

fn cmd_history(args: &HistoryArgs, cli: &Cli) -> anyhow::Result<()> {
    let records = HistoryStore::new(&cli.history_file).recent(args.limit)?;

    if records.is_empty() {
        println!("No recorded runs.");
        return Ok(());
    }

    for record in records {
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&record)?),
            OutputFormat::Text => println!(
                "{}  {:5}  {:>8} steps  '{}'",
                record.created_at.format("%Y-%m-%d %H:%M:%S"),
                if record.is_palindrome { "yes" } else { "no" },
                record.steps,
                record.word
            ),
        }
    }

    Ok(())
}

fn print_snapshot(
    snapshot: &Snapshot,
    step_count: usize,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(snapshot)?),
        OutputFormat::Text => {
            let tape: String = snapshot.tape.iter().collect();
            println!(
                "Step: {}, State: {}, Tape: {}, Head: {}",
                step_count, snapshot.state, tape, snapshot.head
            );
        }
    }

    Ok(())
}

/// Renders one step record as a human-readable line. All narration lives
/// here; the core only hands out structured data.
fn describe(record: &ActionRecord) -> String {
    match record {
        ActionRecord::Halted { state } => format!("machine is halted in state {}", state),
        ActionRecord::BudgetExhausted { state, steps } => format!(
            "step budget exhausted in state {} after {} steps - rejected",
            state, steps
        ),
        ActionRecord::NoRule { state, read } => {
            format!("no rule for ({}, '{}') - rejected", state, read)
        }
        ActionRecord::Applied {
            from,
            read,
            written,
            direction,
            to,
        } => {
            let movement = match direction {
                Direction::Left => "moved left",
                Direction::Right => "moved right",
                Direction::Stay => "stayed",
            };
            format!(
                "read '{}', wrote '{}', {}, state {} -> {}",
                read, written, movement, from, to
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_applied() {
        let record = ActionRecord::Applied {
            from: "scan".to_string(),
            read: 'a',
            written: 'X',
            direction: Direction::Right,
            to: "seek_a".to_string(),
        };

        let line = describe(&record);

        assert!(line.contains("read 'a'"));
        assert!(line.contains("wrote 'X'"));
        assert!(line.contains("moved right"));
        assert!(line.contains("scan -> seek_a"));
    }

    #[test]
    fn test_describe_no_rule() {
        let record = ActionRecord::NoRule {
            state: "scan".to_string(),
            read: '9',
        };

        let line = describe(&record);

        assert!(line.contains("no rule"));
        assert!(line.contains("'9'"));
    }

    #[test]
    fn test_build_machine_validates() {
        assert!(build_machine("ab").is_ok());
    }
}
