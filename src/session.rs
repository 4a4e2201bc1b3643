use std::fmt::Write as _;
use std::io::{self, BufRead, Write as _};
use std::path::Path;

use anyhow::Context;
use chrono::Utc;

use crate::registry::{HourField, RegistryError, SubjectRegistry};
use crate::report;

const HELP: &str = "Commands:\n\
  add <name>                       add a subject\n\
  set <name> max|attended <value>  record class hours\n\
  delete <name>                    remove a subject and its results\n\
  list                             show subjects\n\
  calc                             calculate attendance\n\
  medical                          calculate medical days\n\
  report [path]                    write a markdown report (default report.md)\n\
  quit                             leave the session";

pub enum SessionAction {
    Output(String),
    Quit,
}

pub fn run() -> anyhow::Result<()> {
    let mut registry = SubjectRegistry::new();
    println!("Attendance tracker session. Type `help` for commands.");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match execute(&mut registry, &line)? {
            SessionAction::Output(text) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
            SessionAction::Quit => break,
        }
    }

    Ok(())
}

pub fn execute(registry: &mut SubjectRegistry, line: &str) -> anyhow::Result<SessionAction> {
    let trimmed = line.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    let output = match command {
        "" => String::new(),
        "help" => HELP.to_string(),
        "add" => match registry.add_subject(rest) {
            Ok(_) => format!("Added {rest}."),
            Err(RegistryError::EmptyName) => "Subject name cannot be empty!".to_string(),
            Err(RegistryError::DuplicateName(_)) => "This subject already exists!".to_string(),
        },
        "set" => set_hours(registry, rest),
        "delete" => match registry.find_by_name(rest).map(|subject| subject.id) {
            Some(id) => {
                registry.delete_subject(id);
                format!("Deleted {rest}.")
            }
            None => format!("No subject named {rest}."),
        },
        "list" => list_subjects(registry),
        "calc" => {
            registry.calculate_attendance();
            render_attendance(registry)
        }
        "medical" => {
            registry.calculate_medical_days();
            render_medical(registry)
        }
        "report" => {
            let path = if rest.is_empty() { "report.md" } else { rest };
            write_report(registry, Path::new(path))?
        }
        "quit" | "exit" => return Ok(SessionAction::Quit),
        other => format!("Unknown command `{other}`. Type `help` for commands."),
    };

    Ok(SessionAction::Output(output))
}

fn set_hours(registry: &mut SubjectRegistry, rest: &str) -> String {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 3 {
        return "Usage: set <name> max|attended <value>".to_string();
    }

    let value = tokens[tokens.len() - 1];
    let field_name = tokens[tokens.len() - 2];
    let field = match field_name {
        "max" => HourField::Max,
        "attended" => HourField::Attended,
        other => return format!("Unknown field `{other}`; expected max or attended."),
    };
    let name = tokens[..tokens.len() - 2].join(" ");

    match registry.find_by_name(&name).map(|subject| subject.id) {
        Some(id) => {
            registry.update_field(id, field, value);
            format!("Set {name} {field_name} to {value}.")
        }
        None => format!("No subject named {name}."),
    }
}

fn list_subjects(registry: &SubjectRegistry) -> String {
    if registry.subjects().is_empty() {
        return "No subjects yet. Use `add <name>`.".to_string();
    }

    let mut output = String::new();
    for subject in registry.subjects() {
        let _ = writeln!(
            output,
            "- {} (max {}, attended {})",
            subject.name,
            display_hours(&subject.max_hours),
            display_hours(&subject.attended_hours)
        );
    }
    output.trim_end().to_string()
}

fn display_hours(raw: &str) -> &str {
    if raw.trim().is_empty() {
        "unset"
    } else {
        raw
    }
}

fn render_attendance(registry: &SubjectRegistry) -> String {
    if registry.results().is_empty() {
        return "No subjects to calculate.".to_string();
    }

    let mut output = String::new();
    let marker = if registry.highlight_active() {
        " (just updated)"
    } else {
        ""
    };
    let _ = writeln!(output, "Attendance results{marker}:");
    for result in registry.results() {
        let _ = writeln!(
            output,
            "- {} ({:.2}%): {}",
            result.name,
            result.percentage,
            report::attendance_advice(result)
        );
    }

    let summary = report::summarize_threshold(registry.results());
    let _ = write!(
        output,
        "{} at or above 75%, {} below.",
        summary.above_threshold, summary.below_threshold
    );
    output
}

fn render_medical(registry: &SubjectRegistry) -> String {
    if registry.medical_results().is_empty() {
        return "No subjects to calculate.".to_string();
    }

    let mut output = String::new();
    let marker = if registry.highlight_active() {
        " (just updated)"
    } else {
        ""
    };
    let _ = writeln!(output, "Medical day results{marker}:");
    for result in registry.medical_results() {
        let _ = writeln!(
            output,
            "- {} ({:.2}%): {}",
            result.name,
            result.percentage,
            report::medical_advice(result)
        );
    }
    output.trim_end().to_string()
}

fn write_report(registry: &mut SubjectRegistry, path: &Path) -> anyhow::Result<String> {
    registry.calculate_attendance();
    registry.calculate_medical_days();
    let rendered = report::build_report(
        Utc::now().date_naive(),
        registry.subjects(),
        registry.results(),
        registry.medical_results(),
    );
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(format!("Report written to {}.", path.display()))
}
