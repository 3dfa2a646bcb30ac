use anyhow::{Context as _, Result, anyhow, bail};
use claim_wizard::{ClaimSection, FieldName};
use std::path::PathBuf;

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Help,
    Status { json: bool },
    Add(Vec<PathBuf>),
    /// Zero-based index; users type the 1-based number shown in the listing.
    Remove(usize),
    Set(FieldName, String),
    Next,
    Back,
    Show,
    Edit(ClaimSection, String),
    Download,
    Quit,
}

pub const HELP: &str = "\
Wizard commands:
  add <path>...            attach photos or documents
  remove <n>               drop attachment number n
  set <field> <value>      fields: incidentDescription, incidentDate, incidentLocation,
                           insuranceProvider, policyNumber, claimType
  next                     continue to the next step (or generate the claim on review)
  back                     return to the previous step
  status [--json]          show the current step and collected data
Review commands:
  show                     print the generated claim
  edit <section> <text>    sections: incidentDescription, damageAssessment,
                           claimJustification, requestedAmount
  download                 write the claim to a text file
Any time:
  help, quit";

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<CliCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => CliCommand::Help,
        "status" => CliCommand::Status {
            json: rest == "--json",
        },
        "add" => {
            if rest.is_empty() {
                bail!("usage: add <path>...");
            }
            CliCommand::Add(rest.split_whitespace().map(PathBuf::from).collect())
        }
        "remove" | "rm" => {
            let number: usize = rest
                .parse()
                .with_context(|| format!("not an attachment number: {rest:?}"))?;
            if number == 0 {
                bail!("attachments are numbered from 1");
            }
            CliCommand::Remove(number - 1)
        }
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map(|(field, value)| (field, value.trim()))
                .unwrap_or((rest, ""));
            if field.is_empty() {
                bail!("usage: set <field> <value>");
            }
            CliCommand::Set(field.parse()?, value.to_string())
        }
        "edit" => {
            let (section, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: edit <section> <text>"))?;
            CliCommand::Edit(section.parse()?, text.trim().to_string())
        }
        "next" | "n" => CliCommand::Next,
        "back" | "b" => CliCommand::Back,
        "show" => CliCommand::Show,
        "download" => CliCommand::Download,
        "quit" | "exit" | "q" => CliCommand::Quit,
        other => bail!("unknown command {other:?}, type 'help'"),
    };
    Ok(Some(command))
}
