//! The interactive session.
//!
//! State lives only as long as the session. Each line is parsed as a
//! session command; a bad line is reported and the session goes on.

use super::{Output, execute, render, theme};
use crate::app::AppState;
use crate::cli::{ShellCommands, ShellLine};
use crate::config::ConfigFile;
use crate::{Error, Result};
use clap::Parser;
use clap::error::ErrorKind;
use std::io::{BufRead, Write};

const PROMPT: &str = "dosie> ";

/// Split a line into arguments.
///
/// Double quotes group words and may be empty. A backslash escapes the next
/// character.
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    out.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::InvalidInput("Unterminated quote".to_string()));
    }
    if !current.is_empty() || quoted {
        out.push(current);
    }
    Ok(out)
}

/// What the session should do after a line.
enum Step {
    Continue,
    Exit,
}

/// Run a session reading commands from `input` until EOF or `exit`.
pub fn run_shell<R: BufRead, W: Write>(
    state: &mut AppState,
    config: &ConfigFile,
    input: R,
    mut output: W,
    human: bool,
    prompt: bool,
) -> Result<()> {
    tracing::debug!("Shell started with {} items", state.len());
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        match run_line(state, config, &line, &mut output, human)? {
            Step::Continue => {}
            Step::Exit => break,
        }
    }
    tracing::debug!("Shell ended");
    Ok(())
}

fn run_line<W: Write>(
    state: &mut AppState,
    config: &ConfigFile,
    line: &str,
    output: &mut W,
    human: bool,
) -> Result<Step> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Step::Continue);
    }

    let args = match split_command_line(trimmed) {
        Ok(args) => args,
        Err(e) => {
            report(output, &e, human)?;
            return Ok(Step::Continue);
        }
    };

    let parsed = match ShellLine::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    write!(output, "{}", e.render())?;
                }
                _ => {
                    let message = e.to_string();
                    tracing::debug!("Rejected shell line: {}", trimmed);
                    report(output, &Error::InvalidInput(message.trim().to_string()), human)?;
                }
            }
            return Ok(Step::Continue);
        }
    };
    let human = human || parsed.human_readable;

    let result: Result<Box<dyn Output>> = match parsed.command {
        ShellCommands::Exit => return Ok(Step::Exit),
        ShellCommands::Session(command) => execute(state, command),
        ShellCommands::Theme(args) => {
            theme(config, args.change()).map(|r| Box::new(r) as Box<dyn Output>)
        }
    };

    match result {
        Ok(result) => writeln!(output, "{}", render(result.as_ref(), human))?,
        Err(e) => report(output, &e, human)?,
    }
    Ok(Step::Continue)
}

fn report<W: Write>(output: &mut W, error: &Error, human: bool) -> Result<()> {
    if human {
        writeln!(output, "Error: {}", error)?;
    } else {
        writeln!(output, "{}", super::json(&serde_json::json!({ "error": error.to_string() })))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(script: &str, human: bool) -> (AppState, String) {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::in_dir(dir.path());
        let mut state = AppState::seeded();
        let mut out = Vec::new();
        run_shell(&mut state, &config, script.as_bytes(), &mut out, human, false).unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_split_command_line() {
        assert_eq!(
            split_command_line(r#"snippet add "Deep Clone" -c "x\"y""#).unwrap(),
            vec!["snippet", "add", "Deep Clone", "-c", "x\"y"]
        );
        assert_eq!(
            split_command_line(r#"snippet update 1 --code """#).unwrap(),
            vec!["snippet", "update", "1", "--code", ""]
        );
        assert!(split_command_line(r#"bug add "open"#).is_err());
        assert!(split_command_line("   ").unwrap().is_empty());
    }

    #[test]
    fn test_session_state_carries_between_lines() {
        let script = "\
snippet add \"Deep Clone\" -c \"structuredClone(x)\"
link add snippet 13 bug 3
# comment lines are skipped

link list snippet 13
";
        let (state, out) = run(script, true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Added snippet#13: Deep Clone");
        assert_eq!(lines[1], "linked: snippet#13 -> bug#3");
        assert_eq!(lines[2], "snippet#13 links to 1 item(s):");
        assert_eq!(state.snippets.len(), 6);
    }

    #[test]
    fn test_bad_lines_do_not_end_the_session() {
        let (state, out) = run("frobnicate\nbug show 99\nbug rm 1\n", false);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with(r#"{"error":"#));
        assert_eq!(lines[1], r#"{"error":"Not found: bug#99"}"#);
        assert!(lines[2].contains(r#""changed":true"#));
        assert!(state.bugs.find(1).is_none());
    }

    #[test]
    fn test_exit_stops_reading() {
        let (state, out) = run("bug rm 1\nexit\nbug rm 2\n", true);
        assert_eq!(out.lines().count(), 1);
        assert!(state.bugs.find(2).is_some());
    }

    #[test]
    fn test_per_line_human_flag() {
        let (_, out) = run("items -t template -H\n", false);
        assert!(out.starts_with("2 item(s):"));
    }

    #[test]
    fn test_prompt_is_written_when_requested() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::in_dir(dir.path());
        let mut state = AppState::new();
        let mut out = Vec::new();
        run_shell(&mut state, &config, "quit\n".as_bytes(), &mut out, true, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), PROMPT);
    }
}
