//! Line-oriented interactive session
//!
//! Each input line is one notification from the form:
//!
//! ```text
//! area=24.5          # edit: fires the field's own event (input / change)
//! change area=30     # explicit event kind
//! old-floor=on
//! show               # re-render current state
//! quit
//! ```

use std::io::BufRead;

use tracing::{debug, warn};

use crate::application::services::{EstimatorBinding, FieldEvent};
use crate::domain::{DomainResult, EventKind, FieldId};
use crate::infrastructure::traits::OutputSurface;
use crate::infrastructure::{InfraError, InfraResult};

pub const HELP: &str = "fields: area, baseboard, transitions, old-floor, prep
  <field>=<value>          edit a field (old-floor=on, prep=off)
  input|change <field>=<value>
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Event(FieldEvent),
    Show,
    Help,
    Quit,
}

/// Something the session wants shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// Ready for the next line
    Prompt,
    Help,
    Warning(String),
}

/// Parse one session line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> DomainResult<Option<SessionCommand>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    match line.to_ascii_lowercase().as_str() {
        "show" => return Ok(Some(SessionCommand::Show)),
        "help" | "?" => return Ok(Some(SessionCommand::Help)),
        "quit" | "exit" | "q" => return Ok(Some(SessionCommand::Quit)),
        _ => {}
    }

    let (kind, assignment) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) if word.eq_ignore_ascii_case("input") => {
            (Some(EventKind::Input), rest.trim())
        }
        Some((word, rest)) if word.eq_ignore_ascii_case("change") => {
            (Some(EventKind::Change), rest.trim())
        }
        _ => (None, line),
    };

    let (name, value) = assignment.split_once('=').unwrap_or((assignment, ""));
    let field: FieldId = name.parse()?;
    let value = value.trim();
    let event = match kind {
        Some(kind) => FieldEvent::new(field, kind, value),
        None => FieldEvent::edit(field, value),
    };
    Ok(Some(SessionCommand::Event(event)))
}

/// Drive a binding from `reader` until EOF or `quit`.
///
/// Renders the initial state first. Returns the number of events dispatched.
pub fn run_session<R, O>(
    reader: R,
    binding: &mut EstimatorBinding<O>,
    mut notify: impl FnMut(SessionNotice),
) -> InfraResult<usize>
where
    R: BufRead,
    O: OutputSurface,
{
    binding.init()?;
    let mut dispatched = 0;

    notify(SessionNotice::Prompt);
    for line in reader.lines() {
        let line = line.map_err(|e| InfraError::io("read session input", e))?;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(SessionCommand::Show)) => {
                binding.refresh()?;
            }
            Ok(Some(SessionCommand::Help)) => notify(SessionNotice::Help),
            Ok(Some(SessionCommand::Event(event))) => {
                debug!("session event: {:?}", event);
                binding.dispatch(event)?;
                dispatched += 1;
            }
            Err(e) => {
                warn!("ignoring line {:?}: {}", line, e);
                notify(SessionNotice::Warning(e.to_string()));
            }
        }
        notify(SessionNotice::Prompt);
    }
    Ok(dispatched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_assignment_when_parsing_then_edit_event_with_natural_kind() {
        let cmd = parse_line("area = 20").unwrap();
        assert_eq!(
            cmd,
            Some(SessionCommand::Event(FieldEvent::new(
                FieldId::Area,
                EventKind::Input,
                "20"
            )))
        );
        let cmd = parse_line("prep=on").unwrap();
        assert_eq!(
            cmd,
            Some(SessionCommand::Event(FieldEvent::new(
                FieldId::Prep,
                EventKind::Change,
                "on"
            )))
        );
    }

    #[test]
    fn given_explicit_kind_when_parsing_then_kind_kept() {
        let cmd = parse_line("change area=30").unwrap();
        assert_eq!(
            cmd,
            Some(SessionCommand::Event(FieldEvent::new(
                FieldId::Area,
                EventKind::Change,
                "30"
            )))
        );
    }

    #[test]
    fn given_keywords_and_comments_when_parsing_then_recognized() {
        assert_eq!(parse_line("  ").unwrap(), None);
        assert_eq!(parse_line("# note").unwrap(), None);
        assert_eq!(parse_line("SHOW").unwrap(), Some(SessionCommand::Show));
        assert_eq!(parse_line("quit").unwrap(), Some(SessionCommand::Quit));
        assert_eq!(parse_line("?").unwrap(), Some(SessionCommand::Help));
    }

    #[test]
    fn given_unknown_field_when_parsing_then_error() {
        assert_eq!(
            parse_line("colour=red"),
            Err(DomainError::UnknownField("colour".to_string()))
        );
    }
}
