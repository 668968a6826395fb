// ============================================================
// Layer 1 — Interactive Console
// ============================================================
// A line-oriented front-end for the session controller.
//
//   <name>=<value>   overwrite one field
//   submit           validate and predict
//   reset            back to an empty form
//   show             redraw the current phase
//   help             list commands
//   quit             leave
//
// Reads from any BufRead and writes to any Write so the
// console can be driven from tests as well as from a terminal.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::application::session::{
    Message, ResetOutcome, SessionController, SessionView, Severity,
};
use crate::domain::error::SubmitError;

const HELP: &str = "\
Commands:
  <name>=<value>   set a field (e.g. N=90)
  submit           predict crop, yield and fertilizer
  reset            enter new values
  show             redraw the form or the results
  help             show this list
  quit             exit";

pub struct Console<'a, R, W> {
    controller: &'a mut SessionController,
    input:      R,
    out:        W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(controller: &'a mut SessionController, input: R, out: W) -> Self {
        Self { controller, input, out }
    }

    /// Serve commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Smart Agriculture Assistant")?;
        writeln!(self.out, "Type 'help' for commands.")?;
        self.render()?;

        let mut line = String::new();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match line.trim() {
                ""                => continue,
                "quit" | "exit"   => break,
                "help"            => writeln!(self.out, "{HELP}")?,
                "show"            => self.render()?,
                "submit"          => self.submit()?,
                "reset"           => self.reset()?,
                other             => self.keystroke(other)?,
            }
        }
        Ok(())
    }

    fn keystroke(&mut self, command: &str) -> Result<()> {
        let Some((name, raw)) = command.split_once('=') else {
            writeln!(self.out, "Unknown command '{command}'. Type 'help' for commands.")?;
            return Ok(());
        };
        let name = name.trim();

        if let Err(e) = self.controller.input(name, raw.trim()) {
            return print_message(&mut self.out, &Message::new(Severity::Error, e.to_string()));
        }

        // Same live feedback the form gives: only this field's error
        if let Some(err) = self
            .controller
            .field_errors()
            .into_iter()
            .find(|e| e.field() == Some(name))
        {
            print_message(&mut self.out, &Message::new(Severity::Error, err.to_string()))?;
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        match self.controller.submit() {
            Ok(_)                          => self.render(),
            Err(SubmitError::Invalid(_))   => self.render(),
            Err(e @ SubmitError::NotCollecting) => {
                print_message(&mut self.out, &Message::new(Severity::Warning, e.to_string()))
            }
            Err(e) => print_message(&mut self.out, &Message::new(Severity::Error, e.to_string())),
        }
    }

    fn reset(&mut self) -> Result<()> {
        match self.controller.reset() {
            ResetOutcome::Reset   => self.render(),
            ResetOutcome::Ignored => {
                writeln!(self.out, "Nothing to reset; the form is already open.")?;
                Ok(())
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        render_view(&mut self.out, &self.controller.view())
    }
}

/// Draw one phase of the session.
pub fn render_view<W: Write>(out: &mut W, view: &SessionView) -> Result<()> {
    match view {
        SessionView::Collecting { fields, warning } => {
            writeln!(out, "\nEnter Soil and Weather Parameters")?;
            for field in fields {
                writeln!(out, "  {:<40} {}", field.label(), field.raw)?;
                if let Some(error) = &field.error {
                    writeln!(out, "      x {error}")?;
                }
            }
            if let Some(w) = warning {
                print_message(out, w)?;
            }
        }
        SessionView::Reviewing { results } => {
            writeln!(out)?;
            for msg in results {
                print_message(out, msg)?;
            }
            writeln!(out, "Type 'reset' to enter new values.")?;
        }
    }
    Ok(())
}

pub fn print_message<W: Write>(out: &mut W, msg: &Message) -> Result<()> {
    let tag = match msg.severity {
        Severity::Success => "[ok]   ",
        Severity::Info    => "[info] ",
        Severity::Warning => "[warn] ",
        Severity::Error   => "[error]",
    };
    writeln!(out, "{tag} {}", msg.text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::application::dispatcher::{fakes, PredictionDispatcher};
    use crate::domain::schema::{BoundEntry, FeatureSchema};

    fn controller() -> SessionController {
        let mut bounds = BTreeMap::new();
        bounds.insert("N".to_string(), BoundEntry::new(0.0, 140.0));
        bounds.insert("ph".to_string(), BoundEntry::new(0.0, 14.0));
        let schema = FeatureSchema::new(vec!["N".into(), "ph".into()], bounds).unwrap();
        let (suite, _) = fakes::suite(2);
        SessionController::new(schema, PredictionDispatcher::new(suite))
    }

    fn drive(script: &str) -> (String, SessionController) {
        let mut c   = controller();
        let mut out = Vec::new();
        Console::new(&mut c, script.as_bytes(), &mut out).run().unwrap();
        (String::from_utf8(out).unwrap(), c)
    }

    #[test]
    fn test_out_of_bounds_reported_while_typing() {
        let (out, c) = drive("N=150\nquit\n");
        assert!(out.contains("N must be ≤ 140"));
        assert!(c.session().is_collecting());
    }

    #[test]
    fn test_full_round_trip_through_review_and_reset() {
        let (out, c) = drive("N=90\nph=6.5\nsubmit\nreset\n");
        assert!(out.contains("Recommended Crop:"));
        assert!(out.contains("quintals/hectare"));
        assert!(c.session().is_collecting());
        assert!(c.session().raw.is_blank());
    }

    #[test]
    fn test_submit_with_blank_field_shows_missing_error() {
        let (out, c) = drive("N=90\nsubmit\n");
        assert!(out.contains("Please enter a value for ph."));
        assert!(out.contains("Please correct the invalid input(s)"));
        assert!(c.session().attempted);
    }

    #[test]
    fn test_all_zero_submit_is_reported() {
        let (out, c) = drive("N=0\nph=0\nsubmit\n");
        assert!(out.contains("cannot all be zero"));
        assert!(c.session().is_collecting());
    }

    #[test]
    fn test_unknown_field_and_command() {
        let (out, _) = drive("Zn=3\nfrobnicate\n");
        assert!(out.contains("Unknown field 'Zn'."));
        assert!(out.contains("Unknown command 'frobnicate'"));
    }
}
