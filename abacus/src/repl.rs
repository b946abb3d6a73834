//! Read-eval-print loop

use crate::{Calculator, Step, BANNER};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    Reading,
    Dispatching,
    Terminated,
}

/// Line-at-a-time driver around a `Calculator`.
///
/// Each line is fully handled, file I/O included, before the next one is
/// read. End of input ends the loop the same way `exit` does.
pub struct Repl {
    calculator: Calculator,
    state: ReplState,
}

impl Repl {
    pub fn new(calculator: Calculator) -> Self {
        Self { calculator, state: ReplState::Reading }
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", BANNER)?;
        self.state = ReplState::Reading;

        let mut line = String::new();
        while self.state != ReplState::Terminated {
            write!(output, "{}", self.calculator.config().prompt)?;
            output.flush()?;

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => {
                    info!("end of input");
                    self.state = ReplState::Terminated;
                    continue;
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    warn!(error = %e, "skipping unreadable input line");
                    writeln!(output, "Error: input is not valid UTF-8")?;
                    continue;
                }
                Err(e) => return Err(e),
            }

            self.state = ReplState::Dispatching;
            match self.calculator.dispatch(line.trim()) {
                Step::Exit => self.state = ReplState::Terminated,
                Step::Continue(message) => {
                    writeln!(output, "{}", message)?;
                    self.state = ReplState::Reading;
                }
            }
        }

        info!("calculator session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_lines(lines: &[&str], config: Config) -> (String, Repl) {
        let mut repl = Repl::new(Calculator::with_standard_plugins(config));
        let input = Cursor::new(lines.join("\n"));
        let mut output = Vec::new();
        repl.run(input, &mut output).unwrap();
        (String::from_utf8(output).unwrap(), repl)
    }

    #[test]
    fn test_add_then_view() {
        let (out, repl) = run_lines(&["add 1 2", "view_history", "exit"], Config::default());
        let result_at = out.find("Result: 3").unwrap();
        let table = &out[result_at..];
        assert!(table.contains("timestamp"));
        assert!(table.contains("add"));
        assert!(table.contains("1"));
        assert!(table.contains("2"));
        assert!(table.contains("3"));
        assert_eq!(repl.state(), ReplState::Terminated);
    }

    #[test]
    fn test_prompt_and_banner() {
        let (out, _) = run_lines(&["exit"], Config::default().with_prompt("calc> "));
        assert!(out.starts_with("Simple Calculator REPL"));
        assert!(out.ends_with("calc> "));
    }

    #[test]
    fn test_exit_stops_reading() {
        let (_, repl) = run_lines(&["add 1 1", "exit", "add 2 2"], Config::default());
        assert_eq!(repl.calculator().store().len(), 1);
    }

    #[test]
    fn test_eof_terminates() {
        let (out, repl) = run_lines(&["multiply 4 2"], Config::default());
        assert!(out.contains("Result: 8"));
        assert_eq!(repl.state(), ReplState::Terminated);
    }

    #[test]
    fn test_errors_keep_loop_alive() {
        let (out, repl) = run_lines(
            &[
                "invalid command",
                "add invalid 2",
                "divide 5 0",
                "use_plugin",
                "use_plugin nonexistent command",
                "add 2 3",
                "exit",
            ],
            Config::default(),
        );
        assert!(out.contains("Error: Invalid input format"));
        assert!(out.contains("Error: Please enter valid numbers"));
        assert!(out.contains("Error: Division by zero"));
        assert!(out.contains("Plugin 'nonexistent' not found"));
        assert!(out.contains("Result: 5"));
        assert_eq!(repl.calculator().store().len(), 1);
    }

    #[test]
    fn test_history_session() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("test.csv");
        let save = format!("save_history_to_csv {}", explicit.display());
        let load = format!("load_history_from_csv {}", explicit.display());
        let lines = [
            "add 2 3",
            "save_history",
            "clear_history",
            "load_history",
            "view_history",
            "delete_history",
            save.as_str(),
            load.as_str(),
            "exit",
        ];
        let config = Config::default().with_history_path(dir.path().join("history.csv"));
        let (out, _) = run_lines(&lines, config);
        assert!(out.contains("Result: 5"));
        assert!(out.contains("successfully"));
        assert!(out.contains("cleared"));
        assert!(out.contains("History deleted"));
        assert!(!dir.path().join("history.csv").exists());
        assert!(explicit.exists());
    }

    #[test]
    fn test_menu_lists_plugins() {
        let (out, _) = run_lines(&["menu", "exit"], Config::default());
        assert!(out.contains("Available Plugins"));
        assert!(out.contains("scientific"));
        assert!(out.contains("power, sqrt, sin, cos"));
        assert!(out.contains("sqrt <x>: Square root"));
        assert!(out.contains("e.g. use_plugin scientific power 2 3"));
    }

    #[test]
    fn test_blank_lines_report_invalid_format() {
        let mut repl = Repl::new(Calculator::default());
        let mut output = Vec::new();
        repl.run(Cursor::new("\n   \nexit\n"), &mut output).unwrap();
        let out = String::from_utf8(output).unwrap();
        assert_eq!(out.matches("Error: Invalid input format").count(), 2);
        assert_eq!(repl.state(), ReplState::Terminated);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut repl = Repl::new(Calculator::default());
        let mut bytes = b"add 1 1\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"add 2 2\nexit\n");
        let mut output = Vec::new();
        repl.run(Cursor::new(bytes), &mut output).unwrap();
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("not valid UTF-8"));
        assert!(out.contains("Result: 4"));
        assert_eq!(repl.calculator().store().len(), 2);
    }
}
