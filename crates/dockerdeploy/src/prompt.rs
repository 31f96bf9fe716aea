use colored::Colorize;
use dockerdeploy_core::Prompter;
use std::io::{self, Write};

/// Questions on stdout, answers from stdin
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_answer(&self) -> io::Result<String> {
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for an answer",
            ));
        }
        Ok(input)
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        print!("{} {} {}: ", "?".cyan().bold(), message, hint);

        let answer = self.read_answer()?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn input(&self, message: &str) -> io::Result<String> {
        print!("{} {}: ", "?".cyan().bold(), message);
        self.read_answer()
    }

    fn show_error(&self, message: &str) {
        println!("  {} {}", "✗".red(), message);
    }
}
