//! Interactive input
//!
//! Workflows never read the terminal directly; they ask a [`Prompter`].
//! The CLI provides a stdin/stdout implementation, tests provide scripted
//! answers.

/// Validation callback: `Err` carries the message shown to the user
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

pub trait Prompter: Send + Sync {
    /// Ask a yes/no question
    fn confirm(&self, message: &str, default: bool) -> std::io::Result<bool>;

    /// Ask for a line of text
    fn input(&self, message: &str) -> std::io::Result<String>;

    /// Tell the user why the last answer was rejected
    fn show_error(&self, message: &str);

    /// Ask until `validate` accepts the (trimmed) answer
    fn validated_input(&self, message: &str, validate: Validator<'_>) -> std::io::Result<String> {
        loop {
            let answer = self.input(message)?;
            let answer = answer.trim();

            match validate(answer) {
                Ok(()) => return Ok(answer.to_string()),
                Err(reason) => self.show_error(&reason),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct Scripted {
        answers: Mutex<VecDeque<String>>,
        errors: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
                errors: Mutex::new(Vec::new()),
            }
        }
    }

    impl Prompter for Scripted {
        fn confirm(&self, _message: &str, default: bool) -> std::io::Result<bool> {
            Ok(default)
        }

        fn input(&self, _message: &str) -> std::io::Result<String> {
            self.answers.lock().unwrap().pop_front().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no more answers")
            })
        }

        fn show_error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }

    fn non_empty(value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("empty".to_string())
        } else {
            Ok(())
        }
    }

    #[test]
    fn test_validated_input_repeats_until_valid() {
        let prompter = Scripted::new(&["", "   ", " ok "]);
        let answer = prompter.validated_input("name?", &non_empty).unwrap();

        assert_eq!(answer, "ok");
        assert_eq!(prompter.errors.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_validated_input_stops_on_eof() {
        let prompter = Scripted::new(&[""]);
        let result = prompter.validated_input("name?", &non_empty);

        assert_eq!(
            result.unwrap_err().kind(),
            std::io::ErrorKind::UnexpectedEof
        );
    }
}
