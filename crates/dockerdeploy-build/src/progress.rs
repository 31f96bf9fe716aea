use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while the engine runs a long command
pub struct StepProgress {
    progress_bar: ProgressBar,
}

impl StepProgress {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        Self { progress_bar: pb }
    }

    pub fn finish_success(&self, message: &str) {
        self.progress_bar.finish_with_message(format!("{} ✓", message));
    }

    /// Remove the spinner line so diagnostics can be printed below
    pub fn abandon(&self) {
        self.progress_bar.finish_and_clear();
    }
}
