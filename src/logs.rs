use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::Local;

const MAX_LINES: usize = 500;

/// Recent diagnostics, kept in memory for the `/logs` route.
///
/// Every line is also emitted through `tracing`.
#[derive(Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn info(&self, message: &str) {
        tracing::info!("{}", message);
        self.push(message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", message);
        self.push(message);
    }

    fn push(&self, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        let entry = format!("[{}] {}", timestamp, message);

        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.push_back(entry);
        while lines.len() > MAX_LINES {
            lines.pop_front();
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().cloned().collect()
    }
}
