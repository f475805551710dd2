use crate::git::{CommandExecutor, CommandOutput};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Executor answering from canned results, for testing without a repository
///
/// Results are keyed by the full command line (`"git checkout main"`).
/// Several results queued for one command are returned in order, the last one
/// repeating. Commands without a result fail. Every call is recorded.
#[derive(Default)]
pub struct ScriptedExecutor {
    results: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    /// Create an executor with no scripted commands
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result with the given stdout
    pub fn on_success(self, command: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.push_result(command.into(), CommandOutput::ok(stdout));
        self
    }

    /// Queue a failed result with the given stderr
    pub fn on_failure(self, command: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.push_result(command.into(), CommandOutput::failed(stderr));
        self
    }

    /// Command lines executed so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Whether `command` was executed at least once
    pub fn was_called(&self, command: &str) -> bool {
        self.calls().iter().any(|c| c == command)
    }

    fn push_result(&self, command: String, output: CommandOutput) {
        if let Ok(mut results) = self.results.lock() {
            results.entry(command).or_default().push_back(output);
        }
    }

    fn next_result(&self, command: &str) -> Option<CommandOutput> {
        let mut results = self.results.lock().ok()?;
        let queue = results.get_mut(command)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        Ok(self.next_result(&command).unwrap_or_else(|| {
            CommandOutput::failed(format!("Mock command not configured: {}", command))
        }))
    }
}
