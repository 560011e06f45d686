//! Status and log reporting
//!
//! A reporter is bound to one UI sink for the length of one entry-point
//! call. A sink that does not exist is simply nothing to report to.

/// Where progress rows and the status line go.
pub trait Reporter {
    /// Append a row to the log.
    fn log_message(&mut self, text: &str);

    /// Replace the status line, then log the same text.
    fn set_status(&mut self, text: &str);
}

/// Reporter that keeps everything in memory.
///
/// Models the two host controls separately: the status line (`dialog`)
/// and the log list (`list`). A missing control swallows what is sent to
/// it, as in the installer.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    dialog: bool,
    list: bool,
    lines: Vec<String>,
    status: Option<String>,
}

impl MemoryLog {
    /// Both the status line and the log list are present.
    pub fn new() -> Self {
        Self::with_controls(true, true)
    }

    /// A log with no UI behind it; every call is a no-op.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Choose which host controls exist.
    pub fn with_controls(dialog: bool, list: bool) -> Self {
        Self {
            dialog,
            list,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Last status text, if any was set.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl Reporter for MemoryLog {
    fn log_message(&mut self, text: &str) {
        if !self.list {
            return;
        }
        self.lines.push(text.to_string());
    }

    fn set_status(&mut self, text: &str) {
        if self.dialog {
            self.status = Some(text.to_string());
        }
        self.log_message(text);
    }
}

/// Reporter that prints log rows on stdout.
#[derive(Debug, Default)]
pub struct ConsoleLog;

impl Reporter for ConsoleLog {
    fn log_message(&mut self, text: &str) {
        println!("{}", text);
    }

    fn set_status(&mut self, text: &str) {
        self.log_message(text);
    }
}
