//! Message templates and argument unmarshaling
//!
//! Both entry points ship an English template set. Installer scripts can
//! replace the whole set by passing `/TRANSLATE` followed by eight strings
//! before the real arguments.

use std::fmt::{Display, Write};

use crate::stack::HostStack;

/// First argument that announces a translated template set.
pub const TRANSLATE_SENTINEL: &str = "/TRANSLATE";

/// Templates used by `extractall`, in host pop order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractAllMessages {
    pub extracting: String,
    pub print_count: String,
    pub extract_file: String,
    pub error_could_not_extract: String,
    pub could_not_extract: String,
    pub error_could_not_get_attributes: String,
    pub could_not_get_attributes: String,
    pub error: String,
}

impl Default for ExtractAllMessages {
    fn default() -> Self {
        Self {
            extracting: "Extracting contents of %s to %s".to_string(),
            print_count: "  Extracting %d files and directories".to_string(),
            extract_file: "  Extract : %s".to_string(),
            error_could_not_extract: "  Error: Could not extract %s".to_string(),
            could_not_extract: "Could not extract %s".to_string(),
            error_could_not_get_attributes: "Error: Could not get file attributes.".to_string(),
            could_not_get_attributes: "Could not get file attributes.".to_string(),
            error: "  Error: %s".to_string(),
        }
    }
}

impl ExtractAllMessages {
    /// Replace every template with the next eight stack values.
    pub fn pop_from<S: HostStack + ?Sized>(stack: &mut S) -> Self {
        Self {
            extracting: stack.pop_arg(),
            print_count: stack.pop_arg(),
            extract_file: stack.pop_arg(),
            error_could_not_extract: stack.pop_arg(),
            could_not_extract: stack.pop_arg(),
            error_could_not_get_attributes: stack.pop_arg(),
            could_not_get_attributes: stack.pop_arg(),
            error: stack.pop_arg(),
        }
    }
}

/// Templates used by `extractfile`, in host pop order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractFileMessages {
    pub extracting: String,
    pub error_file_does_not_exist: String,
    pub file_does_not_exist: String,
    pub error_could_not_extract: String,
    pub could_not_extract: String,
    pub error_could_not_get_attributes: String,
    pub could_not_get_attributes: String,
    pub error: String,
}

impl Default for ExtractFileMessages {
    fn default() -> Self {
        Self {
            extracting: "Extracting the file %s from %s to %s".to_string(),
            error_file_does_not_exist: "Error: Specified file does not exist in archive."
                .to_string(),
            file_does_not_exist: "Specified file does not exist in archive.".to_string(),
            error_could_not_extract: "  Error: Could not extract %s".to_string(),
            could_not_extract: "Could not extract %s".to_string(),
            error_could_not_get_attributes: "Error: Could not get file attributes.".to_string(),
            could_not_get_attributes: "Could not get file attributes.".to_string(),
            error: "  Error: %s".to_string(),
        }
    }
}

impl ExtractFileMessages {
    /// Replace every template with the next eight stack values.
    pub fn pop_from<S: HostStack + ?Sized>(stack: &mut S) -> Self {
        Self {
            extracting: stack.pop_arg(),
            error_file_does_not_exist: stack.pop_arg(),
            file_does_not_exist: stack.pop_arg(),
            error_could_not_extract: stack.pop_arg(),
            could_not_extract: stack.pop_arg(),
            error_could_not_get_attributes: stack.pop_arg(),
            could_not_get_attributes: stack.pop_arg(),
            error: stack.pop_arg(),
        }
    }
}

/// Arguments of `extractall`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractAllArgs {
    pub source: String,
    pub destination: String,
    pub messages: ExtractAllMessages,
}

impl ExtractAllArgs {
    /// Pop `[/TRANSLATE t1..t8] source destination`.
    pub fn unmarshal<S: HostStack + ?Sized>(stack: &mut S) -> Self {
        let mut source = stack.pop_arg();
        let mut messages = ExtractAllMessages::default();
        if is_translate(&source) {
            messages = ExtractAllMessages::pop_from(stack);
            source = stack.pop_arg();
        }
        let destination = stack.pop_arg();
        Self {
            source,
            destination,
            messages,
        }
    }
}

/// Arguments of `extractfile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractFileArgs {
    pub source: String,
    pub destination: String,
    pub file: String,
    pub messages: ExtractFileMessages,
}

impl ExtractFileArgs {
    /// Pop `[/TRANSLATE t1..t8] source destination file`.
    pub fn unmarshal<S: HostStack + ?Sized>(stack: &mut S) -> Self {
        let mut source = stack.pop_arg();
        let mut messages = ExtractFileMessages::default();
        if is_translate(&source) {
            messages = ExtractFileMessages::pop_from(stack);
            source = stack.pop_arg();
        }
        let destination = stack.pop_arg();
        let file = stack.pop_arg();
        Self {
            source,
            destination,
            file,
            messages,
        }
    }
}

fn is_translate(arg: &str) -> bool {
    arg.eq_ignore_ascii_case(TRANSLATE_SENTINEL)
}

/// Expand a printf-style template.
///
/// `%s`, `%d`, `%i` and `%u` take the next argument in order and `%%` is a
/// literal percent sign. Anything else after `%` is copied through. A
/// placeholder with no argument left expands to nothing.
pub fn format_template(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s' | 'd' | 'i' | 'u') => {
                chars.next();
                if let Some(arg) = args.next() {
                    let _ = write!(out, "{}", arg);
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
