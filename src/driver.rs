//! Entry-point logic
//!
//! Each driver pops its arguments, runs one linear pass over the archive,
//! and pushes exactly one result string. The first failure ends the call.

use std::path::Path;

use log::debug;

use crate::archive::Archive;
use crate::error::{ExtractError, Result};
use crate::messages::{
    format_template, ExtractAllArgs, ExtractAllMessages, ExtractFileArgs, ExtractFileMessages,
};
use crate::report::Reporter;
use crate::stack::HostStack;

/// Result string for a completed call.
pub const RESULT_SUCCESS: &str = "success";

/// Text for a failure: the log row and the string left on the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub log: String,
    pub result: String,
}

/// Maps errors to user-facing text using one template set.
pub trait FailureMessages {
    fn failure(&self, err: &ExtractError) -> Failure;
}

impl FailureMessages for ExtractAllMessages {
    fn failure(&self, err: &ExtractError) -> Failure {
        match err {
            ExtractError::EntryAttributes { .. } => Failure {
                log: self.error_could_not_get_attributes.clone(),
                result: self.could_not_get_attributes.clone(),
            },
            ExtractError::Extraction { name, .. } => Failure {
                log: format_template(&self.error_could_not_extract, &[name]),
                result: format_template(&self.could_not_extract, &[name]),
            },
            _ => library_failure(&self.error, err),
        }
    }
}

impl FailureMessages for ExtractFileMessages {
    fn failure(&self, err: &ExtractError) -> Failure {
        match err {
            ExtractError::EntryNotFound { .. } => Failure {
                log: self.error_file_does_not_exist.clone(),
                result: self.file_does_not_exist.clone(),
            },
            ExtractError::EntryAttributes { .. } => Failure {
                log: self.error_could_not_get_attributes.clone(),
                result: self.could_not_get_attributes.clone(),
            },
            ExtractError::Extraction { name, .. } => Failure {
                log: format_template(&self.error_could_not_extract, &[name]),
                result: format_template(&self.could_not_extract, &[name]),
            },
            _ => library_failure(&self.error, err),
        }
    }
}

fn library_failure(template: &str, err: &ExtractError) -> Failure {
    let desc = err.description();
    Failure {
        log: format_template(template, &[&desc]),
        result: desc,
    }
}

/// Log the outcome and push the single result string.
fn publish<S, R, M>(stack: &mut S, reporter: &mut R, messages: &M, outcome: Result<()>)
where
    S: HostStack + ?Sized,
    R: Reporter + ?Sized,
    M: FailureMessages,
{
    match outcome {
        Ok(()) => stack.push(RESULT_SUCCESS),
        Err(err) => {
            debug!("extraction failed: {}", err);
            let failure = messages.failure(&err);
            reporter.log_message(&failure.log);
            stack.push(&failure.result);
        }
    }
}

/// `extractall`: extract every entry of `source` into `destination`.
pub fn extract_all<S, R>(stack: &mut S, reporter: &mut R)
where
    S: HostStack + ?Sized,
    R: Reporter + ?Sized,
{
    let args = ExtractAllArgs::unmarshal(stack);
    let m = &args.messages;

    reporter.log_message(&format_template(
        &m.extracting,
        &[&args.source, &args.destination],
    ));
    let outcome = run_extract_all(&args, reporter);
    publish(stack, reporter, m, outcome);
}

fn run_extract_all<R: Reporter + ?Sized>(args: &ExtractAllArgs, reporter: &mut R) -> Result<()> {
    let m = &args.messages;
    let destination = Path::new(&args.destination);
    let mut archive = Archive::open(&args.source)?;

    let count = archive.count();
    reporter.log_message(&format_template(&m.print_count, &[&count]));

    for index in 0..count {
        let info = archive.file_info(index)?;
        reporter.set_status(&format_template(&m.extract_file, &[&info.name]));
        archive.extract_file(&info, destination)?;
    }

    archive.close();
    Ok(())
}

/// `extractfile`: extract the single entry named `file`.
pub fn extract_file<S, R>(stack: &mut S, reporter: &mut R)
where
    S: HostStack + ?Sized,
    R: Reporter + ?Sized,
{
    let args = ExtractFileArgs::unmarshal(stack);
    let m = &args.messages;

    reporter.set_status(&format_template(
        &m.extracting,
        &[&args.file, &args.source, &args.destination],
    ));
    let outcome = run_extract_file(&args);
    publish(stack, reporter, m, outcome);
}

fn run_extract_file(args: &ExtractFileArgs) -> Result<()> {
    let mut archive = Archive::open(&args.source)?;

    let index = archive
        .find_file(&args.file)
        .ok_or_else(|| ExtractError::EntryNotFound {
            name: args.file.clone(),
            archive: archive.path().to_path_buf(),
        })?;

    let info = archive.file_info(index)?;
    archive.extract_file(&info, Path::new(&args.destination))?;

    archive.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_extract_all_failure_text() {
        let m = ExtractAllMessages::default();
        let err = ExtractError::extraction(
            "x.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            m.failure(&err),
            Failure {
                log: "  Error: Could not extract x.txt".to_string(),
                result: "Could not extract x.txt".to_string(),
            }
        );
    }

    #[test]
    fn test_attributes_failure_text() {
        let err = ExtractError::EntryAttributes {
            index: 1,
            archive: PathBuf::from("a.zip"),
            source: zip::result::ZipError::InvalidArchive("Invalid local file header".into()),
        };
        let expected = Failure {
            log: "Error: Could not get file attributes.".to_string(),
            result: "Could not get file attributes.".to_string(),
        };
        assert_eq!(ExtractAllMessages::default().failure(&err), expected);
        assert_eq!(ExtractFileMessages::default().failure(&err), expected);
    }

    #[test]
    fn test_library_failure_pushes_description() {
        let m = ExtractFileMessages::default();
        let f = m.failure(&ExtractError::library("Invalid Zip archive"));
        assert_eq!(f.log, "  Error: Invalid Zip archive");
        assert_eq!(f.result, "Invalid Zip archive");
    }

    #[test]
    fn test_not_found_text() {
        let m = ExtractFileMessages::default();
        let f = m.failure(&ExtractError::EntryNotFound {
            name: "missing.txt".to_string(),
            archive: PathBuf::from("a.zip"),
        });
        assert_eq!(f.log, "Error: Specified file does not exist in archive.");
        assert_eq!(f.result, "Specified file does not exist in archive.");
    }
}
