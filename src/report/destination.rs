// src/report/destination.rs
// =============================================================================
// Output destination handling for the --file argument.
//
// - No --file, or the literal "console" -> print to stdout
// - Anything else is a file path: parent directories are created, the file
//   is created (or truncated)
// - If that fails, the binary asks the user whether to print to the console
//   instead (a dialoguer y/n prompt on stderr). The question is asked here,
//   before the crawl starts, never from inside the crawl engine.
//
// The opened file lives inside the sink, so it is closed whenever the sink
// is dropped, whichever way the program exits.
// =============================================================================

use crate::error::OutputDestinationError;
use crate::report::sink::{LineSink, OutputFormat, ResultSink};
use std::fs::{self, File};
use console::{style, Term};
use dialoguer::Confirm;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Console,
    File(PathBuf),
}

impl OutputDestination {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("console") => OutputDestination::Console,
            Some(path) => OutputDestination::File(PathBuf::from(path)),
        }
    }

    /// Opens a sink writing to this destination.
    pub fn open(&self, format: OutputFormat) -> Result<Box<dyn ResultSink>, OutputDestinationError> {
        match self {
            OutputDestination::Console => Ok(Box::new(LineSink::console(format))),
            OutputDestination::File(path) => {
                let file = create_output_file(path)?;
                Ok(Box::new(LineSink::file(file, format)))
            }
        }
    }
}

/// Creates (or truncates) the report file, creating missing parent directories.
pub fn create_output_file(path: &Path) -> Result<File, OutputDestinationError> {
    if path.is_dir() {
        return Err(OutputDestinationError::IsDirectory(path.to_path_buf()));
    }

    let io_error = |source: io::Error| OutputDestinationError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    File::create(path).map_err(io_error)
}

/// Asks whether to fall back to the console after `error`.
///
/// Returns true for yes, false for no. Esc, end of input, or a terminal
/// we can't prompt on all count as no.
pub fn confirm_console_fallback(
    error: &OutputDestinationError,
    term: &Term,
) -> Result<bool, dialoguer::Error> {
    term.write_line(&format!(
        "{} {}",
        style("Cannot use output destination:").red(),
        error
    ))?;

    // Piped or redirected stdin: nobody to ask, so don't guess
    if !term.is_term() {
        return Ok(fallback_decision(None));
    }

    let answer = Confirm::new()
        .with_prompt("Print results to the console instead?")
        .interact_on_opt(term)?;

    Ok(fallback_decision(answer))
}

// None means the prompt was dismissed without an answer
fn fallback_decision(answer: Option<bool>) -> bool {
    answer.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg() {
        assert_eq!(OutputDestination::from_arg(None), OutputDestination::Console);
        assert_eq!(OutputDestination::from_arg(Some("console")), OutputDestination::Console);
        assert_eq!(
            OutputDestination::from_arg(Some("out/report.txt")),
            OutputDestination::File(PathBuf::from("out/report.txt"))
        );
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("report.txt");

        let mut sink = OutputDestination::File(path.clone())
            .open(OutputFormat::Text)
            .unwrap();
        sink.finish(&Default::default()).unwrap();
        drop(sink);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Looked at 0 links and found 0 broken"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_output_file(dir.path()).unwrap_err();
        assert!(matches!(err, OutputDestinationError::IsDirectory(_)));
    }

    #[test]
    fn test_directory_then_declined_fallback_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let err = match OutputDestination::File(dir.path().to_path_buf()).open(OutputFormat::Text) {
            Ok(_) => panic!("opening a directory should fail"),
            Err(err) => err,
        };

        assert!(err.to_string().contains("is a directory"));
        assert!(!fallback_decision(Some(false)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_fallback_decision() {
        assert!(fallback_decision(Some(true)));
        assert!(!fallback_decision(Some(false)));
        // Esc or end of input
        assert!(!fallback_decision(None));
    }
}
