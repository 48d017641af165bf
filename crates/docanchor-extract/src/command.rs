use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::registry::TextExtractor;

/// Extracts text by piping the document through an external program.
///
/// The program receives the document on stdin and must write UTF-8 text to
/// stdout, e.g. `pdftotext -layout - -` or `docx2txt - -`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandExtractor {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn failure(&self, message: impl std::fmt::Display) -> ExtractError {
        ExtractError::ExtractionFailure(format!("{}: {message}", self.program))
    }
}

impl TextExtractor for CommandExtractor {
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String> {
        debug!(program = %self.program, args = ?self.args, "running extractor");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.failure("stdin unavailable"))?;

        // Feed stdin from a separate thread so a large document cannot
        // deadlock against a full stdout pipe.
        let (written, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(bytes));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output.map_err(|e| self.failure(e))?;

        match written {
            Ok(Ok(())) => {}
            // The program may legitimately stop reading early.
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(self.failure(e)),
            Err(_) => return Err(self.failure("stdin writer panicked")),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(program = %self.program, status = %output.status, "extractor failed");
            return Err(self.failure(format!("{} ({})", output.status, stderr.trim())));
        }

        String::from_utf8(output.stdout).map_err(|_| self.failure("output is not UTF-8 text"))
    }
}
