//! Status line and user-facing notices shared by the wizard and the CLI

use std::fmt;
use std::path::Path;

use crate::pipeline::ConvertError;

/// Conversion state shown in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionStatus {
    #[default]
    Ready,
    Converting,
    Completed,
    Failed,
}

impl ConversionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConversionStatus::Ready => "Ready",
            ConversionStatus::Converting => "Converting...",
            ConversionStatus::Completed => "Conversion completed!",
            ConversionStatus::Failed => "Error during conversion",
        }
    }

    /// Only `Converting` blocks a new conversion
    pub fn is_idle(self) -> bool {
        self != ConversionStatus::Converting
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A message box shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success { message: String },
    Error { message: String },
    UnsupportedFormat { message: String },
}

impl Notice {
    pub fn converted(output: &Path) -> Self {
        Notice::Success {
            message: success_message(output),
        }
    }

    pub fn failed(err: &ConvertError) -> Self {
        Notice::Error {
            message: error_message(err),
        }
    }

    pub fn unsupported(path: &Path) -> Self {
        let mut message = UNSUPPORTED_MESSAGE.to_string();
        if let Some(ext) = path.extension() {
            message.push_str(&format!("\nExtension: .{}", ext.to_string_lossy()));
        }
        Notice::UnsupportedFormat { message }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notice::Success { .. } => "Success",
            Notice::Error { .. } => "Error",
            Notice::UnsupportedFormat { .. } => "Unsupported Format",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success { message }
            | Notice::Error { message }
            | Notice::UnsupportedFormat { message } => message,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Success { .. })
    }
}

pub const UNSUPPORTED_MESSAGE: &str = "This file format is not supported for conversion.";

pub fn success_message(output: &Path) -> String {
    format!("File converted successfully!\nSaved as: {}", output.display())
}

pub fn error_message(err: &ConvertError) -> String {
    format!("An error occurred during conversion: {}", err)
}
