use colored::*;
use dashboard_core::error::{TransportError, ValidationError};
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    message: String,

    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    Success,
    General,
    Misuse,
    Network,
    Input,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    NetworkError = 3,
    InputError = 4,
}

pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

const COMMANDS: [&str; 6] = ["product", "taxes", "order", "money", "config", "completions"];

impl CliError {
    fn with_category(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a success "error" (for consistent handling)
    pub fn success(message: &str) -> Self {
        Self::with_category(message, ErrorCategory::Success)
    }

    pub fn general(message: &str) -> Self {
        Self::with_category(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::with_category(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'dashboard --help' for usage information".to_string());

        if message.contains("Unknown command")
            && let Some(cmd) = message.split(':').nth(1).map(|s| s.trim())
            && let Some(known) = COMMANDS
                .iter()
                .find(|known| levenshtein_distance(cmd, known) <= 2)
        {
            error
                .suggestions
                .insert(0, format!("Did you mean '{known}'?"));
        }

        error
    }

    pub fn network(message: &str) -> Self {
        let mut error = Self::with_category(message, ErrorCategory::Network);
        error.suggestions = vec![
            "Check your internet connection".to_string(),
            "Verify the API URL with 'dashboard config get client.api_url'".to_string(),
            "Try again later".to_string(),
        ];
        error
    }

    /// Create an error for unusable input such as a malformed change file
    pub fn input(message: &str) -> Self {
        let mut error = Self::with_category(message, ErrorCategory::Input);

        if message.contains("not found") {
            error
                .suggestions
                .push("Check if the file exists".to_string());
        } else if message.contains("permission") || message.contains("denied") {
            error.suggestions.push("Check file permissions".to_string());
        }

        error
    }

    /// Create an error from an IO error
    pub fn from_io_error(error: io::Error, path: &str) -> Self {
        let message = format!("IO error on '{path}': {error}");
        let mut cli_error = match error.kind() {
            io::ErrorKind::NotFound => Self::input(&message),
            io::ErrorKind::PermissionDenied => Self::input(&message),
            io::ErrorKind::TimedOut => Self::network(&message),
            _ => Self::general(&message),
        };

        cli_error.source = Some(Box::new(error));
        cli_error
            .context
            .push(("path".to_string(), path.to_string()));
        cli_error
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::Success => ExitCode::Success,
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Network => ExitCode::NetworkError,
            ErrorCategory::Input => ExitCode::InputError,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::Success => "Success",
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Network => "Network Error",
            ErrorCategory::Input => "Input Error",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::Success => self.label().green(),
            ErrorCategory::Misuse => self.label().yellow(),
            _ => self.label().red(),
        };

        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

impl From<dashboard_core::Error> for CliError {
    fn from(error: dashboard_core::Error) -> Self {
        let message = error.to_string();
        let cli_error = match &error {
            dashboard_core::Error::Transport(TransportError::GraphQl { .. })
            | dashboard_core::Error::Transport(TransportError::Decode { .. }) => {
                Self::general(&message)
            }
            dashboard_core::Error::Transport(TransportError::ServerError { status, .. })
                if (400..500).contains(status) =>
            {
                Self::general(&message)
                    .with_suggestion("Check the API token with 'dashboard config get client.auth_token'")
            }
            dashboard_core::Error::Transport(_) => Self::network(&message),
            dashboard_core::Error::Validation(ValidationError::NotFound { .. }) => {
                Self::input(&message)
            }
            dashboard_core::Error::Validation(_) => Self::misuse(&message),
        };
        cli_error.with_source(Box::new(error))
    }
}

/// Convert anyhow errors to CLI errors, keeping the category of a core error
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<CliError>() {
            Ok(cli_error) => return cli_error,
            Err(error) => error,
        };
        let message = format!("{error:#}");
        match error.downcast::<dashboard_core::Error>() {
            Ok(core) => {
                let mut cli_error = Self::from(core);
                cli_error.message = message;
                cli_error
            }
            Err(error) => match error.downcast::<io::Error>() {
                Ok(io_error) => {
                    let mut cli_error = Self::input(&message);
                    cli_error.source = Some(Box::new(io_error));
                    cli_error
                }
                Err(_) => Self::general(&message),
            },
        }
    }
}

/// Simple Levenshtein distance for command suggestions
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
        *cell = j;
    }

    for (i, c1) in s1_chars.iter().enumerate() {
        let i1 = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let j1 = j + 1;
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i1][j1] = std::cmp::min(
                std::cmp::min(matrix[i][j1] + 1, matrix[i1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }

    matrix[len1][len2]
}
