use std::process::ExitCode;

/// Error conditions that abort a parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// To trigger: -missing
    #[error("Invalid option: {0}")]
    UnknownOption(String),
    /// To trigger: a value option as the last token, or `name=`
    #[error("Option {option} requires {required} parameters, but {found} given.")]
    ArityMismatch {
        option: String,
        required: usize,
        found: usize,
    },
    /// To trigger: count abc
    #[error("Invalid value '{value}' for option {option}")]
    InvalidOptionValue { option: String, value: String },
    /// To trigger: a plain token with no remaining-argument sink registered
    #[error("Invalid argument: {0}")]
    UnexpectedArgument(String),
}

impl From<ParseError> for ExitCode {
    fn from(err: ParseError) -> ExitCode {
        eprintln!("{err}");
        ExitCode::FAILURE
    }
}
