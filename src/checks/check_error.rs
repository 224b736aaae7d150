use core::fmt;

/// Reasons a check could not produce a verdict. Both are reported as `UNKNOWN`.
#[derive(Debug)]
pub enum CheckError {
    /// Bad threshold, missing parameter, unreadable configuration or credentials file.
    Configuration(ohno::AppError),

    /// Connection or query failure, missing row, or data the check cannot interpret.
    DataAccess(ohno::AppError),
}

impl CheckError {
    /// Short description of the failure class, used in log messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration error",
            Self::DataAccess(_) => "data access error",
        }
    }

    /// The underlying error, including any enrichment and captured backtrace.
    #[must_use]
    pub const fn error(&self) -> &ohno::AppError {
        match self {
            Self::Configuration(e) | Self::DataAccess(e) => e,
        }
    }
}

/// Renders the error message on a single line, without enrichment or backtrace.
impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.error().message();
        for (index, part) in message.split_whitespace().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

impl core::error::Error for CheckError {}
