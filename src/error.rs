//! Application error carrying a process exit code.
//!
//! Exit codes:
//! - `2`: input/output problems (missing directory, unreadable CSV, export)
//! - `3`: no usable records after loading and validation
//! - `4`: chart rendering failed

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input/output failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Nothing left to aggregate (exit code 3).
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Chart drawing or PNG encoding failure (exit code 4).
    pub fn render(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_exit_codes() {
        assert_eq!(AppError::io("x").exit_code(), 2);
        assert_eq!(AppError::no_data("x").exit_code(), 3);
        assert_eq!(AppError::render("x").exit_code(), 4);
        assert_eq!(AppError::render("boom").to_string(), "boom");
    }
}
