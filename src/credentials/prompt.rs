use super::MfaPrompt;
use crate::error::{ConsoleError, Result};
use std::io::{self, BufRead, Write};

/// Reads MFA codes from stdin, prompting on stderr
pub struct ConsolePrompt;

impl MfaPrompt for ConsolePrompt {
    fn prompt(&self, mfa_serial: &str) -> Result<String> {
        eprint!("Enter MFA code for {}: ", mfa_serial);
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;

        validate_code(&input)
    }
}

fn validate_code(input: &str) -> Result<String> {
    let code = input.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConsoleError::InvalidMfaCode);
    }
    Ok(code.to_string())
}
