use std::{fmt::Display, str::FromStr};

use rand::{distributions::Uniform, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a verification code.
pub const CODE_LENGTH: usize = 6;

/// A one-time verification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code {
    digits: [u8; CODE_LENGTH],
}

impl Code {
    /// Generate a random code.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let digit_dist = Uniform::from(0..=9);
        let mut digits = [0_u8; CODE_LENGTH];
        for digit in digits.iter_mut() {
            *digit = rng.sample(digit_dist);
        }
        Self { digits }
    }
}

impl Display for Code {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for digit in self.digits {
            write!(formatter, "{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CODE_LENGTH {
            return Err(ParseCodeError::Length(s.len()));
        }
        let mut digits = [0_u8; CODE_LENGTH];
        for (digit, c) in digits.iter_mut().zip(s.chars()) {
            *digit = c
                .to_digit(10)
                .ok_or(ParseCodeError::Digit(c))?
                .try_into()
                .unwrap(); // Safe as a decimal digit always fits a u8.
        }
        Ok(Self { digits })
    }
}

impl TryFrom<String> for Code {
    type Error = ParseCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

#[derive(Debug, Error)]
pub enum ParseCodeError {
    #[error("expected {CODE_LENGTH} digits, got {0}")]
    Length(usize),
    #[error("invalid digit {0}")]
    Digit(char),
}
