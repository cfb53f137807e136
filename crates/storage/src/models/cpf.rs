use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CPF_LEN: usize = 11;

/// A Brazilian individual taxpayer number (CPF), normalized to its 11 digits.
///
/// Construction always validates the two trailing check digits, so holding a
/// `Cpf` means the number is well formed. Punctuation in the input
/// (`111.444.777-35`) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpfError {
    #[error("CPF must have 11 digits, found {0}")]
    WrongLength(usize),

    #[error("CPF cannot be a single repeated digit")]
    RepeatedDigits,

    #[error("CPF check digits do not match")]
    CheckDigitMismatch,
}

impl Cpf {
    pub fn parse(raw: &str) -> Result<Self, CpfError> {
        let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();

        if digits.len() != CPF_LEN {
            return Err(CpfError::WrongLength(digits.len()));
        }
        if digits.iter().all(|d| *d == digits[0]) {
            return Err(CpfError::RepeatedDigits);
        }
        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(CpfError::CheckDigitMismatch);
        }

        Ok(Self(digits.iter().map(|d| char::from_digit(*d, 10).unwrap_or('0')).collect()))
    }

    /// Completes a 9-digit base with its two check digits.
    pub fn from_base(base: &str) -> Result<Self, CpfError> {
        let mut digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != 9 {
            return Err(CpfError::WrongLength(digits.len()));
        }
        digits.push(check_digit(&digits));
        digits.push(check_digit(&digits));

        let full: String = digits.iter().map(|d| char::from_digit(*d, 10).unwrap_or('0')).collect();
        Self::parse(&full)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `XXX.XXX.XXX-XX`
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

/// Modulo-11 check digit over `digits`, weighted from `len + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top_weight - i as u32))
        .sum();

    match 11 - sum % 11 {
        10 | 11 => 0,
        digit => digit,
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = CpfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
