use crate::domain::model::Cep;
use crate::utils::error::{CepError, InvalidCepReason, Result};

pub const CEP_DIGITS: usize = 8;

/// Strip every non-digit from `raw` and require exactly eight digits to remain.
///
/// Only the digit count is checked; `"72.006-206"`, `" 72006206 "` and
/// `"7a2b006206"` all normalize to `72006206`.
pub fn normalize(raw: Option<&str>) -> Result<Cep> {
    let raw = raw.ok_or(CepError::invalid(InvalidCepReason::Missing))?;

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        CEP_DIGITS => Ok(Cep::from_digits(digits)),
        n if n < CEP_DIGITS => Err(CepError::invalid(InvalidCepReason::TooShort { digits: n })),
        n => Err(CepError::invalid(InvalidCepReason::TooLong { digits: n })),
    }
}
