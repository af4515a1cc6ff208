use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;

pub const MAX_PROFILE_PICTURE_BYTES: usize = 5 * 1024 * 1024;

/// Letters and whitespace only. The empty string passes; emptiness is
/// checked separately so the two failures get different messages.
pub fn is_letters_and_spaces(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

pub fn is_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// `validator` hook for required text that must not be only whitespace.
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Accepts `YYYY-MM` as produced by month pickers.
pub fn is_month(value: &str) -> bool {
    value.len() == 7 && NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    NotAnImage,
    TooLarge,
}

/// Checks an inline `data:image/<kind>;base64,<payload>` picture.
pub fn check_image_data_url(value: &str) -> Result<(), ImageError> {
    let rest = value.strip_prefix("data:image/").ok_or(ImageError::NotAnImage)?;
    let (_, payload) = rest.split_once(";base64,").ok_or(ImageError::NotAnImage)?;
    // Cheap upper bound before decoding.
    if payload.len() / 4 * 3 > MAX_PROFILE_PICTURE_BYTES + 3 {
        return Err(ImageError::TooLarge);
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| ImageError::NotAnImage)?;
    if bytes.len() > MAX_PROFILE_PICTURE_BYTES {
        return Err(ImageError::TooLarge);
    }
    Ok(())
}
