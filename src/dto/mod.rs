pub mod admin_dto;
pub mod quiz_dto;
pub mod session_dto;
pub mod temp_grid_dto;
pub mod ticket_dto;

use validator::ValidationError;

/// Required string fields must survive trimming.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Quiz codes: 4-32 characters, letters, digits, underscores, or dashes.
pub(crate) fn valid_quiz_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    let shape_ok = (4..=32).contains(&code.len())
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !shape_ok {
        return Err(ValidationError::new("quiz_code"));
    }
    Ok(())
}

/// Exactly 4 options, none blank after trimming.
pub(crate) fn four_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() != 4 || options.iter().any(|option| option.trim().is_empty()) {
        return Err(ValidationError::new("options"));
    }
    Ok(())
}
