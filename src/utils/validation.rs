use crate::utils::error::{MapperError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MapperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MapperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(MapperError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(MapperError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MapperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Checks that a phrase list is non-empty, has no blank entries and no duplicates.
pub fn validate_phrase_list(field_name: &str, phrases: &[String]) -> Result<()> {
    if phrases.is_empty() {
        return Err(MapperError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one candidate phrase is required".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for phrase in phrases {
        validate_non_empty_string(field_name, phrase)?;
        if !seen.insert(phrase.as_str()) {
            return Err(MapperError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: phrase.clone(),
                reason: "Duplicate candidate phrase".to_string(),
            });
        }
    }

    Ok(())
}
