use crate::utils::error::{QuizError, Result};
use url::Url;

/// Schemes a MongoDB connection string may start with.
pub const CONNECTION_STRING_SCHEMES: [&str; 2] = ["mongodb", "mongodb+srv"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> QuizError {
    QuizError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Checks that `url_str` parses and uses one of `schemes`.
pub fn validate_url(field_name: &str, url_str: &str, schemes: &[&str]) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("not a valid data API URL: {}", e)))?;
    if !schemes.contains(&url.scheme()) {
        return Err(invalid(
            field_name,
            url_str,
            format!(
                "data API URLs must use {}, not {}",
                schemes.join(" or "),
                url.scheme()
            ),
        ));
    }
    Ok(())
}

/// Only the scheme is checked here; the driver parses the rest, including
/// multi-host seed lists that are not valid URLs.
pub fn validate_connection_string(field_name: &str, uri: &str) -> Result<()> {
    match uri.split_once("://") {
        Some((scheme, rest))
            if CONNECTION_STRING_SCHEMES.contains(&scheme) && !rest.trim().is_empty() =>
        {
            Ok(())
        }
        _ => Err(invalid(
            field_name,
            uri,
            "expected a mongodb:// or mongodb+srv:// connection string",
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "catalog file path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "path contains null bytes"));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        _ => Err(invalid(
            field_name,
            file,
            format!(
                "movie catalogs are read from .{} files",
                allowed_extensions.join(", .")
            ),
        )),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| QuizError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "cannot be blank"));
    }
    Ok(())
}
