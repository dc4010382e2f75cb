use std::fs;
use std::path::Path;

use lite_booth_application::ApplicationError;
use lite_booth_domain::FilterVector;

/// Reads a saved filter vector. Missing channels fall back to identity.
///
/// ```json
/// { "brightness": 110, "sepia": 30, "hueRotate": 5 }
/// ```
pub fn load_recipe(path: &Path) -> Result<FilterVector, ApplicationError> {
    let text = fs::read_to_string(path).map_err(|error| match error.kind() {
        std::io::ErrorKind::NotFound => {
            ApplicationError::NotFound(format!("recipe not found: {}", path.display()))
        }
        _ => ApplicationError::Io(error.to_string()),
    })?;
    parse_recipe(&text)
}

pub fn parse_recipe(text: &str) -> Result<FilterVector, ApplicationError> {
    let filters: FilterVector = serde_json::from_str(text)
        .map_err(|error| ApplicationError::InvalidInput(format!("invalid recipe: {error}")))?;
    filters.validate()?;
    Ok(filters)
}
