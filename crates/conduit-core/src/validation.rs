//! # Validation Module
//!
//! Input validation for platform identifiers and sync routes.
//!
//! Enqueueing a task is permissive by default: any source/target string is
//! accepted. The checks here are opt-in (`enqueue_checked`, or the
//! `strict_platforms` setting) and never change the default behavior.
//!
//! ## Usage
//! ```rust
//! use conduit_core::registry::PlatformRegistry;
//! use conduit_core::validation::{validate_platform_id, validate_route};
//!
//! assert!(validate_platform_id("github").is_ok());
//! assert!(validate_platform_id("Git Hub").is_err());
//!
//! let registry = PlatformRegistry::standard();
//! assert!(validate_route(&registry, &"notion".into(), &"github".into()).is_ok());
//! assert!(validate_route(&registry, &"notion".into(), &"jira".into()).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::registry::PlatformRegistry;
use crate::types::PlatformId;
use crate::MAX_PLATFORM_ID_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates the shape of a platform identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Lowercase ASCII letters, digits, hyphens and underscores only
pub fn validate_platform_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "platform_id".to_string(),
        });
    }

    if id.len() > MAX_PLATFORM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "platform_id".to_string(),
            max: MAX_PLATFORM_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "platform_id".to_string(),
            reason: "must contain only lowercase letters, digits, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Checks that both ends of a sync route are registered platforms.
pub fn validate_route(
    registry: &PlatformRegistry,
    source: &PlatformId,
    target: &PlatformId,
) -> CoreResult<()> {
    for id in [source, target] {
        validate_platform_id(id.as_str())?;
        if !registry.contains(id) {
            return Err(CoreError::UnknownPlatform(id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_id_rules() {
        assert!(validate_platform_id("files").is_ok());
        assert!(validate_platform_id("google_drive-2").is_ok());
        assert!(matches!(
            validate_platform_id(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_platform_id(&"a".repeat(65)),
            Err(ValidationError::TooLong { max: 64, .. })
        ));
        assert!(matches!(
            validate_platform_id("GitHub"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_route_requires_registered_platforms() {
        let registry = PlatformRegistry::standard();
        assert!(validate_route(&registry, &"linear".into(), &"email".into()).is_ok());

        let err = validate_route(&registry, &"jira".into(), &"email".into()).unwrap_err();
        assert!(matches!(err, CoreError::UnknownPlatform(ref id) if id == "jira"));

        let err = validate_route(&registry, &"linear".into(), &"".into()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
