//! Table-driven request validation.
//!
//! Each resource declares a [`RuleSet`]: one [`FieldRule`] row per input
//! field. The same checks (presence, trimming, length bounds, enumerated
//! values) run for every field, so handlers never hand-roll them.

use crate::domain::Category;
use crate::error::DomainError;

/// Minimum length of a secret phrase, in characters.
pub const MIN_SECRET_LENGTH: usize = 4;
/// Maximum length of a secret phrase, in characters.
pub const MAX_SECRET_LENGTH: usize = 256;
/// Maximum length of post text, in characters.
pub const MAX_POST_LENGTH: usize = 1000;
/// Maximum length of a comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Values a field may take.
#[derive(Debug, Clone, Copy)]
pub enum Allowed {
    Any,
    /// Only these values; anything else is turned into an error by the function.
    OneOf(&'static [&'static str], fn(String) -> DomainError),
}

/// Validation rule for a single field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    /// Human-readable name used in error messages.
    pub label: &'static str,
    pub required: bool,
    pub trim: bool,
    pub min_len: usize,
    pub max_len: Option<usize>,
    pub allowed: Allowed,
}

impl FieldRule {
    /// Check a raw value. Returns the normalized value, or `None` when an
    /// optional field is absent or blank.
    pub fn apply(&self, value: Option<&str>) -> Result<Option<String>, DomainError> {
        let Some(raw) = value else {
            return if self.required {
                Err(DomainError::Validation(format!("{} is required.", self.label)))
            } else {
                Ok(None)
            };
        };

        let value = if self.trim { raw.trim() } else { raw };
        let len = value.chars().count();

        if len == 0 {
            if !self.required {
                return Ok(None);
            }
            return Err(DomainError::Validation(format!(
                "{} must not be empty.",
                self.label
            )));
        }
        if len < self.min_len {
            return Err(DomainError::Validation(format!(
                "{} must be at least {} characters.",
                self.label, self.min_len
            )));
        }
        if let Some(max) = self.max_len {
            if len > max {
                return Err(DomainError::Validation(format!(
                    "{} cannot exceed {} characters.",
                    self.label, max
                )));
            }
        }
        if let Allowed::OneOf(values, reject) = self.allowed {
            if !values.contains(&value) {
                return Err(reject(value.to_string()));
            }
        }

        Ok(Some(value.to_string()))
    }
}

/// The rules for one resource.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet(pub &'static [FieldRule]);

impl RuleSet {
    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.0.iter().find(|r| r.field == field)
    }

    /// Validate `field`. Fields without a rule pass through untouched.
    pub fn check(&self, field: &str, value: Option<&str>) -> Result<Option<String>, DomainError> {
        match self.rule(field) {
            Some(rule) => rule.apply(value),
            None => Ok(value.map(str::to_string)),
        }
    }

    /// Validate a field that must end up with a value.
    pub fn require(&self, field: &str, value: Option<&str>) -> Result<String, DomainError> {
        self.check(field, value)?
            .ok_or_else(|| DomainError::Validation(format!("{field} is required.")))
    }
}

/// Fields of a post on create.
pub const POST_RULES: RuleSet = RuleSet(&[
    FieldRule {
        field: "text",
        label: "Post text",
        required: true,
        trim: true,
        min_len: 1,
        max_len: Some(MAX_POST_LENGTH),
        allowed: Allowed::Any,
    },
    FieldRule {
        field: "secret",
        label: "Secret code",
        required: true,
        trim: false,
        min_len: MIN_SECRET_LENGTH,
        max_len: Some(MAX_SECRET_LENGTH),
        allowed: Allowed::Any,
    },
    FieldRule {
        field: "category",
        label: "Category",
        required: false,
        trim: true,
        min_len: 1,
        max_len: None,
        allowed: Allowed::OneOf(Category::NAMES, DomainError::InvalidCategory),
    },
    FieldRule {
        field: "authorId",
        label: "Author",
        required: true,
        trim: true,
        min_len: 1,
        max_len: None,
        allowed: Allowed::Any,
    },
]);

/// Fields accepted by an authorized edit or delete.
///
/// The secret only has to be present here; a wrong one is a failed
/// verification, not a validation error.
pub const POST_EDIT_RULES: RuleSet = RuleSet(&[
    FieldRule {
        field: "secret",
        label: "Secret code",
        required: true,
        trim: false,
        min_len: 1,
        max_len: Some(MAX_SECRET_LENGTH),
        allowed: Allowed::Any,
    },
    FieldRule {
        field: "text",
        label: "Post text",
        required: false,
        trim: true,
        min_len: 1,
        max_len: Some(MAX_POST_LENGTH),
        allowed: Allowed::Any,
    },
    FieldRule {
        field: "category",
        label: "Category",
        required: false,
        trim: true,
        min_len: 1,
        max_len: None,
        allowed: Allowed::OneOf(Category::NAMES, DomainError::InvalidCategory),
    },
]);

/// Fields of a comment.
pub const COMMENT_RULES: RuleSet = RuleSet(&[FieldRule {
    field: "text",
    label: "Comment text",
    required: true,
    trim: true,
    min_len: 1,
    max_len: Some(MAX_COMMENT_LENGTH),
    allowed: Allowed::Any,
}]);
