//! # Template Placeholders
//!
//! Literal token substitution. Tokens are replaced one kind at a time in
//! [`Placeholder::ALL`] order; every occurrence of a token is replaced and
//! nothing else in the template is interpreted.

use chrono::NaiveDate;

use crate::config::MotionParams;

/// Format of the `[DATE]` placeholder ("January 05, 2024").
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// The fixed set of template tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    MotionTitle,
    Introduction,
    Background,
    LegalStandard,
    Argument,
    Conclusion,
    Relief,
    Date,
    Address,
    Phone,
    Email,
}

impl Placeholder {
    /// Substitution order.
    pub const ALL: [Placeholder; 11] = [
        Placeholder::MotionTitle,
        Placeholder::Introduction,
        Placeholder::Background,
        Placeholder::LegalStandard,
        Placeholder::Argument,
        Placeholder::Conclusion,
        Placeholder::Relief,
        Placeholder::Date,
        Placeholder::Address,
        Placeholder::Phone,
        Placeholder::Email,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::MotionTitle => "[MOTION_TITLE]",
            Placeholder::Introduction => "[INTRODUCTION_CONTENT]",
            Placeholder::Background => "[BACKGROUND_CONTENT]",
            Placeholder::LegalStandard => "[LEGAL_STANDARD_CONTENT]",
            Placeholder::Argument => "[ARGUMENT_CONTENT]",
            Placeholder::Conclusion => "[CONCLUSION_CONTENT]",
            Placeholder::Relief => "[RELIEF_REQUESTED]",
            Placeholder::Date => "[DATE]",
            Placeholder::Address => "[ADDRESS]",
            Placeholder::Phone => "[PHONE]",
            Placeholder::Email => "[EMAIL]",
        }
    }

    /// Text used when the parameter is absent.
    pub fn default_value(&self) -> &'static str {
        match self {
            Placeholder::MotionTitle => "UNTITLED MOTION",
            Placeholder::Address => "[ADDRESS TO BE PROVIDED]",
            Placeholder::Phone => "[PHONE TO BE PROVIDED]",
            Placeholder::Email => "[EMAIL TO BE PROVIDED]",
            _ => "",
        }
    }

    /// Replacement text for this token.
    pub fn value(&self, params: &MotionParams, date: NaiveDate) -> String {
        let field = match self {
            Placeholder::MotionTitle => &params.title,
            Placeholder::Introduction => &params.introduction,
            Placeholder::Background => &params.background,
            Placeholder::LegalStandard => &params.legal_standard,
            Placeholder::Argument => &params.argument,
            Placeholder::Conclusion => &params.conclusion,
            Placeholder::Relief => &params.relief,
            Placeholder::Address => &params.address,
            Placeholder::Phone => &params.phone,
            Placeholder::Email => &params.email,
            Placeholder::Date => return date.format(DATE_FORMAT).to_string(),
        };
        field
            .clone()
            .unwrap_or_else(|| self.default_value().to_string())
    }
}

/// Replaces every placeholder token in `template`.
pub fn fill_template(template: &str, params: &MotionParams, date: NaiveDate) -> String {
    Placeholder::ALL
        .iter()
        .fold(template.to_string(), |document, placeholder| {
            document.replace(placeholder.token(), &placeholder.value(params, date))
        })
}
