use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejections raised while building a `GenerationRequest`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("draft cannot be empty")]
    EmptyDraft,

    #[error("one of 'type' or 'contentType' is required")]
    MissingCategory,

    #[error("only one of 'type' or 'contentType' may be set")]
    AmbiguousCategory,

    #[error("category scheme '{given}' is not enabled (expected '{expected}')")]
    SchemeMismatch {
        given: CategoryScheme,
        expected: CategoryScheme,
    },
}

/// Free-form style tag sent as `"type"`. Unknown tags pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StyleTag {
    Detailed,
    Creative,
    Concise,
    Other(String),
}

impl From<String> for StyleTag {
    fn from(value: String) -> Self {
        match value.as_str() {
            "detailed" => StyleTag::Detailed,
            "creative" => StyleTag::Creative,
            "concise" => StyleTag::Concise,
            _ => StyleTag::Other(value),
        }
    }
}

impl From<StyleTag> for String {
    fn from(tag: StyleTag) -> Self {
        match tag {
            StyleTag::Detailed => "detailed".to_string(),
            StyleTag::Creative => "creative".to_string(),
            StyleTag::Concise => "concise".to_string(),
            StyleTag::Other(tag) => tag,
        }
    }
}

/// Content domain sent as the integer `"contentType"`.
///
/// Codes are append-only; codes this build does not know survive as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum ContentType {
    Restaurant,
    Programming,
    Travel,
    Other(u32),
}

impl From<u32> for ContentType {
    fn from(code: u32) -> Self {
        match code {
            0 => ContentType::Restaurant,
            1 => ContentType::Programming,
            2 => ContentType::Travel,
            other => ContentType::Other(other),
        }
    }
}

impl From<ContentType> for u32 {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Restaurant => 0,
            ContentType::Programming => 1,
            ContentType::Travel => 2,
            ContentType::Other(code) => code,
        }
    }
}

/// Which category field a deployment sends. Fixed at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryScheme {
    #[default]
    Style,
    ContentType,
}

impl fmt::Display for CategoryScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryScheme::Style => write!(f, "style"),
            CategoryScheme::ContentType => write!(f, "content_type"),
        }
    }
}

/// The single categorical field of a request.
///
/// Flattened into the request body as either `"type": "<tag>"` or
/// `"contentType": <code>`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "type")]
    Style(StyleTag),
    #[serde(rename = "contentType")]
    Content(ContentType),
}

impl Category {
    /// Builds the category from the two optional wire fields. Exactly one
    /// must be present.
    pub fn from_fields(
        style: Option<StyleTag>,
        content: Option<ContentType>,
    ) -> Result<Self, RequestError> {
        match (style, content) {
            (Some(style), None) => Ok(Category::Style(style)),
            (None, Some(content)) => Ok(Category::Content(content)),
            (None, None) => Err(RequestError::MissingCategory),
            (Some(_), Some(_)) => Err(RequestError::AmbiguousCategory),
        }
    }

    pub fn scheme(&self) -> CategoryScheme {
        match self {
            Category::Style(_) => CategoryScheme::Style,
            Category::Content(_) => CategoryScheme::ContentType,
        }
    }
}

/// Body of `POST {base}/api/blog/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    draft: String,
    #[serde(flatten)]
    category: Category,
}

impl GenerationRequest {
    /// Trims the draft; an empty draft is rejected.
    pub fn new(draft: &str, category: Category) -> Result<Self, RequestError> {
        let draft = draft.trim();
        if draft.is_empty() {
            return Err(RequestError::EmptyDraft);
        }
        Ok(Self {
            draft: draft.to_string(),
            category,
        })
    }

    /// Like `new`, but also rejects a category outside the active scheme.
    pub fn for_scheme(
        draft: &str,
        category: Category,
        scheme: CategoryScheme,
    ) -> Result<Self, RequestError> {
        if category.scheme() != scheme {
            return Err(RequestError::SchemeMismatch {
                given: category.scheme(),
                expected: scheme,
            });
        }
        Self::new(draft, category)
    }
}

/// Successful reply from the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub text: String,
    pub status: String,
}
