//! Form-level checks run before anything reaches the card store.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{CardChanges, ColumnId, NewCard, Priority};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<&'static str, String> {
        &self.0
    }

    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Tags arrive either as a list or as the comma-separated text of the card form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Text(String),
}

impl TagsInput {
    pub fn normalize(self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => clean_tags(tags),
            TagsInput::Text(text) => parse_tags(&text),
        }
    }
}

/// Splits comma-separated tag text, trimming entries and dropping empty ones.
pub fn parse_tags(text: &str) -> Vec<String> {
    clean_tags(text.split(','))
}

fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn check_title(title: &str, errors: &mut FieldErrors) -> String {
    let title = title.trim();
    if title.is_empty() {
        errors.add("title", "Card title is required");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!("Card title must be at most {} characters", TITLE_MAX_CHARS),
        );
    }
    title.to_string()
}

fn check_description(description: &str, errors: &mut FieldErrors) -> String {
    let description = description.trim();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.add(
            "description",
            format!(
                "Card description must be at most {} characters",
                DESCRIPTION_MAX_CHARS
            ),
        );
    }
    description.to_string()
}

/// Input of the "add card" form. The target column comes from where the form was opened.
#[derive(Debug, Clone, Deserialize)]
pub struct CardForm {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Option<TagsInput>,
}

impl CardForm {
    pub fn validate(self, status: ColumnId) -> Result<NewCard, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = check_title(&self.title, &mut errors);
        let description = self
            .description
            .map(|d| check_description(&d, &mut errors));

        errors.into_result(NewCard {
            title,
            description,
            status,
            priority: self.priority,
            tags: self.tags.map(TagsInput::normalize),
        })
    }
}

/// Input of the edit form. Only the fields present are changed; status is not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Option<TagsInput>,
}

impl CardEdit {
    pub fn validate(self) -> Result<CardChanges, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = self.title.map(|t| check_title(&t, &mut errors));
        let description = self
            .description
            .map(|d| check_description(&d, &mut errors));

        errors.into_result(CardChanges {
            title,
            description,
            status: None,
            priority: self.priority,
            tags: self.tags.map(TagsInput::normalize),
        })
    }
}
