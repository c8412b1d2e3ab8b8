// Detail extractors: one strategy per known job board.
// Each maps elements of a detail page to Job fields through a set of field rules.

pub mod bayt;
pub mod hire_lebanese;

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::error::AppError;
use crate::fetch::Fetcher;
use crate::models::job::{Job, JobFields};

/// Compile a CSS selector, reporting the offending source on failure.
pub fn compile(selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector).map_err(|_| AppError::Selector(selector.to_string()))
}

/// How one Job field is read from a detail page.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Text of every matched element, concatenated and trimmed.
    Text(Selector),
    /// Each matched element's trimmed text, joined with single spaces.
    /// Used for fields spread over several elements, like a location list.
    Joined(Selector),
}

impl FieldRule {
    pub fn text(selector: &str) -> Result<Self, AppError> {
        Ok(FieldRule::Text(compile(selector)?))
    }

    pub fn joined(selector: &str) -> Result<Self, AppError> {
        Ok(FieldRule::Joined(compile(selector)?))
    }

    /// Read the field. No match yields an empty string.
    pub fn read(&self, document: &Html) -> String {
        match self {
            FieldRule::Text(selector) => document
                .select(selector)
                .flat_map(|el| el.text())
                .collect::<String>()
                .trim()
                .to_string(),
            FieldRule::Joined(selector) => document
                .select(selector)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string(),
        }
    }
}

/// Field rules for every Job field a detail page provides.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub title: FieldRule,
    pub description: FieldRule,
    pub company: FieldRule,
    pub location: FieldRule,
    pub date_posted: FieldRule,
}

impl FieldRules {
    pub fn apply(&self, document: &Html) -> JobFields {
        JobFields {
            title: self.title.read(document),
            description: self.description.read(document),
            company: self.company.read(document),
            location: self.location.read(document),
            date_posted: self.date_posted.read(document),
        }
    }
}

/// Trait that all detail extractors must implement.
#[async_trait]
pub trait DetailExtractor: Send + Sync {
    /// Site name this strategy handles, matching `Site::name`.
    fn name(&self) -> &str;

    fn rules(&self) -> &FieldRules;

    /// Map a parsed detail page to raw field values.
    fn parse(&self, document: &Html) -> JobFields {
        self.rules().apply(document)
    }

    /// Fetch a detail page and turn it into a normalized Job with the given id.
    /// A failed fetch fails the whole extraction.
    async fn extract(&self, fetcher: &Fetcher, detail_url: &str, id: u64) -> Result<Job, AppError> {
        let html = fetcher.get_html(detail_url).await?;
        let fields = self.parse(&Html::parse_document(&html));
        Ok(fields.into_job(id, detail_url).normalized())
    }
}

/// Look up the strategy for a site name.
pub fn get_extractor(name: &str) -> Result<Arc<dyn DetailExtractor>, AppError> {
    match name {
        hire_lebanese::NAME => Ok(Arc::new(hire_lebanese::HireLebanese::new()?)),
        bayt::NAME => Ok(Arc::new(bayt::Bayt::new()?)),
        _ => Err(AppError::Config(format!("No extractor defined for site '{name}'"))),
    }
}
