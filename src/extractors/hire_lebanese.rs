use async_trait::async_trait;

use crate::error::AppError;
use crate::extractors::{DetailExtractor, FieldRule, FieldRules};

pub const NAME: &str = "Hire Lebanese";

pub struct HireLebanese {
    rules: FieldRules,
}

impl HireLebanese {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            rules: FieldRules {
                title: FieldRule::text("div.col-sm-12 > h3 > span.h2")?,
                description: FieldRule::text(
                    "div.white-div > div.padding-top > div.col-sm-12 > #description",
                )?,
                company: FieldRule::text("#company")?,
                location: FieldRule::text("#location")?,
                date_posted: FieldRule::text("#date")?,
            },
        })
    }
}

#[async_trait]
impl DetailExtractor for HireLebanese {
    fn name(&self) -> &str {
        NAME
    }

    fn rules(&self) -> &FieldRules {
        &self.rules
    }
}
