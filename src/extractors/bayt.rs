use async_trait::async_trait;

use crate::error::AppError;
use crate::extractors::{DetailExtractor, FieldRule, FieldRules};

pub const NAME: &str = "Bayt";

/// Bayt lists location parts (city, country) as separate links.
pub struct Bayt {
    rules: FieldRules,
}

impl Bayt {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            rules: FieldRules {
                title: FieldRule::text("div.media-d > div > div > h1.h3")?,
                description: FieldRule::text("div.t-break > p")?,
                company: FieldRule::text("div.p0 > ul.p0t > li > a.t-default")?,
                location: FieldRule::joined("div > ul > li > span > a.t-mute")?,
                date_posted: FieldRule::text("div.m10y > span.u-none")?,
            },
        })
    }
}

#[async_trait]
impl DetailExtractor for Bayt {
    fn name(&self) -> &str {
        NAME
    }

    fn rules(&self) -> &FieldRules {
        &self.rules
    }
}
