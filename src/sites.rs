// Site registry: the job boards scraped on every aggregation, resolved once at startup.

use std::collections::HashSet;
use std::sync::Arc;

use scraper::Selector;
use url::Url;

use crate::error::AppError;
use crate::extractors::{DetailExtractor, bayt, compile, get_extractor, hire_lebanese};
use crate::models::site::{SearchUrl, Site};

/// The built-in job boards, in scrape order.
pub fn builtin_sites() -> Vec<Site> {
    vec![
        Site {
            name: hire_lebanese::NAME.to_string(),
            base_url: "https://hirelebanese.com/".to_string(),
            search_url: SearchUrl::Placeholder {
                template: "https://hirelebanese.com/searchresults.aspx?order=date&keywords=#&category=&type=&duration=&country=117,241,258,259,260&state=&city=&emp=&pg=1&s=-1&top=0".to_string(),
                placeholder: "#".to_string(),
            },
            link_selector: "div.panel-title > h4 > a".to_string(),
        },
        Site {
            name: bayt::NAME.to_string(),
            base_url: "https://www.bayt.com".to_string(),
            search_url: SearchUrl::Slug {
                prefix: "https://www.bayt.com/en/lebanon/jobs/".to_string(),
                suffix: "-jobs".to_string(),
            },
            link_selector: "div > ul > li > div > h2 > a".to_string(),
        },
    ]
}

/// A site with its base URL, link selector and extraction strategy resolved.
pub struct RegisteredSite {
    pub site: Site,
    pub base_url: Url,
    pub link_selector: Selector,
    pub extractor: Arc<dyn DetailExtractor>,
}

impl RegisteredSite {
    pub fn new(site: Site) -> Result<Self, AppError> {
        let extractor = get_extractor(&site.name)?;
        let base_url = Url::parse(&site.base_url).map_err(|e| {
            AppError::Config(format!(
                "Invalid base URL '{}' for site '{}': {e}",
                site.base_url, site.name
            ))
        })?;
        let link_selector = compile(&site.link_selector)?;

        Ok(Self {
            site,
            base_url,
            link_selector,
            extractor,
        })
    }

    pub fn name(&self) -> &str {
        &self.site.name
    }
}

/// Ordered, read-only set of sites. Construction fails on any misconfigured site.
pub struct SiteRegistry {
    sites: Vec<RegisteredSite>,
}

impl SiteRegistry {
    pub fn new(sites: Vec<Site>) -> Result<Self, AppError> {
        let mut names = HashSet::new();
        let mut registered = Vec::with_capacity(sites.len());

        for site in sites {
            if !names.insert(site.name.clone()) {
                return Err(AppError::Config(format!(
                    "Site '{}' is configured twice",
                    site.name
                )));
            }
            registered.push(RegisteredSite::new(site)?);
        }

        Ok(Self { sites: registered })
    }

    pub fn builtin() -> Result<Self, AppError> {
        Self::new(builtin_sites())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredSite> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(name: &str) -> Site {
        Site {
            name: name.to_string(),
            base_url: "https://board.test".to_string(),
            search_url: SearchUrl::Slug {
                prefix: "https://board.test/jobs/".to_string(),
                suffix: String::new(),
            },
            link_selector: "h2 > a".to_string(),
        }
    }

    #[test]
    fn builtin_registry_is_valid_and_ordered() {
        let registry = SiteRegistry::builtin().unwrap();
        let names: Vec<_> = registry.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Hire Lebanese", "Bayt"]);
    }

    #[test]
    fn builtin_search_urls_match_each_board() {
        let sites = builtin_sites();
        assert!(
            sites[0]
                .search_url_for("software developer")
                .contains("keywords=software%20developer&category=")
        );
        assert_eq!(
            sites[1].search_url_for("software developer"),
            "https://www.bayt.com/en/lebanon/jobs/software-developer-jobs"
        );
    }

    #[test]
    fn unknown_site_name_fails_at_load() {
        let err = SiteRegistry::new(vec![site("Bayt"), site("Indeed")])
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("Indeed")));
    }

    #[test]
    fn duplicate_site_is_rejected() {
        assert!(matches!(
            SiteRegistry::new(vec![site("Bayt"), site("Bayt")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn bad_base_url_and_selector_are_rejected() {
        let mut bad_url = site("Bayt");
        bad_url.base_url = "not a url".to_string();
        assert!(matches!(
            SiteRegistry::new(vec![bad_url]),
            Err(AppError::Config(_))
        ));

        let mut bad_selector = site("Bayt");
        bad_selector.link_selector = "h2 >> [".to_string();
        assert!(matches!(
            SiteRegistry::new(vec![bad_selector]),
            Err(AppError::Selector(_))
        ));
    }
}
