use async_trait::async_trait;
use futures::future::{join_all, try_join_all};

use crate::config::DetailErrorPolicy;
use crate::error::AppError;
use crate::fetch::Fetcher;
use crate::models::job::Job;
use crate::search::search_links;
use crate::sites::{RegisteredSite, SiteRegistry};

/// Anything that can produce the aggregated job list for a query term.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn collect_jobs(&self, term: &str) -> Result<Vec<Job>, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteOutcome {
    /// Every discovered job was collected.
    Ok,
    /// The search page could not be loaded; treated as no links.
    SearchFailed,
    /// A detail page failed and the site's whole batch was discarded.
    Dropped,
    /// Some detail pages failed and only those jobs are missing.
    Partial,
}

#[derive(Debug, Clone)]
pub struct SiteReport {
    pub site: String,
    pub links_found: usize,
    pub jobs_collected: usize,
    pub outcome: SiteOutcome,
}

/// Result of one aggregation run.
#[derive(Debug, Default)]
pub struct Collection {
    pub jobs: Vec<Job>,
    pub sites: Vec<SiteReport>,
}

pub struct Aggregator {
    fetcher: Fetcher,
    registry: SiteRegistry,
    policy: DetailErrorPolicy,
}

impl Aggregator {
    pub fn new(fetcher: Fetcher, registry: SiteRegistry, policy: DetailErrorPolicy) -> Self {
        Self {
            fetcher,
            registry,
            policy,
        }
    }

    /// Scrape every site in registry order.
    ///
    /// Sites run one after another; the detail pages of a site are fetched
    /// concurrently. Ids are taken from a counter shared by the whole run and
    /// are handed out when each detail task is created, so jobs keep discovery
    /// order no matter which fetch finishes first.
    pub async fn collect(&self, term: &str) -> Result<Collection, AppError> {
        if term.trim().is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let mut next_id: u64 = 0;
        let mut collection = Collection::default();

        for site in self.registry.iter() {
            let links = match search_links(&self.fetcher, site, term).await {
                Ok(links) => links,
                Err(e) => {
                    tracing::warn!(
                        "Search page failed for {} with term \"{term}\": {e}",
                        site.name()
                    );
                    collection.sites.push(SiteReport {
                        site: site.name().to_string(),
                        links_found: 0,
                        jobs_collected: 0,
                        outcome: SiteOutcome::SearchFailed,
                    });
                    continue;
                }
            };

            let (jobs, outcome) = self.collect_site(site, &links, &mut next_id).await;
            tracing::info!(
                "{}: {} links, {} jobs ({:?})",
                site.name(),
                links.len(),
                jobs.len(),
                outcome
            );
            collection.sites.push(SiteReport {
                site: site.name().to_string(),
                links_found: links.len(),
                jobs_collected: jobs.len(),
                outcome,
            });
            collection.jobs.extend(jobs);
        }

        Ok(collection)
    }

    async fn collect_site(
        &self,
        site: &RegisteredSite,
        links: &[String],
        next_id: &mut u64,
    ) -> (Vec<Job>, SiteOutcome) {
        let tasks: Vec<_> = links
            .iter()
            .map(|link| {
                let id = *next_id;
                *next_id += 1;
                site.extractor.extract(&self.fetcher, link, id)
            })
            .collect();

        match self.policy {
            DetailErrorPolicy::DropSite => match try_join_all(tasks).await {
                Ok(jobs) => (jobs, SiteOutcome::Ok),
                Err(e) => {
                    tracing::error!("Error fetching job details for {}: {e}", site.name());
                    (Vec::new(), SiteOutcome::Dropped)
                }
            },
            DetailErrorPolicy::KeepPartial => {
                let mut jobs = Vec::with_capacity(links.len());
                let mut failed = 0;
                for (link, result) in links.iter().zip(join_all(tasks).await) {
                    match result {
                        Ok(job) => jobs.push(job),
                        Err(e) => {
                            tracing::warn!("Skipping {link} on {}: {e}", site.name());
                            failed += 1;
                        }
                    }
                }
                let outcome = if failed == 0 {
                    SiteOutcome::Ok
                } else {
                    SiteOutcome::Partial
                };
                (jobs, outcome)
            }
        }
    }

    pub fn site_count(&self) -> usize {
        self.registry.len()
    }
}

#[async_trait]
impl JobSource for Aggregator {
    async fn collect_jobs(&self, term: &str) -> Result<Vec<Job>, AppError> {
        let collection = self.collect(term).await?;
        let failed = collection
            .sites
            .iter()
            .filter(|r| r.outcome != SiteOutcome::Ok)
            .count();
        tracing::info!(
            "Collected {} jobs for \"{term}\" from {} sites ({failed} degraded)",
            collection.jobs.len(),
            collection.sites.len()
        );
        Ok(collection.jobs)
    }
}
