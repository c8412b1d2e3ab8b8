use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::error::AppError;
use crate::fetch::Fetcher;
use crate::sites::RegisteredSite;

/// Fetch a site's search page for `term` and return the unique detail URLs in discovery order.
pub async fn search_links(
    fetcher: &Fetcher,
    site: &RegisteredSite,
    term: &str,
) -> Result<Vec<String>, AppError> {
    let search_url = site.site.search_url_for(term);
    tracing::debug!("Searching {} at {search_url}", site.name());
    let html = fetcher.get_html(&search_url).await?;
    Ok(extract_links(
        &Html::parse_document(&html),
        &site.link_selector,
        &site.base_url,
    ))
}

/// Collect the `href` of every anchor matched by `selector`, resolved against `base`.
/// Duplicates (by full URL string) are dropped, keeping the first occurrence.
pub fn extract_links(document: &Html, selector: &Selector, base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in document
        .select(selector)
        .filter_map(|el| el.value().attr("href"))
    {
        let Some(link) = resolve_link(base, href) else {
            tracing::debug!("Skipping unresolvable link '{href}'");
            continue;
        };
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

/// Absolute hrefs are kept verbatim, anything else is joined onto the site's base URL.
/// Only http(s) results count as job links.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base.join(href)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::compile;
    use crate::models::site::{SearchUrl, Site};
    use mockito::Server;
    use std::time::Duration;

    fn base() -> Url {
        Url::parse("https://board.test/").unwrap()
    }

    #[test]
    fn resolves_relative_and_keeps_absolute() {
        let base = base();
        assert_eq!(
            resolve_link(&base, "/jobs/1").as_deref(),
            Some("https://board.test/jobs/1")
        );
        assert_eq!(
            resolve_link(&base, "jobdetails.aspx?id=9").as_deref(),
            Some("https://board.test/jobdetails.aspx?id=9")
        );
        assert_eq!(
            resolve_link(&base, "https://other.test/x").as_deref(),
            Some("https://other.test/x")
        );
        assert_eq!(resolve_link(&base, "  "), None);
    }

    #[test]
    fn non_http_hrefs_are_skipped() {
        let base = base();
        assert_eq!(resolve_link(&base, "javascript:void(0)"), None);
        assert_eq!(resolve_link(&base, "mailto:jobs@board.test"), None);
        assert_eq!(resolve_link(&base, "ftp://board.test/jobs.txt"), None);

        let page = r#"<h2><a href="javascript:void(0)">Apply</a></h2>
            <h2><a href="/jobs/1">One</a></h2>"#;
        let selector = compile("h2 > a").unwrap();
        let links = extract_links(&Html::parse_document(page), &selector, &base);
        assert_eq!(links, vec!["https://board.test/jobs/1".to_string()]);
    }

    #[test]
    fn duplicate_anchors_are_collapsed_in_discovery_order() {
        let page = r#"<html><body>
          <h2><a href="/jobs/2">Two</a></h2>
          <h2><a href="/jobs/1">One</a></h2>
          <h2><a href="/jobs/2">Two again</a></h2>
          <h2><a href="https://board.test/jobs/1">One absolute</a></h2>
          <h2><a>No href</a></h2>
          <p><a href="/jobs/3">Not a result</a></p>
        </body></html>"#;

        let selector = compile("h2 > a").unwrap();
        let links = extract_links(&Html::parse_document(page), &selector, &base());
        assert_eq!(
            links,
            vec![
                "https://board.test/jobs/2".to_string(),
                "https://board.test/jobs/1".to_string(),
            ]
        );
    }

    fn site(server_url: &str) -> RegisteredSite {
        RegisteredSite::new(Site {
            name: "Bayt".into(),
            base_url: server_url.to_string(),
            search_url: SearchUrl::Slug {
                prefix: format!("{server_url}/en/jobs/"),
                suffix: "-jobs".into(),
            },
            link_selector: "h2 > a".into(),
        })
        .unwrap()
    }

    fn fetcher() -> Fetcher {
        Fetcher::new("test", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetches_search_page_and_extracts_links() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/en/jobs/software-developer-jobs")
            .with_status(200)
            .with_body(r#"<h2><a href="/job/a">A</a></h2><h2><a href="/job/a">A</a></h2>"#)
            .create_async()
            .await;

        let links = search_links(&fetcher(), &site(&server.url()), "software developer")
            .await
            .unwrap();
        assert_eq!(links, vec![format!("{}/job/a", server.url())]);
    }

    #[tokio::test]
    async fn failed_search_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/en/jobs/software-developer-jobs")
            .with_status(503)
            .create_async()
            .await;

        let site = site(&server.url());
        let result = search_links(&fetcher(), &site, "software developer").await;
        assert!(matches!(result, Err(AppError::UpstreamStatus { .. })));
    }
}
