use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is when a term is placed into a query string.
const QUERY_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A configured job board.
#[derive(Debug, Clone)]
pub struct Site {
    /// Selects the detail extractor; must name a known strategy.
    pub name: String,
    /// Prefix used to resolve relative job links.
    pub base_url: String,
    pub search_url: SearchUrl,
    /// CSS selector matching the anchors of job links on the search page.
    pub link_selector: String,
}

/// How a query term is turned into a search page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchUrl {
    /// Percent-encode the term and substitute it for `placeholder` in `template`.
    Placeholder {
        template: String,
        placeholder: String,
    },
    /// `prefix` + term with whitespace runs replaced by `-` + `suffix`.
    Slug { prefix: String, suffix: String },
}

impl SearchUrl {
    pub fn build(&self, term: &str) -> String {
        match self {
            SearchUrl::Placeholder {
                template,
                placeholder,
            } => {
                let encoded = utf8_percent_encode(term.trim(), QUERY_VALUE_SET).to_string();
                template.replace(placeholder.as_str(), &encoded)
            }
            SearchUrl::Slug { prefix, suffix } => {
                let slug = term.split_whitespace().collect::<Vec<_>>().join("-");
                format!("{prefix}{slug}{suffix}")
            }
        }
    }
}

impl Site {
    pub fn search_url_for(&self, term: &str) -> String {
        self.search_url.build(term)
    }
}
