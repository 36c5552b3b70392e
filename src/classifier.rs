//! URL to site profile classification

use std::fmt;

/// Site family that decides which selector chains apply to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteProfile {
    Amazon,
    Flipkart,
    Generic,
}

impl SiteProfile {
    pub fn name(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Flipkart => "Flipkart",
            Self::Generic => "Generic",
        }
    }
}

impl fmt::Display for SiteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Site tokens in priority order. First token contained in the URL wins.
pub const SITE_TOKENS: &[(&str, SiteProfile)] = &[
    ("amazon", SiteProfile::Amazon),
    ("flipkart", SiteProfile::Flipkart),
];

/// Classify a URL. Never fails: anything unrecognised is `Generic`.
pub fn classify(url: &str) -> SiteProfile {
    classify_with(url, SITE_TOKENS)
}

pub fn classify_with(url: &str, tokens: &[(&str, SiteProfile)]) -> SiteProfile {
    let url = url.to_lowercase();
    tokens
        .iter()
        .find(|(token, _)| url.contains(token))
        .map_or(SiteProfile::Generic, |(_, profile)| *profile)
}
