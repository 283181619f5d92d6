//! The donation site that endpoints build URLs for.
//!
//! A `Site` is the read-only view of the hosting site: its home URL, its
//! permalink style, the published campaigns and pages, and which pages have
//! been assigned to special roles (receipt, login, registration, profile).
//!
//! # Design Decisions
//! - Built once from `SiteConfig`, shared via `Arc`
//! - The home URL always ends in `/` so relative joins stay under it
//! - Lookups are linear; sites carry tens of campaigns, not thousands

use url::Url;

use crate::config::schema::{DonationFormDisplay, PermalinkStyle, SiteConfig};

/// A published campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: u64,
    pub slug: String,
    pub donation_form: DonationFormDisplay,
}

impl Campaign {
    /// True when the donation form is reachable from the campaign page itself.
    pub fn shows_form_on_campaign_page(&self) -> bool {
        matches!(
            self.donation_form,
            DonationFormDisplay::SamePage | DonationFormDisplay::Modal
        )
    }
}

/// A published page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: u64,
    pub slug: String,
}

/// Pages assigned to special roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialPages {
    /// `None` means the automatic receipt endpoint.
    pub donation_receipt: Option<u64>,
    pub login: Option<u64>,
    pub registration: Option<u64>,
    pub profile: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Site {
    home: Url,
    permalinks: PermalinkStyle,
    campaigns: Vec<Campaign>,
    pages: Vec<Page>,
    special: SpecialPages,
}

impl Site {
    pub fn from_config(config: &SiteConfig) -> Result<Self, url::ParseError> {
        let mut home = Url::parse(&config.home_url)?;
        if !home.path().ends_with('/') {
            let path = format!("{}/", home.path());
            home.set_path(&path);
        }
        home.set_query(None);
        home.set_fragment(None);

        Ok(Self {
            home,
            permalinks: config.permalinks,
            campaigns: config
                .campaigns
                .iter()
                .map(|c| Campaign {
                    id: c.id,
                    slug: c.slug.clone(),
                    donation_form: c.donation_form,
                })
                .collect(),
            pages: config
                .pages
                .iter()
                .map(|p| Page {
                    id: p.id,
                    slug: p.slug.clone(),
                })
                .collect(),
            special: SpecialPages {
                donation_receipt: config.donation_receipt_page,
                login: config.login_page,
                registration: config.registration_page,
                profile: config.profile_page,
            },
        })
    }

    pub fn permalinks(&self) -> PermalinkStyle {
        self.permalinks
    }

    pub fn uses_pretty_permalinks(&self) -> bool {
        self.permalinks == PermalinkStyle::Pretty
    }

    pub fn special_pages(&self) -> &SpecialPages {
        &self.special
    }

    /// Path component of the home URL, always ending in `/`.
    pub fn home_path(&self) -> &str {
        self.home.path()
    }

    /// Absolute URL for `path`, relative to the home URL.
    pub fn home_url(&self, path: &str) -> String {
        self.home
            .join(path.trim_start_matches('/'))
            .map(String::from)
            .unwrap_or_else(|_| self.home.to_string())
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn campaign(&self, id: u64) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn campaign_by_slug(&self, slug: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.slug == slug)
    }

    pub fn page(&self, id: u64) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    /// Canonical URL of a campaign.
    pub fn campaign_permalink(&self, id: u64) -> Option<String> {
        let campaign = self.campaign(id)?;
        Some(match self.permalinks {
            PermalinkStyle::Pretty => self.home_url(&format!("campaigns/{}/", campaign.slug)),
            PermalinkStyle::Plain => {
                add_query_args(&self.home_url(""), &[("campaign_id", id.to_string())])
            }
        })
    }

    /// Canonical URL of a page.
    pub fn page_permalink(&self, id: u64) -> Option<String> {
        let page = self.page(id)?;
        Some(match self.permalinks {
            PermalinkStyle::Pretty => self.home_url(&format!("{}/", page.slug)),
            PermalinkStyle::Plain => {
                add_query_args(&self.home_url(""), &[("page_id", id.to_string())])
            }
        })
    }
}

/// Set query arguments on `url`, replacing any existing values for the same keys.
///
/// An unparseable `url` is returned unchanged.
pub fn add_query_args<K, V>(url: &str, args: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if args.is_empty() {
        return url.to_string();
    }

    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| !args.iter().any(|(key, _)| key.as_ref() == k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut query = parsed.query_pairs_mut();
        query.clear();
        for (k, v) in &kept {
            query.append_pair(k, v);
        }
        for (k, v) in args {
            query.append_pair(k.as_ref(), v.as_ref());
        }
    }

    parsed.into()
}
