//! The endpoint capability and the arguments passed to it.

use thiserror::Error;

use crate::routing::{RequestContext, RewriteRule};
use crate::site::{add_query_args, Site};

/// A named page that can build its own URL and recognise requests for itself.
pub trait Endpoint: Send + Sync + std::fmt::Debug {
    /// Registry key, e.g. `campaign_donation`.
    fn id(&self) -> &str;

    /// URL of this page for `args`, or `None` when the args cannot be
    /// satisfied (e.g. no campaign given for a campaign page).
    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String>;

    /// Returns true if `request` is for this page under `args`.
    fn matches_current_request(
        &self,
        site: &Site,
        request: &RequestContext,
        args: &EndpointArgs,
    ) -> bool;

    /// Pretty-permalink rules this endpoint needs to be reachable.
    fn rewrite_rules(&self) -> Vec<RewriteRule> {
        Vec::new()
    }
}

/// A query argument that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("argument '{key}' must be a numeric id, got '{value}'")]
pub struct InvalidArg {
    pub key: String,
    pub value: String,
}

/// Optional arguments for URL building and request matching.
///
/// When matching, `campaign_id` and `donation_id` narrow the match to that
/// campaign or donation. `strict` asks for exact-match-only semantics on
/// endpoints that can be reached through more than one request shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointArgs {
    pub campaign_id: Option<u64>,
    pub donation_id: Option<u64>,
    pub strict: bool,
    pub redirect_to: Option<String>,
    /// Extra query pairs appended to built URLs.
    pub extra: Vec<(String, String)>,
}

impl EndpointArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn campaign(mut self, id: u64) -> Self {
        self.campaign_id = Some(id);
        self
    }

    pub fn donation(mut self, id: u64) -> Self {
        self.donation_id = Some(id);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn redirect_to(mut self, url: impl Into<String>) -> Self {
        self.redirect_to = Some(url.into());
        self
    }

    pub fn query_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Build args from query-string pairs. Known keys are interpreted,
    /// everything else is carried as an extra query pair.
    ///
    /// A non-numeric `campaign_id` or `donation_id` is an error rather than
    /// a dropped constraint.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, InvalidArg>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut args = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "campaign_id" => args.campaign_id = Some(parse_id(&key, &value)?),
                "donation_id" => args.donation_id = Some(parse_id(&key, &value)?),
                "strict" => args.strict = !matches!(value.as_str(), "0" | "false" | "no"),
                "redirect_to" => args.redirect_to = Some(value),
                _ => args.extra.push((key, value)),
            }
        }
        Ok(args)
    }

    /// True unless a campaign constraint is set and differs from `id`.
    pub fn accepts_campaign(&self, id: u64) -> bool {
        self.campaign_id.map_or(true, |wanted| wanted == id)
    }

    /// True unless a donation constraint is set and the request's
    /// `donation_id` var differs from it.
    pub fn accepts_donation(&self, request: &RequestContext) -> bool {
        match self.donation_id {
            Some(wanted) => request.query_var_id("donation_id") == Some(wanted),
            None => true,
        }
    }

    /// Append `redirect_to` and the extra pairs to a built URL.
    pub(crate) fn decorate(&self, url: String) -> String {
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(self.extra.len() + 1);
        if let Some(redirect) = &self.redirect_to {
            pairs.push(("redirect_to", redirect.as_str()));
        }
        pairs.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        add_query_args(&url, &pairs)
    }
}

fn parse_id(key: &str, value: &str) -> Result<u64, InvalidArg> {
    value.parse().map_err(|_| InvalidArg {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let args = EndpointArgs::from_pairs(vec![
            ("campaign_id".to_string(), "12".to_string()),
            ("strict".to_string(), "1".to_string()),
            ("utm_source".to_string(), "email".to_string()),
        ])
        .unwrap();

        assert_eq!(args.campaign_id, Some(12));
        assert_eq!(args.donation_id, None);
        assert!(args.strict);
        assert_eq!(args.extra, vec![("utm_source".to_string(), "email".to_string())]);
    }

    #[test]
    fn test_non_numeric_ids_are_rejected() {
        let err = EndpointArgs::from_pairs([("campaign_id".to_string(), "two".to_string())])
            .unwrap_err();
        assert_eq!(
            err,
            InvalidArg {
                key: "campaign_id".into(),
                value: "two".into()
            }
        );

        let err = EndpointArgs::from_pairs([("donation_id".to_string(), "x8".to_string())])
            .unwrap_err();
        assert_eq!(err.key, "donation_id");
        assert!(err.to_string().contains("x8"));
    }

    #[test]
    fn test_strict_flag_values() {
        let strict = |v: &str| {
            EndpointArgs::from_pairs([("strict".to_string(), v.to_string())])
                .unwrap()
                .strict
        };
        assert!(strict(""));
        assert!(strict("true"));
        assert!(!strict("0"));
        assert!(!strict("false"));
    }

    #[test]
    fn test_decorate() {
        let args = EndpointArgs::new()
            .redirect_to("https://example.org/thanks/")
            .query_arg("ref", "mail");
        assert_eq!(
            args.decorate("https://example.org/login/".into()),
            "https://example.org/login/?redirect_to=https%3A%2F%2Fexample.org%2Fthanks%2F&ref=mail"
        );
        assert_eq!(EndpointArgs::new().decorate("https://example.org/".into()), "https://example.org/");
    }

    #[test]
    fn test_accepts_campaign() {
        assert!(EndpointArgs::new().accepts_campaign(3));
        assert!(EndpointArgs::new().campaign(3).accepts_campaign(3));
        assert!(!EndpointArgs::new().campaign(4).accepts_campaign(3));
    }
}
