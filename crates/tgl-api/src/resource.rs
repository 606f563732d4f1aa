//! API resources and request URLs.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

/// Collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Me,
    TimeEntries,
    Workspaces,
    Clients,
    Projects,
    Tasks,
    Tags,
    Users,
}

impl Resource {
    pub const ALL: [Self; 8] = [
        Self::Me,
        Self::TimeEntries,
        Self::Workspaces,
        Self::Clients,
        Self::Projects,
        Self::Tasks,
        Self::Tags,
        Self::Users,
    ];

    /// Path segment used in request URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Me => "me",
            Self::TimeEntries => "time_entries",
            Self::Workspaces => "workspaces",
            Self::Clients => "clients",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::Tags => "tags",
            Self::Users => "users",
        }
    }
}

impl AsRef<str> for Resource {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string did not name a known resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource: {0}")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

/// Builds `<base><resource>.json`, plus `?<query>` when params are given.
///
/// The resource is not validated. Parameters are form-encoded in the order
/// given.
pub fn build_url(base: &str, resource: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{base}{resource}.json");
    if !params.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        url.push('?');
        url.push_str(&query);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.toggl.com/api/v6/";

    #[test]
    fn url_without_params_has_no_query() {
        assert_eq!(
            build_url(BASE, "projects", &[]),
            "https://www.toggl.com/api/v6/projects.json"
        );
        assert!(!build_url(BASE, "time_entries", &[]).contains('?'));
    }

    #[test]
    fn url_with_params_is_form_encoded() {
        let url = build_url(
            BASE,
            "time_entries",
            &[("start_date", "2025-03-14T09:00:00+01:00"), ("q", "a b&c")],
        );
        assert_eq!(
            url,
            "https://www.toggl.com/api/v6/time_entries.json?start_date=2025-03-14T09%3A00%3A00%2B01%3A00&q=a+b%26c"
        );
    }

    #[test]
    fn distinct_params_give_distinct_urls() {
        let cases: [&[(&str, &str)]; 5] = [
            &[],
            &[("a", "1")],
            &[("a", "1&b=2")],
            &[("a", "1"), ("b", "2")],
            &[("a", "12")],
        ];
        let urls: std::collections::HashSet<_> = cases
            .iter()
            .map(|params| build_url(BASE, "tasks", params))
            .collect();
        assert_eq!(urls.len(), cases.len());
    }

    #[test]
    fn any_resource_string_is_accepted() {
        assert_eq!(build_url(BASE, "anything", &[]), format!("{BASE}anything.json"));
    }

    #[test]
    fn resource_names_round_trip() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>().unwrap(), resource);
        }
        assert!("bogus".parse::<Resource>().is_err());
    }
}
