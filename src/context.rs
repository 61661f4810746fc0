// pdf-convert/src/context.rs

use indexmap::IndexMap;

/// Read access to the cookies of the request a conversion runs on behalf of.
pub trait CookieLookup: Send + Sync {
    fn cookie(&self, name: &str) -> Option<String>;
}

impl<F> CookieLookup for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn cookie(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Cookies captured from an incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookies {
    cookies: IndexMap<String, String>,
}

impl RequestCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw `Cookie` header value (`name=value; other=value`).
    /// Pairs without `=` are skipped; the first occurrence of a name wins.
    pub fn parse_header(header: &str) -> Self {
        let mut cookies = IndexMap::new();

        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.trim().trim_matches('"').to_string());
        }

        Self { cookies }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestCookies
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cookies: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl CookieLookup for RequestCookies {
    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cookie_header() {
        let cookies = RequestCookies::parse_header(".AUTH=abc123; theme=\"dark\";broken; lang = de");

        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.cookie(".AUTH").as_deref(), Some("abc123"));
        assert_eq!(cookies.cookie("theme").as_deref(), Some("dark"));
        assert_eq!(cookies.cookie("lang").as_deref(), Some("de"));
        assert_eq!(cookies.cookie("broken"), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let cookies = RequestCookies::parse_header("a=1; a=2");
        assert_eq!(cookies.cookie("a").as_deref(), Some("1"));
    }

    #[test]
    fn closures_act_as_lookups() {
        let lookup = |name: &str| (name == "auth").then(|| "xyz".to_string());
        assert_eq!(lookup.cookie("auth").as_deref(), Some("xyz"));
        assert_eq!(lookup.cookie("other"), None);
    }
}
