//! Navigation context: the query string an explicit `lang` override is read from.

use url::Url;

/// Name of the query parameter carrying an explicit override.
pub const LANG_PARAM: &str = "lang";

/// The request or page context the resolver reads its override from.
pub trait NavigationContext {
    /// First value of query parameter `name`, if present.
    fn query_param(&self, name: &str) -> Option<String>;

    /// Remove `name` from the query and reload with what remains.
    fn strip_and_reload(&mut self, name: &str);
}

/// Context with no query string; never carries an override.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl NavigationContext for NoContext {
    fn query_param(&self, _name: &str) -> Option<String> {
        None
    }

    fn strip_and_reload(&mut self, _name: &str) {}
}

/// Context over a page URL.
///
/// Reloading does not navigate anywhere; the target is recorded and exposed
/// through [`UrlContext::redirect`] for the caller to act on.
#[derive(Debug, Clone)]
pub struct UrlContext {
    url: Url,
    redirect: Option<Url>,
}

impl UrlContext {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            redirect: None,
        }
    }

    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(Self::new)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Where the context was sent by the last reload, if any.
    pub fn redirect(&self) -> Option<&Url> {
        self.redirect.as_ref()
    }
}

impl NavigationContext for UrlContext {
    fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    fn strip_and_reload(&mut self, name: &str) {
        let remaining: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != name)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let target = if remaining.is_empty() {
            bare_origin(&self.url)
        } else {
            let mut target = self.url.clone();
            target.query_pairs_mut().clear().extend_pairs(remaining);
            target
        };

        self.url = target.clone();
        self.redirect = Some(target);
    }
}

/// The URL's origin with no path, query or fragment.
fn bare_origin(url: &Url) -> Url {
    let origin = url.origin();
    if origin.is_tuple() {
        if let Ok(parsed) = Url::parse(&origin.ascii_serialization()) {
            return parsed;
        }
    }

    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped
}
