use super::Resolver;
use crate::error::{Error, Result};
use std::io::{self, Read};
use std::sync::Arc;
use std::time::Duration;

/// Status code and body stream of an HTTP GET.
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The resolvers' only networking dependency.
///
/// Transport failures surface as `io::Error`; an HTTP error status is a
/// successful call with a non-2xx `status`.
pub trait HttpGetter: Send + Sync {
    fn get(&self, url: &str) -> io::Result<HttpResponse>;
}

/// Blocking `reqwest` client with a request timeout.
pub struct ReqwestGetter {
    client: reqwest::blocking::Client,
}

impl ReqwestGetter {
    pub fn new(timeout: Duration) -> io::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(io::Error::other)?;
        Ok(Self { client })
    }
}

impl HttpGetter for ReqwestGetter {
    fn get(&self, url: &str) -> io::Result<HttpResponse> {
        let response = self.client.get(url).send().map_err(io::Error::other)?;
        Ok(HttpResponse {
            status: response.status().as_u16(),
            body: Box::new(response),
        })
    }
}

/// Resolves `http://` and `https://` locators with a GET request.
///
/// A non-2xx answer is [`Error::NotApplicable`], so a chain can keep looking
/// elsewhere; a transport failure is fatal.
#[derive(Clone)]
pub struct UrlResolver {
    getter: Arc<dyn HttpGetter>,
}

impl UrlResolver {
    pub fn new(getter: Arc<dyn HttpGetter>) -> Self {
        Self { getter }
    }

    fn is_web_url(locator: &str) -> bool {
        url::Url::parse(locator)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false)
    }
}

impl Resolver for UrlResolver {
    fn resolve(&self, locator: &str) -> Result<Vec<u8>> {
        if !Self::is_web_url(locator) {
            return Err(Error::NotApplicable);
        }

        let mut response = self
            .getter
            .get(locator)
            .map_err(|e| Error::fetch_failed(locator, e))?;

        if !response.is_success() {
            log::debug!("GET {locator} answered {}", response.status);
            return Err(Error::NotApplicable);
        }

        let mut content = Vec::new();
        response
            .body
            .read_to_end(&mut content)
            .map_err(|e| Error::fetch_failed(locator, e))?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::tests::MockGetter;

    #[test]
    fn test_successful_get() {
        let getter = Arc::new(MockGetter::default().with(
            "http://example.com/FILE.md",
            200,
            "MARKDOWN\nFILE\nCONTENTS",
        ));
        let resolver = UrlResolver::new(getter.clone());

        let content = resolver.resolve("http://example.com/FILE.md").unwrap();
        assert_eq!(content, b"MARKDOWN\nFILE\nCONTENTS");
        assert_eq!(getter.requested(), vec!["http://example.com/FILE.md"]);
    }

    #[test]
    fn test_bad_status_is_not_applicable() {
        for status in [199, 301, 400, 404, 500] {
            let getter = Arc::new(MockGetter::default().with("https://example.com/a.md", status, ""));
            let err = UrlResolver::new(getter)
                .resolve("https://example.com/a.md")
                .unwrap_err();
            assert!(matches!(err, Error::NotApplicable), "status {status}");
        }
    }

    #[test]
    fn test_transport_error_is_fatal() {
        let getter = Arc::new(MockGetter {
            fail_with: Some(io::ErrorKind::ConnectionRefused),
            ..Default::default()
        });
        let err = UrlResolver::new(getter)
            .resolve("https://example.com/a.md")
            .unwrap_err();

        match err {
            Error::FetchFailed { locator, source } => {
                assert_eq!(locator, "https://example.com/a.md");
                assert_eq!(source.kind(), io::ErrorKind::ConnectionRefused);
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_non_web_locators_are_not_requested() {
        let getter = Arc::new(MockGetter::default());
        let resolver = UrlResolver::new(getter.clone());

        for locator in ["README.md", "github.com/user/repo", "file:///etc/hosts", "mailto:a@b.c", "URL"] {
            let err = resolver.resolve(locator).unwrap_err();
            assert!(matches!(err, Error::NotApplicable), "{locator}");
        }
        assert!(getter.requested().is_empty());
    }
}
