use super::{Resolver, UrlResolver};
use crate::error::{Error, Result};

/// README file names tried in a repository, in priority order.
pub const README_CANDIDATES: [&str; 4] = ["README.md", "readme.md", "Readme.md", "README"];

/// Supported hosts and how to build a raw-content URL on each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Host {
    GitHub,
    GitLab,
    Bitbucket,
}

impl Host {
    fn from_domain(domain: &str) -> Option<Self> {
        match domain.to_ascii_lowercase().as_str() {
            "github.com" => Some(Host::GitHub),
            "gitlab.com" => Some(Host::GitLab),
            "bitbucket.org" => Some(Host::Bitbucket),
            _ => None,
        }
    }

    fn raw_url(self, user: &str, repo: &str, file: &str) -> String {
        match self {
            Host::GitHub => {
                format!("https://raw.githubusercontent.com/{user}/{repo}/master/{file}")
            }
            Host::GitLab => format!("https://gitlab.com/{user}/{repo}/raw/master/{file}"),
            Host::Bitbucket => format!("https://bitbucket.org/{user}/{repo}/raw/master/{file}"),
        }
    }
}

/// Resolves a README from a hosted git repository given as
/// `host/user/repo`, for example `github.com/rust-lang/rust`.
///
/// Supported hosts: `github.com`, `gitlab.com`, `bitbucket.org`.
#[derive(Clone)]
pub struct HostedResolver {
    url: UrlResolver,
}

impl HostedResolver {
    pub fn new(url: UrlResolver) -> Self {
        Self { url }
    }

    fn parse(locator: &str) -> Option<(Host, &str, &str)> {
        let mut parts = locator.split('/');
        let (domain, user, repo) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || user.is_empty() || repo.is_empty() {
            return None;
        }
        Some((Host::from_domain(domain)?, user, repo))
    }
}

impl Resolver for HostedResolver {
    fn resolve(&self, locator: &str) -> Result<Vec<u8>> {
        let Some((host, user, repo)) = Self::parse(locator) else {
            return Err(Error::NotApplicable);
        };

        for file in README_CANDIDATES {
            let url = host.raw_url(user, repo, file);
            match self.url.resolve(&url) {
                Ok(content) => return Ok(content),
                Err(Error::NotApplicable) => continue,
                Err(err) => return Err(err),
            }
        }

        Err(Error::NotApplicable)
    }
}
