//! Content source resolution.
//!
//! A locator is a filesystem path, an `http(s)://` URL, or a
//! `host/user/repo` shorthand for a hosted repository. Each [`Resolver`]
//! recognizes one of those shapes. A [`Chain`] tries them in a fixed
//! priority order:
//!
//! - [`Error::NotApplicable`] means "not my shape" and moves on to the next resolver.
//! - Any other error aborts the chain immediately.
//! - The first success wins; an exhausted chain is `NotApplicable`.

mod file;
mod hosted;
mod remote;

pub use file::FileResolver;
pub use hosted::{HostedResolver, README_CANDIDATES};
pub use remote::{HttpGetter, HttpResponse, ReqwestGetter, UrlResolver};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Something that can turn a locator into raw document bytes.
pub trait Resolver: Send + Sync {
    fn resolve(&self, locator: &str) -> Result<Vec<u8>>;
}

/// Ordered sequence of resolvers; the first to succeed wins.
pub struct Chain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl Chain {
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Local file, then remote URL, then hosted repository.
    pub fn standard(getter: Arc<dyn HttpGetter>) -> Self {
        let url = UrlResolver::new(getter);
        Self::new(vec![
            Box::new(FileResolver),
            Box::new(url.clone()),
            Box::new(HostedResolver::new(url)),
        ])
    }
}

impl Resolver for Chain {
    fn resolve(&self, locator: &str) -> Result<Vec<u8>> {
        for (idx, resolver) in self.resolvers.iter().enumerate() {
            match resolver.resolve(locator) {
                Ok(content) => {
                    log::debug!("resolver #{idx} resolved {locator} ({} bytes)", content.len());
                    return Ok(content);
                }
                Err(err) if !err.is_fatal() => {
                    log::debug!("resolver #{idx} not applicable to {locator}");
                }
                Err(err) => {
                    log::warn!("resolver #{idx} failed for {locator}: {err}");
                    return Err(err);
                }
            }
        }

        Err(Error::NotApplicable)
    }
}
