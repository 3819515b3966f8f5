//! Retrieval of the raw source artifacts
//!
//! All source data is obtained through the [`Fetch`] trait. The default
//! implementation, [`CachedFetcher`], downloads each url once and keeps the
//! body in a local cache directory, keyed by the filename of the url.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Config;
use crate::RankerError;
use crate::RankerResult;

/// Returns the raw text behind a url
///
/// Implementations must return the same content for repeated calls with
/// the same url during one run.
///
/// Any closure `Fn(&str) -> RankerResult<String>` implements `Fetch`, which
/// is handy for in-memory sources:
///
/// ```
/// use generank::{Fetch, RankerResult};
///
/// let fetcher = |url: &str| -> RankerResult<String> { Ok(format!("content of {url}")) };
/// assert_eq!(fetcher.fetch("a.txt").unwrap(), "content of a.txt");
/// ```
pub trait Fetch {
    /// Returns the content of `url`
    ///
    /// # Errors
    ///
    /// Implementations return [`RankerError::Fetch`] if the content
    /// cannot be retrieved
    fn fetch(&self, url: &str) -> RankerResult<String>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> RankerResult<String>,
{
    fn fetch(&self, url: &str) -> RankerResult<String> {
        self(url)
    }
}

/// Downloads artifacts over HTTP and caches them on disk
///
/// The cache is never invalidated. Delete the cache directory to force
/// a new download.
#[derive(Debug)]
pub struct CachedFetcher {
    cache_dir: PathBuf,
}

impl CachedFetcher {
    /// Creates a new `CachedFetcher` that uses the cache directory of `config`
    pub fn new(config: &Config) -> Self {
        Self {
            cache_dir: config.cache_dir().to_path_buf(),
        }
    }

    /// The directory that holds the cached files
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path at which the content of `url` is cached
    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(cache_filename(url))
    }

    fn download(url: &str) -> RankerResult<String> {
        let fetch_error = |err: reqwest::Error| RankerError::Fetch {
            url: url.to_string(),
            reason: err.to_string(),
        };
        reqwest::blocking::get(url)
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(fetch_error)
    }

    fn store(&self, path: &Path, content: &str) -> RankerResult<()> {
        fs::create_dir_all(&self.cache_dir)
            .map_err(|_| RankerError::CannotOpenFile(self.cache_dir.display().to_string()))?;
        fs::write(path, content).map_err(|_| RankerError::CannotOpenFile(path.display().to_string()))
    }
}

impl Fetch for CachedFetcher {
    fn fetch(&self, url: &str) -> RankerResult<String> {
        let path = self.cache_path(url);
        if path.is_file() {
            debug!("Using cached {} for {}", path.display(), url);
            return fs::read_to_string(&path)
                .map_err(|_| RankerError::CannotOpenFile(path.display().to_string()));
        }

        debug!("Downloading {}", url);
        let content = Self::download(url)?;
        self.store(&path, &content)?;
        Ok(content)
    }
}

/// Derives the cache filename from the last path segment of `url`
///
/// Query strings and fragments are ignored and every character that is
/// not alphanumeric, `.`, `-` or `_` is replaced by `_`.
pub(crate) fn cache_filename(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();

    let name: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() || name.chars().all(|c| c == '.') {
        "index".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn filename_from_url() {
        assert_eq!(cache_filename("http://x.org/a/b/D001.txt"), "D001.txt");
        assert_eq!(cache_filename("http://x.org/a/genes.txt?v=2"), "genes.txt");
        assert_eq!(cache_filename("http://x.org/a/genes.txt#top"), "genes.txt");
        assert_eq!(cache_filename("http://x.org/a/dir/"), "dir");
        assert_eq!(cache_filename("http://x.org/a/weird name.txt"), "weird_name.txt");
        assert_eq!(cache_filename("http://x.org/.."), "index");
        assert_eq!(cache_filename(""), "index");
    }

    #[test]
    fn closure_fetcher() {
        let calls = Cell::new(0);
        let fetcher = |url: &str| -> RankerResult<String> {
            calls.set(calls.get() + 1);
            Ok(url.to_uppercase())
        };
        assert_eq!(fetcher.fetch("abc").unwrap(), "ABC");
        assert_eq!(fetcher.fetch("abc").unwrap(), "ABC");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn cached_file_is_used_without_download() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let config = Config::new("http://127.0.0.1:9").with_cache_dir(dir.path());
        let fetcher = CachedFetcher::new(&config);

        let url = config.url_for("gene_list.txt").unwrap();
        fs::write(fetcher.cache_path(&url), "cached content").unwrap();

        // the url is not reachable, so this can only succeed from the cache
        assert_eq!(fetcher.fetch(&url).unwrap(), "cached content");
        assert_eq!(fetcher.fetch(&url).unwrap(), "cached content");
    }

    #[test]
    fn cache_path_is_inside_cache_dir() {
        let config = Config::new("http://localhost").with_cache_dir("/tmp/generank-test");
        let fetcher = CachedFetcher::new(&config);
        assert_eq!(
            fetcher.cache_path("http://localhost/D9.txt"),
            Path::new("/tmp/generank-test/D9.txt")
        );
    }
}
