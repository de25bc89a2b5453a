//! Fetching and caching of the raw command line text.
//!
//! The command line is fixed for the lifetime of the process, so we fetch
//! it from the provider exactly once and keep the result.  A fetch failure
//! leaves the cache empty, allowing a later caller to retry.

use std::sync::Mutex;

use anyhow::Result;
use fn_error_context::context;

use crate::CMDLINE_MAX;

/// A provider of the raw boot command line text.
///
/// Implementations fill the supplied buffer with as much of the line as
/// fits and return the number of bytes written.  A return value equal to
/// `buf.len()` signals that the line may have been truncated at the
/// source.
pub trait CmdlineSource {
    /// Fill `buf` with the raw command line, returning the bytes written.
    fn read_into(&self, buf: &mut [u8]) -> Result<usize>;
}

/// Reads the kernel command line from `/proc/cmdline`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcCmdline;

impl CmdlineSource for ProcCmdline {
    #[context("Reading /proc/cmdline")]
    fn read_into(&self, buf: &mut [u8]) -> Result<usize> {
        let data = std::fs::read("/proc/cmdline")?;
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }
}

/// Lazily fetched, retained-for-life cache of the raw command line.
///
/// The mutex is the single-initialization guard: concurrent first callers
/// serialize on it, and only one of them contacts the source.
#[derive(Debug)]
pub struct CmdlineCache<S> {
    source: S,
    line: Mutex<Option<String>>,
}

impl<S: CmdlineSource> CmdlineCache<S> {
    /// Creates an empty cache backed by the given source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            line: Mutex::new(None),
        }
    }

    /// Returns a copy of the command line, at most `max_len` bytes of it.
    ///
    /// The first successful call fetches the line from the source and
    /// caches it; later calls are served from the cache without touching
    /// the source again.  If the source reports a full buffer the value is
    /// used anyway, with a truncation warning.  A source failure is
    /// propagated and leaves the cache unpopulated.
    pub fn get_cached_line(&self, max_len: usize) -> Result<String> {
        let mut guard = self
            .line
            .lock()
            .expect("cmdline cache lock is never poisoned");

        let line: &String = match &mut *guard {
            Some(line) => line,
            cached @ None => {
                let mut buf = [0u8; CMDLINE_MAX];
                let written = self.source.read_into(&mut buf)?;
                if written == CMDLINE_MAX {
                    tracing::warn!("Command line may have been truncated to {CMDLINE_MAX} bytes");
                }
                tracing::debug!("Command line length: {written}");
                let text = String::from_utf8_lossy(&buf[..written]).into_owned();
                cached.insert(text)
            }
        };

        // Cap the returned copy, backing off to a character boundary.
        let mut end = max_len.min(line.len());
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        Ok(line[..end].to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Test source yielding a fixed line and counting fetches.
    struct Fixed {
        line: &'static str,
        fetches: AtomicUsize,
    }

    impl Fixed {
        fn new(line: &'static str) -> Self {
            Self {
                line,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl CmdlineSource for &Fixed {
        fn read_into(&self, buf: &mut [u8]) -> Result<usize> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let data = self.line.as_bytes();
            let n = data.len().min(buf.len());
            buf[..n].copy_from_slice(&data[..n]);
            Ok(n)
        }
    }

    /// Test source that always fails.
    struct Broken;

    impl CmdlineSource for Broken {
        fn read_into(&self, _buf: &mut [u8]) -> Result<usize> {
            anyhow::bail!("no command line available")
        }
    }

    #[test]
    fn test_fetches_at_most_once() {
        let fixed = Fixed::new("root=/dev/sda1 quiet");
        let cache = CmdlineCache::new(&fixed);

        assert_eq!(
            cache.get_cached_line(CMDLINE_MAX).unwrap(),
            "root=/dev/sda1 quiet"
        );
        assert_eq!(
            cache.get_cached_line(CMDLINE_MAX).unwrap(),
            "root=/dev/sda1 quiet"
        );
        assert_eq!(fixed.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_max_len_caps_the_copy() {
        let fixed = Fixed::new("syno_hw_version=DS3617xs");
        let cache = CmdlineCache::new(&fixed);
        assert_eq!(cache.get_cached_line(4).unwrap(), "syno");
        // The full value is still cached
        assert_eq!(
            cache.get_cached_line(CMDLINE_MAX).unwrap(),
            "syno_hw_version=DS3617xs"
        );
    }

    #[test]
    fn test_max_len_respects_char_boundaries() {
        let fixed = Fixed::new("sn=é");
        let cache = CmdlineCache::new(&fixed);
        // byte 4 falls in the middle of the two-byte 'é'
        assert_eq!(cache.get_cached_line(4).unwrap(), "sn=");
    }

    #[test]
    fn test_failure_leaves_cache_empty() {
        let cache = CmdlineCache::new(Broken);
        assert!(cache.get_cached_line(CMDLINE_MAX).is_err());
        // still errors (i.e. an empty line was not cached by the failure)
        assert!(cache.get_cached_line(CMDLINE_MAX).is_err());
    }

    #[test]
    fn test_oversized_line_is_truncated() {
        // A line longer than the internal buffer: the source reports a
        // full buffer and the cache proceeds with the truncated value.
        struct Long;
        impl CmdlineSource for Long {
            fn read_into(&self, buf: &mut [u8]) -> Result<usize> {
                buf.fill(b'x');
                Ok(buf.len())
            }
        }

        let cache = CmdlineCache::new(Long);
        let line = cache.get_cached_line(usize::MAX).unwrap();
        assert_eq!(line.len(), CMDLINE_MAX);
    }
}
