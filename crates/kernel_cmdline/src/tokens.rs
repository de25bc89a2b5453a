//! Splitting a command line into its tokens.
//!
//! Tokens are separated by ASCII whitespace; empty fragments (runs of
//! separators, leading/trailing separators) are skipped and never reach
//! the consumer.

use std::borrow::Cow;
use std::ops::Deref;

/// A command line held for tokenization.
///
/// Uses copy-on-write semantics so callers can tokenize a borrowed slice
/// or hand over ownership of a fetched line, whichever is convenient.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cmdline<'a>(Cow<'a, str>);

impl<'a, T: AsRef<str> + ?Sized> From<&'a T> for Cmdline<'a> {
    fn from(input: &'a T) -> Self {
        Self(Cow::Borrowed(input.as_ref()))
    }
}

impl From<String> for Cmdline<'static> {
    fn from(input: String) -> Self {
        Self(Cow::Owned(input))
    }
}

impl<'a> Cmdline<'a> {
    /// Returns an iterator over the tokens of the command line.
    ///
    /// The iterator is single-pass; call this again for a fresh walk.
    pub fn iter(&'a self) -> TokenIter<'a> {
        TokenIter {
            inner: self.0.split_ascii_whitespace(),
            delivered: 0,
        }
    }
}

impl Deref for Cmdline<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Cmdline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(self)
    }
}

impl<'a> IntoIterator for &'a Cmdline<'a> {
    type Item = &'a str;
    type IntoIter = TokenIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over command line tokens.
///
/// This is created by the `iter` method on [`Cmdline`].
#[derive(Debug)]
pub struct TokenIter<'a> {
    inner: std::str::SplitAsciiWhitespace<'a>,
    delivered: usize,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        self.delivered += 1;
        Some(token)
    }
}

impl TokenIter<'_> {
    /// Number of tokens delivered so far, for diagnostics.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_tokens_simple() {
        let cmdline = Cmdline::from("foo=bar,bar2 baz=fuz wiz");
        let mut iter = cmdline.iter();

        assert_eq!(iter.next(), Some("foo=bar,bar2"));
        assert_eq!(iter.next(), Some("baz=fuz"));
        assert_eq!(iter.next(), Some("wiz"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_tokens_skip_empty_fragments() {
        let cmdline = Cmdline::from("  sn=XXXX \t\n  mfg   ");
        let tokens: Vec<_> = cmdline.iter().collect();
        assert_eq!(tokens, vec!["sn=XXXX", "mfg"]);
    }

    #[test]
    fn test_tokens_empty_line() {
        let cmdline = Cmdline::from("   ");
        assert_eq!(cmdline.iter().next(), None);

        let cmdline: Cmdline = Default::default();
        assert_eq!(cmdline.iter().next(), None);
    }

    #[test]
    fn test_delivered_count() {
        let cmdline = Cmdline::from("a  b c   ");
        let mut iter = cmdline.iter();
        assert_eq!(iter.delivered(), 0);
        while iter.next().is_some() {}
        assert_eq!(iter.delivered(), 3);
    }

    #[test]
    fn test_owned_cmdline() {
        let cmdline = Cmdline::from("vid=0x0001 pid=0x0001".to_string());
        let tokens: Vec<_> = (&cmdline).into_iter().collect();
        assert_eq!(tokens, vec!["vid=0x0001", "pid=0x0001"]);
        assert_eq!(cmdline.to_string(), "vid=0x0001 pid=0x0001");
    }
}
