//! Fixed-capacity owned strings with explicit truncation accounting.

use std::ops::Deref;

use serde::Serialize;

/// Outcome of copying a value into a bounded container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum CopyOutcome {
    /// The whole value fit.
    Complete,
    /// The value was cut off at the container's capacity.
    Truncated,
}

/// An owned string holding at most `CAP` bytes.
///
/// Assignment truncates on a UTF-8 character boundary and reports whether
/// truncation happened so call sites can account for it; nothing is ever
/// stored past the capacity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BoundedString<const CAP: usize> {
    value: String,
}

impl<const CAP: usize> BoundedString<CAP> {
    /// The fixed capacity, in bytes.
    pub const CAPACITY: usize = CAP;

    /// Replaces the contents with `source`, truncating at the capacity.
    pub fn assign(&mut self, source: &str) -> CopyOutcome {
        self.value.clear();
        if source.len() <= CAP {
            self.value.push_str(source);
            CopyOutcome::Complete
        } else {
            let mut end = CAP;
            while !source.is_char_boundary(end) {
                end -= 1;
            }
            self.value.push_str(&source[..end]);
            CopyOutcome::Truncated
        }
    }

    /// Returns the contents as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether nothing (or an empty value) has been assigned.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.value.len()
    }
}

impl<const CAP: usize> Deref for BoundedString<CAP> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl<const CAP: usize> std::fmt::Display for BoundedString<CAP> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_within_capacity() {
        let mut s = BoundedString::<10>::default();
        assert_eq!(s.assign("DS3617xs"), CopyOutcome::Complete);
        assert_eq!(s.as_str(), "DS3617xs");
        assert_eq!(s.len(), 8);
    }

    #[test]
    fn test_assign_exactly_at_capacity() {
        let mut s = BoundedString::<4>::default();
        assert_eq!(s.assign("abcd"), CopyOutcome::Complete);
        assert_eq!(s.as_str(), "abcd");
    }

    #[test]
    fn test_assign_truncates() {
        let mut s = BoundedString::<4>::default();
        assert_eq!(s.assign("abcdef"), CopyOutcome::Truncated);
        assert_eq!(s.as_str(), "abcd");
    }

    #[test]
    fn test_truncation_lands_on_char_boundary() {
        let mut s = BoundedString::<4>::default();
        // 'é' is two bytes; the naive cut at 4 would split it
        assert_eq!(s.assign("abcéd"), CopyOutcome::Truncated);
        assert_eq!(s.as_str(), "abc");
    }

    #[test]
    fn test_reassignment_replaces() {
        let mut s = BoundedString::<8>::default();
        assert_eq!(s.assign("first"), CopyOutcome::Complete);
        assert_eq!(s.assign("x"), CopyOutcome::Complete);
        assert_eq!(s.as_str(), "x");
    }

    #[test]
    fn test_default_is_empty() {
        let s = BoundedString::<8>::default();
        assert!(s.is_empty());
        assert_eq!(s.as_str(), "");
    }
}
