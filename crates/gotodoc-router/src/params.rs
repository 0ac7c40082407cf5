//! Captured path variables.

use smallvec::SmallVec;

/// Variables held inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Path variables captured by a match, in pattern order.
///
/// Values are percent-decoded.
///
/// # Example
///
/// ```rust
/// use gotodoc_router::Params;
///
/// let mut params = Params::new();
/// params.push("orgId", "acme");
/// params.push("id", "42");
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("name"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a variable.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Drops every variable pushed after the first `len`.
    ///
    /// The matcher uses this to undo captures of a branch that failed.
    pub fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut params = Params::new();
        assert_eq!(params.len(), 0);

        params.push("id", "123");
        params.push("name", "a b");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.get("name"), Some("a b"));
        assert_eq!(params.get("unknown"), None);
    }

    #[test]
    fn test_truncate_undoes_later_captures() {
        let mut params = Params::new();
        params.push("orgId", "acme");
        let mark = params.len();
        params.push("id", "42");

        params.truncate(mark);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("orgId"), Some("acme"));
        assert_eq!(params.get("id"), None);
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let mut params = Params::new();
        for i in 0..10 {
            params.push(format!("key{i}"), format!("value{i}"));
        }

        assert_eq!(params.len(), 10);
        assert_eq!(params.get("key7"), Some("value7"));
    }
}
