//! DOMTokenList (classList)

/// Space-separated token list backing the `class` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        list.add(s);
        list
    }

    /// Get number of tokens
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add every whitespace-separated token in `tokens`, skipping duplicates.
    /// Returns true if anything was added.
    pub fn add(&mut self, tokens: &str) -> bool {
        let mut changed = false;
        for token in tokens.split_whitespace() {
            if !self.contains(token) {
                self.tokens.push(token.to_string());
                changed = true;
            }
        }
        changed
    }

    /// Remove every whitespace-separated token in `tokens`.
    /// Returns true if anything was removed.
    pub fn remove(&mut self, tokens: &str) -> bool {
        let before = self.tokens.len();
        let remove: Vec<&str> = tokens.split_whitespace().collect();
        self.tokens.retain(|t| !remove.contains(&t.as_str()));
        before != self.tokens.len()
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_dedups() {
        let list = DOMTokenList::from_string("btn  btn-primary btn");
        assert_eq!(list.length(), 2);
        assert_eq!(list.value(), "btn btn-primary");
    }

    #[test]
    fn test_add_remove_multi_token() {
        let mut list = DOMTokenList::from_string("btn");
        assert!(list.add("stateindicator-disabled disabled"));
        assert!(!list.add("disabled"));
        assert_eq!(list.length(), 3);

        assert!(list.remove("stateindicator-disabled disabled"));
        assert_eq!(list.value(), "btn");
        assert!(!list.remove("missing"));
    }
}
