//! Dependency tagging for semantic categorization.

use std::time::Duration;

/// Remote dependencies the cart talks to.
///
/// Each tag carries a default timeout and retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Product catalog (`/products/{id}`).
    Catalog,
    /// Stock lookup (`/stock/{id}`).
    Stock,
}

impl DependencyTag {
    /// Get the default timeout for this dependency type.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Catalog => Duration::from_millis(3000),
            Self::Stock => Duration::from_millis(2000),
        }
    }

    /// Get the default max retries for this dependency type.
    ///
    /// Cart operations report a failed lookup immediately, so none of the
    /// built-in dependencies retry unless configured to.
    pub fn default_max_retries(&self) -> u32 {
        0
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Stock => "stock",
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(DependencyTag::Catalog.to_string(), "catalog");
        assert_eq!(DependencyTag::Stock.to_string(), "stock");
    }

    #[test]
    fn test_stock_is_tighter_than_catalog() {
        assert!(DependencyTag::Stock.default_timeout() < DependencyTag::Catalog.default_timeout());
        assert_eq!(DependencyTag::Stock.default_max_retries(), 0);
    }
}
