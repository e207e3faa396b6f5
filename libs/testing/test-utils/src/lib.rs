//! Shared test utilities for the domain crates.
//!
//! - [`TestDatabase`]: private in-memory SQLite database per test
//! - [`TestDataBuilder`]: deterministic names derived from the test name
//! - [`assertions`]: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.name("product", "main");
//! }
//! ```

mod sqlite;

pub use sqlite::TestDatabase;

/// Builder for test data with deterministic values.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique name such as `test-product-12345-main`.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("product", "main"), "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

pub mod assertions {
    /// Assert that identities are strictly increasing (insertion order).
    pub fn assert_ascending_ids(ids: &[i32], context: &str) {
        assert!(
            ids.windows(2).all(|w| w[0] < w[1]),
            "{}: expected ascending ids, got {:?}",
            context,
            ids
        );
    }
}
