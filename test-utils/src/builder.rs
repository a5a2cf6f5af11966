use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with seeded user indexes.
///
/// Provides a fluent interface for configuring the data directory before a test runs.
/// Each call to `with_index()` writes `{user_id}.json` when `build()` is called.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, factory::index::tracked_event};
///
/// let test = TestBuilder::new()
///     .with_index(42, vec![tracked_event(1, 100), tracked_event(1, 101)])
///     .with_index(43, vec![])
///     .build()?;
/// ```
pub struct TestBuilder {
    /// User indexes to write, in insertion order.
    indexes: Vec<(u64, Vec<serde_json::Value>)>,
}

impl TestBuilder {
    /// Creates a new test builder with no seeded indexes.
    pub fn new() -> Self {
        Self {
            indexes: Vec::new(),
        }
    }

    /// Seeds an index file for a user.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID owning the index
    /// - `records` - Index records, typically built with `factory::index`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_index(mut self, user_id: u64, records: Vec<serde_json::Value>) -> Self {
        self.indexes.push((user_id, records));
        self
    }

    /// Creates the temporary directory and writes every seeded index.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with all seed files written
    /// - `Err(TestError)` - Failed to create the directory or write a file
    pub fn build(self) -> Result<TestContext, TestError> {
        let test = TestContext::new()?;

        for (user_id, records) in self.indexes {
            let raw = serde_json::to_string(&records)?;
            test.write_file(&format!("{user_id}.json"), &raw)?;
        }

        Ok(test)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
