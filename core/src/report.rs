//! Per-check result containers.
//!
//! Configuration ([`OptionSet`](crate::OptionSet)) is immutable during a
//! check; everything the engines record lands in a fresh [`CheckReport`]
//! returned by [`OptionSet::check`](crate::OptionSet::check). A set can
//! therefore be checked any number of times, against any number of token
//! vectors, without accumulating state.

use std::collections::HashMap;

use crate::set::OptionSet;

/// Switches controlling the validation stage of a check.
///
/// The defaults reject unmatched option-like tokens and require data items
/// to form the tail of the token vector.
///
/// # Examples
///
/// ```
/// use optset_core::CheckPolicy;
///
/// let policy = CheckPolicy::default();
/// assert!(!policy.ignore_unmatched);
/// assert!(policy.require_data_last);
///
/// let lenient = CheckPolicy { ignore_unmatched: true, require_data_last: false };
/// assert!(lenient.ignore_unmatched);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CheckPolicy {
    /// Accept unmatched option-like tokens instead of failing the check.
    pub ignore_unmatched: bool,
    /// Require all data items to be the last tokens on the command line.
    pub require_data_last: bool,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            ignore_unmatched: false,
            require_data_last: true,
        }
    }
}

/// The recorded occurrences of one option after a check.
#[derive(Debug, Clone)]
pub struct OptionResult {
    key: String,
    takes_value: bool,
    takes_detail: bool,
    count: usize,
    values: Vec<String>,
    details: Vec<String>,
}

impl OptionResult {
    pub(crate) fn new(key: &str, takes_value: bool, takes_detail: bool) -> Self {
        Self {
            key: key.to_string(),
            takes_value,
            takes_detail,
            count: 0,
            values: Vec::new(),
            details: Vec::new(),
        }
    }

    /// The primary key of the option these results belong to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// How many times the option occurred.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the option occurred at least once.
    pub fn is_set(&self) -> bool {
        self.count > 0
    }

    /// All recorded values, in occurrence order. Empty for flags.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// All recorded details, in occurrence order. Empty unless the option
    /// kind captures details.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// The value recorded for the occurrence at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the option does not take a value, or if `index` is not
    /// below [`count`](OptionResult::count).
    pub fn value_at(&self, index: usize) -> &str {
        assert!(
            self.takes_value,
            "option '{}' does not take a value",
            self.key
        );
        self.values.get(index).unwrap_or_else(|| {
            panic!(
                "no value at index {index} for option '{}' ({} recorded)",
                self.key, self.count
            )
        })
    }

    /// The detail recorded for the occurrence at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the option does not capture details, or if `index` is not
    /// below [`count`](OptionResult::count).
    pub fn detail_at(&self, index: usize) -> &str {
        assert!(
            self.takes_detail,
            "option '{}' does not capture a detail",
            self.key
        );
        self.details.get(index).unwrap_or_else(|| {
            panic!(
                "no detail at index {index} for option '{}' ({} recorded)",
                self.key, self.count
            )
        })
    }

    /// Records one occurrence. Value/detail presence must agree with the
    /// option kind; the matcher guarantees this.
    pub(crate) fn record(&mut self, value: Option<String>, detail: Option<String>) {
        if let Some(value) = value {
            self.values.push(value);
        }
        if let Some(detail) = detail {
            self.details.push(detail);
        }
        self.count += 1;
    }
}

/// The complete outcome of checking one token vector against one set.
///
/// Carries the verdict, the accumulated diagnostic log, the per-option
/// results in declaration order, the collected data items, and the
/// unmatched option-like tokens.
#[derive(Debug, Clone)]
pub struct CheckReport {
    set_name: String,
    success: bool,
    entries: Vec<String>,
    results: Vec<OptionResult>,
    index: HashMap<String, usize>,
    data: Vec<String>,
    unmatched: Vec<String>,
    first_data_index: Option<usize>,
}

impl CheckReport {
    pub(crate) fn new(set: &OptionSet) -> Self {
        let mut results = Vec::with_capacity(set.options().len());
        let mut index = HashMap::with_capacity(set.options().len());
        for (pos, spec) in set.options().iter().enumerate() {
            results.push(OptionResult::new(
                spec.key(),
                spec.kind().takes_value(),
                spec.kind().takes_detail(),
            ));
            index.insert(spec.key().to_string(), pos);
        }
        Self {
            set_name: set.name().to_string(),
            success: false,
            entries: Vec::new(),
            results,
            index,
            data: Vec::new(),
            unmatched: Vec::new(),
            first_data_index: None,
        }
    }

    /// The name of the set this report was produced for.
    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    /// Whether the check succeeded.
    pub fn success(&self) -> bool {
        self.success
    }

    /// The diagnostic log, one line per entry.
    pub fn log(&self) -> String {
        self.entries.join("\n")
    }

    /// The individual diagnostic entries, in the order they were appended.
    pub fn log_entries(&self) -> &[String] {
        &self.entries
    }

    /// Per-option results in declaration order.
    pub fn options(&self) -> &[OptionResult] {
        &self.results
    }

    /// The results for the option with the given primary key.
    ///
    /// # Panics
    ///
    /// Panics if no option with that key was declared in the checked set.
    pub fn option(&self, key: &str) -> &OptionResult {
        match self.find_option(key) {
            Some(result) => result,
            None => panic!(
                "option set '{}' has no option with key '{key}'",
                self.set_name
            ),
        }
    }

    /// The results for the option with the given primary key, if declared.
    pub fn find_option(&self, key: &str) -> Option<&OptionResult> {
        self.index.get(key).map(|&pos| &self.results[pos])
    }

    /// The positional data items found, in command-line order.
    pub fn data_items(&self) -> &[String] {
        &self.data
    }

    /// The unmatched option-like tokens found, in command-line order.
    pub fn unmatched_tokens(&self) -> &[String] {
        &self.unmatched
    }

    /// The token index of the first data item, if any data was found.
    pub fn first_data_index(&self) -> Option<usize> {
        self.first_data_index
    }

    pub(crate) fn note(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub(crate) fn result_mut(&mut self, pos: usize) -> &mut OptionResult {
        &mut self.results[pos]
    }

    pub(crate) fn push_data(&mut self, token_index: usize, token: String) {
        if self.first_data_index.is_none() {
            self.first_data_index = Some(token_index);
        }
        self.data.push(token);
    }

    pub(crate) fn push_unmatched(&mut self, token: String) {
        self.unmatched.push(token);
    }

    pub(crate) fn set_success(&mut self, success: bool) {
        self.success = success;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_records_occurrences() {
        let mut result = OptionResult::new("log", true, false);
        assert!(!result.is_set());
        result.record(Some("a.txt".into()), None);
        result.record(Some("b.txt".into()), None);
        assert_eq!(result.count(), 2);
        assert_eq!(result.value_at(0), "a.txt");
        assert_eq!(result.value_at(1), "b.txt");
    }

    #[test]
    #[should_panic(expected = "no value at index 1")]
    fn test_value_index_out_of_range_panics() {
        let mut result = OptionResult::new("log", true, false);
        result.record(Some("a.txt".into()), None);
        result.value_at(1);
    }

    #[test]
    #[should_panic(expected = "does not take a value")]
    fn test_value_on_flag_panics() {
        let mut result = OptionResult::new("verbose", false, false);
        result.record(None, None);
        result.value_at(0);
    }
}
