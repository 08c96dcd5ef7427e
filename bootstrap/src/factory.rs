//! The statically-registered constraint factory.
//!
//! Declaration files name constraints by kind; the factory maps each kind to
//! a constructor function resolved at registration time. Applications add
//! their own kinds with [`ConstraintFactory::register`]; there is no
//! dynamic loading of any sort.

use std::collections::HashMap;

use optset_core::{ConfigError, OptionConstraint, ValueConstraint};

use crate::error::{BootstrapError, Result};

/// Builds a constraint from its kind-specific specification string.
pub type ConstraintBuilder = fn(&str) -> std::result::Result<Box<dyn OptionConstraint>, ConfigError>;

fn build_string_values(spec: &str) -> std::result::Result<Box<dyn OptionConstraint>, ConfigError> {
    Ok(Box::new(ValueConstraint::parse_strings(spec)?))
}

fn build_int_values(spec: &str) -> std::result::Result<Box<dyn OptionConstraint>, ConfigError> {
    Ok(Box::new(ValueConstraint::parse_ints(spec)?))
}

fn build_int_range(spec: &str) -> std::result::Result<Box<dyn OptionConstraint>, ConfigError> {
    Ok(Box::new(ValueConstraint::parse_range(spec)?))
}

/// Maps declaration constraint kinds to constructor functions.
///
/// # Examples
///
/// ```
/// use optset_bootstrap::ConstraintFactory;
///
/// let factory = ConstraintFactory::builtin();
/// assert!(factory.build("int-range", "7:12").is_ok());
/// assert!(factory.build("no-such-kind", "x").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintFactory {
    builders: HashMap<String, ConstraintBuilder>,
}

impl ConstraintFactory {
    /// A factory with no registered kinds.
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// A factory with the built-in kinds: `string-values` (`+A|B|C`, the
    /// leading `+` selecting case-insensitive comparison), `int-values`
    /// (`1|2|7`), and `int-range` (`7:12`).
    pub fn builtin() -> Self {
        let mut factory = Self::empty();
        factory.register("string-values", build_string_values);
        factory.register("int-values", build_int_values);
        factory.register("int-range", build_int_range);
        factory
    }

    /// Registers a constraint kind. An existing registration for the same
    /// kind is replaced.
    pub fn register(&mut self, kind: &str, builder: ConstraintBuilder) -> &mut Self {
        self.builders.insert(kind.to_string(), builder);
        self
    }

    /// Builds a constraint of the given kind from its specification string.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::UnknownConstraintKind`] for unregistered
    /// kinds and propagates the builder's [`ConfigError`] for invalid
    /// specification strings.
    pub fn build(&self, kind: &str, spec: &str) -> Result<Box<dyn OptionConstraint>> {
        let builder = self
            .builders
            .get(kind)
            .ok_or_else(|| BootstrapError::UnknownConstraintKind(kind.to_string()))?;
        Ok(builder(spec)?)
    }
}

impl Default for ConstraintFactory {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_kinds_resolve() {
        let factory = ConstraintFactory::builtin();
        for (kind, spec) in [
            ("string-values", "+RED|GREEN"),
            ("int-values", "1|2|7"),
            ("int-range", "7:12"),
        ] {
            assert!(factory.build(kind, spec).is_ok(), "kind {kind}");
        }
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let factory = ConstraintFactory::builtin();
        assert!(matches!(
            factory.build("regex", ".*"),
            Err(BootstrapError::UnknownConstraintKind(_))
        ));
    }

    #[test]
    fn test_invalid_spec_propagates_config_error() {
        let factory = ConstraintFactory::builtin();
        assert!(matches!(
            factory.build("int-range", "12:7"),
            Err(BootstrapError::Config(_))
        ));
    }

    #[test]
    fn test_user_registration() {
        fn anything(_spec: &str) -> std::result::Result<Box<dyn OptionConstraint>, ConfigError> {
            Ok(Box::new(ValueConstraint::range(0, i64::MAX).unwrap()))
        }

        let mut factory = ConstraintFactory::empty();
        factory.register("non-negative", anything);
        assert!(factory.build("non-negative", "").is_ok());
        assert!(factory.build("int-range", "1:2").is_err());
    }
}
