//! The validation engine.
//!
//! Runs after the matching pass and short-circuits on the first violation,
//! always appending a description to the report's diagnostic log first. The
//! order of the checks: multiplicity of non-exclusive options, per-option
//! constraints, exclusive groups, data arity, data placement, unmatched
//! tokens.

use tracing::debug;

use crate::matcher;
use crate::report::{CheckPolicy, CheckReport};
use crate::set::OptionSet;

pub(crate) fn run_check(set: &OptionSet, tokens: &[&str], policy: CheckPolicy) -> CheckReport {
    let mut report = CheckReport::new(set);
    report.note(format!("checking set '{}'", set.name()));
    debug!(set = set.name(), tokens = tokens.len(), "running check");

    // Trivial cases that need no matching pass.
    if set.options().is_empty() && tokens.is_empty() {
        if set.min_data() > 0 {
            report.note("the set expects data, but no arguments have been given");
            return report;
        }
        report.set_success(true);
        return report;
    }
    if tokens.is_empty() {
        if set.is_purely_optional() {
            report.set_success(true);
            return report;
        }
        report.note("options have been defined, but no arguments have been given; nothing to check");
        return report;
    }

    matcher::run(set, tokens, &mut report);

    // Multiplicity of every option that is not governed by an exclusive
    // group.
    for (pos, spec) in set.options().iter().enumerate() {
        if spec.is_exclusive() {
            continue;
        }
        let count = report.options()[pos].count();
        if !spec.multiplicity().accepts(count) {
            report.note(format!(
                "wrong number of occurrences for option '{}{}': found {count}, expected {}",
                spec.prefix(),
                spec.key(),
                spec.multiplicity()
            ));
            return report;
        }
    }

    // Per-option constraints, for options that occurred at least once.
    for (pos, spec) in set.options().iter().enumerate() {
        let result = &report.options()[pos];
        if !result.is_set() {
            continue;
        }
        for constraint in spec.constraints() {
            if !constraint.is_satisfied(result) {
                report.note(format!(
                    "constraint {constraint} violated for option '{}'",
                    spec.key()
                ));
                return report;
            }
        }
    }

    // Exclusive groups.
    for group in set.exclusive_groups() {
        if !group.is_satisfied(&report) {
            report.note(format!(
                "exclusive group {group} violated for option set '{}'",
                set.name()
            ));
            return report;
        }
    }

    // Data arity.
    let data_count = report.data_items().len();
    if data_count < set.min_data() || !set.max_data().covers(data_count) {
        report.note(format!(
            "invalid number of data arguments: {data_count} (allowed range: {} ... {})",
            set.min_data(),
            set.max_data()
        ));
        return report;
    }

    // Data placement: data items must form the tail of the token vector.
    if policy.require_data_last && data_count > 0 {
        let first = report.first_data_index().unwrap_or(0);
        if first + data_count != tokens.len() {
            report.note("data arguments are not the last ones on the command line");
            return report;
        }
    }

    // Unmatched option-like tokens.
    if !policy.ignore_unmatched && !report.unmatched_tokens().is_empty() {
        report.note(format!(
            "{} unmatched option-like argument(s) remain",
            report.unmatched_tokens().len()
        ));
        return report;
    }

    report.set_success(true);
    report
}

#[cfg(test)]
mod tests {
    use crate::constraint::ValueConstraint;
    use crate::report::CheckPolicy;
    use crate::set::OptionSet;
    use crate::types::{DataLimit, Multiplicity, OptionKind};

    fn policy() -> CheckPolicy {
        CheckPolicy::default()
    }

    // One value option with blank separator: "-log out.txt" succeeds and
    // records the value.
    #[test]
    fn test_blank_value_option_succeeds() {
        let mut set = OptionSet::new("main", 0, DataLimit::Limited(0)).unwrap();
        set.add_option_with(OptionKind::Value, "log", None, Multiplicity::ExactlyOne)
            .unwrap();

        let report = set.check(&["-log", "out.txt"], policy());
        assert!(report.success(), "log: {}", report.log());
        assert_eq!(report.option("log").value_at(0), "out.txt");
    }

    // The same option without its value fails with a "no value" diagnostic.
    #[test]
    fn test_blank_value_option_without_value_fails() {
        let mut set = OptionSet::new("main", 0, DataLimit::Limited(0)).unwrap();
        set.add_option_with(OptionKind::Value, "log", None, Multiplicity::ExactlyOne)
            .unwrap();

        let report = set.check(&["-log"], policy());
        assert!(!report.success());
        assert!(report.log().contains("no value found"));
        assert_eq!(report.option("log").count(), 0);
    }

    // Two members of one exclusive group on the command line fail the check.
    #[test]
    fn test_exclusive_group_rejects_two_members() {
        let mut set = OptionSet::new("main", 0, DataLimit::Limited(0)).unwrap();
        set.add_option(OptionKind::Flag, "a").unwrap();
        set.add_option(OptionKind::Flag, "b").unwrap();
        set.add_exclusive_group(Multiplicity::ExactlyOne, &["a", "b"])
            .unwrap();

        let report = set.check(&["-a", "-b"], policy());
        assert!(!report.success());
        assert!(report.log().contains("exclusive group a|b violated"));
    }

    #[test]
    fn test_exclusive_group_accepts_one_member() {
        let mut set = OptionSet::new("main", 0, DataLimit::Limited(0)).unwrap();
        set.add_option(OptionKind::Flag, "a").unwrap();
        set.add_option(OptionKind::Flag, "b").unwrap();
        set.add_exclusive_group(Multiplicity::ExactlyOne, &["a", "b"])
            .unwrap();

        assert!(set.check(&["-b"], policy()).success());
        // The group is required: no member at all also fails.
        assert!(!set.check::<&str>(&[], policy()).success());
    }

    // Case-insensitive string enumeration on an equals-separated option.
    #[test]
    fn test_string_constraint_case_insensitive_match() {
        use crate::types::{Prefix, Separator};
        let mut set = OptionSet::with_defaults(
            "main",
            Prefix::Dash,
            Prefix::DoubleDash,
            Separator::Equals,
            Separator::Equals,
            Multiplicity::ZeroOrOne,
            0,
            DataLimit::Limited(0),
        )
        .unwrap();
        set.add_option(OptionKind::Value, "color")
            .unwrap()
            .add_constraint(Box::new(
                ValueConstraint::strings(&["RED", "GREEN", "BLUE"], false).unwrap(),
            ))
            .unwrap();

        let report = set.check(&["-color=red"], policy());
        assert!(report.success(), "log: {}", report.log());

        let report = set.check(&["-color=purple"], policy());
        assert!(!report.success());
        assert!(report.log().contains("string-values: +RED|GREEN|BLUE"));
    }

    // Unlimited data arity with requireDataLast.
    #[test]
    fn test_unlimited_trailing_data() {
        let mut set = OptionSet::new("main", 1, DataLimit::Unlimited).unwrap();
        set.add_option(OptionKind::Flag, "a").unwrap();

        let report = set.check(&["-a", "x", "y", "z"], policy());
        assert!(report.success(), "log: {}", report.log());
        assert_eq!(report.data_items(), ["x", "y", "z"]);
    }

    // An int-range constraint satisfied by the second of two occurrences.
    #[test]
    fn test_range_constraint_any_occurrence() {
        let mut set = OptionSet::new("main", 0, DataLimit::Limited(0)).unwrap();
        set.add_option_with(OptionKind::Value, "n", None, Multiplicity::ZeroOrMore)
            .unwrap()
            .add_constraint(Box::new(ValueConstraint::range(7, 12).unwrap()))
            .unwrap();

        let report = set.check(&["-n", "5", "-n", "9"], policy());
        assert!(report.success(), "log: {}", report.log());
        assert_eq!(report.option("n").values(), ["5", "9"]);
    }

    #[test]
    fn test_multiplicity_violation_short_circuits() {
        let mut set = OptionSet::new("main", 0, DataLimit::Limited(0)).unwrap();
        set.add_option_with(OptionKind::Flag, "once", None, Multiplicity::ExactlyOne)
            .unwrap();

        let report = set.check(&["-once", "-once"], policy());
        assert!(!report.success());
        assert!(report.log().contains("wrong number of occurrences"));
    }

    #[test]
    fn test_data_placement_enforced() {
        let mut set = OptionSet::new("main", 0, DataLimit::Unlimited).unwrap();
        set.add_option(OptionKind::Flag, "a").unwrap();

        let interleaved = ["x", "-a", "y"];
        let report = set.check(&interleaved, policy());
        assert!(!report.success());
        assert!(report.log().contains("not the last ones"));

        let relaxed = CheckPolicy {
            require_data_last: false,
            ..policy()
        };
        assert!(set.check(&interleaved, relaxed).success());
    }

    #[test]
    fn test_unmatched_tokens_fail_unless_ignored() {
        let mut set = OptionSet::new("main", 0, DataLimit::Limited(0)).unwrap();
        set.add_option(OptionKind::Flag, "a").unwrap();

        let report = set.check(&["-a", "--mystery"], policy());
        assert!(!report.success());
        assert!(report.log().contains("no matching option found"));

        let lenient = CheckPolicy {
            ignore_unmatched: true,
            ..policy()
        };
        assert!(set.check(&["-a", "--mystery"], lenient).success());
    }

    #[test]
    fn test_trivial_cases() {
        // No options, no tokens, no data required: trivially true.
        let empty = OptionSet::new("empty", 0, DataLimit::Limited(0)).unwrap();
        assert!(empty.check::<&str>(&[], policy()).success());

        // No options, no tokens, but data required: failure.
        let needs_data = OptionSet::new("data", 1, DataLimit::Limited(1)).unwrap();
        let report = needs_data.check::<&str>(&[], policy());
        assert!(!report.success());
        assert!(report.log().contains("expects data"));

        // Purely optional options and no tokens: success.
        let mut optional = OptionSet::new("optional", 0, DataLimit::Limited(0)).unwrap();
        optional.add_option(OptionKind::Flag, "v").unwrap();
        assert!(optional.check::<&str>(&[], policy()).success());

        // A mandatory option and no tokens: failure.
        let mut mandatory = OptionSet::new("mandatory", 0, DataLimit::Limited(0)).unwrap();
        mandatory
            .add_option_with(OptionKind::Flag, "v", None, Multiplicity::ExactlyOne)
            .unwrap();
        let report = mandatory.check::<&str>(&[], policy());
        assert!(!report.success());
        assert!(report.log().contains("no arguments"));
    }

    #[test]
    fn test_determinism_across_fresh_checks() {
        let mut set = OptionSet::new("main", 0, DataLimit::Unlimited).unwrap();
        set.add_option_with(OptionKind::Value, "log", None, Multiplicity::ExactlyOne)
            .unwrap();
        set.add_option(OptionKind::Flag, "v").unwrap();

        let tokens = ["-log", "out.txt", "-v", "data1", "data2"];
        let first = set.check(&tokens, policy());
        let second = set.check(&tokens, policy());
        assert_eq!(first.success(), second.success());
        assert_eq!(first.log(), second.log());
        assert_eq!(first.data_items(), second.data_items());
        assert_eq!(
            first.option("log").values(),
            second.option("log").values()
        );
    }

    #[test]
    fn test_data_arity_range_violation() {
        let mut set = OptionSet::new("main", 1, DataLimit::Limited(2)).unwrap();
        set.add_option(OptionKind::Flag, "a").unwrap();

        let report = set.check(&["-a"], policy());
        assert!(!report.success());
        assert!(report.log().contains("invalid number of data arguments: 0"));

        let report = set.check(&["-a", "x", "y", "z"], policy());
        assert!(!report.success());
        assert!(report.log().contains("allowed range: 1 ... 2"));
    }
}
