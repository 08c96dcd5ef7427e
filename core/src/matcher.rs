//! The token matching engine.
//!
//! A single left-to-right pass over the token vector. At each position every
//! option of the set is tried in declaration order and the first whose
//! pattern matches wins; declaration order is the only tie-break. Tokens no
//! option consumes are classified afterwards: prefix-like ones become
//! unmatched tokens, the rest become positional data.

use tracing::debug;

use crate::report::CheckReport;
use crate::set::OptionSet;
use crate::types::Separator;

/// Runs the matching pass, recording occurrences, data items, and unmatched
/// tokens into `report`.
pub(crate) fn run(set: &OptionSet, tokens: &[&str], report: &mut CheckReport) {
    let prefix = set.prefix().as_str();
    let alt_prefix = set.alt_prefix().as_str();
    let mut consumed = vec![false; tokens.len()];

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];

        for (pos, spec) in set.options().iter().enumerate() {
            let Some(found) = spec.match_token(token) else {
                continue;
            };

            if spec.kind().takes_value() && spec.separator() == Separator::Blank {
                // The value must arrive as the next token. A missing or
                // option-like follower invalidates this occurrence: nothing
                // is recorded and the key token stays unconsumed, so it
                // surfaces as an unmatched token below.
                match tokens.get(i + 1) {
                    None => {
                        report.note(format!(
                            "no value found following option '{token}' (end of arguments)"
                        ));
                    }
                    Some(next) if next.starts_with(prefix) || next.starts_with(alt_prefix) => {
                        report.note(format!("no value found following option '{token}'"));
                    }
                    Some(next) => {
                        debug!(option = spec.key(), value = next, "matched value option");
                        consumed[i] = true;
                        consumed[i + 1] = true;
                        report
                            .result_mut(pos)
                            .record(Some(next.to_string()), found.detail);
                        i += 1;
                    }
                }
            } else {
                debug!(option = spec.key(), token, "matched option");
                consumed[i] = true;
                report.result_mut(pos).record(found.value, found.detail);
            }
            break;
        }

        i += 1;
    }

    for (index, token) in tokens.iter().enumerate() {
        if consumed[index] {
            continue;
        }
        if token.starts_with(prefix) || token.starts_with(alt_prefix) {
            debug!(token, "unmatched option-like token");
            report.note(format!("no matching option found for argument '{token}'"));
            report.push_unmatched(token.to_string());
        } else {
            debug!(token, index, "positional data item");
            report.push_data(index, token.to_string());
        }
    }
}
