//! Usage and help-text rendering for option sets.
//!
//! Everything here is a derived, read-only view over the configuration in
//! [`optset_core`]: nothing is stored, and the core crate knows nothing
//! about rendering. The output formats:
//!
//! | Component                       | Example                              |
//! |---------------------------------|--------------------------------------|
//! | flag                            | `-a`                                 |
//! | value option, blank separator   | `-log <file>`                        |
//! | detail option, `=` separator    | `-D<detail>=<value>`                 |
//! | alternate key                   | `(-a\|--all)`                        |
//! | optional multiplicity           | `[-a]`                               |
//! | repeatable multiplicity         | `-v <n1> [-v <n2> [...]]`            |
//! | exclusive group                 | `{-a\|-b}`                           |
//! | data items                      | `<data>`, `[<data>]`, `[<data> [...]]` |
//!
//! The `<value>`/`<detail>`/`<data>` placeholders honor the display texts
//! configured on the specs and sets.

use optset_core::{DataLimit, Multiplicity, OptionRegistry, OptionSet, OptionSpec};

/// Renders the command-line syntax for one option, accounting for alternate
/// keys, separators, and multiplicity.
///
/// # Examples
///
/// ```
/// use optset_core::{DataLimit, Multiplicity, OptionKind, OptionSet};
/// use optset_help::option_syntax;
///
/// let mut set = OptionSet::new("demo", 0, DataLimit::Limited(0)).unwrap();
/// set.add_option_with(OptionKind::Value, "log", None, Multiplicity::ExactlyOne).unwrap();
/// set.add_option(OptionKind::Flag, "force").unwrap();
///
/// assert_eq!(option_syntax(set.find_option("log").unwrap()), "-log <value>");
/// assert_eq!(option_syntax(set.find_option("force").unwrap()), "[-force]");
/// ```
pub fn option_syntax(spec: &OptionSpec) -> String {
    let repeatable = matches!(
        spec.multiplicity(),
        Multiplicity::ZeroOrMore | Multiplicity::OneOrMore
    );
    let optional = matches!(
        spec.multiplicity(),
        Multiplicity::ZeroOrOne | Multiplicity::ZeroOrMore
    );

    let mut out = String::with_capacity(20);
    if optional {
        out.push('[');
    }
    push_key_form(&mut out, spec);
    if repeatable {
        push_argument_texts(&mut out, spec, 1);
        out.push_str(" [");
        push_key_form(&mut out, spec);
        push_argument_texts(&mut out, spec, 2);
        out.push_str(" [...]]");
    } else {
        push_argument_texts(&mut out, spec, 0);
    }
    if optional {
        out.push(']');
    }
    out
}

/// The `-key` or `(-key|--altkey)` part of an option's syntax.
fn push_key_form(out: &mut String, spec: &OptionSpec) {
    match spec.alt_key() {
        Some(alt) => {
            out.push('(');
            out.push_str(spec.prefix().as_str());
            out.push_str(spec.key());
            out.push('|');
            out.push_str(spec.alt_prefix().as_str());
            out.push_str(alt);
            out.push(')');
        }
        None => {
            out.push_str(spec.prefix().as_str());
            out.push_str(spec.key());
        }
    }
}

/// The `<detail>`/`<value>` placeholders, numbered for repeatable options.
fn push_argument_texts(out: &mut String, spec: &OptionSpec, occurrence: usize) {
    if spec.kind().takes_detail() {
        out.push('<');
        out.push_str(spec.detail_text());
        if occurrence > 0 {
            out.push_str(&occurrence.to_string());
        }
        out.push('>');
    }
    if spec.kind().takes_value() {
        out.push(spec.separator().as_char());
        out.push('<');
        out.push_str(spec.value_text());
        if occurrence > 0 {
            out.push_str(&occurrence.to_string());
        }
        out.push('>');
    }
}

/// The placeholder for the data item at `index`: `<text>` while required,
/// `[<text> [...]]` for the unlimited tail, `[<text>]` otherwise.
fn data_syntax(index: usize, text: &str, min_data: usize, max_data: DataLimit) -> String {
    if index < min_data {
        return format!("<{text}>");
    }
    if max_data == DataLimit::Unlimited {
        return format!("[<{text}> [...]]");
    }
    format!("[<{text}>]")
}

/// Renders the full command line for a set.
///
/// Options outside exclusive groups come first, then each exclusive group
/// as `{a|b}`, then the data placeholders. With `line_break` every option
/// lands on its own line, indented to align under the end of
/// `leading_text`'s last line.
///
/// # Examples
///
/// ```
/// use optset_core::{DataLimit, Multiplicity, OptionKind, OptionSet};
/// use optset_help::command_line;
///
/// let mut set = OptionSet::new("demo", 1, DataLimit::Unlimited).unwrap();
/// set.add_option_with(OptionKind::Value, "log", None, Multiplicity::ExactlyOne).unwrap();
///
/// assert_eq!(
///     command_line(&set, "usage: convert", false),
///     "usage: convert -log <value> <data> [<data> [...]]",
/// );
/// ```
pub fn command_line(set: &OptionSet, leading_text: &str, line_break: bool) -> String {
    let mut pieces: Vec<String> = Vec::new();

    for spec in set.options() {
        if !spec.is_exclusive() {
            pieces.push(option_syntax(spec));
        }
    }

    for group in set.exclusive_groups() {
        let members: Vec<String> = group
            .keys()
            .iter()
            .filter_map(|key| set.find_option(key))
            .map(option_syntax)
            .collect();
        pieces.push(format!("{{{}}}", members.join("|")));
    }

    let mut data_pieces: Vec<String> = Vec::new();
    if set.accepts_data() {
        for index in 0..set.text_slots() {
            data_pieces.push(data_syntax(
                index,
                set.data_text(index),
                set.min_data(),
                set.max_data(),
            ));
        }
    }

    let leading = leading_text.trim();
    if !line_break {
        let mut all = Vec::with_capacity(1 + pieces.len() + data_pieces.len());
        if !leading.is_empty() {
            all.push(leading.to_string());
        }
        all.extend(pieces);
        all.extend(data_pieces);
        return all.join(" ");
    }

    // One option per line, aligned under the end of the leading text.
    let last_line = leading.rsplit('\n').next().unwrap_or("");
    let indent = " ".repeat(last_line.chars().count() + 1);
    let mut out = String::new();
    if !leading.is_empty() {
        out.push_str(leading);
        out.push(' ');
    }
    let mut first = true;
    for piece in &pieces {
        if !first {
            out.push_str(&indent);
        }
        first = false;
        out.push_str(piece);
        out.push('\n');
    }
    if !data_pieces.is_empty() {
        if !first {
            out.push_str(&indent);
        }
        out.push_str(&data_pieces.join(" "));
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Renders the aligned help-text block for a set: one row per option and
/// data slot, `syntax : description`, with multi-line descriptions indented
/// under their first line.
pub fn help_text(set: &OptionSet) -> String {
    let mut rows: Vec<(String, String)> = Vec::new();

    for spec in set.options() {
        rows.push((option_syntax(spec), spec.help_text().to_string()));
    }
    for index in 0..set.text_slots() {
        rows.push((
            data_syntax(index, set.data_text(index), set.min_data(), set.max_data()),
            set.data_help(index).to_string(),
        ));
    }

    let width = rows
        .iter()
        .map(|(syntax, _)| syntax.chars().count())
        .max()
        .unwrap_or(0);
    let continuation = " ".repeat(width + 3);

    let mut out = String::new();
    for (syntax, help) in &rows {
        for (line_no, line) in help.split('\n').enumerate() {
            if line_no == 0 {
                out.push_str(&format!("{syntax:width$} : {line}\n"));
            } else {
                out.push_str(&continuation);
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out.trim_end().to_string()
}

/// Renders the command lines (and optionally the help blocks) for every set
/// in a registry, in name order.
pub fn usage_summary(
    registry: &OptionRegistry,
    leading_text: &str,
    line_break: bool,
    print_texts: bool,
) -> String {
    let mut sections: Vec<String> = Vec::new();
    for set in registry.sets() {
        let mut section = command_line(set, leading_text, line_break);
        if print_texts {
            section.push_str("\n\n");
            section.push_str(&help_text(set));
        }
        sections.push(section);
    }
    sections.join("\n\n")
}
