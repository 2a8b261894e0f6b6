//! Task item markup contract
//!
//! The Novel editor marks a to-do entry as an `<li>` carrying a fixed class
//! token and a `data-checked` attribute. Both converters key off exactly these
//! strings; changing any of them makes round trips silently fall back to plain
//! bullets.
//!
//! The Markdown side of the contract is a single line pattern,
//! `(-|<n>.) [ |x|X] <content>`, parsed by [`parse_task_line`].

use crate::dom::Attributes;
use once_cell::sync::Lazy;
use regex::Regex;

/// Class attribute value of a task item, compared verbatim
pub const TASK_ITEM_CLASS: &str = "novel-flex novel-items-start novel-my-4";

/// Attribute holding the checked state as `"true"` / `"false"`
pub const CHECKED_ATTR: &str = "data-checked";

/// `data-type` of a task item
pub const TASK_ITEM_TYPE: &str = "taskItem";

/// `data-type` of a task list container
pub const TASK_LIST_TYPE: &str = "taskList";

static TASK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:-|\d+\.) \[([ xX])\] (.+)$").expect("task line pattern is valid")
});

/// True when `s` contains no non-whitespace character (the empty string included)
pub fn is_whitespace_only(s: &str) -> bool {
    !s.chars().any(|c| !c.is_whitespace())
}

/// A Markdown line carrying task syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine<'a> {
    /// Everything before the `-` / `<n>.` marker
    pub leading: &'a str,
    pub checked: bool,
    /// Text after the checkbox, trimmed
    pub content: &'a str,
}

impl TaskLine<'_> {
    /// Whether the marker opens the line (only indentation precedes it)
    pub fn is_block_start(&self) -> bool {
        is_whitespace_only(self.leading)
    }
}

/// Match a single line against the task pattern
///
/// Ordered prefixes (`3. [ ] text`) are accepted and treated like bullets.
pub fn parse_task_line(line: &str) -> Option<TaskLine<'_>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let caps = TASK_LINE.captures(line)?;
    let whole = caps.get(0)?;
    let content = caps.get(2)?.as_str().trim();
    if is_whitespace_only(content) {
        return None;
    }
    let checked = caps.get(1)?.as_str().eq_ignore_ascii_case("x");
    Some(TaskLine {
        leading: &line[..whole.start()],
        checked,
        content,
    })
}

/// Checked state of a task item, or `None` for anything else
///
/// An element counts as a task item only when its class is exactly
/// [`TASK_ITEM_CLASS`] and [`CHECKED_ATTR`] is present and non-empty. A task
/// class without a usable checked attribute is an ordinary list item.
pub fn task_item_state(attrs: &Attributes) -> Option<bool> {
    if attrs.get("class") != Some(TASK_ITEM_CLASS) {
        return None;
    }
    match attrs.get(CHECKED_ATTR) {
        Some(value) if !value.is_empty() => Some(value == "true"),
        _ => None,
    }
}

/// Render the editor's task item element around already-rendered inner HTML
pub fn render_task_item(checked: bool, inner_html: &str) -> String {
    let checkbox = if checked {
        r#"<input type="checkbox" checked>"#
    } else {
        r#"<input type="checkbox">"#
    };
    format!(
        r#"<li class="{TASK_ITEM_CLASS}" {CHECKED_ATTR}="{checked}" data-type="{TASK_ITEM_TYPE}"><label>{checkbox}<span></span></label><div>{inner_html}</div></li>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_whitespace_only() {
        assert!(is_whitespace_only("   "));
        assert!(!is_whitespace_only("a"));
        assert!(is_whitespace_only(""));
        assert!(is_whitespace_only("\t\n "));
        assert!(!is_whitespace_only("  x  "));
    }

    #[test]
    fn test_parse_bullet_task_lines() {
        let unchecked = parse_task_line("- [ ] Buy milk").unwrap();
        assert!(!unchecked.checked);
        assert_eq!(unchecked.content, "Buy milk");
        assert!(unchecked.is_block_start());

        assert!(parse_task_line("- [x] Buy milk").unwrap().checked);
        assert!(parse_task_line("- [X] Buy milk").unwrap().checked);
    }

    #[test]
    fn test_parse_ordered_task_line() {
        let task = parse_task_line("12. [ ] Task one").unwrap();
        assert!(!task.checked);
        assert_eq!(task.content, "Task one");
        assert_eq!(task.leading, "");
    }

    #[test]
    fn test_parse_indented_and_embedded_task_lines() {
        let nested = parse_task_line("      - [x] deep").unwrap();
        assert_eq!(nested.leading, "      ");
        assert!(nested.is_block_start());

        let quoted = parse_task_line("> - [ ] quoted").unwrap();
        assert_eq!(quoted.leading, "> ");
        assert!(!quoted.is_block_start());
    }

    #[test]
    fn test_parse_rejects_non_task_lines() {
        assert!(parse_task_line("- plain item").is_none());
        assert!(parse_task_line("- [ ]").is_none());
        assert!(parse_task_line("- [ ]    ").is_none());
        assert!(parse_task_line("- [y] nope").is_none());
        assert!(parse_task_line("-[ ] tight").is_none());
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let task = parse_task_line("- [x] done\r").unwrap();
        assert_eq!(task.content, "done");
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_task_item_state() {
        assert_eq!(
            task_item_state(&attrs(&[("class", TASK_ITEM_CLASS), (CHECKED_ATTR, "true")])),
            Some(true)
        );
        assert_eq!(
            task_item_state(&attrs(&[("class", TASK_ITEM_CLASS), (CHECKED_ATTR, "false")])),
            Some(false)
        );
        assert_eq!(
            task_item_state(&attrs(&[("class", TASK_ITEM_CLASS), (CHECKED_ATTR, "yes")])),
            Some(false)
        );
    }

    #[test]
    fn test_task_class_without_checked_state_is_plain() {
        assert_eq!(task_item_state(&attrs(&[("class", TASK_ITEM_CLASS)])), None);
        assert_eq!(
            task_item_state(&attrs(&[("class", TASK_ITEM_CLASS), (CHECKED_ATTR, "")])),
            None
        );
        assert_eq!(
            task_item_state(&attrs(&[("class", "novel-flex"), (CHECKED_ATTR, "true")])),
            None
        );
    }

    #[test]
    fn test_render_task_item_shape() {
        assert_eq!(
            render_task_item(true, "<p>Buy milk</p>"),
            concat!(
                r#"<li class="novel-flex novel-items-start novel-my-4" data-checked="true" data-type="taskItem">"#,
                r#"<label><input type="checkbox" checked><span></span></label>"#,
                r#"<div><p>Buy milk</p></div></li>"#
            )
        );
        let unchecked = render_task_item(false, "x");
        assert!(unchecked.contains(r#"data-checked="false""#));
        assert!(unchecked.contains(r#"<input type="checkbox">"#));
    }
}
