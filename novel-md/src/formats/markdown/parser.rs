//! Markdown parsing (Markdown → HTML)
//!
//! Converts Markdown with task lines into editor HTML.
//! Pipeline: Markdown string → task expansion → Comrak → cleanup → HTML string
//!
//! Task lines are expanded before Comrak sees the text, so the editor's task
//! markup reaches the output as raw HTML rather than Comrak's own checkbox
//! rendering:
//!
//! 1. Runs of consecutive task lines (only indentation before the marker) become
//!    one `<ul>` block of task items.
//! 2. Task syntax that does not open its line (`> - [ ] quoted`) is replaced in
//!    place, keeping whatever precedes it.
//! 3. Comrak renders the result with raw HTML passthrough.
//! 4. Paragraph wrappers around task items and empty paragraphs are removed.
//!
//! Fenced code is copied through untouched.

use crate::formats::markdown::MarkdownToHtmlOptions;
use crate::task::{self, is_whitespace_only, TaskLine};
use comrak::ComrakOptions;
use once_cell::sync::Lazy;
use regex::Regex;

static WRAPPED_TASK_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p>(<li .+?</li>)</p>").expect("wrapped item pattern is valid"));

/// Convert Markdown to editor HTML
pub fn markdown_to_html(source: &str, options: &MarkdownToHtmlOptions) -> String {
    if is_whitespace_only(source) {
        return String::new();
    }

    let comrak_options = comrak_options(options);
    let expanded = process_lines(source, &comrak_options);
    let html = comrak::markdown_to_html(&expanded, &comrak_options);

    let html = WRAPPED_TASK_ITEM.replace_all(&html, "$1");
    html.replace("<p></p>", "")
}

fn comrak_options(options: &MarkdownToHtmlOptions) -> ComrakOptions<'static> {
    let mut comrak = ComrakOptions::default();
    comrak.extension.strikethrough = options.strikethrough;
    comrak.extension.table = options.table;
    comrak.extension.autolink = options.autolink;
    // Task items are raw HTML by the time Comrak runs.
    comrak.render.unsafe_ = true;
    comrak
}

/// Inner HTML of a single task item
fn render_task_content(task: &TaskLine<'_>, options: &ComrakOptions<'static>) -> String {
    let inner = comrak::markdown_to_html(task.content, options);
    task::render_task_item(task.checked, inner.trim_end())
}

/// Rewrite task lines into task item markup, line by line
fn process_lines(source: &str, options: &ComrakOptions<'static>) -> String {
    let mut out = String::with_capacity(source.len());
    let mut block: Vec<String> = Vec::new();
    let mut fence: Option<Fence> = None;

    for line in source.lines() {
        if let Some(open) = fence {
            if open.is_closed_by(line) {
                fence = None;
            }
            push_line(&mut out, line);
            continue;
        }

        if let Some(open) = Fence::opened_by(line) {
            close_block(&mut out, &mut block);
            fence = Some(open);
            push_line(&mut out, line);
            continue;
        }

        match task::parse_task_line(line) {
            Some(task) if task.is_block_start() => {
                block.push(render_task_content(&task, options));
            }
            Some(task) => {
                close_block(&mut out, &mut block);
                tracing::debug!(checked = task.checked, "inline task item");
                let item = render_task_content(&task, options);
                push_line(&mut out, &format!("{}{item}", task.leading));
            }
            None => {
                close_block(&mut out, &mut block);
                push_line(&mut out, line);
            }
        }
    }
    close_block(&mut out, &mut block);

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn close_block(out: &mut String, block: &mut Vec<String>) {
    if block.is_empty() {
        return;
    }
    tracing::debug!(items = block.len(), "task block");
    out.push_str("<ul>\n");
    out.push_str(&block.join("\n"));
    out.push_str("\n</ul>\n\n");
    block.clear();
}

/// An open fenced code block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn opened_by(line: &str) -> Option<Fence> {
        let (marker, len, _) = fence_run(line)?;
        Some(Fence { marker, len })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        match fence_run(line) {
            Some((marker, len, rest)) => {
                marker == self.marker && len >= self.len && rest.trim().is_empty()
            }
            None => false,
        }
    }
}

/// Leading fence run of a line: marker, run length, remainder
fn fence_run(line: &str) -> Option<(char, usize, &str)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.len() - trimmed.trim_start_matches(marker).len();
    if len < 3 {
        return None;
    }
    Some((marker, len, &trimmed[len..]))
}
