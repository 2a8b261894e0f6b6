//! Markdown serialization (HTML → Markdown)
//!
//! Walks an html5ever DOM and writes Markdown text.
//! Pipeline: HTML string → RcDom → Writer → Markdown string
//!
//! Block separation follows "surrounding newlines" semantics: a block asks for N
//! newlines before and after itself, consecutive requests coalesce to the
//! largest one, requests at the start of a buffer are dropped and pending
//! requests at the end of a buffer are discarded.

use crate::dom::{self, Attributes};
use crate::formats::markdown::HtmlToMarkdownOptions;
use crate::task::{self, is_whitespace_only};
use markup5ever_rcdom::{Handle, NodeData};
use once_cell::sync::Lazy;
use regex::Regex;

/// One level of list indentation
const INDENT: &str = "   ";

static LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\r\n])(?:\r?\n)+").expect("line break pattern is valid"));

static TRAILING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(\S+?)[^\S\r\n]+$").expect("trailing pattern is valid"));

static LINE_START_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(\+\s|[=>-]|#{1,6}\s)").expect("line start pattern is valid")
});

static LINE_START_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(\d+)(\.\s)").expect("number pattern is valid"));

/// Convert an HTML document or fragment to Markdown
///
/// Never fails: malformed markup is recovered by the HTML parser.
pub fn html_to_markdown(html: &str, options: &HtmlToMarkdownOptions) -> String {
    if is_whitespace_only(html) {
        return String::new();
    }

    let dom = dom::parse_html(html);
    let Some(body) = dom::body(&dom) else {
        return String::new();
    };

    let serializer = Serializer { options };
    let mut writer = Writer::new(true);
    serializer.visit_children(&mut writer, &body, &Context::default());

    writer.finish().trim_end().to_string()
}

#[derive(Debug, Clone, Copy)]
struct ListFrame {
    ordered: bool,
    /// 0 for a top-level list
    depth: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    list: Option<ListFrame>,
    /// Depth of the list item whose content is being rendered
    item_depth: Option<usize>,
}

/// Output buffer with pending-newline bookkeeping
struct Writer {
    out: String,
    pending: usize,
    /// Whether an empty buffer sits at the start of a line in its parent
    fresh_line: bool,
}

impl Writer {
    fn new(fresh_line: bool) -> Self {
        Self {
            out: String::new(),
            pending: 0,
            fresh_line,
        }
    }

    fn request_newlines(&mut self, count: usize) {
        if self.out.is_empty() {
            return;
        }
        self.pending = self.pending.max(count);
    }

    fn flush(&mut self) {
        if self.pending == 0 {
            return;
        }
        let existing = self.out.len() - self.out.trim_end_matches('\n').len();
        if existing == 0 {
            let kept = self.out.trim_end_matches([' ', '\t']).len();
            self.out.truncate(kept);
        }
        for _ in existing..self.pending {
            self.out.push('\n');
        }
        self.pending = 0;
    }

    fn at_line_start(&self) -> bool {
        if self.out.is_empty() {
            self.fresh_line
        } else {
            self.pending > 0 || self.out.ends_with('\n')
        }
    }

    fn ends_with_space(&self) -> bool {
        self.pending == 0 && self.out.ends_with(' ')
    }

    fn push(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.flush();
        self.out.push_str(text);
    }

    fn hard_break(&mut self) {
        self.flush();
        let kept = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(kept);
        self.out.push_str("  \n");
    }

    fn finish(self) -> String {
        self.out
    }
}

struct Serializer<'o> {
    options: &'o HtmlToMarkdownOptions,
}

impl Serializer<'_> {
    fn visit_children(&self, w: &mut Writer, node: &Handle, ctx: &Context) {
        for child in node.children.borrow().iter() {
            self.visit(w, child, ctx);
        }
    }

    fn visit(&self, w: &mut Writer, node: &Handle, ctx: &Context) {
        match &node.data {
            NodeData::Text { contents } => self.text(w, &contents.borrow()),
            NodeData::Element { name, .. } => self.element(w, node, &name.local, ctx),
            NodeData::Document => self.visit_children(w, node, ctx),
            _ => {}
        }
    }

    /// Render a node's children into a detached buffer
    fn render_children(&self, node: &Handle, ctx: &Context, fresh_line: bool) -> String {
        let mut inner = Writer::new(fresh_line);
        self.visit_children(&mut inner, node, ctx);
        inner.finish()
    }

    fn text(&self, w: &mut Writer, raw: &str) {
        let collapsed = dom::collapse_whitespace(raw);
        let at_line_start = w.at_line_start();
        let text = if at_line_start || w.ends_with_space() {
            collapsed.trim_start()
        } else {
            collapsed.as_str()
        };
        if text.is_empty() {
            return;
        }

        let escaped = escape_markdown(text);
        if at_line_start {
            w.push(&escape_line_start(&escaped));
        } else {
            w.push(&escaped);
        }
    }

    fn element(&self, w: &mut Writer, node: &Handle, tag: &str, ctx: &Context) {
        match tag {
            "head" | "script" | "style" | "noscript" | "template" | "input" | "button"
            | "select" | "textarea" | "iframe" | "object" | "svg" => {}

            "p" => {
                w.request_newlines(2);
                self.visit_children(w, node, ctx);
                w.request_newlines(2);
            }

            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.heading(w, node, tag, ctx),

            "br" => w.hard_break(),

            "hr" => {
                w.request_newlines(2);
                w.push("---");
                w.request_newlines(2);
            }

            "strong" | "b" => self.wrap_inline(w, node, ctx, &self.options.strong_delimiter),
            "em" | "i" => self.wrap_inline(w, node, ctx, &self.options.em_delimiter),
            "s" | "del" | "strike" => {
                self.wrap_inline(w, node, ctx, &self.options.strike_delimiter)
            }

            "code" => self.inline_code(w, node),
            "pre" => self.code_block(w, node),
            "a" => self.link(w, node, ctx),
            "img" => self.image(w, node),
            "blockquote" => self.blockquote(w, node, ctx),

            "ul" | "ol" => self.list(w, node, tag == "ol", ctx),
            "li" => {
                // A stray <li> outside any list renders as a top-level bullet.
                let frame = ctx.list.unwrap_or(ListFrame {
                    ordered: false,
                    depth: 0,
                });
                self.list_item(w, node, frame, 1, ctx);
            }

            "td" | "th" => {
                if !w.at_line_start() && !w.ends_with_space() {
                    w.push(" ");
                }
                self.visit_children(w, node, ctx);
            }

            "div" | "section" | "article" | "header" | "footer" | "main" | "nav" | "aside"
            | "figure" | "figcaption" | "details" | "summary" | "address" | "table"
            | "thead" | "tbody" | "tfoot" | "tr" | "dl" | "dt" | "dd" => {
                w.request_newlines(1);
                self.visit_children(w, node, ctx);
                w.request_newlines(1);
            }

            _ => self.visit_children(w, node, ctx),
        }
    }

    fn heading(&self, w: &mut Writer, node: &Handle, tag: &str, ctx: &Context) {
        let level = tag[1..].parse::<usize>().unwrap_or(1);
        let content = self.render_children(node, ctx, true);
        let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
        if content.is_empty() {
            return;
        }
        w.request_newlines(2);
        w.push(&format!("{} {content}", "#".repeat(level)));
        w.request_newlines(2);
    }

    fn wrap_inline(&self, w: &mut Writer, node: &Handle, ctx: &Context, delimiter: &str) {
        let inner = self.render_children(node, ctx, w.at_line_start());
        let (lead, core, trail) = split_outer_whitespace(&inner);
        if core.is_empty() {
            if !inner.is_empty() && !w.at_line_start() && !w.ends_with_space() {
                w.push(" ");
            }
            return;
        }
        w.push(&format!("{lead}{delimiter}{core}{delimiter}{trail}"));
    }

    fn inline_code(&self, w: &mut Writer, node: &Handle) {
        let code = dom::text_content(node).replace(['\r', '\n'], " ");
        if code.is_empty() {
            return;
        }
        let fence = "`".repeat(longest_backtick_run(&code) + 1);
        let padded = code.starts_with('`') || code.ends_with('`');
        if padded {
            w.push(&format!("{fence} {code} {fence}"));
        } else {
            w.push(&format!("{fence}{code}{fence}"));
        }
    }

    fn code_block(&self, w: &mut Writer, node: &Handle) {
        let language = dom::element_children(node)
            .iter()
            .filter(|child| dom::tag_name(child).is_some_and(|name| &*name == "code"))
            .find_map(|code| Attributes::of(code).and_then(|attrs| code_language(&attrs)))
            .unwrap_or_default();
        let text = dom::text_content(node);
        let text = text.strip_suffix('\n').unwrap_or(&text);
        let fence = &self.options.code_fence;

        w.request_newlines(2);
        w.push(&format!("{fence}{language}\n{text}\n{fence}"));
        w.request_newlines(2);
    }

    fn link(&self, w: &mut Writer, node: &Handle, ctx: &Context) {
        let attrs = Attributes::of(node).unwrap_or_default();
        let inner = self.render_children(node, ctx, w.at_line_start());
        let href = match attrs.get("href") {
            Some(href) if !href.trim().is_empty() => href.trim(),
            _ => {
                w.push(&inner);
                return;
            }
        };

        let (lead, label, trail) = split_outer_whitespace(&inner);
        let label = if label.is_empty() {
            escape_markdown(href)
        } else {
            label.to_string()
        };
        let destination = link_destination(href, attrs.get("title"));
        w.push(&format!("{lead}[{label}]({destination}){trail}"));
    }

    fn image(&self, w: &mut Writer, node: &Handle) {
        let attrs = Attributes::of(node).unwrap_or_default();
        let Some(src) = attrs.get("src").filter(|src| !src.trim().is_empty()) else {
            return;
        };
        let alt = escape_markdown(attrs.get("alt").unwrap_or_default());
        let destination = link_destination(src.trim(), attrs.get("title"));
        w.push(&format!("![{alt}]({destination})"));
    }

    fn blockquote(&self, w: &mut Writer, node: &Handle, ctx: &Context) {
        let content = self.render_children(node, ctx, true);
        let content = content.trim_end();
        if content.is_empty() {
            return;
        }
        let quoted = content
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        w.request_newlines(2);
        w.push(&quoted);
        w.request_newlines(2);
    }

    fn list(&self, w: &mut Writer, node: &Handle, ordered: bool, ctx: &Context) {
        let frame = ListFrame {
            ordered,
            depth: ctx.list.map_or(0, |parent| parent.depth + 1),
        };
        let surrounding = if ctx.item_depth.is_some() { 1 } else { 2 };
        let list_ctx = Context {
            list: Some(frame),
            ..*ctx
        };

        w.request_newlines(surrounding);
        let mut number = 0;
        for child in node.children.borrow().iter() {
            match dom::tag_name(child).as_deref() {
                Some("li") => {
                    number += 1;
                    self.list_item(w, child, frame, number, ctx);
                }
                Some(_) => self.visit(w, child, &list_ctx),
                // Inter-item whitespace carries no content.
                None => {}
            }
        }
        w.request_newlines(surrounding);
    }

    fn list_item(
        &self,
        w: &mut Writer,
        node: &Handle,
        frame: ListFrame,
        number: usize,
        ctx: &Context,
    ) {
        let attrs = Attributes::of(node).unwrap_or_default();
        tracing::trace!(attributes = ?attrs, depth = frame.depth, "list item");

        // Enclosing items re-indent every line of their content, so each item
        // only adds the levels between itself and its nearest enclosing item.
        let levels = match ctx.item_depth {
            Some(parent) => frame.depth.saturating_sub(parent),
            None => frame.depth,
        };
        let indent = INDENT.repeat(levels);

        let item_ctx = Context {
            list: Some(frame),
            item_depth: Some(frame.depth),
        };
        let content = self.render_children(node, &item_ctx, true);
        let content = postprocess_item_content(&content, &indent);

        let marker = match task::task_item_state(&attrs) {
            Some(true) => "- [x] ".to_string(),
            Some(false) => "- [ ] ".to_string(),
            None if frame.ordered => format!("{number}. "),
            None => format!("{} ", self.options.bullet_marker),
        };

        w.request_newlines(1);
        w.push(&format!("{indent}{marker}{content}"));
        w.request_newlines(1);
    }
}

/// Normalize list item content: hard breaks between lines, re-indented continuation
fn postprocess_item_content(content: &str, indent: &str) -> String {
    let rebroken = LINE_BREAKS.replace_all(content.trim(), format!("${{1}}  \n{indent}").as_str());
    TRAILING_WHITESPACE
        .replace_all(&rebroken, "${1}  ")
        .into_owned()
}

fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '~' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn escape_line_start(text: &str) -> String {
    if LINE_START_NUMBER.is_match(text) {
        return LINE_START_NUMBER
            .replace(text, "${1}${2}\\${3}")
            .into_owned();
    }
    LINE_START_MARKER.replace(text, "${1}\\${2}").into_owned()
}

/// Split leading and trailing whitespace off `s`
fn split_outer_whitespace(s: &str) -> (&str, &str, &str) {
    let core_start = s.len() - s.trim_start().len();
    let core_end = s.trim_end().len();
    if core_start >= core_end {
        return (s, "", "");
    }
    (&s[..core_start], &s[core_start..core_end], &s[core_end..])
}

fn longest_backtick_run(s: &str) -> usize {
    s.split(|c: char| c != '`').map(str::len).max().unwrap_or(0)
}

fn code_language(attrs: &Attributes) -> Option<String> {
    attrs
        .get("class")?
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
        .map(str::to_string)
}

fn link_destination(url: &str, title: Option<&str>) -> String {
    let url = url.replace(' ', "%20").replace('(', "%28").replace(')', "%29");
    match title.filter(|t| !t.is_empty()) {
        Some(title) => format!("{url} \"{}\"", title.replace('"', "\\\"")),
        None => url,
    }
}
