use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Render an HTML fragment as Markdown using the common tag mapping.
///
/// Parsing is lenient: html5ever repairs what it can and drops what it
/// cannot, so malformed input degrades to literal text instead of failing
/// the item. Text nodes pass through untouched, which makes the renderer a
/// no-op on input that is already plain Markdown.
pub(crate) fn render_markdown(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut writer = MarkdownWriter::new();
    for child in document.root_element().children() {
        writer.visit_node(child);
    }
    writer.out
}

struct MarkdownWriter {
    out: String,
}

impl MarkdownWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn visit_node(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => self.push_text(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.visit_element(element);
                }
            }
            _ => {
                for child in node.children() {
                    self.visit_node(child);
                }
            }
        }
    }

    fn visit_element(&mut self, element: ElementRef) {
        let tag = element.value().name().to_ascii_lowercase();
        match tag.as_str() {
            "h1" => self.heading(element, 1),
            "h2" => self.heading(element, 2),
            "h3" => self.heading(element, 3),
            "h4" => self.heading(element, 4),
            "h5" => self.heading(element, 5),
            "h6" => self.heading(element, 6),
            "p" | "div" | "section" | "article" | "header" | "footer" | "nav" | "figure"
            | "figcaption" | "table" | "tr" | "address" | "main" => {
                self.ensure_blank_line();
                self.visit_children(element);
                self.ensure_blank_line();
            }
            "blockquote" => self.blockquote(element),
            "ul" => self.list(element, false),
            "ol" => self.list(element, true),
            // A stray item outside any list; render it like one anyway.
            "li" => {
                self.ensure_newline();
                self.out.push_str("- ");
                self.visit_children(element);
                self.ensure_newline();
            }
            "strong" | "b" => self.wrap(element, "**"),
            "em" | "i" => self.wrap(element, "*"),
            "a" => self.anchor(element),
            "img" => self.image(element),
            "pre" => self.fenced_code(element),
            "code" => self.wrap(element, "`"),
            "br" => self.out.push('\n'),
            "hr" => {
                self.ensure_blank_line();
                self.out.push_str("---");
                self.ensure_blank_line();
            }
            // Embeds are masked out before parsing; anything that still
            // shows up here is presentation-only and carries no prose.
            "head" | "style" | "noscript" | "template" | "iframe" | "script" => {}
            _ => self.visit_children(element),
        }
    }

    fn visit_children(&mut self, element: ElementRef) {
        for child in element.children() {
            self.visit_node(child);
        }
    }

    fn heading(&mut self, element: ElementRef, level: usize) {
        self.ensure_blank_line();
        for _ in 0..level {
            self.out.push('#');
        }
        self.out.push(' ');
        self.visit_children(element);
        self.ensure_blank_line();
    }

    fn wrap(&mut self, element: ElementRef, marker: &str) {
        self.out.push_str(marker);
        self.visit_children(element);
        self.out.push_str(marker);
    }

    fn anchor(&mut self, element: ElementRef) {
        match element.value().attr("href") {
            Some(href) => {
                self.out.push('[');
                self.visit_children(element);
                self.out.push_str("](");
                self.out.push_str(href.trim());
                self.out.push(')');
            }
            None => self.visit_children(element),
        }
    }

    fn image(&mut self, element: ElementRef) {
        if let Some(src) = element.value().attr("src") {
            let alt = element.value().attr("alt").unwrap_or("");
            self.out.push_str("![");
            self.out.push_str(alt);
            self.out.push_str("](");
            self.out.push_str(src.trim());
            self.out.push(')');
        }
    }

    fn blockquote(&mut self, element: ElementRef) {
        self.ensure_blank_line();
        let inner = render_children(element);
        for line in inner.trim().lines() {
            if line.is_empty() {
                self.out.push_str(">\n");
            } else {
                self.out.push_str("> ");
                self.out.push_str(line);
                self.out.push('\n');
            }
        }
        self.ensure_blank_line();
    }

    fn list(&mut self, element: ElementRef, ordered: bool) {
        self.ensure_blank_line();
        let mut index = 1usize;
        for child in element.children() {
            let Some(item) = ElementRef::wrap(child) else {
                continue;
            };
            if !item.value().name().eq_ignore_ascii_case("li") {
                continue;
            }
            let content = render_children(item);
            let content = content.trim();
            if ordered {
                self.out.push_str(&format!("{index}. {content}"));
            } else {
                self.out.push_str(&format!("- {content}"));
            }
            self.out.push('\n');
            index += 1;
        }
        self.ensure_blank_line();
    }

    fn fenced_code(&mut self, element: ElementRef) {
        self.ensure_blank_line();
        let code: String = element.text().collect();
        self.out.push_str("```\n");
        self.out.push_str(code.trim_matches('\n').trim_end());
        self.out.push_str("\n```");
        self.ensure_blank_line();
    }

    fn push_text(&mut self, text: &str) {
        if text.contains('\u{a0}') {
            self.out.push_str(&text.replace('\u{a0}', " "));
        } else {
            self.out.push_str(text);
        }
    }

    fn ensure_newline(&mut self) {
        if self.out.is_empty() || self.out.ends_with('\n') {
            return;
        }
        self.out.push('\n');
    }

    fn ensure_blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}

/// Render an element's children into a fresh buffer, for constructs that
/// need to re-shape their inner text (list items, blockquotes).
fn render_children(element: ElementRef) -> String {
    let mut writer = MarkdownWriter::new();
    for child in element.children() {
        writer.visit_node(child);
    }
    writer.out
}
