use pretty_assertions::assert_eq;
use wxr_engine::{Converter, EmbedPreservingConverter};

fn md(html: &str) -> String {
    EmbedPreservingConverter.to_markdown(html)
}

#[test]
fn iframe_only_body_round_trips_byte_for_byte() {
    let iframe = r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/abc123" frameborder="0" allowfullscreen></iframe>"#;
    assert_eq!(md(iframe), iframe);
}

#[test]
fn embeds_survive_inside_surrounding_prose() {
    let iframe = r#"<iframe title="Chart" aria-label="Map" src="https://datawrapper.dwcdn.net/x/1/"></iframe>"#;
    let script = r#"<script type="text/javascript" src="https://datawrapper.dwcdn.net/embed.js"></script>"#;
    let html = format!("<p>Look at this:</p>{iframe}{script}<p>Neat.</p>");
    let output = md(&html);
    assert!(output.contains("Look at this:"));
    assert!(output.contains(iframe), "iframe was altered: {output}");
    assert!(output.contains(script), "script was altered: {output}");
    assert!(output.contains("Neat."));
}

#[test]
fn script_with_inline_source_is_kept_verbatim() {
    let script = "<script>window.__embed = { id: \"x\" };</script>";
    let output = md(&format!("<p>Before</p>{script}"));
    assert!(output.contains(script), "script was altered: {output}");
}

#[test]
fn headings_map_to_atx_levels() {
    assert_eq!(md("<h1>One</h1>"), "# One");
    assert_eq!(md("<h2>Two</h2>"), "## Two");
    assert_eq!(md("<h6>Six</h6>"), "###### Six");
    assert_eq!(md("<h1>A</h1><p>b</p>"), "# A\n\nb");
}

#[test]
fn paragraphs_are_blank_line_separated() {
    assert_eq!(md("<p>one</p><p>two</p>"), "one\n\ntwo");
}

#[test]
fn inline_markup_is_converted() {
    assert_eq!(md("<p>Hi <strong>there</strong>.</p>"), "Hi **there**.");
    assert_eq!(md("<p><b>bold</b> and <i>slanted</i></p>"), "**bold** and *slanted*");
    assert_eq!(md("<p>an <em>aside</em></p>"), "an *aside*");
}

#[test]
fn links_and_images_are_converted() {
    assert_eq!(
        md(r#"<p><a href="https://example.com/a">read this</a></p>"#),
        "[read this](https://example.com/a)"
    );
    assert_eq!(
        md(r#"<p><img src="/img/cat.png" alt="A cat"/></p>"#),
        "![A cat](/img/cat.png)"
    );
    assert_eq!(md(r#"<p><img src="/img/dog.png"/></p>"#), "![](/img/dog.png)");
}

#[test]
fn lists_use_dash_and_number_markers() {
    assert_eq!(md("<ul><li>a</li><li>b</li></ul>"), "- a\n- b");
    assert_eq!(md("<ol><li>a</li><li>b</li><li>c</li></ol>"), "1. a\n2. b\n3. c");
}

#[test]
fn blockquotes_are_prefixed_per_line() {
    assert_eq!(
        md("<blockquote><p>first</p><p>second</p></blockquote>"),
        "> first\n>\n> second"
    );
}

#[test]
fn code_maps_to_fences_and_backticks() {
    assert_eq!(
        md("<pre><code>let x = 1;\nlet y = 2;</code></pre>"),
        "```\nlet x = 1;\nlet y = 2;\n```"
    );
    assert_eq!(md("<p>run <code>cargo test</code> now</p>"), "run `cargo test` now");
}

#[test]
fn entities_and_nbsp_are_resolved() {
    assert_eq!(md("<p>a &amp; b</p>"), "a & b");
    assert_eq!(md("<p>a&nbsp;b</p>"), "a b");
}

#[test]
fn already_markdown_body_is_untouched() {
    let markdown = "# Title\n\nSome *emphasis* and **strength**.\n\n- one\n- two";
    assert_eq!(md(markdown), markdown);
}

#[test]
fn unclosed_tags_degrade_to_text_instead_of_failing() {
    let output = md("<p>before <strong>never closed");
    assert!(output.contains("before"));
    assert!(output.contains("never closed"));
}

#[test]
fn empty_body_is_empty_output() {
    assert_eq!(md(""), "");
}
