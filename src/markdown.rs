//! Narrow markdown interface for the final-answer panel and the inspector.
//! Anything that fails to render falls back to the raw text.

use pulldown_cmark::{Options, Parser, html};

fn normalize_input(text: &str) -> String {
	let mut out = text.replace("\r\n", "\n");
	// Collapse runs of blank lines so we don't emit empty paragraphs.
	while out.contains("\n\n\n") {
		out = out.replace("\n\n\n", "\n\n");
	}
	out.trim().to_string()
}

/// A single `<p>…</p>` result is unwrapped to avoid paragraph margins in
/// compact panels.
fn unwrap_single_paragraph(html: &str) -> &str {
	let trimmed = html.trim();
	if let Some(inner) = trimmed
		.strip_prefix("<p>")
		.and_then(|s| s.strip_suffix("</p>"))
	{
		if !inner.contains("<p>") {
			return inner;
		}
	}
	trimmed
}

/// Render markdown to HTML. Empty input renders as the empty string; a
/// render that produces nothing falls back to the raw text.
pub fn render_markdown(text: &str) -> String {
	let input = normalize_input(text);
	if input.is_empty() {
		return String::new();
	}

	let mut options = Options::empty();
	options.insert(Options::ENABLE_TABLES);
	options.insert(Options::ENABLE_STRIKETHROUGH);
	let parser = Parser::new_ext(&input, options);

	let mut out = String::new();
	html::push_html(&mut out, parser);
	if out.trim().is_empty() {
		return input;
	}
	unwrap_single_paragraph(&out).to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_headings() {
		assert_eq!(render_markdown("# Title"), "<h1>Title</h1>");
	}

	#[test]
	fn unwraps_a_single_paragraph() {
		assert_eq!(render_markdown("plain *text*"), "plain <em>text</em>");
	}

	#[test]
	fn keeps_multiple_paragraphs_wrapped() {
		let out = render_markdown("one\n\ntwo");
		assert!(out.starts_with("<p>one</p>"));
		assert!(out.contains("<p>two</p>"));
	}

	#[test]
	fn collapses_excess_blank_lines() {
		let out = render_markdown("one\n\n\n\ntwo");
		assert_eq!(out.matches("<p>").count(), 2);
	}

	#[test]
	fn empty_input_renders_empty() {
		assert_eq!(render_markdown("   \n  "), "");
	}

	#[test]
	fn escapes_raw_html_sensitive_text() {
		let out = render_markdown("a < b & c");
		assert!(out.contains("&lt;"));
		assert!(out.contains("&amp;"));
	}
}
