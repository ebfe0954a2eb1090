//! Markdown to HTML.

use pulldown_cmark::{Options, Parser, html};

use crate::govukify::govukify;

/// Render markdown to plain HTML, tables enabled.
#[must_use]
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
    let mut output = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut output, parser);
    output
}

/// Render markdown and inject the GOV.UK classes in one step.
#[must_use]
pub fn compile_markdown(markdown: &str) -> String {
    govukify(&render_html(markdown))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_markdown_paragraph() {
        assert_eq!(
            compile_markdown("This is a paragraph."),
            "<p class=\"govuk-body\">This is a paragraph.</p>\n"
        );
    }

    #[test]
    fn test_markdown_heading() {
        assert_eq!(
            compile_markdown("## Data sources"),
            "<h2 class=\"govuk-heading-l\">Data sources</h2>\n"
        );
    }

    #[test]
    fn test_markdown_list() {
        assert_eq!(
            compile_markdown("- one\n- two\n"),
            "<ul class=\"govuk-list govuk-list--bullet\">\n\
             <li>one</li>\n\
             <li>two</li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn test_markdown_table() {
        let markdown = "\
| H1 | H2 |
| ---- | ---- |
| cell 1.1 | cell 1.2 |
| cell 2.1 | cell 2.2 |";

        assert_eq!(
            compile_markdown(markdown),
            "<table class=\"govuk-table\">\
             <thead class=\"govuk-table__head\">\
             <tr class=\"govuk-table__row\">\
             <th scope=\"row\" class=\"govuk-table__header\">H1</th>\
             <th scope=\"row\" class=\"govuk-table__header\">H2</th>\
             </tr></thead><tbody class=\"govuk-table__body\">\n\
             <tr class=\"govuk-table__row\">\
             <td class=\"govuk-table__cell\">cell 1.1</td>\
             <td class=\"govuk-table__cell\">cell 1.2</td>\
             </tr>\n\
             <tr class=\"govuk-table__row\">\
             <td class=\"govuk-table__cell\">cell 2.1</td>\
             <td class=\"govuk-table__cell\">cell 2.2</td>\
             </tr>\n\
             </tbody></table>\n"
        );
    }

    #[test]
    fn test_markdown_code_block() {
        assert_eq!(
            compile_markdown("```\nlet x = 1;\n```\n"),
            "<pre class=\"hljs-container\"><code class=\"app-code\">let x = 1;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_markdown_inline_code() {
        assert_eq!(
            compile_markdown("run `odp render` first"),
            "<p class=\"govuk-body\">run <code class=\"app-code\">odp render</code> first</p>\n"
        );
    }

    #[test]
    fn test_markdown_section_break() {
        assert_eq!(
            compile_markdown("***"),
            "<hr class=\"govuk-section-break govuk-section-break--m \
             govuk-section-break--visible\" />\n"
        );
    }

    #[test]
    fn test_render_html_is_plain() {
        assert_eq!(render_html("plain text"), "<p>plain text</p>\n");
    }
}
