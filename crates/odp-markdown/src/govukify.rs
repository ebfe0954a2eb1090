//! GOV.UK class injection for plain HTML.
//!
//! The markdown renderer emits untyped tags; GOV.UK styling wants a
//! class on nearly every block element. Rules match the exact tag forms
//! the renderer produces, so tags that already carry attributes pass
//! through untouched.

/// Plain tag form to classed form, one rule per styled element.
const RULES: [(&str, &str); 16] = [
    ("<p>", r#"<p class="govuk-body">"#),
    ("<h1>", r#"<h1 class="govuk-heading-xl">"#),
    ("<h2>", r#"<h2 class="govuk-heading-l">"#),
    ("<h3>", r#"<h3 class="govuk-heading-m">"#),
    ("<h4>", r#"<h4 class="govuk-heading-s">"#),
    ("<ul>", r#"<ul class="govuk-list govuk-list--bullet">"#),
    ("<pre>", r#"<pre class="hljs-container">"#),
    ("<img ", r#"<img class="app-image" "#),
    (
        "<hr />",
        r#"<hr class="govuk-section-break govuk-section-break--m govuk-section-break--visible" />"#,
    ),
    ("<table>", r#"<table class="govuk-table">"#),
    ("<thead>", r#"<thead class="govuk-table__head">"#),
    ("<tbody>", r#"<tbody class="govuk-table__body">"#),
    ("<tr>", r#"<tr class="govuk-table__row">"#),
    ("<th>", r#"<th scope="row" class="govuk-table__header">"#),
    ("<td>", r#"<td class="govuk-table__cell">"#),
    ("<code>", r#"<code class="app-code">"#),
];

/// Add GOV.UK classes to vanilla HTML.
#[must_use]
pub fn govukify(html: &str) -> String {
    let mut html = html.to_owned();
    for (plain, classed) in RULES {
        html = html.replace(plain, classed);
    }
    html
}
