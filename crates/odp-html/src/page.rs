//! Markup builders for detail and index pages.
//!
//! Everything here renders into a `String`; file IO lives in the sink.
//! Values are escaped at the point of interpolation, never earlier, so
//! a field value that happens to contain markup stays inert.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;

use odp_filters::{commanum, is_historical, make_link};
use odp_markdown::escape_html;
use odp_refdata::Lookup;
use odp_site::{Crumb, IndexContext, IndexEntry, IndexGroup, Row, RowContext, format_name};

/// Per-field lookups applied to detail-table values.
pub(crate) type FieldLookups = BTreeMap<String, Box<dyn Lookup>>;

const HISTORICAL_TAG: &str = r#" <strong class="govuk-tag govuk-tag--grey">Historical</strong>"#;

/// Detail page for one row: caption, title, field table and the
/// GeoJSON link when the row carries one.
pub(crate) fn row_page(context: &RowContext, lookups: &FieldLookups) -> String {
    let title = row_title(context);

    let mut main = String::new();
    writeln!(
        main,
        r#"<span class="govuk-caption-xl">{}</span>"#,
        escape_html(&format_name(&context.data_type))
    )
    .unwrap();
    writeln!(
        main,
        r#"<h1 class="govuk-heading-xl">{}</h1>"#,
        escape_html(&title)
    )
    .unwrap();
    field_table(&context.row, lookups, &mut main);
    if let Some(url) = context.row.get("geometry_url") {
        writeln!(
            main,
            r#"<p class="govuk-body"><a class="govuk-link" href="{}">View the geometry as GeoJSON</a></p>"#,
            escape_html(url)
        )
        .unwrap();
    }

    shell(&title, &context.breadcrumb, &main)
}

/// Index page: title from the innermost crumb, record count, the root
/// page's download link, then the grouped or flat listing.
pub(crate) fn index_page(context: &IndexContext) -> String {
    let title = context
        .breadcrumb
        .last()
        .map_or_else(String::new, |crumb| format_name(&crumb.text));

    let mut main = String::new();
    writeln!(
        main,
        r#"<h1 class="govuk-heading-xl">{}</h1>"#,
        escape_html(&title)
    )
    .unwrap();
    let noun = if context.count == 1 { "record" } else { "records" };
    writeln!(
        main,
        r#"<p class="govuk-body">{} {noun}</p>"#,
        commanum(context.count as u64)
    )
    .unwrap();
    if let Some(url) = &context.download_url {
        writeln!(
            main,
            r#"<p class="govuk-body"><a class="govuk-link" href="{}">Download the data as CSV</a></p>"#,
            escape_html(url)
        )
        .unwrap();
    }
    if let Some(groups) = &context.groups {
        for group in groups {
            group_section(group, &mut main);
        }
    } else if let Some(items) = &context.items {
        entry_list(items, &mut main);
    }

    shell(&title, &context.breadcrumb, &main)
}

/// Page heading: the row's name when it has one, the formatted
/// innermost crumb otherwise. Names are display text already and pass
/// through verbatim.
fn row_title(context: &RowContext) -> String {
    if let Some(name) = context.row.get("name") {
        return name.to_owned();
    }
    context
        .breadcrumb
        .last()
        .map_or_else(String::new, |crumb| format_name(&crumb.text))
}

/// Shared page shell around a rendered `main` block.
fn shell(title: &str, crumbs: &[Crumb], main: &str) -> String {
    let mut out = String::with_capacity(main.len() + 512);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\" class=\"govuk-template\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(out, "<title>{}</title>", escape_html(title)).unwrap();
    out.push_str("</head>\n<body class=\"govuk-template__body\">\n");
    out.push_str("<div class=\"govuk-width-container\">\n");
    breadcrumbs(crumbs, &mut out);
    out.push_str("<main class=\"govuk-main-wrapper\" id=\"content\">\n");
    out.push_str(main);
    out.push_str("</main>\n</div>\n</body>\n</html>\n");
    out
}

fn breadcrumbs(crumbs: &[Crumb], out: &mut String) {
    if crumbs.is_empty() {
        return;
    }
    out.push_str("<div class=\"govuk-breadcrumbs\">\n<ol class=\"govuk-breadcrumbs__list\">\n");
    for crumb in crumbs {
        match &crumb.href {
            Some(href) => writeln!(
                out,
                r#"<li class="govuk-breadcrumbs__list-item"><a class="govuk-breadcrumbs__link" href="{}">{}</a></li>"#,
                escape_html(href),
                escape_html(&crumb.text)
            )
            .unwrap(),
            None => writeln!(
                out,
                r#"<li class="govuk-breadcrumbs__list-item" aria-current="page">{}</li>"#,
                escape_html(&crumb.text)
            )
            .unwrap(),
        }
    }
    out.push_str("</ol>\n</div>\n");
}

/// Definition table of the row's non-empty fields, in field order.
/// `geometry_url` is left out; the page links it below the table.
fn field_table(row: &Row, lookups: &FieldLookups, out: &mut String) {
    out.push_str("<table class=\"govuk-table\">\n<tbody class=\"govuk-table__body\">\n");
    for (field, value) in row.iter() {
        if value.is_empty() || field == "geometry_url" {
            continue;
        }
        out.push_str("<tr class=\"govuk-table__row\">\n");
        writeln!(
            out,
            r#"<th scope="row" class="govuk-table__header">{}</th>"#,
            escape_html(&format_name(field))
        )
        .unwrap();
        out.push_str("<td class=\"govuk-table__cell\">");
        field_value(field, value, lookups, out);
        out.push_str("</td>\n</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

/// One field value: resolved through the field's registered lookup
/// when there is one, linkified when it is a URL, and tagged when it
/// is an end date in the past.
fn field_value(field: &str, value: &str, lookups: &FieldLookups, out: &mut String) {
    if let Some(lookup) = lookups.get(field) {
        let name = lookup.name_for(value).unwrap_or_else(|| value.to_owned());
        match lookup.url_for(value) {
            Some(url) => write!(
                out,
                r#"<a class="govuk-link" href="{}">{}</a>"#,
                escape_html(&url),
                escape_html(&name)
            )
            .unwrap(),
            None => out.push_str(&escape_html(&name)),
        }
        return;
    }
    match make_link(value) {
        Cow::Owned(anchor) => out.push_str(&anchor),
        Cow::Borrowed(text) => out.push_str(&escape_html(text)),
    }
    if field == "end-date" && is_historical(value) {
        out.push_str(HISTORICAL_TAG);
    }
}

fn group_section(group: &IndexGroup, out: &mut String) {
    let heading = if group.name.is_empty() {
        "Not specified"
    } else {
        &group.name
    };
    writeln!(
        out,
        r#"<h2 class="govuk-heading-m">{}</h2>"#,
        escape_html(heading)
    )
    .unwrap();
    entry_list(&group.items, out);
}

/// Listing of index entries: each a link named by its reference, the
/// entry text after it when it adds anything.
fn entry_list(items: &[IndexEntry], out: &mut String) {
    if items.is_empty() {
        return;
    }
    out.push_str("<ul class=\"govuk-list\">\n");
    for item in items {
        out.push_str("<li>");
        write!(
            out,
            r#"<a class="govuk-link" href="{}">{}</a>"#,
            escape_html(&item.href),
            escape_html(&item.reference)
        )
        .unwrap();
        if let Some(text) = item.text.as_deref()
            && text != item.reference
        {
            write!(out, " {}", escape_html(text)).unwrap();
        }
        if item.end_date.as_deref().is_some_and(is_historical) {
            out.push_str(HISTORICAL_TAG);
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}
