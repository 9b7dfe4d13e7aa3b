//! Page layout, welcome page and error fragments

use super::{escape_html, nav_link, Fragment, Paths};

const HTMX_SCRIPT: &str = "https://unpkg.com/htmx.org@2.0.4/dist/htmx.min.js";
const STYLESHEET: &str = "https://cdn.jsdelivr.net/npm/water.css@2/out/water.min.css";

/// Wrap a fragment in a complete HTML document
///
/// The fragment lands in `#content`, the element every htmx link targets, so
/// later navigations only replace that part of the page.
pub fn render_page(application_title: &str, paths: &Paths, fragment: &Fragment) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="htmx-config" content='{{"responseHandling": [{{"code": "204", "swap": false}}, {{"code": "[23]..", "swap": true}}, {{"code": "[45]..", "swap": true, "error": true}}]}}'>
    <title>{page_title} - {application_title}</title>
    <script src="{htmx}"></script>
    <link rel="stylesheet" href="{stylesheet}">
    <style>.htmx-indicator {{ opacity: 0; }} .htmx-request .htmx-indicator, .htmx-request.htmx-indicator {{ opacity: 1; }}</style>
  </head>
  <body>
    <header>
      <h1><a href="{index}">{application_title}</a> <small id="indicator" class="htmx-indicator">loading...</small></h1>
    </header>
    <div id="content" hx-indicator="#indicator">
{body}
    </div>
  </body>
</html>
"##,
        page_title = escape_html(&fragment.title),
        application_title = escape_html(application_title),
        htmx = HTMX_SCRIPT,
        stylesheet = STYLESHEET,
        index = escape_html(&paths.index()),
        body = fragment.body,
    )
}

/// Welcome page listing every table
pub fn render_index<'a>(
    application_title: &str,
    paths: &Paths,
    table_names: impl IntoIterator<Item = &'a str>,
) -> Fragment {
    let items: String = table_names
        .into_iter()
        .map(|name| format!("    <li>{}</li>\n", nav_link(&paths.table(name), name)))
        .collect();

    let body = format!(
        r#"<section>
  <header>
    <h2>Welcome to {title}</h2>
  </header>
  <ul>
{items}  </ul>
</section>
"#,
        title = escape_html(application_title),
        items = items,
    );

    Fragment {
        title: "Tables".to_string(),
        body,
    }
}

/// Fragment shown for a failed request
pub fn render_error(heading: &str, message: &str) -> Fragment {
    Fragment {
        title: heading.to_string(),
        body: format!(
            "<section>\n  <header>\n    <h3>{}</h3>\n  </header>\n  <p>{}</p>\n</section>\n",
            escape_html(heading),
            escape_html(message)
        ),
    }
}
