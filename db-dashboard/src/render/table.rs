//! List view

use super::{escape_html, nav_link, Fragment, Paths};
use crate::pagination::PageWindow;
use crate::row::Row;
use crate::schema::TableSchema;

/// Render one page of a table
///
/// # Arguments
///
/// * `paths` - URL builder for links
/// * `table_names` - All known tables, for the navigation bar
/// * `schema` - Schema of the table being listed; it is also the current table
/// * `rows` - Rows of this page, in display order
/// * `window` - Pagination state of this page
pub fn render_table(
    paths: &Paths,
    table_names: &[&str],
    schema: &TableSchema,
    rows: &[Row],
    window: &PageWindow,
) -> Fragment {
    let table = schema.name.as_str();

    let headers: String = schema
        .columns
        .iter()
        .map(|column| format!("<th>{}</th>", escape_html(&column.name)))
        .collect();

    let body: String = rows
        .iter()
        .map(|row| render_row(paths, schema, row))
        .collect();

    let body = format!(
        r#"{navigation}
<section>
  <header>
    <h3>{table}</h3>
  </header>
</section>
<section>
  <table>
    <thead>
      <tr>{headers}<th>Actions</th></tr>
    </thead>
    <tbody>
{body}      <tr>
        <td colspan="{span}" style="text-align: center">{pagination}</td>
      </tr>
    </tbody>
  </table>
</section>
<section>
  {new_link}
</section>
"#,
        navigation = render_navigation(paths, table_names, table),
        table = escape_html(table),
        headers = headers,
        body = body,
        span = schema.columns.len() + 1,
        pagination = render_pagination(paths, table, window),
        new_link = nav_link(
            &paths.new_row(table),
            &format!("Add a new entry in {}", table)
        ),
    );

    Fragment {
        title: table.to_string(),
        body,
    }
}

/// Links to every table, with the current one emphasized instead of linked
pub fn render_navigation(paths: &Paths, table_names: &[&str], current: &str) -> String {
    let items: String = table_names
        .iter()
        .map(|name| {
            if *name == current {
                format!("<li><strong>{}</strong></li>", escape_html(name))
            } else {
                format!("<li>{}</li>", nav_link(&paths.table(name), name))
            }
        })
        .collect();

    format!("<nav>\n  <ul>{}</ul>\n</nav>", items)
}

fn render_row(paths: &Paths, schema: &TableSchema, row: &Row) -> String {
    let cells: String = schema
        .columns
        .iter()
        .map(|column| {
            let text = row
                .get(&column.name)
                .map(ToString::to_string)
                .unwrap_or_default();

            match schema.relation_for(&column.name) {
                Some(relation) if !text.is_empty() => format!(
                    "<td>{}</td>",
                    nav_link(&paths.row(&relation.foreign_table, &text), &text)
                ),
                _ => format!("<td>{}</td>", escape_html(&text)),
            }
        })
        .collect();

    format!(
        "      <tr>{}<td>{}</td></tr>\n",
        cells,
        render_actions(paths, schema, row)
    )
}

/// Edit and delete controls, only for rows that carry a primary key value
fn render_actions(paths: &Paths, schema: &TableSchema, row: &Row) -> String {
    let id = match row.get(&schema.primary_key) {
        Some(value) if !value.is_null() => value.to_string(),
        _ => return String::new(),
    };
    let row_url = escape_html(&paths.row(&schema.name, &id));

    format!(
        r#"{edit} <button type="button" hx-delete="{row_url}" hx-confirm="Delete this row?" hx-disabled-elt="this" hx-swap="none">Delete</button>"#,
        edit = nav_link(&paths.row(&schema.name, &id), "Edit"),
        row_url = row_url,
    )
}

fn render_pagination(paths: &Paths, table: &str, window: &PageWindow) -> String {
    let previous = window
        .previous_offset()
        .map(|offset| nav_link(&paths.table_page(table, offset, window.limit), "<<"))
        .unwrap_or_default();
    let next = window
        .next_offset()
        .map(|offset| nav_link(&paths.table_page(table, offset, window.limit), ">>"))
        .unwrap_or_default();

    format!("{}&nbsp;{}&nbsp;{}", previous, window.summary(), next)
}
