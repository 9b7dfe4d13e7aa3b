//! Create and edit forms

use super::{escape_html, Fragment, Paths, CONTENT_TARGET};
use crate::row::{Row, Value};
use crate::schema::{ColumnSchema, TableSchema};
use crate::widget::{widget_for, Widget};

/// Render the form for a new row (`existing` is `None`) or an existing one
///
/// The form posts every editable column back to the table's collection endpoint. In
/// edit mode the primary key input is read-only, so the submitted row updates
/// the same record.
pub fn render_form(
    paths: &Paths,
    schema: &TableSchema,
    existing: Option<&Row>,
    title: &str,
    button: &str,
) -> Fragment {
    let inputs: String = schema
        .columns
        .iter()
        .map(|column| {
            let value = existing.and_then(|row| row.get(&column.name));
            let read_only = existing.is_some() && column.is_primary_key;
            render_input(column, value, read_only)
        })
        .collect();

    let action = escape_html(&paths.table(&schema.name));
    let body = format!(
        r#"<section>
  <header>
    <h3>{title}</h3>
  </header>
</section>
<section>
  <form method="POST" action="{action}" hx-post="{action}" hx-target="{target}" hx-swap="innerHTML">
{inputs}    <button type="submit">{button}</button>
  </form>
</section>
"#,
        title = escape_html(title),
        action = action,
        target = CONTENT_TARGET,
        inputs = inputs,
        button = escape_html(button),
    );

    Fragment {
        title: title.to_string(),
        body,
    }
}

fn render_input(column: &ColumnSchema, value: Option<&Value>, read_only: bool) -> String {
    let widget = widget_for(column.semantic_type);
    let name = escape_html(&column.name);

    // Binary data cannot round-trip through a text field; without a name the
    // input is never submitted and the stored bytes are kept.
    if let Some(blob @ Value::Blob { .. }) = value {
        return format!(
            "    <label for=\"field-{name}\">{name}</label>\n    <input type=\"text\" id=\"field-{name}\" value=\"{value}\" disabled />\n",
            name = name,
            value = escape_html(&blob.to_string())
        );
    }

    let mut attributes = format!(
        r#"type="{}" id="field-{name}" name="{name}""#,
        widget.input_type(),
        name = name
    );

    match widget {
        // A checkbox always submits "true"; unchecked boxes are not submitted.
        Widget::Checkbox => {
            attributes.push_str(r#" value="true""#);
            if matches!(value, Some(Value::Bool(true))) {
                attributes.push_str(" checked");
            }
        }
        Widget::Number | Widget::Text => {
            let text = value.map(ToString::to_string).unwrap_or_default();
            attributes.push_str(&format!(
                r#" placeholder="{}" value="{}""#,
                name,
                escape_html(&text)
            ));
            if widget == Widget::Number {
                attributes.push_str(r#" step="any""#);
            }
        }
    }

    if read_only {
        attributes.push_str(" readonly");
    }

    format!(
        "    <label for=\"field-{name}\">{name}</label>\n    <input {attributes} />\n",
        name = name,
        attributes = attributes
    )
}
