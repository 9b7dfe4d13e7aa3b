//! Column type to form input mapping

use crate::schema::SemanticType;

/// Kind of HTML input used to edit a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Text,
    Number,
    Checkbox,
}

impl Widget {
    /// Value of the input's `type` attribute
    pub fn input_type(self) -> &'static str {
        match self {
            Widget::Text => "text",
            Widget::Number => "number",
            Widget::Checkbox => "checkbox",
        }
    }
}

/// Pick the input widget for a column of the given semantic type
pub fn widget_for(semantic_type: SemanticType) -> Widget {
    match semantic_type {
        SemanticType::String => Widget::Text,
        SemanticType::Integer | SemanticType::Real => Widget::Number,
        SemanticType::Boolean => Widget::Checkbox,
        SemanticType::Other => Widget::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_mapping() {
        assert_eq!(widget_for(SemanticType::String), Widget::Text);
        assert_eq!(widget_for(SemanticType::Integer), Widget::Number);
        assert_eq!(widget_for(SemanticType::Real), Widget::Number);
        assert_eq!(widget_for(SemanticType::Boolean), Widget::Checkbox);
        assert_eq!(widget_for(SemanticType::Other), Widget::Text);
    }

    #[test]
    fn test_unknown_sql_types_fall_back_to_text() {
        for declared in ["DATETIME", "BLOB", "JSON", "UUID", ""] {
            assert_eq!(widget_for(SemanticType::from_sql_type(declared)), Widget::Text);
        }
    }

    #[test]
    fn test_input_types() {
        assert_eq!(Widget::Text.input_type(), "text");
        assert_eq!(Widget::Number.input_type(), "number");
        assert_eq!(Widget::Checkbox.input_type(), "checkbox");
    }
}
