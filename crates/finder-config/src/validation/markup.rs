//! Validation of inserted markup: class names, attributes and colors.

use crate::colors::validate_color;
use crate::schema::FinderConfig;

use super::helpers::validate_name;

pub(crate) fn validate_highlight(errors: &mut Vec<String>, config: &FinderConfig) {
    let h = &config.highlight;
    validate_name(errors, "highlight.marker_tag", &h.marker_tag);
    validate_name(errors, "highlight.class", &h.class);
    validate_name(errors, "highlight.current_class", &h.current_class);
    validate_name(errors, "highlight.revealed_class", &h.revealed_class);
    validate_name(errors, "highlight.index_attribute", &h.index_attribute);

    if h.class == h.current_class || h.class == h.revealed_class {
        errors.push("highlight class names must be distinct".into());
    }
}

pub(crate) fn validate_indicator(errors: &mut Vec<String>, config: &FinderConfig) {
    let ind = &config.indicator;
    validate_name(errors, "indicator.class", &ind.class);
    validate_name(errors, "indicator.annotated_attribute", &ind.annotated_attribute);

    if ind.class == config.highlight.class {
        errors.push("indicator.class must differ from highlight.class".into());
    }
    if !validate_color(&ind.badge_color) {
        errors.push(format!("indicator.badge_color: invalid color '{}'", ind.badge_color));
    }
    if !validate_color(&ind.text_color) {
        errors.push(format!("indicator.text_color: invalid color '{}'", ind.text_color));
    }
}

pub(crate) fn validate_visibility(errors: &mut Vec<String>, config: &FinderConfig) {
    for (i, class) in config.visibility.collapsed_classes.iter().enumerate() {
        validate_name(errors, &format!("visibility.collapsed_classes[{i}]"), class);
    }
}
