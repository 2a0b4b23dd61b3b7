//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# textfinder configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[search]
# match_case = false
# whole_word = false
# debounce_ms = 300          # 0-5000, delay before an input search runs

[reveal]
# trigger_settle_ms = 300    # 0-10000, wait after a trigger click
# reentrancy_release_ms = 500  # 0-10000, ignore trigger clicks this long after a re-search
# expand_settle_ms = 500     # 0-10000, wait after "reveal all"

[highlight]
# marker_tag = "span"
# class = "tf-highlight"
# current_class = "tf-current-highlight"
# revealed_class = "tf-revealed-highlight"
# index_attribute = "data-tf-index"

[indicator]
# class = "tf-hidden-indicator"
# annotated_attribute = "data-tf-annotated"
# badge_color = "#ff6600"
# text_color = "#ffffff"

[visibility]
# collapsed_classes = ["collapsed", "closed"]

[logging]
# level = "INFO"             # TRACE, DEBUG, INFO, WARNING, ERROR
# directives = []            # extra filter directives, e.g. ["finder_dom=warn"]
"##
}
