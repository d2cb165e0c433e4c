//! Rendering of validator errors as `field.path: message` strings.

/// Label used when a violation concerns the document root.
pub const ROOT_LABEL: &str = "(root)";

/// Convert a JSON pointer (`/document/overrides/A~1B/visible`) into the dotted
/// form used in messages (`document.overrides.A/B.visible`).
#[must_use]
pub fn dotted_path(pointer: &str) -> String {
    let trimmed = pointer.strip_prefix('/').unwrap_or(pointer);
    if trimmed.is_empty() {
        return ROOT_LABEL.to_string();
    }
    trimmed
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

/// Format one violation.
#[must_use]
pub fn format_violation(pointer: &str, message: &str) -> String {
    format!("{}: {message}", dotted_path(pointer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "(root)")]
    #[case("/version", "version")]
    #[case("/document/overrides/Site~1Level 1/visible", "document.overrides.Site/Level 1.visible")]
    #[case("/document/overrides/a~0b", "document.overrides.a~b")]
    fn pointer_to_dotted(#[case] pointer: &str, #[case] expected: &str) {
        assert_eq!(dotted_path(pointer), expected);
    }

    #[test]
    fn formats_with_colon() {
        assert_eq!(
            format_violation("/modelKey", "\"\" is shorter than 1 character"),
            "modelKey: \"\" is shorter than 1 character"
        );
    }
}
