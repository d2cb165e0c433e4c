use serde::Serialize;
use veneer_core::responses::OperationResult;
use veneer_overrides::OverrideError;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Split an override result into a value and an inline failure.
///
/// Validation and precondition errors are printed as a failed
/// `OperationResult` and yield `None`; anything else propagates.
pub fn settle<T>(
    result: Result<T, OverrideError>,
    format: OutputFormat,
) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_inline() => {
            output(&OperationResult::failed(error.to_string()), format)?;
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use veneer_core::responses::OperationResult;
    use veneer_overrides::OverrideError;

    use super::{render, settle};
    use crate::cli::OutputFormat;

    #[test]
    fn raw_is_compact() {
        let rendered = render(&OperationResult::ok(), OutputFormat::Raw).unwrap();
        assert_eq!(rendered, r#"{"success":true}"#);
    }

    #[test]
    fn json_is_pretty() {
        let rendered = render(&OperationResult::failed("nope"), OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{\n  \"success\": false,\n  \"error\": \"nope\"\n}");
    }

    #[test]
    fn inline_errors_are_settled() {
        let result: Result<(), OverrideError> =
            Err(OverrideError::Precondition("no model loaded".into()));
        assert!(settle(result, OutputFormat::Raw).unwrap().is_none());
    }

    #[test]
    fn persistence_errors_propagate() {
        let result: Result<(), OverrideError> = Err(OverrideError::Persistence(
            veneer_store::StoreError::Backend("down".into()),
        ));
        assert!(settle(result, OutputFormat::Raw).is_err());
    }
}
