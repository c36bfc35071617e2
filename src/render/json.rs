//! JSON rendering.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a highlight set, study cards or a quiz to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Highlight, HighlightSet};

    fn sample() -> HighlightSet {
        let mut set = HighlightSet::from_highlights(vec![Highlight::new(2, "Destaque")]);
        set.source.title = Some("Apostila".to_string());
        set
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Apostila"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#"{"page":2,"text":"Destaque"}"#));
    }

    #[test]
    fn test_slices_serialize() {
        let highlights = vec![Highlight::new(1, "a")];
        assert_eq!(
            to_json(highlights.as_slice(), JsonFormat::Compact).unwrap(),
            r#"[{"page":1,"text":"a"}]"#
        );
    }
}
