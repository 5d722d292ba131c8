use serde::{Deserialize, Deserializer};

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * field absent  => `None`          (don't update)
/// * field = null  => `Some(None)`    (set to NULL)
/// * field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default, Debug, PartialEq)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        latitude: Option<Option<f64>>,
    }

    #[test]
    fn absent_field_is_none() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.latitude, None);
    }

    #[test]
    fn null_field_clears() {
        let patch: Patch = serde_json::from_str(r#"{"latitude": null}"#).unwrap();
        assert_eq!(patch.latitude, Some(None));
    }

    #[test]
    fn value_field_sets() {
        let patch: Patch = serde_json::from_str(r#"{"latitude": 12.5}"#).unwrap();
        assert_eq!(patch.latitude, Some(Some(12.5)));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
