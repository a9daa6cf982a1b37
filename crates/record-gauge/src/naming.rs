//! Metric name derivation.

use crate::metadata::FieldEntry;

/// Turn a raw tag or field key into an underscore-delimited token.
///
/// The replacements run in a fixed order: `" %"` becomes `" percent"`, any
/// remaining `%` becomes `"_percent"`, then spaces become underscores. Callers
/// lowercase the result.
///
/// ```rust
/// use record_gauge::naming::sanitize;
///
/// assert_eq!(sanitize("funky %"), "funky_percent");
/// assert_eq!(sanitize("cpu%"), "cpu_percent");
/// assert_eq!(sanitize("This is a big name"), "This_is_a_big_name");
/// ```
#[must_use]
pub fn sanitize(raw: &str) -> String {
    raw.replace(" %", " percent")
        .replace('%', "_percent")
        .replace(' ', "_")
}

/// Name of the gauge for one flattened entry, without the namespace.
///
/// The entry's tag is preferred; an empty tag falls back to `field_key`.
#[must_use]
pub fn gauge_name(type_name: &str, field_key: &str, entry: &FieldEntry) -> String {
    let base = if entry.tag.is_empty() {
        field_key
    } else {
        entry.tag.as_str()
    };
    format!(
        "{}_{}",
        type_name.to_lowercase(),
        sanitize(base).to_lowercase()
    )
}

/// Help text for the gauge of one flattened entry.
#[must_use]
pub fn gauge_description(type_name: &str, field_key: &str) -> String {
    format!("{type_name}{field_key}")
}

/// Registry key of a gauge: `namespace + "_" + gauge_name`.
#[must_use]
pub fn qualified_name(namespace: &str, gauge_name: &str) -> String {
    format!("{namespace}_{gauge_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    fn entry(tag: &str) -> FieldEntry {
        FieldEntry::new(tag, FieldValue::Int(0))
    }

    #[test]
    fn sanitize_order() {
        assert_eq!(sanitize("funky %"), "funky_percent");
        assert_eq!(sanitize("a%b"), "a_percentb");
        assert_eq!(sanitize("cpu % used"), "cpu_percent_used");
        assert_eq!(sanitize("1_accept"), "1_accept");
    }

    #[test]
    fn name_prefers_tag() {
        assert_eq!(
            gauge_name("ChipStat", "BigName", &entry("This is a big name")),
            "chipstat_this_is_a_big_name"
        );
        assert_eq!(gauge_name("ChipStat", "Jon", &entry("")), "chipstat_jon");
        assert_eq!(
            gauge_name("ChipStat", "funky %", &entry("")),
            "chipstat_funky_percent"
        );
    }

    #[test]
    fn description_is_raw() {
        assert_eq!(gauge_description("ChipStat", "funky %"), "ChipStatfunky %");
    }

    #[test]
    fn qualified() {
        assert_eq!(qualified_name("svc", "sample_a"), "svc_sample_a");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn idempotent(raw in "[a-zA-Z0-9 %]{0,24}") {
                let once = sanitize(&raw);
                prop_assert_eq!(sanitize(&once), once.clone());
                prop_assert!(!once.contains(' '));
                prop_assert!(!once.contains('%'));
            }
        }
    }
}
