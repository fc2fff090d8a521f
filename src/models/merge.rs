//! Schema-driven deep merge for settings groups.
//!
//! Every settings group is declared once through [`settings_group!`], which
//! produces the full struct (with its canonical default) and a *partial*
//! twin whose leaves are all optional. Merging walks both trees in lockstep:
//! a leaf present in the partial replaces the base value, an absent leaf
//! keeps it, and nested groups recurse instead of being replaced wholesale.
//!
//! Presence is decided by the JSON key, never by truthiness, so `false`,
//! `0` and `""` always override the default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A settings group with a canonical default and a partial counterpart.
pub trait Settings: Clone + Default + PartialEq + Serialize {
    /// Sparse form of the group as found in stored rows and presets.
    type Partial: Clone + Default + Serialize + DeserializeOwned;

    /// Overlay `partial` on top of `self`, recursing into nested groups.
    fn merged(&self, partial: &Self::Partial) -> Self;

    /// Parse a partial leniently. Anything that is not a JSON object
    /// yields an empty partial.
    fn partial_from_value(value: &Value) -> Self::Partial {
        if !value.is_object() {
            return Self::Partial::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Merge a raw JSON value over `self`.
    fn merged_with_value(&self, value: &Value) -> Self {
        self.merged(&Self::partial_from_value(value))
    }

    /// Complete a partial against the canonical default.
    fn from_partial(partial: &Self::Partial) -> Self {
        Self::default().merged(partial)
    }
}

/// Deserialize an optional leaf, treating a value of the wrong shape as absent.
///
/// Used on every partial field: a stored `"offsetX": "twenty"` silently
/// falls back to the base value rather than failing the whole row.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but only JSON objects are accepted for nested groups.
pub(crate) fn lenient_group<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Unknown keys of a merge: the partial's win over the base's.
pub(crate) fn merged_extra(base: &Map<String, Value>, partial: &Map<String, Value>) -> Map<String, Value> {
    let mut extra = base.clone();
    extra.extend(partial.iter().map(|(k, v)| (k.clone(), v.clone())));
    extra
}

/// Declare a settings group, its partial twin and the lockstep merge.
///
/// ```ignore
/// settings_group! {
///     /// Border styling.
///     pub struct BorderSettings / PartialBorderSettings {
///         leaves {
///             border_radius: u32 = 12,
///         }
///         groups {}
///     }
/// }
/// ```
macro_rules! settings_group {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $partial:ident {
            leaves {
                $(
                    $(#[$lmeta:meta])*
                    $leaf:ident : $lty:ty = $ldefault:expr,
                )*
            }
            groups {
                $(
                    $(#[$gmeta:meta])*
                    $group:ident : $gty:ident / $gpartial:ident,
                )*
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            $(
                $(#[$lmeta])*
                pub $leaf: $lty,
            )*
            $(
                $(#[$gmeta])*
                pub $group: $gty,
            )*
            /// Keys this schema does not know, carried through saves untouched.
            #[serde(flatten)]
            pub extra: serde_json::Map<String, serde_json::Value>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $leaf: $ldefault, )*
                    $( $group: <$gty>::default(), )*
                    extra: serde_json::Map::new(),
                }
            }
        }

        #[doc = concat!("Sparse form of [`", stringify!($name), "`]; every field is optional.")]
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $partial {
            $(
                #[serde(
                    default,
                    deserialize_with = "crate::models::merge::lenient",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $leaf: Option<$lty>,
            )*
            $(
                #[serde(
                    default,
                    deserialize_with = "crate::models::merge::lenient_group",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $group: Option<$gpartial>,
            )*
            #[serde(flatten)]
            pub extra: serde_json::Map<String, serde_json::Value>,
        }

        impl $crate::models::merge::Settings for $name {
            type Partial = $partial;

            fn merged(&self, partial: &$partial) -> Self {
                Self {
                    $(
                        $leaf: match &partial.$leaf {
                            Some(value) => value.clone(),
                            None => self.$leaf.clone(),
                        },
                    )*
                    $(
                        $group: match &partial.$group {
                            Some(nested) => $crate::models::merge::Settings::merged(&self.$group, nested),
                            None => self.$group.clone(),
                        },
                    )*
                    extra: $crate::models::merge::merged_extra(&self.extra, &partial.extra),
                }
            }
        }

        impl $partial {
            /// Overlay this partial on `base`.
            pub fn apply_to(&self, base: &$name) -> $name {
                $crate::models::merge::Settings::merged(base, self)
            }
        }
    };
}

pub(crate) use settings_group;

#[cfg(test)]
mod tests {
    use super::*;

    settings_group! {
        /// Inner test group.
        pub struct Inner / PartialInner {
            leaves {
                flag: bool = true,
                count: u32 = 7,
                label: Option<String> = Some("base".to_string()),
            }
            groups {}
        }
    }

    settings_group! {
        /// Outer test group.
        pub struct Outer / PartialOuter {
            leaves {
                name: String = "outer".to_string(),
            }
            groups {
                inner: Inner / PartialInner,
            }
        }
    }

    #[test]
    fn test_false_and_zero_override_defaults() {
        let merged = Outer::default()
            .merged_with_value(&serde_json::json!({"inner": {"flag": false, "count": 0}}));
        assert!(!merged.inner.flag);
        assert_eq!(merged.inner.count, 0);
        assert_eq!(merged.name, "outer");
    }

    #[test]
    fn test_wrong_type_falls_back_to_base() {
        let merged = Outer::default()
            .merged_with_value(&serde_json::json!({"name": 42, "inner": {"count": "many"}}));
        assert_eq!(merged, Outer::default());
    }

    #[test]
    fn test_explicit_null_clears_nullable_leaf() {
        let merged = Outer::default().merged_with_value(&serde_json::json!({"inner": {"label": null}}));
        assert_eq!(merged.inner.label, None);

        let kept = Outer::default().merged_with_value(&serde_json::json!({"inner": {}}));
        assert_eq!(kept.inner.label.as_deref(), Some("base"));
    }

    #[test]
    fn test_non_object_input_is_empty_partial() {
        assert_eq!(Outer::partial_from_value(&serde_json::json!([1, 2])), PartialOuter::default());
        assert_eq!(Outer::default().merged_with_value(&Value::Null), Outer::default());
    }

    #[test]
    fn test_merge_is_idempotent_through_json() {
        let once = Outer::default()
            .merged_with_value(&serde_json::json!({"inner": {"count": 3}, "name": "x"}));
        let json = serde_json::to_value(&once).unwrap();
        assert_eq!(Outer::default().merged_with_value(&json), once);
    }

    #[test]
    fn test_unknown_nested_keys_survive() {
        let merged = Outer::default().merged_with_value(&serde_json::json!({
            "legacyTheme": "dark",
            "inner": {"count": 2, "legacyGlow": true}
        }));
        assert_eq!(merged.inner.count, 2);
        assert_eq!(merged.extra.get("legacyTheme"), Some(&serde_json::json!("dark")));
        assert_eq!(merged.inner.extra.get("legacyGlow"), Some(&serde_json::json!(true)));

        let json = serde_json::to_value(&merged).unwrap();
        assert_eq!(json["inner"]["legacyGlow"], true);
        assert_eq!(json["legacyTheme"], "dark");
        assert_eq!(Outer::default().merged_with_value(&json), merged);
    }

    #[test]
    fn test_partials_stack() {
        let first: PartialOuter = serde_json::from_value(serde_json::json!({"inner": {"count": 1}})).unwrap();
        let second: PartialOuter = serde_json::from_value(serde_json::json!({"inner": {"flag": false}})).unwrap();
        let result = second.apply_to(&first.apply_to(&Outer::default()));
        assert_eq!(result.inner.count, 1);
        assert!(!result.inner.flag);
    }
}
