use std::{collections::BTreeSet, fs};

use anyhow::{Context, Result};
use camino::Utf8Path;
use rivet_core::Attributes;
use serde::Deserialize;

use crate::shell;

pub const CONFIG_FILE: &str = "rivet.toml";

/// Contents of `rivet.toml`.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub attributes: Attributes,
}

impl Config {
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("`{path}` is not a valid config file"))?;

        let (config, unused) =
            Self::parse(&contents).with_context(|| format!("failed to parse `{path}`"))?;

        for key in unused {
            shell().warn(format!("{path}: unused config key: {key}"));
        }
        Ok(config)
    }

    /// Parses config text, returning it along with every key that was ignored.
    pub fn parse(contents: &str) -> Result<(Self, BTreeSet<String>), toml::de::Error> {
        let mut unused = BTreeSet::new();
        let config: Self =
            serde_ignored::deserialize(toml::Deserializer::new(contents), |path| {
                unused.insert(path.to_string());
            })?;
        Ok((config, unused))
    }
}

#[cfg(test)]
mod tests {
    use rivet_core::Attributes;

    use super::Config;

    #[test]
    fn empty_config_uses_defaults() {
        let (config, unused) = Config::parse("").unwrap();
        assert_eq!(config.attributes, Attributes::default());
        assert!(unused.is_empty());
    }

    #[test]
    fn overrides_attribute_names() {
        let (config, _) = Config::parse(
            r#"
            [attributes]
            mounts = "data-component"
            "#,
        )
        .unwrap();

        assert_eq!(config.attributes.mounts, "data-component");
        assert_eq!(config.attributes.props, "data-props");
        assert_eq!(config.attributes.refs, "data-ref");
    }

    #[test]
    fn reports_unused_keys() {
        let (_, unused) = Config::parse(
            r#"
            watch = true

            [attributes]
            ref = "data-r"
            "#,
        )
        .unwrap();

        assert_eq!(
            unused.into_iter().collect::<Vec<_>>(),
            ["attributes.ref", "watch"]
        );
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(Config::parse("[attributes").is_err());
    }
}
