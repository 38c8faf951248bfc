use std::collections::BTreeMap;
use std::path::Path;

use crate::{ConfigurationError, PropertySource};

/// Properties read from a flat TOML file
///
/// Keys are option names, values are scalars:
///
/// ```toml
/// PROTOCOL = "HTTP"
/// PORT = '{{ env.PORT | default("-1") }}'
/// ROOT_PATH = "/api"
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilePropertySource {
    values: BTreeMap<String, String>,
}

impl FilePropertySource {
    /// Load properties from a TOML file
    ///
    /// Parses the file as a table of scalars, then expands `{{ env.VAR }}`
    /// placeholders inside string values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::PropertyFile` if the file cannot be read,
    /// variable expansion fails, or the contents are not a flat table of scalars
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let failure = |reason: String| ConfigurationError::PropertyFile {
            path: path.display().to_string(),
            reason,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
        let source = Self::parse(&raw).map_err(failure)?;

        tracing::debug!(path = %path.display(), properties = source.values.len(), "loaded property file");

        Ok(source)
    }

    fn parse(raw: &str) -> Result<Self, String> {
        let table: toml::Table = toml::from_str(raw).map_err(|e| e.to_string())?;

        let mut values = BTreeMap::new();
        for (name, value) in table {
            let value = match value {
                toml::Value::String(s) => {
                    crate::env::expand_value(&s).map_err(|e| format!("property '{name}': {e}"))?
                }
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => return Err(format!("property '{name}' must be a scalar, found {}", other.type_str())),
            };
            values.insert(name, value);
        }

        Ok(Self { values })
    }
}

impl PropertySource for FilePropertySource {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}
