use std::collections::{BTreeMap, HashMap};

/// External lookup consulted for options the caller did not set explicitly
///
/// Implementations must be pure from the builder's point of view: the same
/// name is expected to yield the same answer for the duration of a `build()`.
pub trait PropertySource: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<F> PropertySource for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// An absent source answers nothing
impl<S: PropertySource> PropertySource for Option<S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.as_ref().and_then(|source| source.lookup(name))
    }
}

/// Reads options from process environment variables
///
/// With a prefix of `APP_`, the `PORT` option is read from `APP_PORT`.
#[derive(Debug, Clone, Default)]
pub struct EnvPropertySource {
    prefix: String,
}

impl EnvPropertySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl PropertySource for EnvPropertySource {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(format!("{}{name}", self.prefix)).ok()
    }
}

/// In-memory property table
#[derive(Debug, Clone, Default)]
pub struct MapPropertySource {
    values: BTreeMap<String, String>,
}

impl MapPropertySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl From<BTreeMap<String, String>> for MapPropertySource {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl<S: std::hash::BuildHasher> From<HashMap<String, String, S>> for MapPropertySource {
    fn from(values: HashMap<String, String, S>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl PropertySource for MapPropertySource {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Two sources consulted in order; the first answer wins
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

pub const fn chain<A: PropertySource, B: PropertySource>(first: A, second: B) -> Chain<A, B> {
    Chain { first, second }
}

impl<A: PropertySource, B: PropertySource> PropertySource for Chain<A, B> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.first.lookup(name).or_else(|| self.second.lookup(name))
    }
}
