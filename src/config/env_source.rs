use std::collections::HashMap;

/// Where settings read their raw values from
///
/// Settings take this as a trait object so tests can supply values without
/// touching the process environment, which is shared by parallel tests.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment (after `.env` has been loaded)
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables, for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
