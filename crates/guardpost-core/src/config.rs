/// Loads service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field `database_url` maps to the
/// `DATABASE_URL` variable, and so on. Optional values use `Option<T>` or a
/// `#[serde(default = "...")]` function.
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Load from the process environment.
    fn load() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit list of `(KEY, value)` pairs.
    fn load_from<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// # Panics
    ///
    /// Panics if a required variable is missing or cannot be deserialized.
    fn from_env() -> Self {
        Self::load().expect("failed to load config from environment")
    }
}
