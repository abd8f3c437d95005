use strum::EnumString;

#[derive(Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Decide the runtime environment from the ENV variable, falling back to
/// the build profile when it is unset or unrecognized.
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    match std::env::var("ENV") {
        Err(_) => default_env,
        Ok(v) => v.parse().unwrap_or(default_env),
    }
}
