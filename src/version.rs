//! Build version, with the git commit embedded by the build script.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit SHA at build time, or "unknown" outside a checkout.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// `{version}+{short sha}`, e.g. `0.1.0+abc1234`.
pub fn version_string() -> String {
    format!("{PKG_VERSION}+{}", GIT_SHA.get(..7).unwrap_or(GIT_SHA))
}

/// Default `User-Agent` sent to weather.gov, which rejects anonymous clients.
pub fn default_user_agent() -> String {
    format!("stationwx/{}", version_string())
}
