//! Property-test run profile read from the environment.
//!
//! CI raises case counts and enables forking through environment variables;
//! local runs fall back to the defaults each suite passes in.

use std::env;
use std::fmt;

/// Environment variable overriding the number of proptest cases.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable toggling forked proptest execution.
pub const TOPOSURF_PBT_FORK_ENV_KEY: &str = "TOPOSURF_PBT_FORK";

/// Case count and fork mode for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the process environment.
    ///
    /// Invalid overrides are logged and ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use toposurf_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::from_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Reads overrides through `lookup` instead of the process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use toposurf_test_support::ci::property_test_profile::{
    ///     PROGTEST_CASES_ENV_KEY, ProptestRunProfile,
    /// };
    ///
    /// let profile = ProptestRunProfile::from_lookup(64, false, |key| {
    ///     (key == PROGTEST_CASES_ENV_KEY).then(|| "512".to_owned())
    /// });
    /// assert_eq!(profile.cases(), 512);
    /// assert!(!profile.fork());
    /// ```
    #[must_use]
    pub fn from_lookup(
        default_cases: u32,
        default_fork: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            cases: read_override(&lookup, PROGTEST_CASES_ENV_KEY, parse_cases)
                .unwrap_or(default_cases),
            fork: read_override(&lookup, TOPOSURF_PBT_FORK_ENV_KEY, parse_flag)
                .unwrap_or(default_fork),
        }
    }

    /// Cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

#[derive(Debug, PartialEq, Eq)]
enum OverrideError {
    NotANumber,
    ZeroCases,
    NotAFlag,
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotANumber => "expected a positive integer",
            Self::ZeroCases => "case count must be greater than zero",
            Self::NotAFlag => "expected one of true/false/1/0/yes/no/on/off",
        })
    }
}

fn read_override<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    parse: fn(&str) -> Result<T, OverrideError>,
) -> Option<T> {
    let raw = lookup(key)?;
    parse(&raw)
        .inspect_err(|reason| {
            tracing::warn!(
                env = key,
                raw = %raw,
                %reason,
                "ignoring invalid property-test override",
            );
        })
        .ok()
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(OverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(_) => Err(OverrideError::NotANumber),
    }
}

fn parse_flag(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotAFlag),
    }
}
