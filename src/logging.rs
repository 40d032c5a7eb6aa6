// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Logging bootstrap.
//!
//! The crate logs through the `log` facade. Hosts call [`init`] once at
//! startup; `RUST_LOG` overrides the default `info` filter.

use env_logger::Env;
use log::SetLoggerError;

const DEFAULT_FILTER: &str = "info";

/// Install `env_logger` as the global logger.
///
/// Fails if another logger is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .try_init()
}

/// Logger for unit tests. Safe to call from every test.
pub fn init_for_tests() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable_in_tests() {
        init_for_tests();
        init_for_tests();
        // A second real init reports the existing logger instead of panicking.
        assert!(init().is_err());
        log::debug!("logging initialised");
    }
}
