pub use taxai_utils_derive::trace_instrument;

mod macros;

/// Returns the version of this build.
///
/// Uses `TAXAI_VERSION` if it was set at compile time and falls back to the
/// crate version otherwise.
pub fn taxai_version() -> &'static str {
    option_env!("TAXAI_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version() {
        assert!(!taxai_version().is_empty());
    }
}
