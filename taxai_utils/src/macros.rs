/// Assert that an expression matches a pattern, optionally followed by a
/// guard. Bindings in the pattern are references into the value.
///
/// ```
/// # use taxai_utils::assert_matches;
/// let result: Result<u8, String> = Ok(42);
/// assert_matches!(result, Ok(x) if *x > 40);
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {
        match &$expr {
            $pat $(if $guard)? => {}
            value => ::core::panic!(
                "assertion failed: `{:?}` does not match `{}`",
                value,
                ::core::stringify!($pat $(if $guard)?),
            ),
        }
    };
}
