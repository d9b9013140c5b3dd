/// Declare a provider struct holding the given leaf dependencies.
///
/// Each field is handed out by cloning it, so fields are usually cheap to
/// clone configuration types.
///
/// ```
/// # #[derive(Clone)] struct GreeterConfig;
/// taxai_di::provider! {
///     /// Example provider
///     pub Provider {
///         greeter_config: GreeterConfig,
///     }
/// }
/// ```
#[macro_export]
macro_rules! provider {
    ($(#[$meta:meta])* $vis:vis $ident:ident { $( $field:ident: $ty:ty ),* $(,)? }) => {
        $(#[$meta])*
        $vis struct $ident {
            _cache: $crate::Cache,
            $( $field: $ty, )*
        }

        impl $crate::Provider for $ident {
            fn cache(&mut self) -> &mut $crate::Cache {
                &mut self._cache
            }
        }

        $(
            impl $crate::Build<$ident> for $ty {
                fn build(provider: &mut $ident) -> Self {
                    ::core::clone::Clone::clone(&provider.$field)
                }
            }
        )*
    };
}
