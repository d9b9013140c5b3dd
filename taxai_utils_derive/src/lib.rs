use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, punctuated::Punctuated, ItemFn, Meta, ReturnType, Token,
};

/// Instrument a service method with a `tracing` span.
///
/// Arguments are recorded on the span unless skipped and the return value is
/// logged at trace level. The attribute arguments are forwarded to
/// `#[tracing::instrument]`.
#[proc_macro_attribute]
pub fn trace_instrument(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let mut item = parse_macro_input!(item as ItemFn);

    let ret = match item.sig.output {
        ReturnType::Default => None,
        ReturnType::Type(..) => Some(quote! { ret(level = "trace") }),
    };
    let args = ret.into_iter().chain(args.iter().map(|arg| quote! { #arg }));
    item.attrs
        .insert(0, parse_quote! { #[::tracing::instrument(#(#args),*)] });

    quote! { #item }.into()
}
