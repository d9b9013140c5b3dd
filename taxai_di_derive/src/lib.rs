use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields};

/// Derive `taxai_di::Build` for a struct.
///
/// Fields are built from the provider. Fields marked with `#[state]` are
/// initialized with `Default` instead; since built services are cached, all
/// copies of a service share the same state.
#[proc_macro_derive(Build, attributes(state))]
pub fn derive_build(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Build can only be derived for structs",
        ));
    };
    if let Some(param) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            param,
            "Build cannot be derived for structs with lifetime parameters",
        ));
    }

    let ident = &input.ident;
    let params = input
        .generics
        .type_params()
        .map(|param| &param.ident)
        .collect::<Vec<_>>();

    let dependencies = data
        .fields
        .iter()
        .filter(|field| !is_state(field))
        .map(|Field { ty, .. }| quote! { #ty: ::taxai_di::Build<__Provider>, });

    let initializers = data.fields.iter().map(|field| {
        let value = if is_state(field) {
            quote! { ::core::default::Default::default() }
        } else {
            quote! { ::taxai_di::Build::build(provider) }
        };
        match &field.ident {
            Some(ident) => quote! { #ident: #value, },
            None => quote! { #value, },
        }
    });
    let provider = if data.fields.iter().any(|field| !is_state(field)) {
        quote! { provider }
    } else {
        quote! { _ }
    };
    let construct = match &data.fields {
        Fields::Named(_) => quote! { Self { #(#initializers)* } },
        Fields::Unnamed(_) => quote! { Self( #(#initializers)* ) },
        Fields::Unit => quote! { Self },
    };

    Ok(quote! {
        impl<__Provider, #(#params),*> ::taxai_di::Build<__Provider> for #ident<#(#params),*>
        where
            __Provider: ::taxai_di::Provider,
            Self: ::core::clone::Clone + 'static,
            #(#dependencies)*
        {
            fn build(provider: &mut __Provider) -> Self {
                ::taxai_di::Provider::cached(provider, |#provider| #construct)
            }
        }
    })
}

fn is_state(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("state"))
}
