use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{parse_macro_input, FnArg, ItemFn};

/// Marks a function as composable.
///
/// The body runs inside a group keyed by the function's source location, so
/// remembered values, effects and emitted nodes stay attached to the call
/// position across passes. Repeated calls from the same parent match by
/// order; wrap them in `with_key` when they can be reordered.
#[proc_macro_attribute]
pub fn composable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = TokenStream2::from(attr);
    let func = parse_macro_input!(item as ItemFn);
    match expand(attr, func) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(attr: TokenStream2, func: ItemFn) -> syn::Result<TokenStream2> {
    if !attr.is_empty() {
        return Err(syn::Error::new(
            attr.span(),
            "#[composable] does not take arguments",
        ));
    }
    if let Some(asyncness) = &func.sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "composable functions cannot be async; launch work with LaunchedEffect! instead",
        ));
    }
    if let Some(receiver) = func.sig.inputs.iter().find(|arg| matches!(arg, FnArg::Receiver(_))) {
        return Err(syn::Error::new(
            receiver.span(),
            "composable functions cannot take self",
        ));
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;
    let span = sig.ident.span();
    let group_key = quote_spanned! {span=>
        composables_runtime::location_key(file!(), line!(), column!())
    };

    Ok(quote! {
        #(#attrs)*
        #vis #sig {
            composables_runtime::with_group(#group_key, move || #block)
        }
    })
}
