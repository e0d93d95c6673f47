//! Argument list rendering shared by the invocation synthesizers.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::descriptor::ParameterDescriptor;

/// One local variable reference per parameter, in binding order. Used by the
/// plain invocation.
pub fn direct_args(parameters: &[ParameterDescriptor]) -> Vec<TokenStream> {
    parameters
        .iter()
        .map(|param| {
            let ident = param.arg_ident();
            quote! { #ident }
        })
        .collect()
}

/// One positional extraction per parameter, reading back from the filter
/// invocation context. Position `i` carries the i-th parameter's declared
/// base type, and the extraction is always asserted non-empty regardless of
/// declared optionality: the context stores arguments type-erased.
pub fn extracted_args(parameters: &[ParameterDescriptor]) -> Vec<TokenStream> {
    parameters
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let ty = &param.ty;
            let index = Literal::usize_unsuffixed(index);
            quote! { __fc.argument::<#ty>(#index).unwrap() }
        })
        .collect()
}
