use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, Ident, Type, Variant};

const CONTEXT_FIELD: &str = "context";
const SOURCE_FIELD: &str = "source";
const INTERNAL_VARIANT: &str = "Internal";

/// Everything the generator needs to know about one variant.
struct VariantSpec<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfg_attrs: Vec<Attribute>,
}

impl VariantSpec<'_> {
    fn is_internal(&self) -> bool {
        self.ident == INTERNAL_VARIANT
    }
}

/// Parsed view of the annotated enum.
struct ErrorModel<'a> {
    name: &'a Ident,
    ext_trait: Ident,
    variants: Vec<VariantSpec<'a>>,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let model = match ErrorModel::parse(&input) {
        Ok(model) => model,
        Err(err) => return err,
    };

    let derives = missing_derives(&input);
    let ext_trait = model.ext_trait();
    let accessor = model.context_accessor();
    let from_impls = model.source_conversions();
    let internal_impls = model.internal_conversions();

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #ext_trait
        #accessor
        #from_impls
        #internal_impls

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

impl<'a> ErrorModel<'a> {
    fn parse(input: &'a DeriveInput) -> Result<Self, TokenStream> {
        let Data::Enum(data) = &input.data else {
            return Err(quote! { compile_error!("signup_error can only be applied to enums"); });
        };

        let variants = data.variants.iter().map(parse_variant).collect::<Result<Vec<_>, _>>()?;

        if let Some(orphan) = variants.iter().find(|v| v.source.is_some() && !v.has_context) {
            return Err(syn::Error::new_spanned(
                orphan.ident,
                "signup_error requires `context: Option<Cow<'static, str>>` for variants with a source",
            )
            .to_compile_error());
        }

        Ok(Self { name: &input.ident, ext_trait: format_ident!("{}Ext", input.ident), variants })
    }

    fn ext_trait(&self) -> TokenStream {
        let name = self.name;
        let trait_name = &self.ext_trait;
        let arms = self.variants.iter().filter(|v| v.has_context).map(|v| {
            let cfg_attrs = &v.cfg_attrs;
            let ident = v.ident;
            quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
        });

        quote! {
            pub trait #trait_name<T> {
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
            }

            #[automatically_derived]
            impl<T> #trait_name<T> for Result<T, #name> {
                #[inline]
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                    self.map_err(|mut e| {
                        match &mut e {
                            #( #arms )*
                            _ => {}
                        }
                        e
                    })
                }
            }
        }
    }

    fn context_accessor(&self) -> TokenStream {
        let name = self.name;
        let arms = self.variants.iter().filter(|v| v.has_context).map(|v| {
            let cfg_attrs = &v.cfg_attrs;
            let ident = v.ident;
            quote! { #(#cfg_attrs)* Self::#ident { context, .. } => context.as_deref(), }
        });

        quote! {
            #[automatically_derived]
            impl #name {
                /// Returns the context attached via `.context(..)`, if any.
                #[must_use]
                #[allow(unreachable_patterns)]
                pub fn context(&self) -> Option<&str> {
                    match self {
                        #( #arms )*
                        _ => None,
                    }
                }
            }
        }
    }

    fn source_conversions(&self) -> TokenStream {
        let name = self.name;
        let trait_name = &self.ext_trait;
        let impls = self.variants.iter().filter(|v| !v.is_internal()).filter_map(|v| {
            let (field, ty) = v.source?;
            let ident = v.ident;
            let cfg_attrs = &v.cfg_attrs;

            Some(quote! {
                #(#cfg_attrs)*
                #[automatically_derived]
                impl From<#ty> for #name {
                    #[inline]
                    fn from(#field: #ty) -> Self { Self::#ident { #field, context: None } }
                }

                #(#cfg_attrs)*
                impl<T> #trait_name<T> for std::result::Result<T, #ty> {
                    #[inline]
                    fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                        self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
                    }
                }
            })
        });

        quote! { #(#impls)* }
    }

    fn internal_conversions(&self) -> TokenStream {
        let name = self.name;
        let Some(internal) = self.variants.iter().find(|v| v.is_internal()) else {
            return quote!();
        };
        let cfg_attrs = &internal.cfg_attrs;

        quote! {
            #(#cfg_attrs)*
            impl From<&'static str> for #name {
                #[inline]
                fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
            }
            #(#cfg_attrs)*
            impl From<String> for #name {
                #[inline]
                fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
            }
        }
    }
}

fn parse_variant(v: &Variant) -> Result<VariantSpec<'_>, TokenStream> {
    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(
            v,
            "signup_error requires named fields for source/context handling",
        )
        .to_compile_error());
    };

    let has_context = context_field(fields)?.is_some();
    let source = source_field(fields).and_then(|f| f.ident.as_ref().map(|ident| (ident, &f.ty)));
    let cfg_attrs = v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect();

    Ok(VariantSpec { ident: &v.ident, source, has_context, cfg_attrs })
}

fn context_field(fields: &FieldsNamed) -> Result<Option<&Field>, TokenStream> {
    let Some(field) =
        fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|i| i == CONTEXT_FIELD))
    else {
        return Ok(None);
    };

    if is_optional_static_cow(&field.ty) {
        Ok(Some(field))
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>")
            .to_compile_error())
    }
}

fn source_field(fields: &FieldsNamed) -> Option<&Field> {
    fields.named.iter().find(|field| {
        field.ident.as_ref().is_some_and(|ident| ident == SOURCE_FIELD)
            || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
    })
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(seg) = meta.path.segments.last() {
                present.insert(seg.ident.to_string());
            }
            Ok(())
        });
    }

    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote! { Debug });
    }
    if !present.contains("Error") {
        derives.push(quote! { ::thiserror::Error });
    }

    if derives.is_empty() { quote! {} } else { quote! { #[derive(#(#derives),*)] } }
}

/// Matches `Option<Cow<'static, str>>` by its trailing path segments.
fn is_optional_static_cow(ty: &Type) -> bool {
    let Some(inner) = single_generic(ty, "Option") else {
        return false;
    };
    let Type::Path(path) = inner else {
        return false;
    };
    let Some(seg) = path.path.segments.last() else {
        return false;
    };
    if seg.ident != "Cow" {
        return false;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return false;
    };

    let mut args = args.args.iter();
    let lifetime_ok =
        matches!(args.next(), Some(syn::GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_ok = matches!(
        args.next(),
        Some(syn::GenericArgument::Type(Type::Path(p)))
            if p.path.segments.last().is_some_and(|s| s.ident == "str")
    );

    lifetime_ok && str_ok
}

fn single_generic<'t>(ty: &'t Type, wrapper: &str) -> Option<&'t Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let seg = path.path.segments.last()?;
    if seg.ident != wrapper {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
