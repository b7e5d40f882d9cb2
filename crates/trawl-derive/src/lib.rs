use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote};
use syn::{
    Data, DeriveInput, Expr, ExprLit, Fields, GenericParam, Lit, LitStr, Member, parse_macro_input,
    parse_quote,
};

/// Derive `Typed`, `Reflect` and `Struct` for a struct.
///
/// Usage:
///
/// ```ignore
/// #[derive(Reflect)]
/// #[trawl(capability = "Stringer")]
/// pub struct Outer {
///     #[trawl(embed)]
///     pub embedded: Embedded,
///     #[trawl(tag = r#"json:"direct""#)]
///     pub direct: String,
///     hidden: String,
/// }
/// ```
///
/// Field attributes:
/// - `#[trawl(embed)]`: the field is embedded (flattened by `deep_fields`)
/// - `#[trawl(tag = "...")]`: struct tag, `key:"value"` pairs
///
/// Type attributes:
/// - `#[trawl(name = "...")]`: descriptor name (defaults to the type's ident)
/// - `#[trawl(capability = ...)]`: a capability the type satisfies, either a
///   string literal or a path to a `Capability` constant; repeatable
///
/// Only fields declared `pub` are visible to walkers.
#[proc_macro_derive(Reflect, attributes(trawl))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct TypeAttrs {
    name: Option<LitStr>,
    capabilities: Vec<TokenStream2>,
}

struct FieldSpec {
    member: Member,
    name: String,
    ty: syn::Type,
    tag: Option<LitStr>,
    embed: bool,
    public: bool,
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => collect_fields(&data.fields)?,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "Reflect can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "Reflect can only be derived for structs",
            ));
        }
    };
    let attrs = parse_type_attrs(&input)?;

    let mut type_params = Vec::new();
    for param in &input.generics.params {
        match param {
            GenericParam::Type(param) => type_params.push(param.ident.clone()),
            GenericParam::Lifetime(param) => {
                return Err(syn::Error::new_spanned(
                    param,
                    "Reflect types must be 'static; lifetime parameters are not supported",
                ));
            }
            GenericParam::Const(_) => {}
        }
    }
    let where_clause = input.generics.make_where_clause();
    for param in &type_params {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::trawl::Reflect + ::trawl::Typed));
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let name = descriptor_name(&input.ident, &input.generics, attrs.name.as_ref());
    let capabilities = &attrs.capabilities;
    let field_infos = fields.iter().map(field_info);

    let members: Vec<&Member> = fields.iter().map(|f| &f.member).collect();
    let indexes: Vec<usize> = (0..fields.len()).collect();

    Ok(quote! {
        impl #impl_generics ::trawl::Typed for #ident #ty_generics #where_clause {
            fn type_of() -> ::trawl::Type {
                ::trawl::Type::intern::<Self>(|| {
                    ::trawl::TypeInfo::structure::<Self>(::std::vec![#(#field_infos),*])
                        .named(#name)
                        #(.with_capability(#capabilities))*
                })
            }
        }

        impl #impl_generics ::trawl::Reflect for #ident #ty_generics #where_clause {
            ::trawl::reflect_boilerplate!();

            fn reflect_ref(&self) -> ::trawl::ReflectRef<'_> {
                ::trawl::ReflectRef::Struct(self)
            }

            fn reflect_mut(&mut self) -> ::trawl::ReflectMut<'_> {
                ::trawl::ReflectMut::Struct(self)
            }

            fn is_zero(&self) -> bool {
                true #(&& ::trawl::Reflect::is_zero(&self.#members))*
            }
        }

        impl #impl_generics ::trawl::Struct for #ident #ty_generics #where_clause {
            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::trawl::Reflect> {
                match index {
                    #(#indexes => ::core::option::Option::Some(&self.#members as &dyn ::trawl::Reflect),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn ::trawl::Reflect> {
                match index {
                    #(#indexes => ::core::option::Option::Some(&mut self.#members as &mut dyn ::trawl::Reflect),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldSpec>> {
    let mut out = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), unraw(ident)),
            None => (Member::Unnamed(index.into()), index.to_string()),
        };

        let mut spec = FieldSpec {
            member,
            name,
            ty: field.ty.clone(),
            tag: None,
            embed: false,
            public: matches!(field.vis, syn::Visibility::Public(_)),
        };

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("trawl")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("embed") {
                    spec.embed = true;
                    Ok(())
                } else if meta.path.is_ident("tag") {
                    spec.tag = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported field attribute, expected `embed` or `tag`"))
                }
            })?;
        }

        out.push(spec);
    }

    Ok(out)
}

fn parse_type_attrs(input: &DeriveInput) -> syn::Result<TypeAttrs> {
    let mut attrs = TypeAttrs {
        name: None,
        capabilities: Vec::new(),
    };

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("trawl")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                attrs.name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("capability") {
                let expr: Expr = meta.value()?.parse()?;
                let capability = match expr {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(name),
                        ..
                    }) => quote!(::trawl::Capability::new(#name)),
                    other => other.into_token_stream(),
                };
                attrs.capabilities.push(capability);
                Ok(())
            } else {
                Err(meta.error("unsupported type attribute, expected `name` or `capability`"))
            }
        })?;
    }

    Ok(attrs)
}

fn field_info(field: &FieldSpec) -> TokenStream2 {
    let name = LitStr::new(&field.name, Span::call_site());
    let ty = &field.ty;
    let member = &field.member;

    let tag = field.tag.as_ref().map(|tag| quote!(.with_tag(#tag)));
    let embed = field.embed.then(|| quote!(.embedded()));
    let public = field.public.then(|| quote!(.public()));

    quote! {
        ::trawl::FieldInfo::new(#name, <#ty as ::trawl::Typed>::type_of)
            #tag
            #embed
            #public
            .at_offset(::core::mem::offset_of!(Self, #member))
    }
}

/// `Name` for plain types, `Name<{}, {}>` filled with parameter
/// descriptors for generic ones.
fn descriptor_name(ident: &syn::Ident, generics: &syn::Generics, name: Option<&LitStr>) -> TokenStream2 {
    let base = name.map_or_else(|| unraw(ident), LitStr::value);

    let args: Vec<TokenStream2> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(param) => {
                let ident = &param.ident;
                Some(quote!(<#ident as ::trawl::Typed>::type_of()))
            }
            GenericParam::Const(param) => {
                let ident = &param.ident;
                Some(quote!(#ident))
            }
            GenericParam::Lifetime(_) => None,
        })
        .collect();

    if args.is_empty() {
        let lit = LitStr::new(&base, Span::call_site());
        return quote!(#lit);
    }

    let placeholders = vec!["{}"; args.len()].join(", ");
    let format = LitStr::new(&format!("{base}<{placeholders}>"), Span::call_site());
    quote!(::std::format!(#format, #(#args),*))
}

fn unraw(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_owned).unwrap_or(name)
}
