//! The derive macro for the emb-uart register blocks.

use proc_macro2::TokenStream;
use proc_macro_error2::{abort, proc_macro_error};
use quote::{format_ident, quote, TokenStreamExt};
use syn::{
    parse_macro_input, punctuated::Punctuated, Data, DeriveInput, Field, Fields, Ident, Meta,
    Token, Type,
};

#[proc_macro_error]
#[proc_macro_derive(RegisterBlock, attributes(reg))]
pub fn derive_register_block(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    // validate our input
    let input = parse_macro_input!(input as DeriveInput);
    let mut is_repr_c = false;
    'attr: for attr in input.attrs.iter() {
        if attr.path().is_ident("repr") {
            let Ok(nested) = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
            else {
                abort!(attr, "failed to parse `#[repr(...)]`");
            };
            for meta in nested {
                if let Meta::Path(path) = meta {
                    if path.is_ident("C") {
                        is_repr_c = true;
                        break 'attr;
                    }
                }
            }
        }
    }
    if !is_repr_c {
        abort!(&input.ident, "`#[derive(RegisterBlock)]` only works on repr(C) types");
    }
    let ident = input.ident;
    let vis = input.vis;
    let wrapper_ident = format_ident!("Mmio{}", ident);
    let Data::Struct(ref s) = input.data else {
        abort!(&ident, "`#[derive(RegisterBlock)]` only supports struct");
    };
    let Fields::Named(ref fields) = &s.fields else {
        abort!(&ident, "`#[derive(RegisterBlock)]` only supports structs with named fields");
    };

    // reserved space must be whole registers so the block has no padding
    for field in fields.named.iter() {
        let reserved = field
            .ident
            .as_ref()
            .is_some_and(|ident| ident.to_string().starts_with('_'));
        if reserved && !is_u32_or_array(&field.ty) {
            abort!(&field.ty, "reserved fields must be `u32` or `[u32; N]`");
        }
    }

    let registers: Vec<(&Field, &Ident)> = fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| (field, ident)))
        .filter(|(_field, field_ident)| !field_ident.to_string().starts_with('_'))
        .collect();

    for (field, _) in registers.iter() {
        if !is_u32(&field.ty) {
            abort!(&field.ty, "registers must be `u32`; only 32-bit access is supported");
        }
    }

    let access_methods = registers
        .iter()
        .map(|(field, field_ident)| generate_access_methods(&vis, field, field_ident));

    let offsets = registers.iter().map(|(_field, field_ident)| {
        let const_ident = format_ident!("{}_OFFSET", field_ident.to_string().to_uppercase());
        quote! {
            #[doc = "Byte offset of the `"]
            #[doc = stringify!(#field_ident)]
            #[doc = "` register from the start of the block."]
            #vis const #const_ident: usize = core::mem::offset_of!(#ident, #field_ident);
        }
    });

    let field_sizes = fields.named.iter().map(field_size);

    // combine the fragments into the desired output code
    proc_macro::TokenStream::from(quote! {
        #[doc = "A volatile handle to a [`"]
        #[doc = stringify!(#ident)]
        #[doc = "`] register block."]
        #[doc = ""]
        #[doc = "Every read and write through this handle is a single volatile 32-bit access."]
        #vis struct #wrapper_ident<'a> {
            ptr: *mut #ident,
            phantom: core::marker::PhantomData<&'a mut ()>,
        }

        // The handle owns exclusive access to the block; moving it to another
        // thread moves that access with it.
        unsafe impl Send for #wrapper_ident<'_> {}

        // Must match expected size, so the block has no padding
        const _: () = assert!(
            (0 #( + #field_sizes )*) == core::mem::size_of::<#ident>(),
            "register block must not contain padding"
        );

        impl #wrapper_ident<'_> {
            #[doc = "The address of the first register in the block."]
            #vis fn base_address(&self) -> usize {
                self.ptr as usize
            }

            #(#access_methods)*
        }

        impl #ident {
            #(#offsets)*

            #[doc = "Create a new handle to this register block given an address."]
            #[doc = ""]
            #[doc = "# Safety"]
            #[doc = ""]
            #[doc = "See the safety notes for [`Self::new_mmio`]."]
            #vis const unsafe fn new_mmio_at(addr: usize) -> #wrapper_ident<'static> {
                Self::new_mmio(addr as *mut #ident)
            }

            #[doc = "Create a new handle to this register block."]
            #[doc = ""]
            #[doc = "# Safety"]
            #[doc = ""]
            #[doc = "The pointer given must be 4-byte aligned and point to an object which"]
            #[doc = "matches the layout given by the structure pointed to, for as long as the"]
            #[doc = "handle lives."]
            #[doc = ""]
            #[doc = "Only one handle may exist per register block. The handle is the only"]
            #[doc = "path through which the block is accessed once it is created."]
            #vis const unsafe fn new_mmio(ptr: *mut #ident) -> #wrapper_ident<'static> {
                #wrapper_ident {
                    ptr,
                    phantom: core::marker::PhantomData,
                }
            }
        }
    })
}

/// Is this type spelled `u32` (or `core::primitive::u32`)?
fn is_u32(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "u32" && segment.arguments.is_empty()),
        _ => false,
    }
}

/// Is this type `u32` or an array of them?
fn is_u32_or_array(ty: &Type) -> bool {
    match ty {
        Type::Array(array) => is_u32(&array.elem),
        _ => is_u32(ty),
    }
}

/// Convert a field into code that returns the field size
fn field_size(field: &Field) -> TokenStream {
    let ty = &field.ty;
    quote! {
        core::mem::size_of::<#ty>()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Access {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl Access {
    fn readable(self) -> bool {
        self != Access::WriteOnly
    }

    fn writable(self) -> bool {
        self != Access::ReadOnly
    }
}

fn parse_access(field: &Field) -> Access {
    let mut access = None;
    for attr in field.attrs.iter() {
        if !attr.path().is_ident("reg") {
            continue;
        }
        let Ok(nested) = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        else {
            abort!(attr, "failed to parse `#[reg(...)]`");
        };
        for meta in nested {
            let Meta::Path(path) = &meta else {
                abort!(&meta, "`#[reg(...)]` only supports 'RO', 'WO' and 'RW' options");
            };
            let next = if path.is_ident("RO") {
                Access::ReadOnly
            } else if path.is_ident("WO") {
                Access::WriteOnly
            } else if path.is_ident("RW") {
                Access::ReadWrite
            } else {
                abort!(path, "`#[reg(...)]` only supports 'RO', 'WO' and 'RW' options");
            };
            if access.replace(next).is_some() {
                abort!(path, "`#[reg(...)]` found second access argument");
            }
        }
    }

    // use ReadWrite for anything not otherwise marked
    access.unwrap_or(Access::ReadWrite)
}

/// Convert a field into a set of methods that operate on that field
fn generate_access_methods(vis: &syn::Visibility, field: &Field, field_ident: &Ident) -> TokenStream {
    let pointer_fn_name = format_ident!("pointer_to_{}", field_ident);
    let read_fn_name = format_ident!("read_{}", field_ident);
    let write_fn_name = format_ident!("write_{}", field_ident);
    let modify_fn_name = format_ident!("modify_{}", field_ident);

    let access = parse_access(field);
    let ty = &field.ty;

    let mut output = quote! {
        #[doc = "Obtain a pointer to the `"]
        #[doc = stringify!(#field_ident)]
        #[doc = "` register."]
        #[doc = ""]
        #[doc = "Never create a reference from this pointer - only use read_volatile/write_volatile on it."]
        #vis fn #pointer_fn_name(&self) -> *mut #ty {
            unsafe { &raw mut (*self.ptr).#field_ident }
        }
    };

    if access.readable() {
        output.append_all(quote! {
            #[doc = "Read the `"]
            #[doc = stringify!(#field_ident)]
            #[doc = "` register."]
            #vis fn #read_fn_name(&mut self) -> #ty {
                let addr = self.#pointer_fn_name();
                unsafe {
                    addr.read_volatile()
                }
            }
        });
    }

    if access.writable() {
        output.append_all(quote! {
            #[doc = "Write the `"]
            #[doc = stringify!(#field_ident)]
            #[doc = "` register."]
            #vis fn #write_fn_name(&mut self, value: #ty) {
                let addr = self.#pointer_fn_name();
                unsafe {
                    addr.write_volatile(value)
                }
            }
        });
    }

    if access == Access::ReadWrite {
        output.append_all(quote! {
            #[doc = "Read-Modify-Write the `"]
            #[doc = stringify!(#field_ident)]
            #[doc = "` register."]
            #vis fn #modify_fn_name<F>(&mut self, f: F) where F: FnOnce(#ty) -> #ty {
                let value = self.#read_fn_name();
                let new_value = f(value);
                self.#write_fn_name(new_value);
            }
        });
    }

    output
}
