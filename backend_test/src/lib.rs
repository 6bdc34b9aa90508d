use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, Pat, Signature, Type};

/// Transform an asynchronous test into a synchronous one and inject a
/// ready-to-use [`rocket::local::asynchronous::Client`] running against a
/// fresh in-memory store.
///
/// `#[backend_test(admin)]` logs the client in as the default admin first;
/// `#[backend_test(voter)]` registers and logs in an example voter.
#[proc_macro_attribute]
pub fn backend_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);

    // Extract type information and reject invalid function signatures.
    let test_args = match check_sig(item_fn.sig.clone()) {
        Ok(args) => args,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Rename the future so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    // Log in the client as admin/voter if needed.
    let maybe_login = parse_macro_input!(args as Option<Ident>)
        .and_then(|arg| {
            if arg == "admin" {
                Some(quote! {
                    rocket_client
                        .post(uri!(crate::api::auth::login))
                        .header(rocket::http::ContentType::JSON)
                        .body(rocket::serde::json::json!(crate::model::api::auth::LoginRequest::default_admin()).to_string())
                        .dispatch()
                        .await;
                })
            } else if arg == "voter" {
                Some(quote! {
                    rocket_client
                        .post(uri!(crate::api::registration::register_voter))
                        .header(rocket::http::ContentType::JSON)
                        .body(rocket::serde::json::json!(crate::model::api::voter::VoterRegistration::example()).to_string())
                        .dispatch()
                        .await;

                    rocket_client
                        .post(uri!(crate::api::auth::login))
                        .header(rocket::http::ContentType::JSON)
                        .body(rocket::serde::json::json!(crate::model::api::auth::LoginRequest::example_voter()).to_string())
                        .dispatch()
                        .await;
                })
            } else {
                None
            }
        })
        .unwrap_or_default();

    // Rewrite the test function.
    quote! {
        #[test]
        fn #name() {
            /// Test setup.
            async fn setup() -> rocket::local::asynchronous::Client {
                let rocket_client =
                    rocket::local::asynchronous::Client::tracked(crate::build())
                        .await
                        .unwrap();

                #maybe_login

                rocket_client
            }

            /// The test itself.
            #item_fn

            let runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("rocket-worker-test-thread")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                let rocket_client = setup().await;
                #new_name(#(#test_args),*).await;
            });
        }
    }
    .into()
}

/// Ensure the wrapped test is async, extract the client parameter to
/// inject, and reject unknown parameters.
fn check_sig(sig: Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let mut has_client = false;
    let mut args = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let Pat::Ident(_) = &*pat_type.pat {
                if let Type::Path(type_path) = &*pat_type.ty {
                    if type_path.path.is_ident("Client") {
                        if has_client {
                            return Err(syn::Error::new(
                                input.span(),
                                "Test cannot accept more than one `rocket::local::asynchronous::Client`",
                            ));
                        }
                        has_client = true;
                        args.push(quote! { rocket_client });
                        continue;
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected `client_ident: Client`",
        ));
    }

    Ok(args)
}
