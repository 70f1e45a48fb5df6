//! Authentication and authorization extractors.
//!
//! Identity is carried through explicit extractor parameters rather than
//! request-extension mutation: a handler that needs the caller declares
//! [`auth::AuthUser`] (or [`auth::MaybeAuthUser`] where anonymous access is
//! allowed) and passes the identity into services itself.

pub mod auth;
