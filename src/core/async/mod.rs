//! Asynchronous implementations of core components
//!
//! The async resolver runs the same probing loop as
//! [`crate::core::resolver::AccountResolver::resolve`] over an
//! [`AsyncLookupProvider`](crate::core::traits::AsyncLookupProvider), sharing
//! the selection rule in [`crate::core::selection`].
//!
//! Probing stays sequential: candidates for a name are looked up one after
//! another.

pub mod resolver;
