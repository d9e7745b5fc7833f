//! Core traits defined in `dashhub-core` and implemented by the backend
//! collaborator clients.

pub mod listing;
pub mod mutation;

pub use listing::ListingClient;
pub use mutation::ItemMutationClient;
