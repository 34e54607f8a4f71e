//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - the filter capability callers use
//! - Driven Ports (outbound) - the hash-mixing collaborator filters use

pub mod inbound;
pub mod outbound;

pub use inbound::{DeletableFilter, MembershipFilter};
pub use outbound::SeedHasher;
