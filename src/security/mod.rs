//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Typed input:
//!     → sanitize.rs (strip script vectors while typing)
//!
//! Submit:
//!     → rate_limit.rs (sliding window over the durable store)
//!     → token.rs (session token attached to the payload, rotated on success)
//!
//! Rendering (content collaborator):
//!     → sanitize.rs (escape text, denylist-clean fragments)
//! ```
//!
//! # Design Decisions
//! - Client-side deterrents only: storage is trivially clearable, so none of
//!   these checks is an enforcement boundary without a server counterpart
//! - Token randomness comes from the OS CSPRNG, never a seeded PRNG
//! - Rate-limit denials never mutate state

pub mod rate_limit;
pub mod sanitize;
pub mod token;

pub use rate_limit::{Admission, RateLimiter};
pub use token::{SessionToken, TokenIssuer};
