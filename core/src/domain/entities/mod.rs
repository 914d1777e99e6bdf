//! Domain entities representing core business objects.

pub mod token;


// Re-export commonly used types
pub use token::{
    Claims, Header, Payload, ALGORITHM_RS256, MAX_LIFETIME, RESERVED_CLAIMS, TOKEN_TYPE,
};
