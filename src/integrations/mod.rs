//! External service integrations.

pub mod places_client {
    pub use crate::places_client::*;
}

pub mod places_models {
    pub use crate::places_models::*;
}
