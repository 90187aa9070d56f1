// Domain-layer modules and shared errors/models
pub mod collector {
    pub use crate::collector::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod qualification {
    pub use crate::qualification::*;
}

pub mod errors {
    pub use crate::errors::*;
}
