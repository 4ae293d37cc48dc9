pub mod core {
    pub mod config;
    pub mod error;
    pub mod tracing_init;
}

pub mod models {
    pub mod protocol;
    pub mod session;
    pub mod user;
}

pub mod stores {
    pub mod directory;
    pub mod snapshot;
    pub mod storage;
}

pub mod validation {
    pub mod user;
}

pub mod utils {
    pub mod time;
}

pub mod gateway;

pub use crate::core::config::Config;
pub use crate::core::error::{GatewayError, GatewayResult};
pub use crate::gateway::mock::{ConfiguredGateway, GatewayOptions, MockGateway};
pub use crate::gateway::Gateway;
