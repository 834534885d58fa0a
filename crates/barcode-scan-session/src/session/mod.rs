mod controller;
mod error;
mod state;

pub use controller::ScanSession;
pub use error::SessionError;
pub use state::SessionState;
