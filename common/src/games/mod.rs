mod broadcaster;
mod session_rng;

pub mod match3;

pub use broadcaster::GameBroadcaster;
pub use session_rng::SessionRng;
