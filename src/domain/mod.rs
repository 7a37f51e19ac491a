pub mod appliance;
pub mod battery;
pub mod solar;
pub mod weather;

pub use appliance::*;
pub use battery::*;
pub use solar::*;
pub use weather::*;
