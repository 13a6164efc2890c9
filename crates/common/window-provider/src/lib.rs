pub use window_provider_core::*;

mod provider;
mod x11;

pub use provider::{ActiveWindowProvider, WindowProvider};
pub use x11::X11Provider;

// For platform specific util API's
pub use x11::utils;
