mod x11_provider;

pub mod utils;

pub use x11_provider::X11Provider;
