#[cfg(feature = "machine-linux")]
#[path = "platform_linux.rs"]
mod platform_impl;

#[cfg(feature = "machine-host")]
#[path = "platform_dummy.rs"]
mod platform_impl;

#[cfg(feature = "machine-linux")]
pub mod linux;

#[cfg(feature = "machine-linux")]
pub mod linux_si4713;

pub use platform_impl::*;
