pub trait PlatformExtensions {
    /// `Some(true)` when the interface is operationally up, `None` when the
    /// platform cannot tell.
    fn interface_is_up(name: &str) -> Option<bool>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod other;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use other as platform_impl;

pub fn interface_is_up(name: &str) -> Option<bool> {
    platform_impl::Platform::interface_is_up(name)
}
