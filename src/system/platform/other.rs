use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn interface_is_up(_name: &str) -> Option<bool> {
        // No portable operstate source; callers fall back to bound addresses.
        None
    }
}
