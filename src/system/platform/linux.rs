use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn interface_is_up(name: &str) -> Option<bool> {
        // Interface names never contain '/', but the name ends up in a path.
        if name.is_empty() || name.contains('/') {
            return None;
        }
        let path = format!("/sys/class/net/{name}/operstate");
        let contents = std::fs::read_to_string(path).ok()?;
        parse_operstate(&contents)
    }
}

// RFC 2863 states as exposed by the kernel. Loopback reports "unknown".
fn parse_operstate(contents: &str) -> Option<bool> {
    match contents.trim() {
        "up" => Some(true),
        "down" | "lowerlayerdown" | "notpresent" | "dormant" => Some(false),
        _ => None,
    }
}
