use crate::core::Version;

/// Reads the running OS version. `None` when the OS reports something that is
/// not a dotted version number.
pub fn os_version() -> Option<Version> {
    from_os_info(os_info::get().version())
}

fn from_os_info(version: &os_info::Version) -> Option<Version> {
    match version {
        os_info::Version::Semantic(major, minor, patch) => {
            Some(Version::new(*major, *minor, *patch))
        }
        os_info::Version::Custom(s) => Version::parse(s).ok(),
        _ => None,
    }
}

pub fn is_windows_version_or_later(at_least: Version) -> bool {
    if !cfg!(windows) {
        return false;
    }

    let info = os_info::get();
    if info.os_type() != os_info::Type::Windows {
        return false;
    }

    from_os_info(info.version())
        .map(|v| v.is_at_least(&at_least))
        .unwrap_or(false)
}
