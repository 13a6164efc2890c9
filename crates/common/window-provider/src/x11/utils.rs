use std::env::var_os;

use crate::ProviderError;

/// Checks if Wayland based on two common variables:
/// - `XDG_SESSION_TYPE`, set by the display manager, compared case-insensitively
/// - `WAYLAND_DISPLAY`, set by the compositor when a Wayland socket is available
pub fn wayland_detect() -> bool {
    let is_wayland_session = var_os("XDG_SESSION_TYPE")
        .map(|v| v.to_string_lossy().eq_ignore_ascii_case("wayland"))
        .unwrap_or(false);

    let has_wayland_display = var_os("WAYLAND_DISPLAY")
        .map(|v| !v.is_empty())
        .unwrap_or(false);

    is_wayland_session || has_wayland_display
}

/// A missing X display inside a Wayland session means X11 is not the
/// session's window system at all.
pub fn qualify_x11_error(err: ProviderError) -> ProviderError {
    if matches!(err, ProviderError::NoDisplay) && wayland_detect() {
        ProviderError::Unsupported
    } else {
        err
    }
}

/// Renders an X window id the way it is reported as a window identity.
pub fn format_window_id(window: u32) -> String {
    format!("{window:X}")
}
