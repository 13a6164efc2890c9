use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use x11rb::{
    connection::Connection,
    protocol::xproto::{AtomEnum, ConnectionExt},
    rust_connection::RustConnection,
};

use super::utils::{format_window_id, qualify_x11_error};
use crate::{ActiveWindow, ActiveWindowProvider, ProviderError, ProviderResult, X11Config};

const MAX_STRING_PROPERTY_LEN: u32 = 4096;

struct X11Atoms {
    net_active_window: u32,
    net_wm_name: u32,
    utf8_string: u32,
}

struct X11Session {
    conn: RustConnection,
    root: u32,
    atoms: X11Atoms,
}

impl std::fmt::Debug for X11Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("X11Session")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Reads `_NET_ACTIVE_WINDOW` from the root window of an X11 display.
///
/// The connection and the interned atoms are set up once when the provider is
/// created and shared by every query.
#[derive(Debug, Clone)]
pub struct X11Provider {
    session: Arc<X11Session>,
}

impl X11Provider {
    /// Connects to the configured display.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NoDisplay`] when no X server is reachable, or
    /// [`ProviderError::Unsupported`] when that happens inside a Wayland session.
    pub fn new(config: &X11Config) -> ProviderResult<Self> {
        let (conn, screen_num) =
            connect_to_x11(config.display.as_deref()).map_err(qualify_x11_error)?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| ProviderError::platform(format!("no screen {screen_num} on display")))?;
        let atoms = setup_atoms(&conn)?;

        tracing::debug!("Connected to X11 display, root window {root:#x}");

        Ok(Self {
            session: Arc::new(X11Session { conn, root, atoms }),
        })
    }
}

#[async_trait]
impl ActiveWindowProvider for X11Provider {
    async fn active_window(&self, cancel: &CancellationToken) -> ProviderResult<ActiveWindow> {
        let session = Arc::clone(&self.session);
        let query = tokio::task::spawn_blocking(move || session.active_window());

        tokio::select! {
            _ = cancel.cancelled() => Err(ProviderError::Cancelled),
            joined = query => joined.map_err(|e| {
                ProviderError::platform_with_source("x11 query task failed", e)
            })?,
        }
    }
}

impl X11Session {
    fn active_window(&self) -> ProviderResult<ActiveWindow> {
        let window = get_active_window(&self.conn, self.root, self.atoms.net_active_window)?
            .ok_or(ProviderError::NoActiveWindow)?;
        let title = get_window_name(&self.conn, window, &self.atoms)?;

        Ok(ActiveWindow {
            id: format_window_id(window),
            title,
        })
    }
}

fn connect_to_x11(display: Option<&str>) -> ProviderResult<(RustConnection, usize)> {
    RustConnection::connect(display).map_err(|e| {
        let error_str = e.to_string();
        if error_str.contains("DISPLAY")
            || error_str.contains("display")
            || error_str.contains("No such file or directory")
        {
            ProviderError::NoDisplay
        } else {
            ProviderError::platform_with_source("failed to connect to X11", e)
        }
    })
}

fn setup_atoms<C: Connection>(conn: &C) -> ProviderResult<X11Atoms> {
    Ok(X11Atoms {
        net_active_window: get_atom(conn, b"_NET_ACTIVE_WINDOW")?,
        net_wm_name: get_atom(conn, b"_NET_WM_NAME")?,
        utf8_string: get_atom(conn, b"UTF8_STRING")?,
    })
}

fn get_atom<C: Connection>(conn: &C, name: &[u8]) -> ProviderResult<u32> {
    let cookie = conn
        .intern_atom(false, name)
        .map_err(|e| ProviderError::platform_with_source("failed to intern atom", e))?;

    let reply = cookie
        .reply()
        .map_err(|e| ProviderError::platform_with_source("failed to get atom reply", e))?;

    Ok(reply.atom)
}

fn get_active_window<C: Connection>(
    conn: &C,
    root: u32,
    net_active_window: u32,
) -> ProviderResult<Option<u32>> {
    let cookie = conn
        .get_property(false, root, net_active_window, AtomEnum::WINDOW, 0, 1)
        .map_err(|e| {
            ProviderError::platform_with_source("failed to get active window property", e)
        })?;

    let reply = cookie.reply().map_err(|e| {
        ProviderError::platform_with_source("failed to get active window reply", e)
    })?;

    Ok(reply
        .value32()
        .and_then(|mut v| v.next())
        .filter(|&id| id != 0))
}

/// `_NET_WM_NAME` first, then the legacy `WM_NAME`. A window without either
/// has an empty title.
fn get_window_name<C: Connection>(
    conn: &C,
    window: u32,
    atoms: &X11Atoms,
) -> ProviderResult<String> {
    for (property, property_type) in title_properties(atoms) {
        if let Some(title) = try_get_property_string(conn, window, property, property_type)? {
            return Ok(title);
        }
    }

    Ok(String::new())
}

/// Property and type pairs tried in order. `WM_NAME` may be `STRING` or
/// `COMPOUND_TEXT`, so it is requested with any type.
fn title_properties(atoms: &X11Atoms) -> [(u32, u32); 2] {
    [
        (atoms.net_wm_name, atoms.utf8_string),
        (AtomEnum::WM_NAME.into(), AtomEnum::ANY.into()),
    ]
}

fn try_get_property_string<C: Connection>(
    conn: &C,
    window: u32,
    property: u32,
    property_type: u32,
) -> ProviderResult<Option<String>> {
    let cookie = conn
        .get_property(
            false,
            window,
            property,
            property_type,
            0,
            MAX_STRING_PROPERTY_LEN,
        )
        .map_err(|e| ProviderError::platform_with_source("failed to get window property", e))?;

    let reply = cookie.reply().map_err(|e| {
        ProviderError::platform_with_source("failed to get window property reply", e)
    })?;

    Ok(property_text(reply.value_len, &reply.value))
}

fn property_text(value_len: u32, value: &[u8]) -> Option<String> {
    (value_len > 0).then(|| String::from_utf8_lossy(value).into_owned())
}
