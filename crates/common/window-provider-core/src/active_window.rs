/// The window holding focus at the time a provider was queried.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveWindow {
    /// Opaque identity of the window within the local session.
    pub id: String,
    /// Raw title as reported by the window system. May be empty.
    pub title: String,
}

impl ActiveWindow {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}
