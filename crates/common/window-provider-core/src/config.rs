use bon::bon;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::{ProviderError, ProviderResult};

fn validate_display(display: String) -> ProviderResult<String> {
    if display.trim().is_empty() {
        return Err(ProviderError::InvalidConfig {
            reason: "x11 display cannot be empty".into(),
        });
    }
    Ok(display)
}

/// Every provider implementation the receiver knows how to build.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    X11,
}

/// Settings for the X11 provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct X11Config {
    /// Display to connect to, `$DISPLAY` when unset.
    pub display: Option<String>,
}

#[bon]
impl X11Config {
    /// Creates an X11 provider configuration using the builder pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use window_provider_core::X11Config;
    ///
    /// let config = X11Config::builder().build();
    /// assert!(config.display.is_none());
    ///
    /// let config = X11Config::builder()
    ///     .display(":1".to_string())
    ///     .unwrap()
    ///     .build();
    /// assert_eq!(config.display.as_deref(), Some(":1"));
    /// ```
    #[builder]
    pub fn new(
        #[builder(with = |display: String| -> Result<_, ProviderError> {
            validate_display(display)
        })]
        display: Option<String>,
    ) -> Self {
        Self { display }
    }
}

/// The `providers` section of the receiver configuration.
///
/// Each field is one provider kind; a present table enables it. Unknown
/// keys are rejected while deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x11: Option<X11Config>,
}

impl ProvidersConfig {
    /// Enabled provider kinds in registration order.
    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds = Vec::new();
        if self.x11.is_some() {
            kinds.push(ProviderKind::X11);
        }
        kinds
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }

    pub fn validate(&self) -> ProviderResult<()> {
        if let Some(x11) = &self.x11
            && let Some(display) = &x11.display
        {
            validate_display(display.clone())?;
        }
        Ok(())
    }
}
