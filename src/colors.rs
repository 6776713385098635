use crate::errors::{AppError, DashboardError};
use crate::storage::Store;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    Green,
    Red,
}

impl ColorKey {
    pub const ALL: [ColorKey; 2] = [ColorKey::Green, ColorKey::Red];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorKey::Green => "green",
            ColorKey::Red => "red",
        }
    }

    pub fn default_hue(self) -> f64 {
        match self {
            ColorKey::Green => 136.0,
            ColorKey::Red => 0.0,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSetting {
    pub key: ColorKey,
    pub hue: f64,
    pub css: String,
}

pub fn hsl_string(hue: f64) -> String {
    format!("hsl({hue}, 100%, 65%)")
}

pub fn parse_hue(css: &str) -> Option<f64> {
    let inner = css.trim().strip_prefix("hsl(")?;
    inner.split(',').next()?.trim().parse().ok()
}

pub async fn resolve(store: &Store) -> Vec<ColorSetting> {
    let mut settings = Vec::with_capacity(ColorKey::ALL.len());
    for key in ColorKey::ALL {
        let setting = match store.get(key.as_str()).await {
            Some(css) => ColorSetting {
                key,
                hue: parse_hue(&css).unwrap_or_else(|| key.default_hue()),
                css,
            },
            None => ColorSetting {
                key,
                hue: key.default_hue(),
                css: hsl_string(key.default_hue()),
            },
        };
        settings.push(setting);
    }
    settings
}

pub async fn persist(store: &Store, key: ColorKey, hue: f64) -> Result<ColorSetting, DashboardError> {
    let css = hsl_string(hue);
    store.set(key.as_str(), css.clone()).await?;
    Ok(ColorSetting { key, hue, css })
}

pub fn validate_request(key: &str, hue: f64) -> Result<(ColorKey, f64), AppError> {
    let key = ColorKey::parse(key.trim())
        .ok_or_else(|| AppError::bad_request("key must be 'green' or 'red'"))?;
    if !hue.is_finite() || !(0.0..=360.0).contains(&hue) {
        return Err(AppError::bad_request("hue must be between 0 and 360"));
    }
    Ok((key, hue))
}
