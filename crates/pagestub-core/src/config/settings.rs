//! Typed settings read from a [`ConfigSource`].
//!
//! Values are accepted as JSON numbers/booleans or as their string spelling, since run
//! configuration frequently arrives from YAML or command-line overrides.

use crate::config::source::ConfigSource;
use crate::error::{Error, Result};
use crate::matching::DomainBlocklist;
use crate::types::context::{BrowserType, ContextOptions, Geolocation, Viewport};
use serde_json::Value;
use std::time::Duration;

pub const WAIT_ELE_TIMEOUT: &str = "wait_ele_timeout";
pub const PAGE_RENDER_TIMEOUT: &str = "page_render_timeout";
pub const REQUEST_INTERCEPTION: &str = "request_interception";
pub const ABORT_DOMAIN_LIST: &str = "abort_domain_list";
pub const DISABLE_CONTEXT_REUSE: &str = "disable_context_reuse";

const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
const DEFAULT_VIDEO_DIR: &str = "videos";
const GEOLOCATION_PERMISSION: &str = "geolocation";

/// Plugin behaviour read from frame configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSettings {
    /// Default timeout for element waits and page actions
    pub element_timeout: Duration,
    /// Default timeout for navigations
    pub navigation_timeout: Duration,
    /// Register the route handler and capture hook on new pages
    pub request_interception: bool,
    /// Hosts whose requests are aborted
    pub blocklist: DomainBlocklist,
    /// Build a new context for every session
    pub disable_context_reuse: bool,
}

impl FrameSettings {
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        Ok(Self {
            element_timeout: seconds(
                WAIT_ELE_TIMEOUT,
                source.frame_value(WAIT_ELE_TIMEOUT),
                DEFAULT_TIMEOUT_SECS,
            )?,
            navigation_timeout: seconds(
                PAGE_RENDER_TIMEOUT,
                source.frame_value(PAGE_RENDER_TIMEOUT),
                DEFAULT_TIMEOUT_SECS,
            )?,
            request_interception: flag(
                REQUEST_INTERCEPTION,
                source.frame_value(REQUEST_INTERCEPTION),
                true,
            )?,
            blocklist: string_list(ABORT_DOMAIN_LIST, source.frame_value(ABORT_DOMAIN_LIST))?
                .into_iter()
                .collect(),
            disable_context_reuse: flag(
                DISABLE_CONTEXT_REUSE,
                source.frame_value(DISABLE_CONTEXT_REUSE),
                false,
            )?,
        })
    }
}

/// Build context options from web-info configuration.
///
/// Video recording and TLS-error ignoring are always enabled. Configuring a geolocation
/// grants the `geolocation` permission.
pub fn context_options(source: &dyn ConfigSource) -> Result<ContextOptions> {
    let web = |key: &str| source.web_info_value(key);

    let mut permissions = string_list("permissions", web("permissions"))?;
    let geolocation = match web("geolocation") {
        None | Some(Value::Null) => None,
        Some(value) => Some(geolocation(&value)?),
    };
    if geolocation.is_some() && !permissions.iter().any(|p| p == GEOLOCATION_PERMISSION) {
        permissions.push(GEOLOCATION_PERMISSION.to_string());
    }

    let viewport = match (
        optional_u32("viewport_width", web("viewport_width"))?,
        optional_u32("viewport_height", web("viewport_height"))?,
    ) {
        (Some(width), Some(height)) => Some(Viewport { width, height }),
        (None, None) => None,
        (Some(width), None) => {
            return Err(Error::invalid(
                "viewport_height",
                "<missing>",
                format!("required with viewport_width {width}"),
            ))
        }
        (None, Some(height)) => {
            return Err(Error::invalid(
                "viewport_width",
                "<missing>",
                format!("required with viewport_height {height}"),
            ))
        }
    };

    let browser_type = match optional_string("web_driver", web("web_driver"))? {
        Some(name) => name
            .parse::<BrowserType>()
            .map_err(|reason| Error::invalid("web_driver", &name, reason))?,
        None => BrowserType::default(),
    };

    Ok(ContextOptions {
        device: optional_string("emulated_device", web("emulated_device"))?,
        user_agent: optional_string("user_agent", web("user_agent"))?,
        locale: optional_string("locale", web("locale"))?,
        timezone_id: optional_string("timezone_id", web("timezone_id"))?,
        permissions,
        geolocation,
        viewport,
        device_scale_factor: optional_number("device_scale_factor", web("device_scale_factor"))?,
        has_touch: match web("has_touch") {
            None | Some(Value::Null) => None,
            value => Some(flag("has_touch", value, false)?),
        },
        browser_type,
        record_video_dir: Some(
            optional_string("record_video_dir", web("record_video_dir"))?
                .unwrap_or_else(|| DEFAULT_VIDEO_DIR.to_string()),
        ),
        ignore_https_errors: true,
    })
}

/// Parse a number of seconds into a duration.
pub(crate) fn seconds(key: &str, value: Option<Value>, default_secs: f64) -> Result<Duration> {
    let secs = match value {
        None | Some(Value::Null) => default_secs,
        Some(value) => number(key, &value)?,
    };
    if !secs.is_finite() || secs < 0.0 {
        return Err(Error::invalid(key, secs, "expected a non-negative number of seconds"));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|_| Error::invalid(key, secs, "number of seconds is too large"))
}

fn number(key: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::invalid(key, value, "number out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::invalid(key, value, "expected a number")),
        _ => Err(Error::invalid(key, value, "expected a number")),
    }
}

fn optional_number(key: &str, value: Option<Value>) -> Result<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => number(key, &value).map(Some),
    }
}

fn optional_u32(key: &str, value: Option<Value>) -> Result<Option<u32>> {
    let Some(n) = optional_number(key, value)? else {
        return Ok(None);
    };
    if n.fract() != 0.0 || n < 1.0 || n > f64::from(u32::MAX) {
        return Err(Error::invalid(key, n, "expected a positive integer"));
    }
    Ok(Some(n as u32))
}

fn flag(key: &str, value: Option<Value>, default: bool) -> Result<bool> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(Error::invalid(key, &s, "expected a boolean")),
        },
        Some(other) => Err(Error::invalid(key, &other, "expected a boolean")),
    }
}

fn optional_string(key: &str, value: Option<Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::invalid(key, &other, "expected a string")),
    }
}

/// List given as an array of strings or a comma-separated string.
fn string_list(key: &str, value: Option<Value>) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(Error::invalid(key, &other, "expected a list of strings")),
            })
            .collect(),
        Some(other) => Err(Error::invalid(key, &other, "expected a list of strings")),
    }
}

/// Geolocation given as `{latitude, longitude, accuracy?}` or `"lat,lng[,accuracy]"`.
fn geolocation(value: &Value) -> Result<Geolocation> {
    let geo = match value {
        Value::Object(_) => serde_json::from_value::<Geolocation>(value.clone())
            .map_err(|e| Error::InvalidGeolocation(e.to_string()))?,
        Value::String(s) => {
            let parts = s
                .split(',')
                .map(|p| p.trim().parse::<f64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| Error::InvalidGeolocation(format!("'{s}' is not numeric")))?;
            match parts.as_slice() {
                [latitude, longitude] => Geolocation {
                    latitude: *latitude,
                    longitude: *longitude,
                    accuracy: None,
                },
                [latitude, longitude, accuracy] => Geolocation {
                    latitude: *latitude,
                    longitude: *longitude,
                    accuracy: Some(*accuracy),
                },
                _ => {
                    return Err(Error::InvalidGeolocation(format!(
                        "'{s}' must be 'latitude,longitude[,accuracy]'"
                    )))
                }
            }
        }
        other => return Err(Error::InvalidGeolocation(other.to_string())),
    };

    if !geo.is_valid() {
        return Err(Error::InvalidGeolocation(format!(
            "latitude {} / longitude {} out of range",
            geo.latitude, geo.longitude
        )));
    }
    Ok(geo)
}
