//! Settings definitions
//! Declarative registry of all :set command options

use crate::options::Options;

use super::descriptor::{SettingDescriptor, SettingError, SettingKind, SettingValue};
use super::registry::SettingsRegistry;

// Setter/getter pairs for each option

fn expect_bool(value: SettingValue) -> Result<bool, SettingError> {
    match value {
        SettingValue::Bool(b) => Ok(b),
        _ => Err(SettingError::ValidationError("Expected boolean".to_string())),
    }
}

fn expect_integer(value: SettingValue) -> Result<usize, SettingError> {
    match value {
        SettingValue::Integer(n) => Ok(n),
        _ => Err(SettingError::ValidationError("Expected integer".to_string())),
    }
}

fn set_number(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.number = expect_bool(value)?;
    Ok(())
}

fn get_number(options: &Options) -> SettingValue {
    SettingValue::Bool(options.number)
}

fn set_relativenumber(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.relativenumber = expect_bool(value)?;
    Ok(())
}

fn get_relativenumber(options: &Options) -> SettingValue {
    SettingValue::Bool(options.relativenumber)
}

fn set_tabstop(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.tabstop = expect_integer(value)?;
    Ok(())
}

fn get_tabstop(options: &Options) -> SettingValue {
    SettingValue::Integer(options.tabstop)
}

fn set_shiftwidth(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.shiftwidth = expect_integer(value)?;
    Ok(())
}

fn get_shiftwidth(options: &Options) -> SettingValue {
    SettingValue::Integer(options.shiftwidth)
}

fn set_expandtab(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.expandtab = expect_bool(value)?;
    Ok(())
}

fn get_expandtab(options: &Options) -> SettingValue {
    SettingValue::Bool(options.expandtab)
}

fn set_ignorecase(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.ignorecase = expect_bool(value)?;
    Ok(())
}

fn get_ignorecase(options: &Options) -> SettingValue {
    SettingValue::Bool(options.ignorecase)
}

fn set_scrolloff(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.scrolloff = expect_integer(value)?;
    Ok(())
}

fn get_scrolloff(options: &Options) -> SettingValue {
    SettingValue::Integer(options.scrolloff)
}

fn set_sidescrolloff(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.sidescrolloff = expect_integer(value)?;
    Ok(())
}

fn get_sidescrolloff(options: &Options) -> SettingValue {
    SettingValue::Integer(options.sidescrolloff)
}

fn set_timeoutlen(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.timeoutlen = expect_integer(value)?;
    Ok(())
}

fn get_timeoutlen(options: &Options) -> SettingValue {
    SettingValue::Integer(options.timeoutlen)
}

fn set_hlsearch(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.hlsearch = expect_bool(value)?;
    Ok(())
}

fn get_hlsearch(options: &Options) -> SettingValue {
    SettingValue::Bool(options.hlsearch)
}

fn set_wrapscan(options: &mut Options, value: SettingValue) -> Result<(), SettingError> {
    options.wrapscan = expect_bool(value)?;
    Ok(())
}

fn get_wrapscan(options: &Options) -> SettingValue {
    SettingValue::Bool(options.wrapscan)
}

/// Static registry of all settings
pub const SETTINGS: &[SettingDescriptor] = &[
    SettingDescriptor {
        name: "number",
        aliases: &["nu"],
        kind: SettingKind::Boolean,
        set: set_number,
        get: get_number,
    },
    SettingDescriptor {
        name: "relativenumber",
        aliases: &["rnu"],
        kind: SettingKind::Boolean,
        set: set_relativenumber,
        get: get_relativenumber,
    },
    SettingDescriptor {
        name: "tabstop",
        aliases: &["ts"],
        kind: SettingKind::Integer {
            min: Some(1),
            max: Some(64),
        },
        set: set_tabstop,
        get: get_tabstop,
    },
    SettingDescriptor {
        name: "shiftwidth",
        aliases: &["sw"],
        kind: SettingKind::Integer {
            min: Some(1),
            max: Some(64),
        },
        set: set_shiftwidth,
        get: get_shiftwidth,
    },
    SettingDescriptor {
        name: "expandtab",
        aliases: &["et"],
        kind: SettingKind::Boolean,
        set: set_expandtab,
        get: get_expandtab,
    },
    SettingDescriptor {
        name: "ignorecase",
        aliases: &["ic"],
        kind: SettingKind::Boolean,
        set: set_ignorecase,
        get: get_ignorecase,
    },
    SettingDescriptor {
        name: "scrolloff",
        aliases: &["so"],
        kind: SettingKind::Integer {
            min: None,
            max: None,
        },
        set: set_scrolloff,
        get: get_scrolloff,
    },
    SettingDescriptor {
        name: "sidescrolloff",
        aliases: &["siso"],
        kind: SettingKind::Integer {
            min: None,
            max: None,
        },
        set: set_sidescrolloff,
        get: get_sidescrolloff,
    },
    SettingDescriptor {
        name: "timeoutlen",
        aliases: &["tm"],
        kind: SettingKind::Integer {
            min: None,
            max: Some(60_000),
        },
        set: set_timeoutlen,
        get: get_timeoutlen,
    },
    SettingDescriptor {
        name: "hlsearch",
        aliases: &["hls"],
        kind: SettingKind::Boolean,
        set: set_hlsearch,
        get: get_hlsearch,
    },
    SettingDescriptor {
        name: "wrapscan",
        aliases: &["ws"],
        kind: SettingKind::Boolean,
        set: set_wrapscan,
        get: get_wrapscan,
    },
];

/// Create the settings registry
#[must_use]
pub fn create_settings_registry() -> SettingsRegistry {
    SettingsRegistry::new(SETTINGS)
}
