// AWS shared config reader (~/.aws/config)
use crate::error::{ConsoleError, Result};
use crate::models::{Profile, ResolvedProfile};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const AWS_CONFIG_FILE: &str = "AWS_CONFIG_FILE";

/// Profile name that is never offered on the command line
pub const DEFAULT_PROFILE: &str = "default";

/// Get the AWS config file path, honoring `AWS_CONFIG_FILE`
pub fn config_file_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(AWS_CONFIG_FILE) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    if let Some(home) = dirs::home_dir() {
        Ok(home.join(".aws").join("config"))
    } else {
        Err(ConsoleError::ConfigError(
            "Could not determine home directory".to_string(),
        ))
    }
}

/// Named profiles loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    /// Load profiles from a specific file; a missing file yields an empty store
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ConsoleError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut profiles: BTreeMap<String, Profile> = BTreeMap::new();
        let mut current: Option<String> = None;
        let mut in_nested_block = false;

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Indented lines belong to a nested sub-section such as `s3 =`
            if in_nested_block && line.starts_with(char::is_whitespace) {
                continue;
            }
            in_nested_block = false;

            // Anything after the closing bracket, such as a trailing comment, is ignored
            if let Some(section) = section_header(trimmed) {
                current = profile_name_from_section(section);
                if let Some(name) = &current {
                    profiles.entry(name.clone()).or_insert_with(|| Profile {
                        name: name.clone(),
                        ..Profile::default()
                    });
                }
                continue;
            }

            let Some(name) = &current else {
                continue;
            };

            let Some(delim) = trimmed.find(|c: char| c == '=' || c == ':') else {
                continue;
            };
            let key = trimmed[..delim].trim();
            let value = trimmed[delim + 1..].trim();

            if value.is_empty() {
                in_nested_block = true;
                continue;
            }

            if let Some(profile) = profiles.get_mut(name) {
                let value = Some(value.to_string());
                match key {
                    "role_arn" => profile.role_arn = value,
                    "mfa_serial" => profile.mfa_serial = value,
                    "source_profile" => profile.source_profile = value,
                    "region" => profile.region = value,
                    _ => {}
                }
            }
        }

        Self { profiles }
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Profile names offered on the command line, sorted, without `default`
    pub fn selectable_names(&self) -> Vec<String> {
        self.profiles
            .keys()
            .filter(|name| name.as_str() != DEFAULT_PROFILE)
            .cloned()
            .collect()
    }

    /// Look up a selectable profile and require a role ARN on it
    pub fn resolve(&self, name: &str) -> Result<ResolvedProfile> {
        let profile = self
            .get(name)
            .filter(|p| p.name != DEFAULT_PROFILE)
            .ok_or_else(|| ConsoleError::ConfigError(format!("Profile '{}' not found", name)))?;

        let role_arn = profile.role_arn.clone().ok_or_else(|| {
            ConsoleError::ConfigError(format!("Profile '{}' has no role_arn configured", name))
        })?;

        Ok(ResolvedProfile {
            name: profile.name.clone(),
            role_arn,
            mfa_serial: profile.mfa_serial.clone(),
            source_profile: profile.source_profile.clone(),
            region: profile.region.clone(),
        })
    }
}

/// Section name of a `[...]` header line, up to the last closing bracket
fn section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let close = rest.rfind(']')?;
    let section = rest[..close].trim();
    if section.is_empty() {
        None
    } else {
        Some(section)
    }
}

/// `[default]` and `[profile NAME]` are profiles; other section kinds are not
fn profile_name_from_section(section: &str) -> Option<String> {
    if section == DEFAULT_PROFILE {
        return Some(DEFAULT_PROFILE.to_string());
    }

    let rest = section.strip_prefix("profile")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let name = rest.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
