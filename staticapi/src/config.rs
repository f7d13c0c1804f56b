//! `staticapi.toml` handling
//!
//! Every key is optional. Values given on the command line override the file.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use staticapi_codegen::{RenderOptions, Target, UnknownTarget};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "staticapi.toml";

pub const DEFAULT_OUT_DIR: &str = "generated";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    #[diagnostic(code(staticapi::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}")]
    #[diagnostic(
        code(staticapi::config::parse),
        help("See the [generate], [kotlin] and [rust] tables for the accepted keys")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    #[diagnostic(
        code(staticapi::config::toml),
        help("See the [generate], [kotlin] and [rust] tables for the accepted keys")
    )]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidTarget(#[from] UnknownTarget),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub generate: GenerateConfig,
    pub kotlin: KotlinConfig,
    pub rust: RustConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub target: Option<String>,
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KotlinConfig {
    pub internal_annotation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RustConfig {
    pub runtime_crate: Option<String>,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub target: Target,
    pub out_dir: PathBuf,
    pub render: RenderOptions,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The explicit file if given, else `staticapi.toml` when present, else
    /// defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!(path = %default.display(), "using config file");
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Merge with command-line values, which take precedence
    pub fn resolve(
        &self,
        target: Option<Target>,
        out_dir: Option<PathBuf>,
    ) -> Result<Settings, ConfigError> {
        let target = match (target, &self.generate.target) {
            (Some(target), _) => target,
            (None, Some(name)) => name.parse::<Target>()?,
            (None, None) => Target::default(),
        };

        let out_dir = out_dir
            .or_else(|| self.generate.out_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

        let mut render = RenderOptions::default();
        if let Some(annotation) = &self.kotlin.internal_annotation {
            render.internal_annotation = annotation.clone();
        }
        if let Some(runtime_crate) = &self.rust.runtime_crate {
            render.runtime_crate = runtime_crate.clone();
        }

        Ok(Settings {
            target,
            out_dir,
            render,
        })
    }
}
