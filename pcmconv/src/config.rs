use std::env;
use std::fs;
use std::io;
use std::path::Path;

use derive_more::{Display, FromStr};
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    convert: Convert,
}

#[derive(Deserialize, Default)]
pub struct Convert {
    from: Option<String>,
    to: Option<String>,
    via: Option<Via>,
    chunk_samples: Option<usize>,
}

/// Value type samples pass through between the input and output formats
#[derive(Deserialize, Display, FromStr, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Via {
    #[display("f64")]
    F64,
    #[display("i64")]
    I64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {err}")]
    Read { path: String, err: io::Error },
    #[error("parsing {path}: {err}")]
    Parse { path: String, err: toml::de::Error },
}

/// Exports each configured `[convert]` key as the env var its command line
/// option falls back to. Variables already set are overwritten.
pub fn load_into_env(config: &Config) {
    let convert = &config.convert;

    let vars = [
        ("PCMCONV_FROM", convert.from.clone()),
        ("PCMCONV_TO", convert.to.clone()),
        ("PCMCONV_VIA", convert.via.map(|via| via.to_string())),
        ("PCMCONV_CHUNK_SAMPLES", convert.chunk_samples.map(|n| n.to_string())),
    ];

    for (name, value) in vars {
        if let Some(value) = value {
            log::debug!("config sets {name}={value}");
            env::set_var(name, value);
        }
    }
}

/// `Ok(None)` if there is no file at `path`.
fn load_file(path: &Path) -> Result<Option<Config>, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Read { path: path.display().to_string(), err }),
    };

    let config = toml::from_str(&contents)
        .map_err(|err| ConfigError::Parse { path: path.display().to_string(), err })?;

    log::info!("reading config from {}", path.display());
    Ok(Some(config))
}

/// Looks for `pcmconv.toml` in the working directory, then in the xdg
/// config dirs.
pub fn read() -> Result<Option<Config>, ConfigError> {
    if let Some(config) = load_file(Path::new("pcmconv.toml"))? {
        return Ok(Some(config));
    }

    let dirs = match xdg::BaseDirectories::with_prefix("pcmconv") {
        Ok(dirs) => dirs,
        Err(e) => {
            log::warn!("can't locate xdg config dirs: {e}");
            return Ok(None);
        }
    };

    match dirs.find_config_file("pcmconv.toml") {
        Some(path) => load_file(&path),
        None => Ok(None),
    }
}
