use std::borrow::Cow;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arc_swap::{ArcSwap, Guard};
use notify::{watcher, DebouncedEvent, RecursiveMode, Watcher};
use once_cell::sync::OnceCell;

use common::*;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parsing(#[from] ron::de::Error),

    #[error("Failed to watch config file: {0}")]
    Notify(#[from] notify::Error),

    #[error("Config has already been initialized")]
    AlreadyInitialized,

    #[error("Config path {0:?} is not a file")]
    NotAFile(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub enum ConfigType<'a> {
    String(&'a str),
    File(&'a Path),
    /// Reloaded whenever the file changes
    WatchedFile(&'a Path),
}

static CONFIG: OnceCell<ArcSwap<Config>> = OnceCell::new();

/// Must be called once only, and before [get]
pub fn init(cfg: ConfigType) -> ConfigResult<()> {
    // parse config and fail early
    let config = cfg.load()?;

    CONFIG
        .set(ArcSwap::from_pointee(config))
        .map_err(|_| ConfigError::AlreadyInitialized)?;

    if let ConfigType::WatchedFile(path) = cfg {
        watch(path.to_owned())?;
    }

    Ok(())
}

/// Panics if [init] has not been called
pub fn get() -> impl Deref<Target = Config> {
    let cfg = CONFIG.get().expect("config has not been initialized");
    Guard::into_inner(cfg.load())
}

fn watch(path: PathBuf) -> ConfigResult<()> {
    let watch_dir = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new(".").to_owned(),
        Some(p) => p.to_owned(),
        None => return Err(ConfigError::NotAFile(path)),
    };
    let watch_file = path
        .file_name()
        .map(|s| s.to_owned())
        .ok_or_else(|| ConfigError::NotAFile(path.clone()))?;

    let (tx, rx) = channel();
    let mut watcher = watcher(tx, Duration::from_secs(1))?;
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

    info!("watching config for changes"; "path" => %path.display());
    thread::Builder::new()
        .name("cfg-watcher".to_owned())
        .spawn(move || {
            let _watcher = watcher; // keep alive
            let is_config = |p: &PathBuf| p.file_name().map(|f| f == watch_file).unwrap_or(false);

            loop {
                let reload = match rx.recv() {
                    Ok(DebouncedEvent::Write(ref p)) | Ok(DebouncedEvent::Create(ref p))
                        if is_config(p) =>
                    {
                        true
                    }
                    Ok(DebouncedEvent::Rename(ref a, ref b)) if is_config(a) || is_config(b) => {
                        warn!("config was renamed");
                        true
                    }
                    Ok(_) => false,
                    Err(_) => {
                        debug!("config watcher channel closed");
                        break;
                    }
                };

                if reload {
                    if let Err(e) = reload_from(&path) {
                        warn!("failed to reload config, keeping the old one"; "error" => %e);
                    }
                }
            }
        })
        .map_err(ConfigError::Io)?;

    Ok(())
}

/// Replaces the current config with the contents of `path`. The current config is kept if
/// the file fails to load
pub fn reload_from(path: &Path) -> ConfigResult<()> {
    let config = ConfigType::File(path).load()?;
    if let Some(cfg) = CONFIG.get() {
        cfg.store(Arc::new(config));
        info!("reloaded config"; "path" => %path.display());
    }

    Ok(())
}

impl<'a> ConfigType<'a> {
    pub fn load(&self) -> ConfigResult<Config> {
        let contents = match self {
            ConfigType::String(s) => Cow::Borrowed(*s),
            ConfigType::File(path) | ConfigType::WatchedFile(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotAFile(path.to_path_buf()));
                }
                Cow::Owned(std::fs::read_to_string(path)?)
            }
        };

        Ok(ron::de::from_str(&contents)?)
    }
}
