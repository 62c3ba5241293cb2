//! `ConfigFile` locates and loads the configuration file of `geotrail` tools.
//!
//! It does not know the layout of the file itself: any `T` implementing `IntoConfig` can be
//! read, the only common field being `version`.  The result is available through `.inner()`
//! or consumed with `.into_inner()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::makepath;

/// Config filename
const CONFIG: &str = "config.hcl";

/// Directory name under the base one
const TAG: &str = "geotrail";

/// Every configuration struct carries a version number checked at load time.
///
pub trait IntoConfig {
    /// Version of the file we understand
    const VERSION: usize;

    /// Version found in the file
    fn version(&self) -> usize;
}

/// `$HOME/.config` on Unix, `%LOCALAPPDATA%` on Windows.  `BaseDirs` first, then the
/// environment.
///
fn base_dir() -> Result<PathBuf> {
    if let Some(dirs) = BaseDirs::new() {
        #[cfg(unix)]
        return Ok(dirs.home_dir().join(".config"));

        #[cfg(windows)]
        return Ok(dirs.data_local_dir().to_path_buf());
    }

    #[cfg(unix)]
    let var = "HOME";
    #[cfg(windows)]
    let var = "LOCALAPPDATA";

    let home = std::env::var(var)
        .map_err(|_| eyre!("{var} is not set, no place for the config file"))?;
    trace!("{var} = {home}");

    #[cfg(unix)]
    return Ok(makepath!(home, ".config"));

    #[cfg(windows)]
    return Ok(PathBuf::from(home));
}

/// Configuration for the CLI tool.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned + IntoConfig> {
    /// Project name, also the directory name
    tag: String,
    /// Where the default config file lives
    basedir: PathBuf,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + IntoConfig,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Result<Self> {
        let basedir = makepath!(base_dir()?, tag);
        debug!("basedir = {basedir:?}");

        Ok(ConfigFile {
            tag: String::from(tag),
            basedir,
            inner: T::default(),
        })
    }

    /// Returns the project tag
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// `config.hcl` inside `<base>/<tag>`
    ///
    pub fn default_file(&self) -> PathBuf {
        self.basedir.join(CONFIG)
    }

    /// Read the configuration into a `T`, looking at:
    /// - the given file, which must exist
    /// - or the default file in the base directory (based on $HOME or $LOCALAPPDATA)
    ///
    /// If no file is given and there is no default one, `T::default()` is used.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new(TAG)?;

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(eyre!("Unknown config file {:?}", fname));
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file();
                if !def.exists() {
                    debug!("No {def:?}, using defaults");
                    return Ok(cfg);
                }
                def
            }
        };

        cfg.inner = Self::read_file(&fname)?;
        Ok(cfg)
    }

    /// Read and check the version of the given file
    ///
    fn read_file(fname: &Path) -> Result<T> {
        trace!("Loading config file {fname:?}");

        let data = fs::read_to_string(fname)?;
        let data: T = hcl::from_str(&data)?;
        debug!("config = {data:?}");

        if data.version() != T::VERSION {
            return Err(eyre!(
                "Bad config file version v{}, need v{}",
                data.version(),
                T::VERSION
            ));
        }
        Ok(data)
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Foo {
        version: usize,
        name: String,
    }

    impl Default for Foo {
        fn default() -> Self {
            Foo {
                version: 1,
                name: String::from("none"),
            }
        }
    }

    impl IntoConfig for Foo {
        const VERSION: usize = 1;

        fn version(&self) -> usize {
            self.version
        }
    }

    #[test]
    fn test_config_load_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let fname = dir.path().join("local.hcl");
        fs::write(&fname, "version = 1\nname = \"foo\"\n")?;

        let cfg = ConfigFile::<Foo>::load(Some(&fname))?;
        assert_eq!(1, cfg.inner().version());
        assert_eq!("foo", cfg.inner().name);
        assert_eq!(TAG, cfg.tag());
        Ok(())
    }

    #[test]
    fn test_config_bad_version() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let fname = dir.path().join("local.hcl");
        fs::write(&fname, "version = 2\nname = \"foo\"\n")?;

        let cfg = ConfigFile::<Foo>::load(Some(&fname));
        assert!(cfg.is_err());
        Ok(())
    }

    #[test]
    fn test_config_missing_file() {
        let cfg = ConfigFile::<Foo>::load(Some(Path::new("/nonexistent/geotrail.hcl")));
        assert!(cfg.is_err());
    }

    #[test]
    fn test_config_default_path() -> Result<()> {
        let cfg = ConfigFile::<Foo>::new(TAG)?;
        assert!(cfg.default_file().ends_with("geotrail/config.hcl"));
        Ok(())
    }
}
