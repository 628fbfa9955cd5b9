pub use std::{
    cmp::Ordering,
    env, fmt,
    path::{Path, PathBuf},
    process::ExitCode,
    str::FromStr,
};

pub use anyhow::anyhow;
pub use anyhow::Context;
pub use async_trait::async_trait;
pub use derive_new::new;
pub use dotenv::dotenv;
pub use getset::{CopyGetters, Getters};
pub use log::{error, info, warn};
pub use serde::{de::DeserializeOwned, Deserialize};
