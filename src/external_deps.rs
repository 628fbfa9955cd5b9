pub use chrono::{NaiveDate, NaiveDateTime};
pub use clap::Parser;
pub use deadpool_tiberius::{Manager, Pool};
pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
    Record,
};
pub use once_cell::sync::Lazy as once_lazy;
pub use thiserror::Error;
pub use tiberius::{AuthMethod, ColumnData, FromSql};
