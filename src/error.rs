//! Errors raised by agency profiles and the feed fixer.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgencyToolsError {
    /// The colour table has no entry for this route, it needs an update.
    #[error("Unexpected route colour for route short name '{short_name}'")]
    UnconfiguredRoute { short_name: String },
    #[error("Route short name '{short_name}' cannot be converted to a route id")]
    UnsupportedRouteShortName { short_name: String },
}

#[derive(Error, Debug)]
pub enum FeedFixerError {
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not read or write csv file '{file_name}': {source}")]
    Csv {
        file_name: String,
        #[source]
        source: csv::Error,
    },
    #[error("Could not find required file {0}")]
    MissingFile(String),
    #[error("Input and output are the same directory: {}", .0.display())]
    SameInputAndOutput(PathBuf),
    #[error("File {file_name} has no column {column}")]
    MissingColumn { file_name: String, column: String },
    #[error(transparent)]
    Agency(#[from] AgencyToolsError),
}

macro_rules! io_err {
    ($path:expr, $err:expr) => {
        $crate::error::FeedFixerError::Io {
            path: $path.to_path_buf(),
            source: $err,
        }
    };
}

macro_rules! csv_err {
    ($file_name:expr, $err:expr) => {
        $crate::error::FeedFixerError::Csv {
            file_name: $file_name.to_string(),
            source: $err,
        }
    };
}

pub(crate) use csv_err;
pub(crate) use io_err;
