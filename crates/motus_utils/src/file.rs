//! File downloads and temp-file copies
//!
//! [`download_file`] runs on a background thread and hands its result back
//! through a single-shot channel. The owner polls it from its own loop (for
//! example from a task posted to the animation scheduler) or blocks on it.

use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use regex::Regex;
use uuid::Uuid;

use crate::error::FileError;

/// A download running on a background thread
#[derive(Debug)]
pub struct Download {
    url: String,
    receiver: Receiver<Result<PathBuf, FileError>>,
    delivered: bool,
}

impl Download {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The outcome if the download has ended, without blocking.
    ///
    /// Yields `Some` exactly once; every later call returns `None`.
    pub fn poll(&mut self) -> Option<Result<PathBuf, FileError>> {
        if self.delivered {
            return None;
        }
        let outcome = match self.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(FileError::WorkerLost),
        };
        self.delivered = true;
        Some(outcome)
    }

    /// Block until the download ends
    pub fn wait(self) -> Result<PathBuf, FileError> {
        if self.delivered {
            return Err(FileError::WorkerLost);
        }
        self.receiver.recv().unwrap_or(Err(FileError::WorkerLost))
    }
}

/// Download `url` into `output_folder` on a background thread.
///
/// The file keeps the quoted name from the `Content-Disposition` header
/// when there is one, and gets a random UUID name otherwise.
pub fn download_file(url: impl Into<String>, output_folder: impl Into<PathBuf>) -> Download {
    let url = url.into();
    let output_folder = output_folder.into();
    let (sender, receiver) = mpsc::channel();

    let worker_url = url.clone();
    let spawned = thread::Builder::new()
        .name("motus-download".to_string())
        .spawn(move || {
            let outcome = fetch(&worker_url, &output_folder);
            if let Err(err) = &outcome {
                tracing::warn!("Download of {} failed: {}", worker_url, err);
            }
            // The receiver may have been dropped; nobody is waiting then
            let _ = sender.send(outcome);
        });

    if let Err(err) = spawned {
        tracing::error!("Cannot start download thread: {}", err);
    }

    Download {
        url,
        receiver,
        delivered: false,
    }
}

fn fetch(url: &str, output_folder: &Path) -> Result<PathBuf, FileError> {
    let response = ureq::get(url).call()?;

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok());
    let file_name = match disposition {
        Some(header) => file_name_from_disposition(header)?,
        None => None,
    }
    .unwrap_or_else(|| Uuid::new_v4().to_string());

    let path = output_folder.join(file_name);
    tracing::debug!("Saving {} to {}", url, path.display());

    // Only a complete body is moved to its final name
    let partial = tempfile::Builder::new()
        .prefix(".download")
        .tempfile_in(output_folder)?;
    {
        let mut body = response.into_body().into_reader();
        let mut writer = BufWriter::new(partial.as_file());
        io::copy(&mut body, &mut writer)?;
        writer.flush()?;
    }
    partial.persist(&path).map_err(|err| err.error)?;
    Ok(path)
}

/// The first double-quoted value of a `Content-Disposition` header,
/// reduced to its final path component
pub fn file_name_from_disposition(header: &str) -> Result<Option<String>, FileError> {
    let quoted = Regex::new(r#""(.*?)""#)?;
    let name = quoted
        .captures(header)
        .and_then(|captures| captures.get(1))
        .and_then(|name| Path::new(name.as_str()).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string);
    Ok(name)
}

/// Copy everything from `reader` into a new, uniquely named file in `dir`.
///
/// `extension` (without the dot) becomes the file suffix when given.
pub fn copy_to_temp_file(
    reader: &mut impl Read,
    dir: &Path,
    extension: Option<&str>,
) -> Result<PathBuf, FileError> {
    let suffix = extension.map(|ext| format!(".{ext}")).unwrap_or_default();
    let file = tempfile::Builder::new()
        .prefix("temp")
        .suffix(&suffix)
        .tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(file.as_file());
        io::copy(reader, &mut writer)?;
        writer.flush()?;
    }

    let path = file.into_temp_path().keep().map_err(|err| err.error)?;
    Ok(path)
}
