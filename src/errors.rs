// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The handful of ways a zoom can go wrong.  The arithmetic itself is
//! total, so everything here comes from configuration, memory, the
//! worker threads, or the disk.

use failure::Fail;
use std::io;

/// Every error the library can report.
#[derive(Debug, Fail)]
pub enum ZoomError {
    /// A configuration value was rejected before any work started.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// The pixel buffer for a frame could not be sized or reserved.
    #[fail(display = "could not allocate a {}x{} pixel buffer", width, height)]
    Allocation {
        /// Requested image width
        width: usize,
        /// Requested image height
        height: usize,
    },

    /// One of the row workers panicked; the frame is discarded.
    #[fail(display = "a row worker panicked while rendering")]
    WorkerPanicked,

    /// The persistence sink could not write a frame.
    #[fail(display = "could not save frame {:04}: {}", frame, cause)]
    Save {
        /// Index of the frame being written
        frame: u64,
        /// The underlying I/O failure
        #[cause]
        cause: io::Error,
    },
}

impl ZoomError {
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        ZoomError::Config(message.into())
    }
}
