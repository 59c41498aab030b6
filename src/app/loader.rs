//! Background logo decoding to keep the UI thread responsive.

use std::collections::HashSet;

use tokio::sync::mpsc;

use crate::core::logos::{self, DecodedLogo, LogoReference};

/// Longest side of the cached copy of a decoded logo.
pub const THUMBNAIL_PX: u32 = 256;

#[derive(Debug)]
pub enum LoadUpdate {
    Loaded {
        reference: LogoReference,
        logo: DecodedLogo,
    },
    Failed {
        reference: LogoReference,
        error: String,
    },
}

impl LoadUpdate {
    pub fn reference(&self) -> &LogoReference {
        match self {
            LoadUpdate::Loaded { reference, .. } | LoadUpdate::Failed { reference, .. } => reference,
        }
    }
}

/// Decode one logo.  Blocking.
pub fn load_logo(reference: LogoReference) -> LoadUpdate {
    match logos::decode(&reference, THUMBNAIL_PX) {
        Ok(logo) => LoadUpdate::Loaded { reference, logo },
        Err(e) => LoadUpdate::Failed {
            reference,
            error: e.to_string(),
        },
    }
}

/// References in first-seen order, each once.
pub fn distinct(references: &[LogoReference]) -> Vec<LogoReference> {
    let mut seen = HashSet::new();
    references
        .iter()
        .filter(|r| seen.insert(*r))
        .cloned()
        .collect()
}

/// Decode every distinct reference on the blocking pool.  Returns the
/// number of jobs started.
pub fn spawn_logo_loads(tx: mpsc::UnboundedSender<LoadUpdate>, references: &[LogoReference]) -> usize {
    let jobs = distinct(references);
    let count = jobs.len();
    for reference in jobs {
        let tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            let _ = tx.send(load_logo(reference));
        });
    }
    count
}
