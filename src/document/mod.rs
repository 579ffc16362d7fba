//! Brief generation: layout, drawing surfaces and the PDF backend

mod brief;
mod pdf;
#[cfg(test)]
mod recording;
mod surface;

pub use brief::{default_sections, BriefSection, DEFAULT_STUDIO};

use brief::{brief_file_name, render_brief};
use pdf::PdfSurface;
use surface::BriefSurface;

use crate::submission::Snapshot;
use chrono::Datelike;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing the brief
#[derive(Debug, Error)]
pub enum BriefError {
    #[error("The brief is not ready yet. Finish the wizard and try again.")]
    NotReady,
    #[error("Could not write the brief: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF backend error: {0}")]
    Pdf(String),
    #[error("The document was already saved")]
    AlreadySaved,
}

/// Everything needed to turn a snapshot into a file on disk
#[derive(Debug, Clone)]
pub struct BriefGenerator {
    pub sections: Vec<BriefSection>,
    pub studio_name: String,
    pub output_dir: PathBuf,
}

impl BriefGenerator {
    /// Render the brief to PDF and save it into the output directory.
    ///
    /// Fails with `NotReady` until a snapshot exists.
    pub fn generate(&self, snapshot: Option<&Snapshot>) -> Result<PathBuf, BriefError> {
        let snapshot = snapshot.ok_or(BriefError::NotReady)?;
        let mut surface = PdfSurface::new("Brand Strategy Brief")?;
        self.generate_on(&mut surface, snapshot)
    }

    /// Render onto any surface and save it under the brief's file name
    pub fn generate_on<S: BriefSurface + ?Sized>(
        &self,
        surface: &mut S,
        snapshot: &Snapshot,
    ) -> Result<PathBuf, BriefError> {
        let year = chrono::Local::now().year();
        render_brief(surface, snapshot, &self.sections, &self.studio_name, year);

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(brief_file_name(snapshot));
        surface.save(&path)?;

        tracing::info!("Brief saved to {}", path.display());
        Ok(path)
    }
}
