//! Run reports: the per-generation CSV and the detailed text log.

use std::io::{self, Write};

use crate::GenerationStats;
use crate::image::Image;
use crate::pattern::PatternSet;
use crate::reconstruct::Reconstruction;

pub const CSV_HEADER: &str = "Generation,BestLoss,AverageLoss";

/// The one-line generation summary shared by the console and the log.
pub fn generation_line(stats: &GenerationStats) -> String {
    format!(
        "Generation {}: Best Total Loss = {}, Average Total Loss = {}",
        stats.generation, stats.best, stats.average
    )
}

/// `Generation,BestLoss,AverageLoss` rows, one per generation.
pub struct CsvReport<W: Write> {
    writer: W,
}

impl<W: Write> CsvReport<W> {
    /// Writes the header line.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{CSV_HEADER}")?;
        Ok(Self { writer })
    }

    pub fn record(&mut self, stats: &GenerationStats) -> io::Result<()> {
        writeln!(
            self.writer,
            "{},{},{}",
            stats.generation, stats.best, stats.average
        )
    }

    /// Flushes and hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Human-readable record of a whole run.
pub struct DetailLog<W: Write> {
    writer: W,
}

impl<W: Write> DetailLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn initial_patterns(&mut self, patterns: &PatternSet) -> io::Result<()> {
        writeln!(
            self.writer,
            "Initial Random Patterns (from first candidate):"
        )?;
        write!(self.writer, "{patterns}")?;
        writeln!(self.writer)
    }

    pub fn generation(&mut self, stats: &GenerationStats) -> io::Result<()> {
        writeln!(self.writer, "{}", generation_line(stats))
    }

    pub fn final_patterns(&mut self, generations: usize, patterns: &PatternSet) -> io::Result<()> {
        writeln!(
            self.writer,
            "\nFinal Best Candidate's Patterns After {generations} Generations:"
        )?;
        write!(self.writer, "{patterns}")?;
        writeln!(self.writer)
    }

    /// Original and reconstructed image number `index` (1-based) with its loss.
    pub fn image(
        &mut self,
        index: usize,
        original: &Image,
        reconstruction: &Reconstruction,
    ) -> io::Result<()> {
        writeln!(self.writer, "Image {index}:")?;
        writeln!(self.writer, "Original Image:")?;
        write!(self.writer, "{original}")?;
        writeln!(self.writer, "\nReconstructed Image:")?;
        write!(self.writer, "{}", reconstruction.image)?;
        writeln!(
            self.writer,
            "\nLoss for Image {index} = {}\n",
            reconstruction.loss
        )
    }

    /// Flushes and hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
