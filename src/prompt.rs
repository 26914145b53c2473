//! Interactive collection of training images.
//!
//! A file that cannot be loaded is reported and the user is asked for another
//! name until one loads. Only running out of input ends the loop early.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;

use log::warn;

use crate::error::PromptError;
use crate::image::Image;

/// Hands out whitespace-delimited words from a line-oriented reader.
///
/// Several names may arrive on one line; the ones not yet asked for are kept
/// for the following prompts.
pub struct WordReader<R: BufRead> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> WordReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// Next word, or `None` at end of input.
    pub fn next_word(&mut self) -> Result<Option<String>, PromptError> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(String::from));
        }
        Ok(self.pending.pop_front())
    }
}

/// Loads image number `index` (1-based), starting from `initial` when given
/// and prompting on `output` otherwise.
pub fn prompt_image<R: BufRead, W: Write>(
    words: &mut WordReader<R>,
    output: &mut W,
    index: usize,
    initial: Option<&Path>,
) -> Result<Image, PromptError> {
    let mut name = match initial {
        Some(path) => path.display().to_string(),
        None => {
            write!(output, "Enter name of image file {index}: ")?;
            output.flush()?;
            words.next_word()?.ok_or(PromptError::EndOfInput { index })?
        }
    };

    loop {
        match Image::load(&name) {
            Ok(image) => return Ok(image),
            Err(e) => {
                warn!("Rejected image file {name}: {e}");
                writeln!(output, "{e}")?;
                write!(output, "Error reading image file {name}. Please re-enter: ")?;
                output.flush()?;
                name = words.next_word()?.ok_or(PromptError::EndOfInput { index })?;
            }
        }
    }
}

/// Collects `count` images. Paths in `given` are tried first, in order; the
/// rest are asked for.
pub fn collect_images<R: BufRead, W: Write, P: AsRef<Path>>(
    input: &mut R,
    output: &mut W,
    count: usize,
    given: &[P],
) -> Result<Vec<Image>, PromptError> {
    if given.len() > count {
        warn!(
            "Ignoring {} image paths beyond the {count} training images",
            given.len() - count
        );
    }

    let mut words = WordReader::new(input);
    (0..count)
        .map(|i| {
            let initial = given.get(i).map(|p| p.as_ref());
            prompt_image(&mut words, output, i + 1, initial)
        })
        .collect()
}
