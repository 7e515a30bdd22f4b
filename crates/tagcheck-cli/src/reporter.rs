//! Check result reporting.
//!
//! This module provides the report model and its console and JSON
//! formatters.

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tagcheck_core::{ImageInventory, ImageReference};
use tagcheck_registry::{ValidationResult, ValidationStatus};

/// Locations shown per image in the inventory listing.
const INVENTORY_PREVIEW: usize = 3;

const RULE_WIDTH: usize = 80;

/// Aggregate verdict of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every image was confirmed to exist.
    AllValid,
    /// No image is known to be missing, but some could not be checked.
    Unconfirmed,
    /// At least one image is confirmed missing.
    Invalid,
}

impl Outcome {
    /// Process exit status for this verdict.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::AllValid | Self::Unconfirmed => 0,
            Self::Invalid => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        Self::from(outcome.exit_code())
    }
}

/// Everything a check run produced.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// When validation finished.
    pub checked_at: DateTime<Utc>,
    /// Number of documentation files scanned.
    pub files_scanned: usize,
    /// References and their locations.
    pub images: ImageInventory,
    /// One result per reference, in reference order.
    pub results: Vec<ValidationResult>,
}

impl CheckReport {
    /// Creates a report stamped with the current time.
    #[must_use]
    pub fn new(files_scanned: usize, images: ImageInventory, results: Vec<ValidationResult>) -> Self {
        Self {
            checked_at: Utc::now(),
            files_scanned,
            images,
            results,
        }
    }

    /// Results with the given status.
    pub fn with_status(&self, status: ValidationStatus) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(move |r| r.status() == status)
    }

    /// Number of images confirmed to exist.
    #[must_use]
    pub fn valid(&self) -> usize {
        self.with_status(ValidationStatus::Valid).count()
    }

    /// Number of images confirmed missing.
    #[must_use]
    pub fn invalid(&self) -> usize {
        self.with_status(ValidationStatus::Invalid).count()
    }

    /// Number of images that could not be checked.
    #[must_use]
    pub fn errored(&self) -> usize {
        self.with_status(ValidationStatus::Errored).count()
    }

    /// Confirmed-missing takes priority over unconfirmed.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.invalid() > 0 {
            Outcome::Invalid
        } else if self.errored() > 0 {
            Outcome::Unconfirmed
        } else {
            Outcome::AllValid
        }
    }

    fn locations(&self, reference: &ImageReference) -> &[String] {
        self.images.locations(reference.as_str()).unwrap_or_default()
    }
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    checked_at: &'a DateTime<Utc>,
    files_scanned: usize,
    total: usize,
    valid: usize,
    invalid: usize,
    errored: usize,
    outcome: Outcome,
    images: &'a ImageInventory,
    results: &'a [ValidationResult],
}

/// Receives the stages of a run as they happen.
pub trait Reporter {
    /// Reports what discovery and extraction found.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn inventory(&mut self, files_scanned: usize, images: &ImageInventory) -> io::Result<()>;

    /// Reports that a reference is about to be checked.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn checking(&mut self, reference: &ImageReference) -> io::Result<()>;

    /// Reports the result for the reference announced by [`Reporter::checking`].
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn checked(&mut self, result: &ValidationResult) -> io::Result<()>;

    /// Reports the final summary.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn summary(&mut self, report: &CheckReport) -> io::Result<()>;
}

/// Human-readable reporter with live progress.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
    /// Whether to use colors.
    use_colors: bool,
}

impl ConsoleReporter<io::Stdout> {
    /// Creates a console reporter on stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a console reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            use_colors: true,
        }
    }

    /// Sets whether to use colors.
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.use_colors = colors;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", "=".repeat(RULE_WIDTH))
    }

    fn write_locations(&mut self, files: &[String]) -> io::Result<()> {
        writeln!(self.out, "  Found in:")?;
        for file in files {
            writeln!(self.out, "    - {file}")?;
        }
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn inventory(&mut self, files_scanned: usize, images: &ImageInventory) -> io::Result<()> {
        writeln!(self.out, "Found {files_scanned} MDX/MD files")?;
        writeln!(self.out, "Found {} unique Docker images", images.len())?;
        self.rule()?;
        writeln!(self.out, "\nDocker Images Found:")?;

        for (reference, files) in images.iter() {
            writeln!(self.out, "\n• {reference}")?;
            writeln!(self.out, "  Found in {} file(s):", files.len())?;
            for file in files.iter().take(INVENTORY_PREVIEW) {
                writeln!(self.out, "    - {file}")?;
            }
            if files.len() > INVENTORY_PREVIEW {
                writeln!(self.out, "    ... and {} more", files.len() - INVENTORY_PREVIEW)?;
            }
        }

        Ok(())
    }

    fn checking(&mut self, reference: &ImageReference) -> io::Result<()> {
        write!(self.out, "Checking {reference}... ")?;
        self.out.flush()
    }

    fn checked(&mut self, result: &ValidationResult) -> io::Result<()> {
        let line = match result.status() {
            ValidationStatus::Valid => self.paint("✓ EXISTS", "32"),
            ValidationStatus::Invalid => {
                let status = result.status_code.unwrap_or_default();
                self.paint(&format!("✗ NOT FOUND ({status})"), "31")
            }
            ValidationStatus::Errored => {
                let error = result.error.as_deref().unwrap_or("unknown error");
                self.paint(&format!("⚠ ERROR: {error}"), "33")
            }
        };
        writeln!(self.out, "{line}")
    }

    fn summary(&mut self, report: &CheckReport) -> io::Result<()> {
        self.rule()?;
        writeln!(self.out, "\nSUMMARY:\n")?;
        writeln!(self.out, "Total images found: {}", report.images.len())?;
        writeln!(self.out, "✓ Valid images: {}", report.valid())?;
        writeln!(self.out, "✗ Invalid images: {}", report.invalid())?;
        writeln!(self.out, "⚠ Errors: {}", report.errored())?;

        if report.invalid() > 0 {
            self.rule()?;
            let heading = self.paint("INVALID IMAGES:", "31");
            writeln!(self.out, "\n{heading}")?;

            for result in report.with_status(ValidationStatus::Invalid) {
                writeln!(self.out, "\n{}", result.reference)?;
                writeln!(self.out, "  Registry: {}", result.registry)?;
                self.write_locations(report.locations(&result.reference))?;
            }
        }

        if report.errored() > 0 {
            self.rule()?;
            let heading = self.paint("IMAGES WITH VALIDATION ERRORS:", "33");
            writeln!(self.out, "\n{heading}")?;
            writeln!(self.out, "These images could not be validated due to network or API issues.")?;
            writeln!(self.out, "They may still exist, but verification failed.")?;

            for result in report.with_status(ValidationStatus::Errored) {
                writeln!(self.out, "\n{}", result.reference)?;
                writeln!(self.out, "  Registry: {}", result.registry)?;
                writeln!(self.out, "  Error: {}", result.error.as_deref().unwrap_or_default())?;
                self.write_locations(report.locations(&result.reference))?;
            }
        }

        let verdict = match report.outcome() {
            Outcome::AllValid => self.paint("✓ All images validated successfully!", "32"),
            Outcome::Unconfirmed => format!(
                "{}\nPlease check the images with errors manually.",
                self.paint("⚠ All images appear valid, but some had validation errors.", "33")
            ),
            Outcome::Invalid => self.paint("✗ Some images could not be validated!", "31"),
        };
        writeln!(self.out, "\n{verdict}")
    }
}

/// Reporter that emits one JSON document at the end of the run.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    out: W,
    /// Whether to pretty-print the JSON.
    pretty: bool,
}

impl JsonReporter<io::Stdout> {
    /// Creates a JSON reporter on stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    /// Creates a JSON reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out, pretty: true }
    }

    /// Sets whether to pretty-print.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(io::Error::other)?;

        writeln!(self.out, "{json}")
    }

    /// Emits just the inventory; used when nothing is validated.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    pub fn inventory_only(&mut self, images: &ImageInventory) -> io::Result<()> {
        self.emit(images)
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn inventory(&mut self, _files_scanned: usize, _images: &ImageInventory) -> io::Result<()> {
        Ok(())
    }

    fn checking(&mut self, _reference: &ImageReference) -> io::Result<()> {
        Ok(())
    }

    fn checked(&mut self, _result: &ValidationResult) -> io::Result<()> {
        Ok(())
    }

    fn summary(&mut self, report: &CheckReport) -> io::Result<()> {
        let summary = JsonSummary {
            checked_at: &report.checked_at,
            files_scanned: report.files_scanned,
            total: report.images.len(),
            valid: report.valid(),
            invalid: report.invalid(),
            errored: report.errored(),
            outcome: report.outcome(),
            images: &report.images,
            results: &report.results,
        };
        self.emit(&summary)
    }
}
