use log::{debug, error};

use crate::codes::attributes::Field;
use crate::codes::messages::Severity;
use crate::log_or_err;
use crate::process::record::{Attribute, Record};
use crate::process::translate::{Flag, translate};
use crate::progress::{NoProgress, ProgressSink};
use crate::structs::report::{Drive, Report};
use crate::structs::value::Value;
use crate::utils::errors::{Error, TranslateError};

/// Builds a [`Report`] from makemkvcon robot mode output, one line at a
/// time.
///
/// Malformed lines are logged as errors and skipped, irrelevant attributes
/// are skipped silently. A message whose severity reaches the fail level ends decoding:
/// the line is rejected with [`Error::Fatal`] and every later line with
/// [`Error::Finished`], so lines still buffered behind a fatal message are
/// discarded.
pub struct ReportBuilder<P = NoProgress> {
    report: Report,
    task: String,
    progress: P,
    fail_level: Severity,
    stopped: bool,
}

impl Default for ReportBuilder<NoProgress> {
    fn default() -> Self {
        Self::new(NoProgress)
    }
}

impl<P: ProgressSink> ReportBuilder<P> {
    pub fn new(progress: P) -> Self {
        Self {
            report: Report::default(),
            task: String::new(),
            progress,
            fail_level: Severity::Critical,
            stopped: false,
        }
    }

    /// Sets the lowest message severity that aborts decoding.
    ///
    /// - `Severity::Critical`: only unrecoverable makemkvcon failures (default)
    /// - `Severity::Error`: also fail on error messages (strict mode)
    pub fn set_fail_level(&mut self, level: Severity) {
        self.fail_level = level;
    }

    /// Decodes one output line.
    pub fn push_line(&mut self, line: &str) -> Result<(), Error> {
        if self.stopped {
            return Err(Error::Finished);
        }

        let record = match Record::parse(line) {
            Ok(record) => record,
            Err(e) => {
                error!("Error while parsing '{}': {e}", line.trim());
                return Ok(());
            }
        };

        let result = self.apply(record, line);
        // the caller reports the error
        if result.is_err() {
            self.stopped = true;
        }
        result
    }

    /// Decodes lines until they run out or one of them is fatal.
    pub fn push_lines<I, S>(&mut self, lines: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .try_for_each(|line| self.push_line(line.as_ref()))
    }

    /// The report decoded so far.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Label of the current progress task.
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Whether decoding stopped at a fatal message.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn into_report(self) -> Report {
        self.report
    }

    fn apply(&mut self, record: Record<'_>, line: &str) -> Result<(), Error> {
        match record {
            Record::Message { code, message, .. } => {
                log_or_err!(
                    self,
                    Severity::of(code),
                    Error::Fatal {
                        code,
                        severity: Severity::of(code),
                        message: message.to_string(),
                    }
                );
            }
            Record::ProgressTitle { code, name, .. } => {
                let severity = Severity::of(code);
                log::log!(target: "makemkvcon", severity.log_level(), "{name} ({code})");
            }
            Record::ProgressCurrent { name, .. } => {
                self.task = name.to_string();
            }
            Record::ProgressValue { current, max, .. } => {
                self.progress.update(&self.task, current, max);
            }
            Record::Drive {
                drive_name,
                disc_name,
                device_path,
                ..
            } => {
                if let Some(drive) = Drive::from_names(drive_name, disc_name, device_path) {
                    self.report.drives.push(drive);
                }
            }
            Record::TitleCount(count) => {
                self.report.title_count = Some(count);
            }
            Record::DiscInfo(attribute) => {
                let disc = self.report.disc_mut();
                set_attribute(Flag::Disc, attribute, line, |field, value| {
                    disc.set(field, value)
                });
            }
            Record::TitleInfo { title, attribute } => {
                let title = self.report.title_mut(title);
                set_attribute(Flag::Title, attribute, line, |field, value| {
                    title.set(field, value)
                });
            }
            Record::StreamInfo {
                title,
                stream,
                attribute,
            } => {
                let stream = self.report.title_mut(title).stream_mut(stream);
                set_attribute(Flag::Stream, attribute, line, |field, value| {
                    stream.set(field, value)
                });
            }
        }

        Ok(())
    }
}

fn set_attribute<F>(flag: Flag, attribute: Attribute<'_>, line: &str, set: F)
where
    F: FnOnce(Field, Value) -> Result<(), TranslateError>,
{
    let result = translate(flag, attribute.id, attribute.value, attribute.code)
        .and_then(|(field, value)| set(field, value));

    match result {
        Ok(()) => {}
        Err(TranslateError::UnknownAttribute(id)) => {
            debug!("Skipping {} attribute {id}", flag.tag());
        }
        Err(e) => {
            error!("Error while parsing '{}': {e}", line.trim());
        }
    }
}

/// Decodes a complete sequence of output lines.
pub fn decode_lines<I, S, P>(lines: I, progress: P) -> Result<Report, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: ProgressSink,
{
    let mut builder = ReportBuilder::new(progress);
    builder.push_lines(lines)?;
    Ok(builder.into_report())
}
