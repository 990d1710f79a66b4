use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use makemkv::progress::ProgressSink;

/// Renders makemkvcon progress as one bar per task.
///
/// makemkvcon never reports that a task is done, so a bar is finished at its
/// maximum as soon as an update with a different label arrives.
pub struct TaskBars {
    multi: Option<MultiProgress>,
    style: ProgressStyle,
    current: Option<(String, ProgressBar)>,
}

impl TaskBars {
    /// Bars are drawn on `multi`; without it updates are only tracked.
    pub fn new(multi: Option<&MultiProgress>) -> Result<Self> {
        let style = ProgressStyle::with_template(
            "{msg:40!} {bar:40.cyan/blue} {percent:>3}% | elapsed: {elapsed_precise} | ETA: {eta_precise}",
        )?;

        Ok(Self {
            multi: multi.cloned(),
            style,
            current: None,
        })
    }

    /// Label of the task currently shown.
    pub fn label(&self) -> Option<&str> {
        self.current.as_ref().map(|(label, _)| label.as_str())
    }

    /// Finishes the current bar at its maximum and removes it.
    pub fn finish(&mut self) {
        if let Some((label, pb)) = self.current.take() {
            if let Some(len) = pb.length() {
                pb.set_position(len);
            }
            pb.finish_and_clear();
            if let Some(multi) = &self.multi {
                multi.remove(&pb);
            }
            log::debug!("{label} done");
        }
    }

    fn start(&mut self, label: &str, current: u64, max: u64) {
        let pb = ProgressBar::new(max);
        let pb = match &self.multi {
            Some(multi) => multi.add(pb),
            None => {
                pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
                pb
            }
        };
        pb.set_style(self.style.clone());
        pb.set_message(label.to_string());
        pb.set_position(current);
        self.current = Some((label.to_string(), pb));
    }
}

impl ProgressSink for TaskBars {
    fn update(&mut self, label: &str, current: u64, max: u64) {
        match &self.current {
            Some((shown, pb)) if shown == label => {
                if pb.length() != Some(max) {
                    pb.set_length(max);
                }
                pb.set_position(current);
            }
            _ => {
                self.finish();
                self.start(label, current, max);
            }
        }
    }
}

impl Drop for TaskBars {
    fn drop(&mut self) {
        self.finish();
    }
}
