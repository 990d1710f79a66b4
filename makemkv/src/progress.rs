/// Receives progress updates while makemkvcon output is decoded.
///
/// Called synchronously for every `PRGV` line, possibly many times per
/// second, so implementations should return quickly. `label` is the name of
/// the most recent `PRGC` task, or empty if none was seen yet. No completion
/// event is sent: a change of `label` means the previous task is done.
pub trait ProgressSink {
    fn update(&mut self, label: &str, current: u64, max: u64);
}

impl<F> ProgressSink for F
where
    F: FnMut(&str, u64, u64),
{
    fn update(&mut self, label: &str, current: u64, max: u64) {
        self(label, current, max)
    }
}

/// Discards all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&mut self, _label: &str, _current: u64, _max: u64) {}
}

#[test]
fn closures_are_sinks() {
    let mut seen = Vec::new();
    {
        let mut sink =
            |label: &str, current: u64, max: u64| seen.push((label.to_string(), current, max));
        sink.update("Saving", 3, 10);
    }
    assert_eq!(seen, [("Saving".to_string(), 3, 10)]);
}
