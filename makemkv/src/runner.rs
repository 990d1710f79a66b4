//! Running makemkvcon.
//!
//! [`MakeMkv`] builds the command line for one of the `info`, `mkv` and
//! `backup` commands, spawns makemkvcon in robot mode and decodes its output
//! with a [`ReportBuilder`].

use std::fmt;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::str::FromStr;

use anyhow::Result;
use log::{debug, info, warn};

use crate::codes::messages::Severity;
use crate::input::Input;
use crate::process::builder::ReportBuilder;
use crate::progress::ProgressSink;
use crate::structs::report::Report;
use crate::utils::errors::Error;

const BINARY: &str = "makemkvcon";

#[cfg(windows)]
const INSTALL_PATHS: &[&str] = &[
    "C:/Program Files/MakeMKV/makemkvcon.exe",
    "C:/Program Files (x86)/MakeMKV/makemkvcon.exe",
];

#[cfg(not(windows))]
const INSTALL_PATHS: &[&str] = &[];

/// A running makemkvcon whose output is read line by line.
pub trait RobotProcess {
    /// Next line of combined stdout/stderr, `None` once both are closed.
    fn next_line(&mut self) -> Option<io::Result<String>>;

    /// Kills the process.
    fn terminate(&mut self) -> io::Result<()>;

    /// Waits for the process to exit. Returns its exit code, or `None` if it
    /// was killed by a signal.
    fn wait(&mut self) -> io::Result<Option<i32>>;
}

/// Feeds every output line of `process` to `builder`.
///
/// On a fatal message or a read error the process is killed and the error
/// returned. Otherwise the report is returned once the process exits with
/// status 0.
pub fn drive<R, P>(process: &mut R, mut builder: ReportBuilder<P>) -> Result<Report, Error>
where
    R: RobotProcess + ?Sized,
    P: ProgressSink,
{
    while let Some(line) = process.next_line() {
        let pushed = line
            .map_err(Error::Io)
            .and_then(|line| builder.push_line(&line));
        if let Err(e) = pushed {
            abort(process);
            return Err(e);
        }
    }

    match process.wait()? {
        Some(0) => Ok(builder.into_report()),
        Some(code) => Err(Error::ExitStatus(code)),
        None => Err(Error::Terminated),
    }
}

fn abort<R: RobotProcess + ?Sized>(process: &mut R) {
    if let Err(e) = process.terminate() {
        warn!("Failed to kill makemkvcon: {e}");
    }
    if let Err(e) = process.wait() {
        warn!("Failed to wait for makemkvcon: {e}");
    }
}

/// A spawned makemkvcon with stdout and stderr merged into one line stream.
///
/// Both streams share a single pipe so lines arrive in the order makemkvcon
/// wrote them.
pub struct ChildProcess {
    child: Child,
    output: BufReader<io::PipeReader>,
    buf: Vec<u8>,
}

impl ChildProcess {
    /// Spawns `command` with stdout and stderr redirected into one pipe.
    pub fn spawn(mut command: Command) -> Result<Self, Error> {
        let (reader, writer) = io::pipe().map_err(Error::Spawn)?;
        command
            .stdin(Stdio::null())
            .stdout(writer.try_clone().map_err(Error::Spawn)?)
            .stderr(writer);

        let child = command.spawn().map_err(Error::Spawn)?;
        // the write ends must close here or reading never sees EOF
        drop(command);

        Ok(Self {
            child,
            output: BufReader::new(reader),
            buf: Vec::new(),
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }
}

impl RobotProcess for ChildProcess {
    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.buf.clear();
        match self.output.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            // makemkvcon doesn't always emit valid UTF-8 in disc names
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Err(e) => Some(Err(e)),
        }
    }

    fn terminate(&mut self) -> io::Result<()> {
        self.child.kill()
    }

    fn wait(&mut self) -> io::Result<Option<i32>> {
        Ok(self.child.wait()?.code())
    }
}

/// Title selection of the `mkv` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSelection {
    All,
    Index(u32),
}

impl fmt::Display for TitleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleSelection::All => f.write_str("all"),
            TitleSelection::Index(index) => write!(f, "{index}"),
        }
    }
}

impl FromStr for TitleSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(TitleSelection::All);
        }
        s.parse()
            .map(TitleSelection::Index)
            .map_err(|_| format!("expected a title number or \"all\", got {s:?}"))
    }
}

impl From<u32> for TitleSelection {
    fn from(index: u32) -> Self {
        TitleSelection::Index(index)
    }
}

/// makemkvcon invocation settings shared by all commands.
///
/// ```rust,no_run
/// use makemkv::runner::MakeMkv;
///
/// let report = MakeMkv::new(0).minlength(120).info()?;
/// for title in &report.titles {
///     println!("{:?} {:?}", title.name, title.length);
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MakeMkv {
    input: Input,
    cache: Option<u32>,
    minlength: Option<u32>,
    binary: Option<PathBuf>,
    fail_level: Option<Severity>,
}

impl MakeMkv {
    pub fn new(input: impl Into<Input>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Read cache size in megabytes.
    pub fn cache(mut self, megabytes: u32) -> Self {
        self.cache = Some(megabytes);
        self
    }

    /// Minimum title length in seconds.
    pub fn minlength(mut self, seconds: u32) -> Self {
        self.minlength = Some(seconds);
        self
    }

    /// Uses this makemkvcon executable instead of searching for one.
    pub fn binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    /// Lowest message severity that aborts the run, see
    /// [`ReportBuilder::set_fail_level`].
    pub fn fail_level(mut self, level: Severity) -> Self {
        self.fail_level = Some(level);
        self
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Displays information about a disc.
    pub fn info(&self) -> Result<Report> {
        self.info_with(crate::progress::NoProgress)
    }

    pub fn info_with<P: ProgressSink>(&self, progress: P) -> Result<Report> {
        let args = self.args("info", &[])?;
        self.run(&args, progress)
    }

    /// Saves titles as MKV files into `output_dir`.
    pub fn mkv<P: ProgressSink>(
        &self,
        title: TitleSelection,
        output_dir: &Path,
        progress: P,
    ) -> Result<Report> {
        let args = self.args(
            "mkv",
            &[title.to_string(), output_dir.display().to_string()],
        )?;
        self.run(&args, progress)
    }

    /// Backs up the whole disc into `output_dir`.
    pub fn backup<P: ProgressSink>(
        &self,
        output_dir: &Path,
        decrypt: bool,
        progress: P,
    ) -> Result<Report> {
        let mut args = self.args("backup", &[output_dir.display().to_string()])?;
        if decrypt {
            args.push("--decrypt".to_string());
        }
        self.run(&args, progress)
    }

    /// Arguments for `command`, without the executable.
    pub fn args(&self, command: &str, operands: &[String]) -> Result<Vec<String>> {
        let mut args = vec![command.to_string(), self.input.locator()?];
        args.extend(operands.iter().cloned());
        args.extend(["--robot", "--progress=-same", "--noscan"].map(String::from));
        if let Some(cache) = self.cache {
            args.extend(["--cache".to_string(), cache.to_string()]);
        }
        if let Some(minlength) = self.minlength {
            args.extend(["--minlength".to_string(), minlength.to_string()]);
        }
        Ok(args)
    }

    fn run<P: ProgressSink>(&self, args: &[String], progress: P) -> Result<Report> {
        let mut process = self.spawn(args)?;

        let mut builder = ReportBuilder::new(progress);
        if let Some(level) = self.fail_level {
            builder.set_fail_level(level);
        }

        Ok(drive(&mut process, builder)?)
    }

    fn candidates(&self) -> Vec<PathBuf> {
        match &self.binary {
            Some(binary) => vec![binary.clone()],
            None => std::iter::once(BINARY)
                .chain(INSTALL_PATHS.iter().copied())
                .map(PathBuf::from)
                .collect(),
        }
    }

    fn spawn(&self, args: &[String]) -> Result<ChildProcess, Error> {
        for binary in self.candidates() {
            let mut command = Command::new(&binary);
            command.args(args);

            match ChildProcess::spawn(command) {
                Err(Error::Spawn(e)) if e.kind() == io::ErrorKind::NotFound => {
                    if self.binary.is_some() {
                        return Err(Error::MissingBinary(binary));
                    }
                    debug!("No makemkvcon at {}", binary.display());
                }
                Ok(process) => {
                    info!(
                        "Running \"{} {}\" (pid {})",
                        binary.display(),
                        args.join(" "),
                        process.id()
                    );
                    return Ok(process);
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::BinaryNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::progress::NoProgress;

    /// Replays canned output and records how it was treated.
    struct Scripted {
        lines: VecDeque<io::Result<String>>,
        exit: Option<i32>,
        terminated: bool,
        waited: usize,
    }

    impl Scripted {
        fn new(lines: &[&str], exit: Option<i32>) -> Self {
            Self {
                lines: lines.iter().map(|l| Ok(format!("{l}\n"))).collect(),
                exit,
                terminated: false,
                waited: 0,
            }
        }
    }

    impl RobotProcess for Scripted {
        fn next_line(&mut self) -> Option<io::Result<String>> {
            if self.terminated {
                return None;
            }
            self.lines.pop_front()
        }

        fn terminate(&mut self) -> io::Result<()> {
            self.terminated = true;
            Ok(())
        }

        fn wait(&mut self) -> io::Result<Option<i32>> {
            self.waited += 1;
            Ok(if self.terminated { None } else { self.exit })
        }
    }

    #[test]
    fn clean_exit_returns_report() -> anyhow::Result<()> {
        let mut process = Scripted::new(
            &[
                r#"MSG:1005,0,1,"MakeMKV started","%1 started","MakeMKV""#,
                r#"DRV:0,2,999,1,"BD-RE HL-DT-ST","FOO_BAR","/dev/sr0""#,
                "TCOUNT:1",
                r#"TINFO:0,2,0,"Dummy title""#,
                r#"SINFO:0,0,1,6201,"Video""#,
            ],
            Some(0),
        );

        let report = drive(&mut process, ReportBuilder::new(NoProgress))?;
        assert_eq!(report.drives.len(), 1);
        assert_eq!(report.title_count, Some(1));
        assert_eq!(report.titles[0].name.as_deref(), Some("Dummy title"));
        assert!(!process.terminated);
        assert_eq!(process.waited, 1);
        Ok(())
    }

    #[test]
    fn non_zero_exit() {
        let mut process = Scripted::new(&["TCOUNT:0"], Some(1));
        assert!(matches!(
            drive(&mut process, ReportBuilder::new(NoProgress)),
            Err(Error::ExitStatus(1))
        ));
    }

    #[test]
    fn killed_by_signal() {
        let mut process = Scripted::new(&[], None);
        assert!(matches!(
            drive(&mut process, ReportBuilder::new(NoProgress)),
            Err(Error::Terminated)
        ));
    }

    #[test]
    fn critical_message_terminates() {
        let mut process = Scripted::new(
            &[
                r#"MSG:5010,0,0,"Failed to open disc","Failed to open disc""#,
                "TCOUNT:5",
            ],
            Some(0),
        );

        let err = drive(&mut process, ReportBuilder::new(NoProgress)).unwrap_err();
        assert_eq!(err.code(), Some(5010));
        assert_eq!(err.to_string(), "Failed to open disc (5010)");
        assert!(process.terminated);
        assert_eq!(process.waited, 1);
        // the buffered TCOUNT line was never read
        assert_eq!(process.lines.len(), 1);
    }

    #[test]
    fn read_error_terminates() {
        let mut process = Scripted::new(&["TCOUNT:1"], Some(0));
        process
            .lines
            .push_back(Err(io::Error::new(io::ErrorKind::InvalidData, "broken pipe")));

        assert!(matches!(
            drive(&mut process, ReportBuilder::new(NoProgress)),
            Err(Error::Io(_))
        ));
        assert!(process.terminated);
    }

    #[test]
    fn title_selection() {
        assert_eq!("all".parse(), Ok(TitleSelection::All));
        assert_eq!("ALL".parse(), Ok(TitleSelection::All));
        assert_eq!("3".parse(), Ok(TitleSelection::Index(3)));
        assert!("first".parse::<TitleSelection>().is_err());
        assert_eq!(TitleSelection::All.to_string(), "all");
        assert_eq!(TitleSelection::from(7).to_string(), "7");
    }

    #[test]
    fn command_arguments() -> anyhow::Result<()> {
        let makemkv = MakeMkv::new(1);
        assert_eq!(
            makemkv.args("info", &[])?,
            ["info", "disc:1", "--robot", "--progress=-same", "--noscan"]
        );

        let makemkv = MakeMkv::new(0).cache(1024).minlength(120);
        assert_eq!(
            makemkv.args("mkv", &["all".to_string(), "/tmp/out".to_string()])?,
            [
                "mkv",
                "disc:0",
                "all",
                "/tmp/out",
                "--robot",
                "--progress=-same",
                "--noscan",
                "--cache",
                "1024",
                "--minlength",
                "120",
            ]
        );
        Ok(())
    }

    #[test]
    fn explicit_binary_only() {
        let makemkv = MakeMkv::new(0).binary("/opt/makemkv/bin/makemkvcon");
        assert_eq!(
            makemkv.candidates(),
            [PathBuf::from("/opt/makemkv/bin/makemkvcon")]
        );
        assert_eq!(MakeMkv::new(0).candidates()[0], PathBuf::from(BINARY));
    }

    #[test]
    fn missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("makemkvcon");
        let makemkv = MakeMkv::new(0).binary(&binary);
        let err = makemkv.info_with(NoProgress).unwrap_err();
        match err.downcast_ref::<Error>() {
            Some(Error::MissingBinary(path)) => assert_eq!(path, &binary),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains(&binary.display().to_string()));
        assert!(!err.to_string().contains("PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn child_process_merges_output() -> anyhow::Result<()> {
        let mut command = Command::new("sh");
        command.args([
            "-c",
            r#"echo 'TCOUNT:2'; echo 'TINFO:1,2,0,"From stderr"' >&2; exit 3"#,
        ]);

        let mut process = ChildProcess::spawn(command)?;
        let mut builder = ReportBuilder::new(NoProgress);
        while let Some(line) = process.next_line() {
            builder.push_line(&line?)?;
        }
        assert_eq!(process.wait()?, Some(3));

        let report = builder.into_report();
        assert_eq!(report.title_count, Some(2));
        assert_eq!(report.titles[1].name.as_deref(), Some("From stderr"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn child_process_keeps_interleaved_order() -> anyhow::Result<()> {
        let mut command = Command::new("sh");
        command.args(["-c", "echo first; echo second >&2; echo third"]);

        let mut process = ChildProcess::spawn(command)?;
        let mut lines = Vec::new();
        while let Some(line) = process.next_line() {
            lines.push(line?);
        }
        assert_eq!(process.wait()?, Some(0));
        assert_eq!(lines, ["first\n", "second\n", "third\n"]);
        Ok(())
    }
}
