use anyhow::{Result, bail};
use indicatif::MultiProgress;
use makemkv::runner::MakeMkv;
use makemkv::structs::report::Report;

use super::command::{BackupArgs, Cli, InfoArgs, MkvArgs, ReportArgs, SourceArgs};
use super::output::{render, write_info_file};
use super::progress::TaskBars;

pub fn cmd_info(args: &InfoArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    let makemkv = configure(&args.source, cli);
    log::info!("Reading disc info from {}", makemkv.input());

    let report = makemkv.info_with(TaskBars::new(multi)?)?;
    present(&report, &args.report)
}

pub fn cmd_mkv(args: &MkvArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    if !args.output.is_dir() {
        bail!("Output directory {} does not exist", args.output.display());
    }

    let makemkv = configure(&args.source, cli);
    log::info!(
        "Saving title {} of {} to {}",
        args.title,
        makemkv.input(),
        args.output.display()
    );

    let report = makemkv.mkv(args.title, &args.output, TaskBars::new(multi)?)?;
    present(&report, &args.report)
}

pub fn cmd_backup(args: &BackupArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    if !args.output.is_dir() {
        bail!("Output directory {} does not exist", args.output.display());
    }

    let makemkv = configure(&args.source, cli);
    log::info!(
        "Backing up {} to {}{}",
        makemkv.input(),
        args.output.display(),
        if args.decrypt { " (decrypted)" } else { "" }
    );

    let report = makemkv.backup(&args.output, args.decrypt, TaskBars::new(multi)?)?;
    present(&report, &args.report)
}

fn configure(source: &SourceArgs, cli: &Cli) -> MakeMkv {
    let mut makemkv = MakeMkv::new(source.to_input()).fail_level(cli.fail_level());
    if let Some(cache) = source.cache {
        makemkv = makemkv.cache(cache);
    }
    if let Some(minlength) = source.minlength {
        makemkv = makemkv.minlength(minlength);
    }
    if let Some(binary) = &cli.makemkvcon {
        makemkv = makemkv.binary(binary);
    }
    makemkv
}

fn present(report: &Report, args: &ReportArgs) -> Result<()> {
    if let Some(path) = &args.info_file {
        write_info_file(report, path)?;
    } else if !args.no_info {
        print!("{}", render(report, args.format)?);
    }
    Ok(())
}
