#![doc = include_str!("../README.md")]
//!
//! ## Robot Mode
//!
//! With `--robot`, makemkvcon prints one record per line, a tag followed by
//! comma separated fields. Text fields are quoted and may contain commas.
//!
//! ```text
//! MSG:5010,0,0,"Failed to open disc","Failed to open disc"
//! PRGV:1024,2048,65536
//! DRV:0,2,999,1,"BD-RE HL-DT-ST BD-RE  WH16NS40","FOO_BAR","/dev/sr0"
//! TCOUNT:1
//! CINFO:1,6209,"Blu-ray disc"
//! TINFO:0,9,0,"1:23:45"
//! SINFO:0,1,3,0,"eng"
//! ```
//!
//! `CINFO`, `TINFO` and `SINFO` carry one attribute each, identified by the
//! `AP_ItemAttributeId` of `apdefs.h`. Titles and streams are addressed by
//! zero-based ordinals and created on first mention.
//!
//! ## Quick Start
//!
//! Decoding captured output:
//!
//! ```rust
//! use makemkv::process::builder::decode_lines;
//! use makemkv::progress::NoProgress;
//!
//! let output = [
//!     r#"TINFO:0,2,0,"Dummy title""#,
//!     r#"SINFO:0,0,1,6201,"Video""#,
//! ];
//! let report = decode_lines(output, NoProgress)?;
//!
//! assert_eq!(report.titles[0].name.as_deref(), Some("Dummy title"));
//! assert_eq!(report.titles[0].streams.len(), 1);
//! # Ok::<(), makemkv::utils::errors::Error>(())
//! ```
//!
//! Running makemkvcon with a progress callback:
//!
//! ```rust,no_run
//! use makemkv::runner::MakeMkv;
//!
//! let report = MakeMkv::new(0).info_with(|task: &str, current: u64, max: u64| {
//!     println!("{task}: {current}/{max}");
//! })?;
//! println!("{} titles", report.titles.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Static code tables.
///
/// - **Attributes** ([`codes::attributes`]): attribute ids
/// - **Messages** ([`codes::messages`]): message severities
/// - **Values** ([`codes::values`]): enumeration strings
/// - **Languages** ([`codes::language`]): language code mapping
pub mod codes;

/// Input locators for makemkvcon.
pub mod input;

/// Line decoding.
///
/// 1. **Records** ([`process::record`]): splits a line into a typed record.
///
/// 2. **Translation** ([`process::translate`]): maps attributes onto report
///    fields.
///
/// 3. **Building** ([`process::builder`]): folds records into a report.
pub mod process;

/// Progress callbacks.
pub mod progress;

/// Spawning makemkvcon and collecting its report.
pub mod runner;

/// Report data structures.
pub mod structs;

/// Error types.
pub mod utils;
