use serde::{Deserialize, Serialize};

use crate::structs::disc::Disc;
use crate::structs::title::Title;

/// Everything decoded from one makemkvcon run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Drives in the order makemkvcon reported them.
    #[serde(default)]
    pub drives: Vec<Drive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc: Option<Disc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_count: Option<u32>,
    /// Titles indexed by their ordinal.
    #[serde(default)]
    pub titles: Vec<Title>,
}

impl Report {
    /// Returns the title at `ordinal`, appending empty titles until it
    /// exists.
    pub fn title_mut(&mut self, ordinal: usize) -> &mut Title {
        if ordinal >= self.titles.len() {
            self.titles.resize_with(ordinal + 1, Title::default);
        }
        &mut self.titles[ordinal]
    }

    /// Returns the disc, creating an empty one on first use.
    pub fn disc_mut(&mut self) -> &mut Disc {
        self.disc.get_or_insert_with(Disc::default)
    }
}

/// An optical drive from a `DRV` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drive {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_name: Option<String>,
}

impl Drive {
    /// Builds a drive from the name fields of a `DRV` record. Empty strings
    /// count as absent; returns `None` if nothing is left.
    pub fn from_names(drive_name: &str, disc_name: &str, device_path: &str) -> Option<Self> {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let drive = Drive {
            device_path: non_empty(device_path),
            disc_name: non_empty(disc_name),
            drive_name: non_empty(drive_name),
        };

        if drive == Drive::default() {
            None
        } else {
            Some(drive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_drive_is_discarded() {
        assert_eq!(Drive::from_names("", "", ""), None);
    }

    #[test]
    fn partial_drive() {
        let drive = Drive::from_names("BD-RE HL-DT-ST", "", "/dev/sr0").unwrap();
        assert_eq!(drive.drive_name.as_deref(), Some("BD-RE HL-DT-ST"));
        assert_eq!(drive.disc_name, None);
        assert_eq!(drive.device_path.as_deref(), Some("/dev/sr0"));
    }

    #[test]
    fn titles_grow_with_placeholders() {
        let mut report = Report::default();
        report.title_mut(2).name = Some("third".into());
        assert_eq!(report.titles.len(), 3);
        assert_eq!(report.titles[0], Title::default());
        assert_eq!(report.titles[2].name.as_deref(), Some("third"));

        report.title_mut(1);
        assert_eq!(report.titles.len(), 3);
    }

    #[test]
    fn serialize_empty_report() -> anyhow::Result<()> {
        let json = serde_json::to_string(&Report::default())?;
        assert_eq!(json, r#"{"drives":[],"titles":[]}"#);
        Ok(())
    }
}
