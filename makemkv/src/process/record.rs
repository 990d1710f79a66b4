//! Line classification and tokenization.
//!
//! Every robot mode line has the shape `TAG:field,field,"quoted, field"`.
//! [`split_line`] separates the tag from the raw field tokens and never
//! fails. [`Record::parse`] then checks field counts and integer fields for
//! the tags the decoder understands.

use std::fmt::Display;
use std::str::FromStr;

use crate::utils::errors::LineError;

/// Upper bound for title and stream ordinals. Anything above is treated as
/// garbage rather than grown into.
pub const MAX_ORDINAL: usize = 9_999;

/// Record tag, the text before the first `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `MSG`: a message for the user.
    Msg,
    /// `PRGT`: title of the whole operation.
    Prgt,
    /// `PRGC`: title of the current sub-task.
    Prgc,
    /// `PRGV`: progress values.
    Prgv,
    /// `DRV`: a drive.
    Drv,
    /// `TCOUNT`: number of titles.
    Tcount,
    /// `CINFO`: disc attribute.
    Cinfo,
    /// `TINFO`: title attribute.
    Tinfo,
    /// `SINFO`: stream attribute.
    Sinfo,
    Unknown(String),
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        match tag {
            "MSG" => Tag::Msg,
            "PRGT" => Tag::Prgt,
            "PRGC" => Tag::Prgc,
            "PRGV" => Tag::Prgv,
            "DRV" => Tag::Drv,
            "TCOUNT" => Tag::Tcount,
            "CINFO" => Tag::Cinfo,
            "TINFO" => Tag::Tinfo,
            "SINFO" => Tag::Sinfo,
            other => Tag::Unknown(other.to_string()),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tag::Msg => "MSG",
            Tag::Prgt => "PRGT",
            Tag::Prgc => "PRGC",
            Tag::Prgv => "PRGV",
            Tag::Drv => "DRV",
            Tag::Tcount => "TCOUNT",
            Tag::Cinfo => "CINFO",
            Tag::Tinfo => "TINFO",
            Tag::Sinfo => "SINFO",
            Tag::Unknown(tag) => tag.as_str(),
        };
        f.write_str(name)
    }
}

/// Splits a line into its tag and raw field tokens.
///
/// A tag is an all-uppercase run directly followed by `:`. Lines without one
/// come back as [`Tag::Unknown`] with no fields. Backslashes are literal, a
/// quoted field ends at the next `"`.
pub fn split_line(line: &str) -> (Tag, Vec<&str>) {
    let line = line.trim();
    match line.split_once(':') {
        Some((tag, rest)) if !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_uppercase()) => {
            (Tag::from(tag), split_fields(rest))
        }
        _ => (Tag::Unknown(String::new()), Vec::new()),
    }
}

fn split_fields(rest: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    if rest.is_empty() {
        return fields;
    }

    let mut remaining = rest;
    loop {
        let (field, tail) = match remaining.strip_prefix('"') {
            // Quoted values may contain commas. An unterminated quote runs to
            // the end of the line.
            Some(quoted) => match quoted.find('"') {
                Some(end) => (&quoted[..end], &quoted[end + 1..]),
                None => (quoted, ""),
            },
            None => match remaining.find(',') {
                Some(end) => (&remaining[..end], &remaining[end..]),
                None => (remaining, ""),
            },
        };
        fields.push(field);

        match tail.find(',') {
            Some(comma) => remaining = &tail[comma + 1..],
            None => break,
        }
    }

    fields
}

/// `id,code,value` triple shared by `CINFO`, `TINFO` and `SINFO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute id, see `AP_ItemAttributeId`.
    pub id: u32,
    /// Enumeration code if the value is a constant string, else 0.
    pub code: u32,
    pub value: &'a str,
}

/// A typed robot mode record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'a> {
    /// `MSG:code,flags,count,message,format,param0,param1,...`
    Message {
        code: u32,
        message: &'a str,
        format: Option<&'a str>,
        params: Vec<&'a str>,
    },
    /// `PRGT:code,id,name`
    ProgressTitle { code: u32, id: u32, name: &'a str },
    /// `PRGC:code,id,name`
    ProgressCurrent { code: u32, id: u32, name: &'a str },
    /// `PRGV:current,total,max`
    ProgressValue {
        current: u64,
        total: Option<u64>,
        max: u64,
    },
    /// `DRV:index,visible,enabled,flags,drive name,disc name,device path`
    Drive {
        index: u32,
        visible: u32,
        enabled: u32,
        flags: u32,
        drive_name: &'a str,
        disc_name: &'a str,
        device_path: &'a str,
    },
    /// `TCOUNT:count`
    TitleCount(u32),
    /// `CINFO:id,code,value`
    DiscInfo(Attribute<'a>),
    /// `TINFO:title,id,code,value`
    TitleInfo {
        title: usize,
        attribute: Attribute<'a>,
    },
    /// `SINFO:title,stream,id,code,value`
    StreamInfo {
        title: usize,
        stream: usize,
        attribute: Attribute<'a>,
    },
}

struct Fields<'a> {
    tag: Tag,
    values: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn str(&self, index: usize) -> Result<&'a str, LineError> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| LineError::MissingField {
                tag: self.tag.clone(),
                index,
            })
    }

    fn int<T: FromStr>(&self, index: usize) -> Result<T, LineError> {
        let value = self.str(index)?;
        value.trim().parse().map_err(|_| LineError::InvalidInteger {
            tag: self.tag.clone(),
            index,
            value: value.to_string(),
        })
    }

    fn ordinal(&self, index: usize) -> Result<usize, LineError> {
        let ordinal: usize = self.int(index)?;
        if ordinal > MAX_ORDINAL {
            return Err(LineError::OrdinalOutOfRange {
                tag: self.tag.clone(),
                ordinal,
            });
        }
        Ok(ordinal)
    }

    fn attribute(&self, first: usize) -> Result<Attribute<'a>, LineError> {
        Ok(Attribute {
            id: self.int(first)?,
            code: self.int(first + 1)?,
            value: self.str(first + 2)?,
        })
    }
}

impl<'a> Record<'a> {
    /// Classifies and tokenizes one output line.
    pub fn parse(line: &'a str) -> Result<Self, LineError> {
        let (tag, values) = split_line(line);
        let fields = Fields { tag, values };

        let record = match &fields.tag {
            Tag::Msg => Record::Message {
                code: fields.int(0)?,
                message: fields.str(3)?,
                format: fields.values.get(4).copied(),
                params: fields.values.get(5..).map(<[_]>::to_vec).unwrap_or_default(),
            },
            Tag::Prgt => Record::ProgressTitle {
                code: fields.int(0)?,
                id: fields.int(1)?,
                name: fields.str(2)?,
            },
            Tag::Prgc => Record::ProgressCurrent {
                code: fields.int(0)?,
                id: fields.int(1)?,
                name: fields.str(2)?,
            },
            Tag::Prgv => Record::ProgressValue {
                current: fields.int(0)?,
                total: fields.int(1).ok(),
                max: fields.int(2)?,
            },
            Tag::Drv => Record::Drive {
                index: fields.int(0)?,
                visible: fields.int(1)?,
                enabled: fields.int(2)?,
                flags: fields.int(3)?,
                drive_name: fields.str(4)?,
                disc_name: fields.str(5)?,
                device_path: fields.str(6)?,
            },
            Tag::Tcount => Record::TitleCount(fields.int(0)?),
            Tag::Cinfo => Record::DiscInfo(fields.attribute(0)?),
            Tag::Tinfo => Record::TitleInfo {
                title: fields.ordinal(0)?,
                attribute: fields.attribute(1)?,
            },
            Tag::Sinfo => Record::StreamInfo {
                title: fields.ordinal(0)?,
                stream: fields.ordinal(1)?,
                attribute: fields.attribute(2)?,
            },
            Tag::Unknown(tag) => return Err(LineError::UnknownTag(tag.clone())),
        };

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tag_and_fields() {
        let (tag, fields) = split_line(r#"DRV:0,2,999,12,"BD-RE HL-DT-ST","FOO_BAR","/dev/sr0""#);
        assert_eq!(tag, Tag::Drv);
        assert_eq!(
            fields,
            ["0", "2", "999", "12", "BD-RE HL-DT-ST", "FOO_BAR", "/dev/sr0"]
        );
    }

    #[test]
    fn quoted_commas() {
        let (tag, fields) = split_line(r#"CINFO:30,0,"Foo, Bar""#);
        assert_eq!(tag, Tag::Cinfo);
        assert_eq!(fields, ["30", "0", "Foo, Bar"]);

        let (_, fields) = split_line(r#"TINFO:0,30,0,"Foo Bar - 42 chapter(s) , 12.3 MB""#);
        assert_eq!(fields[3], "Foo Bar - 42 chapter(s) , 12.3 MB");

        let (_, fields) = split_line(r#"TINFO:0,26,0,"1,(2,4,6),11-22,23-44""#);
        assert_eq!(fields, ["0", "26", "0", "1,(2,4,6),11-22,23-44"]);
    }

    #[test]
    fn empty_fields() {
        let (_, fields) = split_line(r#"DRV:1,256,999,0,"","","""#);
        assert_eq!(fields, ["1", "256", "999", "0", "", "", ""]);

        let (_, fields) = split_line("PRGV:1,,3");
        assert_eq!(fields, ["1", "", "3"]);

        let (_, fields) = split_line("TCOUNT:");
        assert!(fields.is_empty());
    }

    #[test]
    fn trailing_newline_and_whitespace() {
        let (tag, fields) = split_line("TCOUNT:42\r\n");
        assert_eq!(tag, Tag::Tcount);
        assert_eq!(fields, ["42"]);
    }

    #[test]
    fn unterminated_quote() {
        let (_, fields) = split_line(r#"CINFO:2,0,"Foo, Bar"#);
        assert_eq!(fields, ["2", "0", "Foo, Bar"]);
    }

    #[test]
    fn backslashes_are_literal() {
        let (_, fields) = split_line(r#"DRV:0,2,999,1,"BD-RE","FOO_BAR","D:\""#);
        assert_eq!(fields.last(), Some(&r"D:\"));

        let (_, fields) = split_line(r#"CINFO:2,0,"Foo \"Bar\", Baz""#);
        assert_eq!(fields, ["2", "0", r"Foo \", r#" Baz""#]);
    }

    #[test]
    fn lines_without_tag() {
        for line in ["", "hello world", "lower:1,2", "Mixed:1", ":1,2,3"] {
            let (tag, fields) = split_line(line);
            assert_eq!(tag, Tag::Unknown(String::new()), "line {line:?}");
            assert!(fields.is_empty());
        }
    }

    #[test]
    fn parse_message() {
        let record = Record::parse(
            r#"MSG:1005,0,1,"MakeMKV v1.17.2 linux(x64-release) started","%1 started","MakeMKV v1.17.2 linux(x64-release)""#,
        )
        .unwrap();
        assert_eq!(
            record,
            Record::Message {
                code: 1005,
                message: "MakeMKV v1.17.2 linux(x64-release) started",
                format: Some("%1 started"),
                params: vec!["MakeMKV v1.17.2 linux(x64-release)"],
            }
        );
    }

    #[test]
    fn parse_attributes() {
        assert_eq!(
            Record::parse(r#"SINFO:0,3,1,6201,"Video""#).unwrap(),
            Record::StreamInfo {
                title: 0,
                stream: 3,
                attribute: Attribute {
                    id: 1,
                    code: 6201,
                    value: "Video",
                },
            }
        );
        assert_eq!(
            Record::parse(r#"CINFO:2,0,"Foo Bar""#).unwrap(),
            Record::DiscInfo(Attribute {
                id: 2,
                code: 0,
                value: "Foo Bar",
            })
        );
    }

    #[test]
    fn parse_progress() {
        assert_eq!(
            Record::parse("PRGV:512,1024,65536").unwrap(),
            Record::ProgressValue {
                current: 512,
                total: Some(1024),
                max: 65536,
            }
        );
        assert_eq!(
            Record::parse("PRGV:1,,3").unwrap(),
            Record::ProgressValue {
                current: 1,
                total: None,
                max: 3,
            }
        );
        assert_eq!(
            Record::parse(r#"PRGC:5018,0,"Scanning CD-ROM devices""#).unwrap(),
            Record::ProgressCurrent {
                code: 5018,
                id: 0,
                name: "Scanning CD-ROM devices",
            }
        );
    }

    #[test]
    fn missing_fields() {
        assert_eq!(
            Record::parse(r#"DRV:0,2,999,12,"drive","disc""#),
            Err(LineError::MissingField {
                tag: Tag::Drv,
                index: 6,
            })
        );
        assert_eq!(
            Record::parse("TCOUNT:"),
            Err(LineError::MissingField {
                tag: Tag::Tcount,
                index: 0,
            })
        );
    }

    #[test]
    fn invalid_integers() {
        assert!(matches!(
            Record::parse("TCOUNT:many"),
            Err(LineError::InvalidInteger { index: 0, .. })
        ));
        assert!(matches!(
            Record::parse(r#"TINFO:-1,2,0,"Foo""#),
            Err(LineError::InvalidInteger { index: 0, .. })
        ));
    }

    #[test]
    fn huge_ordinals() {
        assert!(matches!(
            Record::parse(r#"TINFO:4000000000,2,0,"Foo""#),
            Err(LineError::OrdinalOutOfRange { .. })
        ));
    }

    #[test]
    fn unknown_tags() {
        assert_eq!(
            Record::parse("FOO:1,2"),
            Err(LineError::UnknownTag("FOO".into()))
        );
        assert_eq!(
            Record::parse("garbage"),
            Err(LineError::UnknownTag(String::new()))
        );
    }
}
