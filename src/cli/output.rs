use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use makemkv::structs::report::Report;
use serde_json::{Map, Value};

use super::command::ReportFormat;

/// Formats the report for the terminal.
pub fn render(report: &Report, format: ReportFormat) -> Result<String> {
    let text = match format {
        ReportFormat::Tree => render_tree(report)?,
        ReportFormat::Json => format!("{}\n", to_sorted_json(report)?),
        ReportFormat::Yaml => serde_yaml_ng::to_string(report)?,
    };
    Ok(text)
}

/// Writes the report as JSON with sorted keys.
pub fn write_info_file(report: &Report, path: &Path) -> Result<()> {
    let json = to_sorted_json(report)?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("Failed to write disc info to {}", path.display()))?;
    log::info!("Disc info written to {}", path.display());
    Ok(())
}

fn to_sorted_json(report: &Report) -> Result<String> {
    // `Map` is ordered by key
    let value = serde_json::to_value(report)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }
}

fn render_tree(report: &Report) -> Result<String> {
    let root = match serde_json::to_value(report)? {
        Value::Object(map) => Node {
            label: "Disc Info".to_string(),
            children: object_children(&map),
        },
        other => anyhow::bail!("Unexpected report shape: {other}"),
    };

    let mut out = format!("{}\n", root.label);
    draw(&root.children, "", &mut out);
    Ok(out)
}

fn object_children(map: &Map<String, Value>) -> Vec<Node> {
    map.iter()
        .map(|(key, value)| {
            let label = humanize(key);
            match value {
                Value::Object(map) => Node {
                    label,
                    children: object_children(map),
                },
                Value::Array(items) => {
                    let item = label.strip_suffix('s').unwrap_or(&label).to_string();
                    Node {
                        children: array_children(items, &item),
                        label,
                    }
                }
                Value::String(s) => Node::leaf(format!("{label}: {s}")),
                other => Node::leaf(format!("{label}: {other}")),
            }
        })
        .collect()
}

fn array_children(items: &[Value], item: &str) -> Vec<Node> {
    items
        .iter()
        .enumerate()
        .map(|(i, value)| match value {
            Value::Object(map) => Node {
                label: format!("{item} {}", i + 1),
                children: object_children(map),
            },
            Value::Array(items) => Node {
                label: format!("{item} {}", i + 1),
                children: array_children(items, ""),
            },
            Value::String(s) => Node::leaf(humanize(s)),
            other => Node::leaf(other.to_string()),
        })
        .collect()
}

fn draw(children: &[Node], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&child.label);
        out.push('\n');
        draw(&child.children, &format!("{prefix}{indent}"), out);
    }
}

/// `metadata_langcode` -> `Metadata langcode`
fn humanize(key: &str) -> String {
    let text = key.replace('_', " ");
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use makemkv::process::builder::decode_lines;
    use makemkv::progress::NoProgress;

    fn sample() -> Report {
        decode_lines(
            [
                r#"DRV:0,2,999,1,"BD-RE","FOO_BAR","/dev/sr0""#,
                "TCOUNT:1",
                r#"CINFO:1,6209,"Blu-ray disc""#,
                r#"TINFO:0,2,0,"Dummy title""#,
                r#"SINFO:0,0,1,6201,"Video""#,
                r#"SINFO:0,0,21,0,"23.976 (120000/5005)""#,
            ],
            NoProgress,
        )
        .unwrap()
    }

    #[test]
    fn humanized_keys() {
        assert_eq!(humanize("metadata_langcode"), "Metadata langcode");
        assert_eq!(humanize("type"), "Type");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn tree() -> Result<()> {
        let tree = render(&sample(), ReportFormat::Tree)?;
        let expected = "\
Disc Info
├── Disc
│   └── Type: BD
├── Drives
│   └── Drive 1
│       ├── Device path: /dev/sr0
│       ├── Disc name: FOO_BAR
│       └── Drive name: BD-RE
├── Title count: 1
└── Titles
    └── Title 1
        ├── Name: Dummy title
        └── Streams
            └── Stream 1
                ├── Framerate: 23.976
                └── Type: video
";
        assert_eq!(tree, expected);
        Ok(())
    }

    #[test]
    fn sorted_json() -> Result<()> {
        let json = render(&sample(), ReportFormat::Json)?;
        let disc = json.find("\"disc\"").unwrap();
        let drives = json.find("\"drives\"").unwrap();
        let titles = json.find("\"titles\"").unwrap();
        assert!(disc < drives && drives < titles);

        let parsed: Report = serde_json::from_str(&json)?;
        assert_eq!(parsed, sample());
        Ok(())
    }

    #[test]
    fn yaml() -> Result<()> {
        let yaml = render(&sample(), ReportFormat::Yaml)?;
        assert!(yaml.contains("name: Dummy title"));
        assert!(yaml.contains("type: BD"));
        Ok(())
    }

    #[test]
    fn info_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("info.json");
        write_info_file(&sample(), &path)?;

        let written: Report = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(written, sample());
        Ok(())
    }
}
