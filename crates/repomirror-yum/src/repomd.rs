// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Streaming parse of `repodata/repomd.xml`, the root of trust listing the
//! other metadata files (checksum + size + href per §9 design note: this one
//! is small and read once per run, so a streaming event parser is the right
//! tool; `primary.xml` gets a tree parse instead, see primary.rs).

use quick_xml::events::Event;
use quick_xml::Reader;

use repomirror_core::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoMdEntry {
    pub data_type: String,
    pub href: String,
    pub checksum_algorithm: Option<String>,
    pub checksum_value: Option<String>,
    pub size: Option<u64>,
}

pub fn parse_repomd(xml: &[u8]) -> Result<Vec<RepoMdEntry>, Error> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<RepoMdEntry> = None;
    let mut in_checksum = false;
    let mut in_size = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let local = local_name(e.name().as_ref());
                match local.as_str() {
                    "data" => {
                        let data_type = attr(e, "type").unwrap_or_default();
                        current = Some(RepoMdEntry {
                            data_type,
                            href: String::new(),
                            checksum_algorithm: None,
                            checksum_value: None,
                            size: None,
                        });
                    }
                    "location" => {
                        if let Some(cur) = current.as_mut() {
                            cur.href = attr(e, "href").unwrap_or_default();
                        }
                    }
                    "checksum" => {
                        in_checksum = true;
                        if let Some(cur) = current.as_mut() {
                            cur.checksum_algorithm = attr(e, "type");
                        }
                    }
                    "size" => in_size = true,
                    _ => {}
                }
            }
            Event::Text(e) => {
                if in_checksum {
                    if let Some(cur) = current.as_mut() {
                        cur.checksum_value = Some(e.unescape().map_err(xml_err)?.to_string());
                    }
                } else if in_size {
                    if let Some(cur) = current.as_mut() {
                        if let Ok(text) = e.unescape() {
                            if let Ok(n) = text.trim().parse::<u64>() {
                                cur.size = Some(n);
                            }
                        }
                    }
                }
            }
            Event::End(ref e) => {
                let local = local_name(e.name().as_ref());
                match local.as_str() {
                    "checksum" => in_checksum = false,
                    "size" => in_size = false,
                    "data" => {
                        if let Some(cur) = current.take() {
                            entries.push(cur);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn attr(e: &quick_xml::events::BytesStart, name: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        if a.key.as_ref() == name.as_bytes() {
            String::from_utf8(a.value.into_owned()).ok()
        } else {
            None
        }
    })
}

fn local_name(qname: &[u8]) -> String {
    let s = String::from_utf8_lossy(qname);
    s.rsplit(':').next().unwrap_or(&s).to_string()
}

fn xml_err(err: quick_xml::Error) -> Error {
    Error::Xml(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<repomd xmlns="http://linux.duke.edu/metadata/repo">
  <data type="primary">
    <checksum type="sha256">abc123</checksum>
    <location href="repodata/primary.xml.gz"/>
    <size>512</size>
  </data>
  <data type="filelists">
    <checksum type="sha256">def456</checksum>
    <location href="repodata/filelists.xml.gz"/>
    <size>256</size>
  </data>
</repomd>"#;

    #[test]
    fn parses_two_entries() {
        let entries = parse_repomd(SAMPLE.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].data_type, "primary");
        assert_eq!(entries[0].href, "repodata/primary.xml.gz");
        assert_eq!(entries[0].checksum_algorithm.as_deref(), Some("sha256"));
        assert_eq!(entries[0].checksum_value.as_deref(), Some("abc123"));
        assert_eq!(entries[0].size, Some(512));
        assert_eq!(entries[1].data_type, "filelists");
    }

    #[test]
    fn timestamp_before_size_is_not_mistaken_for_size() {
        const WITH_TIMESTAMP: &str = r#"<?xml version="1.0"?>
<repomd xmlns="http://linux.duke.edu/metadata/repo">
  <data type="primary">
    <checksum type="sha256">abc123</checksum>
    <timestamp>1699999999</timestamp>
    <location href="repodata/primary.xml.gz"/>
    <size>512</size>
  </data>
</repomd>"#;
        let entries = parse_repomd(WITH_TIMESTAMP.as_bytes()).unwrap();
        assert_eq!(entries[0].size, Some(512));
    }
}
