// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Tree-ish parse of `primary.xml` (already gzip-decompressed): every
//! `<package>` element lists `name`, `location/@href`, `size/@package` and
//! `checksum`. Acceptable as a whole-document parse for typical repo sizes
//! (see design notes); a streaming variant would be a drop-in replacement if
//! a distribution's primary.xml grows past that.

use quick_xml::events::Event;
use quick_xml::Reader;

use repomirror_core::Error;

use crate::package::{Checksum, PackageRecord};

pub fn parse_primary(xml: &[u8]) -> Result<Vec<PackageRecord>, Error> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut packages = Vec::new();
    let mut buf = Vec::new();

    let mut name: Option<String> = None;
    let mut location: Option<String> = None;
    let mut size: Option<u64> = None;
    let mut checksum_algorithm: Option<String> = None;
    let mut checksum_value: Option<String> = None;
    let mut in_package = false;
    let mut in_name = false;
    let mut in_checksum = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let local = local_name(e.name().as_ref());
                match local.as_str() {
                    "package" => {
                        in_package = true;
                        name = None;
                        location = None;
                        size = None;
                        checksum_algorithm = None;
                        checksum_value = None;
                    }
                    "name" if in_package => in_name = true,
                    "location" if in_package => location = attr(e, "href"),
                    "size" if in_package => {
                        size = attr(e, "package").and_then(|v| v.parse().ok());
                    }
                    "checksum" if in_package => {
                        in_checksum = true;
                        checksum_algorithm = attr(e, "type");
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if in_name {
                    name = Some(e.unescape().map_err(xml_err)?.to_string());
                } else if in_checksum {
                    checksum_value = Some(e.unescape().map_err(xml_err)?.to_string());
                }
            }
            Event::End(ref e) => {
                let local = local_name(e.name().as_ref());
                match local.as_str() {
                    "name" => in_name = false,
                    "checksum" => in_checksum = false,
                    "package" => {
                        in_package = false;
                        if let (Some(name), Some(location)) = (name.take(), location.take()) {
                            let checksum = match (checksum_algorithm.take(), checksum_value.take())
                            {
                                (Some(algorithm), Some(value)) => Some(Checksum { algorithm, value }),
                                _ => None,
                            };
                            packages.push(PackageRecord {
                                name,
                                location,
                                size: size.take(),
                                checksum,
                            });
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

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(packages)
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
