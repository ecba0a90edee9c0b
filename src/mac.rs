//! Reading a MAC package (`.wgt`)
//!
//! A package is a zip archive whose `config.xml` names the component. Only the root
//! element line is inspected, e.g.
//! `<widget xmlns="http://wirecloud.conwet.fi.upm.es/ns/macdescription/1" vendor="CoNWeT" name="map" version="1.0">`.

use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::OnceLock;
use zip::ZipArchive;

use crate::error::NgsiError;

const CONFIG_XML: &str = "config.xml";

fn root_element() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"<(widget|operator|mashup)\s+xmlns="([^"]+)"\s+vendor="([^"]+)"\s+name="([^"]+)"\s+version="([^"]+)"\s*>"#,
        )
        .expect("valid regex")
    })
}

/// Return the component type and its `vendor/name/version` id
pub fn get_mac_name(wgt: &[u8]) -> Result<(String, String), NgsiError> {
    const FUNC: &str = "getMacName";

    let mut archive =
        ZipArchive::new(Cursor::new(wgt)).map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    let mut file = match archive.by_name(CONFIG_XML) {
        Ok(file) => file,
        Err(_) => return Err(NgsiError::new(FUNC, 2, "config.xml not found")),
    };

    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| NgsiError::wrap("configXML", 1, e))?;
    parse_config_xml(&String::from_utf8_lossy(&buf))
}

/// Find the root element line of a `config.xml` document
pub fn parse_config_xml(xml: &str) -> Result<(String, String), NgsiError> {
    const FUNC: &str = "configXML";

    for line in xml.lines() {
        let s = line.trim();
        if !(s.starts_with("<mashup") || s.starts_with("<widget") || s.starts_with("<operator")) {
            continue;
        }
        return match root_element().captures(s) {
            Some(caps) => Ok((
                caps[1].to_string(),
                format!("{}/{}/{}", &caps[3], &caps[4], &caps[5]),
            )),
            None => Err(NgsiError::new(FUNC, 2, "config.xml error")),
        };
    }
    Err(NgsiError::new(FUNC, 3, "config.xml error"))
}
