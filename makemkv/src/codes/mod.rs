//! Static code tables of the makemkvcon robot protocol.
//!
//! - **Attributes** ([`attributes`]): attribute id to report field
//! - **Messages** ([`messages`]): message code to severity
//! - **Values** ([`values`]): enumeration code to canonical string
//! - **Languages** ([`language`]): ISO 639-2 to ISO 639-1

pub mod attributes;
pub mod language;
pub mod messages;
pub mod values;
