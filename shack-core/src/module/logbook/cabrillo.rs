//! Cabrillo 3.0 log serializer

use shack_common::ContactRecord;
use std::fmt::Write;

use super::ExportError;
use super::store::{CabrilloCategory, ContestInfo};

/// Everything the header block needs
#[derive(Debug, Clone, Copy)]
pub struct CabrilloHeader<'a> {
    pub contest: &'a str,
    pub callsign: &'a str,
    pub category: &'a CabrilloCategory,
    pub created_by: &'a str,
    pub info: &'a ContestInfo,
}

/// Cabrillo mode code: `SSB` is logged as `PH`, anything else upper-cased
pub fn cabrillo_mode(mode: &str) -> String {
    let mode = mode.trim().to_uppercase();
    if mode == "SSB" { "PH".to_string() } else { mode }
}

/// Frequency column derived from the band label, e.g. "20m" → "20"
pub fn cabrillo_frequency(band: &str) -> String {
    let band = band.trim();
    band.strip_suffix(['m', 'M']).unwrap_or(band).to_string()
}

/// Serialize `records` as a Cabrillo log.
///
/// Fails with [`ExportError::NothingToExport`] for an empty log.
pub fn to_cabrillo(records: &[ContactRecord], header: &CabrilloHeader<'_>) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let own_call = header.callsign.trim().to_uppercase();
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "START-OF-LOG: 3.0");
    let _ = writeln!(out, "CALLSIGN: {}", own_call);
    let _ = writeln!(out, "CONTEST: {}", header.contest.to_uppercase());
    let _ = writeln!(out, "CATEGORY-OPERATOR: {}", header.category.operator);
    let _ = writeln!(out, "CATEGORY-BAND: {}", header.category.band);
    let _ = writeln!(out, "CATEGORY-MODE: {}", header.category.mode);
    let _ = writeln!(out, "CATEGORY-POWER: {}", header.category.power);
    let _ = writeln!(out, "CREATED-BY: {}", header.created_by);
    let _ = writeln!(out, "NAME: {}", header.info.name);
    let _ = writeln!(out, "ADDRESS: {}", header.info.address);

    let soapbox: Vec<&str> = header.info.soapbox.lines().collect();
    if soapbox.is_empty() {
        let _ = writeln!(out, "SOAPBOX: ");
    }
    for line in soapbox {
        let _ = writeln!(out, "SOAPBOX: {}", line);
    }

    for qso in records {
        let _ = writeln!(
            out,
            "QSO: {} {} {} {} {} {} {} {} {} {}",
            cabrillo_frequency(&qso.band),
            cabrillo_mode(&qso.mode),
            qso.date,
            qso.time.replace(':', ""),
            own_call,
            qso.rst_sent,
            qso.exch_sent,
            qso.call.to_uppercase(),
            qso.rst_rcvd,
            qso.exch_rcvd,
        );
    }

    let _ = writeln!(out, "END-OF-LOG:");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qso(call: &str, mode: &str) -> ContactRecord {
        ContactRecord {
            date: "2024-06-01".to_string(),
            time: "14:05".to_string(),
            call: call.to_string(),
            band: "20m".to_string(),
            mode: mode.to_string(),
            rst_sent: "59".to_string(),
            rst_rcvd: "57".to_string(),
            exch_sent: "001".to_string(),
            exch_rcvd: "042".to_string(),
            ..Default::default()
        }
    }

    fn render(records: &[ContactRecord], soapbox: &str) -> Result<String, ExportError> {
        let category = CabrilloCategory::default();
        let info = ContestInfo {
            name: "Matti".to_string(),
            address: "Lahti".to_string(),
            soapbox: soapbox.to_string(),
        };
        to_cabrillo(
            records,
            &CabrilloHeader {
                contest: "sral-talvi",
                callsign: "oh3xyz",
                category: &category,
                created_by: "shackbook",
                info: &info,
            },
        )
    }

    #[test]
    fn test_qso_line_column_order() {
        let log = render(&[qso("oh2bh", "SSB")], "").unwrap();
        assert!(log.contains("QSO: 20 PH 2024-06-01 1405 OH3XYZ 59 001 OH2BH 57 042\n"));
    }

    #[test]
    fn test_header_and_footer() {
        let log = render(&[qso("oh2bh", "CW")], "").unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines[0], "START-OF-LOG: 3.0");
        assert_eq!(lines[1], "CALLSIGN: OH3XYZ");
        assert_eq!(lines[2], "CONTEST: SRAL-TALVI");
        assert!(lines.contains(&"CATEGORY-OPERATOR: SINGLE-OP"));
        assert!(lines.contains(&"CATEGORY-POWER: LOW"));
        assert!(lines.contains(&"NAME: Matti"));
        assert_eq!(*lines.last().unwrap(), "END-OF-LOG:");
    }

    #[test]
    fn test_mode_translation() {
        assert_eq!(cabrillo_mode("SSB"), "PH");
        assert_eq!(cabrillo_mode("CW"), "CW");
        assert_eq!(cabrillo_mode("ft8"), "FT8");
        assert_eq!(cabrillo_mode("fm"), "FM");
    }

    #[test]
    fn test_frequency_from_band() {
        assert_eq!(cabrillo_frequency("20m"), "20");
        assert_eq!(cabrillo_frequency("160M"), "160");
        assert_eq!(cabrillo_frequency("14000"), "14000");
    }

    #[test]
    fn test_multiline_soapbox() {
        let log = render(&[qso("oh2bh", "CW")], "Fun contest\nThanks all").unwrap();
        assert!(log.contains("SOAPBOX: Fun contest\nSOAPBOX: Thanks all\n"));
    }

    #[test]
    fn test_missing_fields_emit_empty() {
        let sparse = ContactRecord {
            call: "oh1aa".to_string(),
            mode: "CW".to_string(),
            ..Default::default()
        };
        let log = render(&[sparse], "").unwrap();
        assert!(log.contains("QSO:  CW   OH3XYZ   OH1AA  \n"));
    }

    #[test]
    fn test_empty_log_refused() {
        assert!(matches!(render(&[], ""), Err(ExportError::NothingToExport)));
    }
}
