//! ADIF (`.adi`) serializer

use shack_common::ContactRecord;

use super::ExportError;

/// `<TAG:length>value`; length counts characters
fn adif_field(tag: &str, value: &str) -> String {
    format!("<{}:{}>{}", tag, value.chars().count(), value)
}

fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn adif_record(qso: &ContactRecord) -> String {
    let fields = [
        adif_field("QSO_DATE", &digits_only(&qso.date)),
        adif_field("TIME_ON", &digits_only(&qso.time)),
        adif_field("CALL", &qso.call.trim().to_uppercase()),
        adif_field("BAND", &qso.band.trim().to_uppercase()),
        adif_field("MODE", &qso.mode.trim().to_uppercase()),
        adif_field("RST_SENT", &qso.rst_sent),
        adif_field("RST_RCVD", &qso.rst_rcvd),
        adif_field("STX_STRING", &qso.exch_sent),
        adif_field("SRX_STRING", &qso.exch_rcvd),
    ];
    format!("{} <EOR>", fields.join(" "))
}

/// Serialize `records` as ADIF.
///
/// The header is two lines (`<created_by> ADIF export`, `<EOH>`) followed by
/// a blank line; records are separated by blank lines.
pub fn to_adif(records: &[ContactRecord], created_by: &str) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let body: Vec<String> = records.iter().map(adif_record).collect();
    Ok(format!("{} ADIF export\n<EOH>\n\n{}\n", created_by, body.join("\n\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qso() -> ContactRecord {
        ContactRecord {
            date: "2024-06-01".to_string(),
            time: "14:05".to_string(),
            call: "oh2bh".to_string(),
            band: "20m".to_string(),
            mode: "ssb".to_string(),
            rst_sent: "59".to_string(),
            rst_rcvd: "59".to_string(),
            exch_sent: "59 001 HME".to_string(),
            exch_rcvd: "012".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_date_and_time_digits_only() {
        let adif = to_adif(&[qso()], "shackbook").unwrap();
        assert!(adif.contains("<QSO_DATE:8>20240601"));
        assert!(adif.contains("<TIME_ON:4>1405"));
    }

    #[test]
    fn test_fields_upper_cased_and_mapped() {
        let adif = to_adif(&[qso()], "shackbook").unwrap();
        assert!(adif.contains("<CALL:5>OH2BH"));
        assert!(adif.contains("<BAND:3>20M"));
        assert!(adif.contains("<MODE:3>SSB"));
        assert!(adif.contains("<STX_STRING:10>59 001 HME"));
        assert!(adif.contains("<SRX_STRING:3>012 <EOR>"));
    }

    #[test]
    fn test_header_and_record_separation() {
        let adif = to_adif(&[qso(), qso()], "shackbook").unwrap();
        assert!(adif.starts_with("shackbook ADIF export\n<EOH>\n\n<QSO_DATE:8>"));
        assert_eq!(adif.matches("<EOR>").count(), 2);
        assert!(adif.contains("<EOR>\n\n<QSO_DATE:8>"));
        assert!(adif.ends_with("<EOR>\n"));
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(adif_field("STX_STRING", "HYVÄÄ JOULUA"), "<STX_STRING:12>HYVÄÄ JOULUA");
        assert_eq!(adif_field("RST_RCVD", ""), "<RST_RCVD:0>");
    }

    #[test]
    fn test_empty_log_refused() {
        assert!(matches!(to_adif(&[], "x"), Err(ExportError::NothingToExport)));
    }
}
