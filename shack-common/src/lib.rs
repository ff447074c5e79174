//! Data types shared between the shackbook library and its front ends.

pub mod types;

pub use types::{ContactRecord, LatLng, Locale, Program};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_round_trip_str() {
        for program in Program::ALL {
            assert_eq!(program.as_str().parse::<Program>().unwrap(), program);
        }
        assert!("iota".parse::<Program>().is_err());
    }

    #[test]
    fn test_contact_record_lenient_deserialize() {
        let record: ContactRecord = serde_json::from_str(r#"{"call":"OH2BH","mode":"CW"}"#).unwrap();
        assert_eq!(record.call, "OH2BH");
        assert_eq!(record.mode, "CW");
        assert_eq!(record.exch_sent, "");
        assert!(record.id.is_nil());
    }

    #[test]
    fn test_locale_serde_names() {
        assert_eq!(serde_json::to_string(&Locale::Fi).unwrap(), "\"fi\"");
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
    }
}
