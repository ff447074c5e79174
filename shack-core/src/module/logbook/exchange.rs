//! Sent-exchange computation

use super::contest::ContestPolicy;

/// What goes into the "sent exchange" field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentExchange {
    pub value: String,
    pub editable: bool,
    /// Input hint for editable exchanges
    pub placeholder: Option<&'static str>,
}

/// Inputs the exchange may depend on
#[derive(Debug, Clone, Copy)]
pub struct ExchangeInputs<'a> {
    /// Next serial for the active counter
    pub serial: u32,
    pub rst_sent: &'a str,
    pub region_code: &'a str,
    /// Last free text typed for this contest
    pub free_text: Option<&'a str>,
}

pub fn format_serial(serial: u32) -> String {
    format!("{:03}", serial)
}

/// Build the sent exchange for `policy`.
pub fn compute_exchange(policy: ContestPolicy, inputs: ExchangeInputs<'_>) -> SentExchange {
    match policy {
        ContestPolicy::SerialOnly => SentExchange {
            value: format_serial(inputs.serial),
            editable: false,
            placeholder: None,
        },
        ContestPolicy::SerialWithRegion => {
            let value = format!(
                "{} {} {}",
                inputs.rst_sent.trim(),
                format_serial(inputs.serial),
                inputs.region_code.trim().to_uppercase()
            );
            SentExchange {
                value: value.trim().to_string(),
                editable: false,
                placeholder: None,
            }
        }
        ContestPolicy::Fixed(text) => SentExchange {
            value: text.to_string(),
            editable: false,
            placeholder: None,
        },
        ContestPolicy::FreeText(hint) => SentExchange {
            value: inputs.free_text.unwrap_or_default().to_string(),
            editable: true,
            placeholder: Some(hint),
        },
    }
}

/// Key of the serial counter for a mode, optionally scoped to a contest
pub fn serial_key(contest: &str, mode: &str, per_contest: bool) -> String {
    let mode = mode.trim().to_uppercase();
    if per_contest {
        format!("{}/{}", contest.trim().to_lowercase(), mode)
    } else {
        mode
    }
}

/// Default signal report for a mode: RST for CW, RS otherwise
pub fn default_rst(mode: &str) -> &'static str {
    if mode.trim().eq_ignore_ascii_case("CW") {
        "599"
    } else {
        "59"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(serial: u32) -> ExchangeInputs<'static> {
        ExchangeInputs {
            serial,
            rst_sent: "59",
            region_code: "hme",
            free_text: None,
        }
    }

    #[test]
    fn test_serial_only() {
        let ex = compute_exchange(ContestPolicy::SerialOnly, inputs(7));
        assert_eq!(ex.value, "007");
        assert!(!ex.editable);
        assert_eq!(compute_exchange(ContestPolicy::SerialOnly, inputs(1234)).value, "1234");
    }

    #[test]
    fn test_serial_with_region_uppercases() {
        let ex = compute_exchange(ContestPolicy::SerialWithRegion, inputs(12));
        assert_eq!(ex.value, "59 012 HME");
        assert!(!ex.editable);
    }

    #[test]
    fn test_serial_with_region_without_code() {
        let mut i = inputs(3);
        i.region_code = "";
        assert_eq!(compute_exchange(ContestPolicy::SerialWithRegion, i).value, "59 003");
    }

    #[test]
    fn test_fixed_and_free_text() {
        let fixed = compute_exchange(ContestPolicy::Fixed("HYVÄÄ JOULUA"), inputs(1));
        assert_eq!(fixed.value, "HYVÄÄ JOULUA");
        assert!(!fixed.editable);

        let mut i = inputs(1);
        i.free_text = Some("16");
        let free = compute_exchange(ContestPolicy::FreeText("Your CQ Zone"), i);
        assert_eq!(free.value, "16");
        assert!(free.editable);
        assert_eq!(free.placeholder, Some("Your CQ Zone"));

        let empty = compute_exchange(ContestPolicy::FreeText("Exchange"), inputs(1));
        assert_eq!(empty.value, "");
    }

    #[test]
    fn test_serial_key_scope() {
        assert_eq!(serial_key("cq-wpx", "cw", false), "CW");
        assert_eq!(serial_key("CQ-WPX", "cw", true), "cq-wpx/CW");
    }

    #[test]
    fn test_default_rst() {
        assert_eq!(default_rst("CW"), "599");
        assert_eq!(default_rst("SSB"), "59");
        assert_eq!(default_rst("FM"), "59");
    }
}
