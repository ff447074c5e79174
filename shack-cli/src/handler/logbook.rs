//! Logbook and export commands

use anyhow::{Context, Result};
use chrono::Utc;
use shack_common::ContactRecord;
use shack_core::module::i18n::Translations;
use shack_core::module::logbook::{
    CONTESTS, ContactDraft, ContestPolicy, ExportError, ExportFile, Logbook, LogbookError, SentExchange,
    StateBackend,
};

use super::Session;
use crate::cli::{ExportCommand, ExportFormat, InfoArgs, LogCommand};

fn contact_row(number: usize, c: &ContactRecord) -> String {
    format!(
        "{:>4}  {} {}  {:<12} {:<5} {:<5} {:>4} {:>4}  {:<16} {}",
        number, c.date, c.time, c.call, c.band, c.mode, c.rst_sent, c.rst_rcvd, c.exch_sent, c.exch_rcvd
    )
}

fn policy_summary(policy: ContestPolicy) -> String {
    match policy {
        ContestPolicy::Fixed(value) => format!("fixed \"{}\"", value),
        ContestPolicy::SerialOnly => "serial".to_string(),
        ContestPolicy::SerialWithRegion => "report + serial + region".to_string(),
        ContestPolicy::FreeText(hint) => format!("free text ({})", hint),
    }
}

fn exchange_line(tr: &Translations, exchange: &SentExchange) -> String {
    let value = if exchange.value.is_empty() {
        exchange.placeholder.unwrap_or("")
    } else {
        exchange.value.as_str()
    };
    tr.format("log.next_exchange", &[("exchange", value)])
}

fn show_form<B: StateBackend>(logbook: &Logbook<B>, tr: &Translations) {
    let sel = logbook.selections();
    let contest = logbook.contest();
    println!("{}: {} [{}]", tr.get("log.contest"), contest.id, policy_summary(contest.policy));
    println!("{}: {}  {}: {}  RST: {}", tr.get("log.band"), sel.band, tr.get("log.mode"), sel.mode, sel.rst_sent);
    if !sel.region_code.is_empty() {
        println!("{}: {}", tr.get("log.region"), sel.region_code);
    }
    println!(
        "CATEGORY: {} {} {} {}",
        sel.category.operator, sel.category.band, sel.category.mode, sel.category.power
    );
    if contest.policy.uses_serial() {
        println!("{}: {:03}", tr.get("log.next_serial"), logbook.next_serial());
    }
    println!("{}", exchange_line(tr, &logbook.sent_exchange()));
}

pub async fn run_log(command: LogCommand, session: &Session) -> Result<()> {
    let mut logbook = session.open_logbook()?;
    let tr = session.translations(logbook.locale()).await;

    match command {
        LogCommand::Add {
            call,
            rcvd,
            sent,
            date,
            time,
            rst_sent,
            rst_rcvd,
        } => {
            let draft = ContactDraft {
                call,
                date,
                time,
                rst_sent,
                rst_rcvd,
                exch_rcvd: rcvd,
                exch_sent: sent,
            };
            let record = logbook.submit(draft, Utc::now())?;
            println!(
                "{}",
                tr.format("log.saved", &[("call", record.call.as_str()), ("exchange", record.exch_sent.as_str())])
            );
            println!("{}", exchange_line(&tr, &logbook.sent_exchange()));
        }
        LogCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(logbook.contacts())?);
            } else if logbook.contacts().is_empty() {
                println!("{}", tr.get("log.empty"));
            } else {
                for (i, contact) in logbook.contacts().iter().enumerate() {
                    println!("{}", contact_row(i + 1, contact));
                }
            }
        }
        LogCommand::Delete { number } => {
            let index = number
                .checked_sub(1)
                .ok_or_else(|| anyhow::anyhow!("Contact numbers start at 1"))?;
            let removed = logbook.delete(index)?;
            println!("{}", tr.format("log.deleted", &[("call", removed.call.as_str())]));
        }
        LogCommand::Contest { id: None } => {
            let active = logbook.contest().id;
            for contest in CONTESTS {
                let marker = if contest.id == active { "*" } else { " " };
                println!("{} {:<20} {}", marker, contest.id, policy_summary(contest.policy));
            }
        }
        LogCommand::Contest { id: Some(id) } => {
            let contest = logbook.select_contest(&id)?;
            println!("{}", tr.format("log.contest_selected", &[("contest", contest.id)]));
            println!("{}", exchange_line(&tr, &logbook.sent_exchange()));
        }
        LogCommand::Mode { mode } => {
            logbook.select_mode(&mode)?;
            show_form(&logbook, &tr);
        }
        LogCommand::Band { band } => {
            logbook.select_band(&band)?;
            show_form(&logbook, &tr);
        }
        LogCommand::Rst { rst } => {
            logbook.set_rst_sent(&rst)?;
            println!("{}", exchange_line(&tr, &logbook.sent_exchange()));
        }
        LogCommand::Region { code } => {
            logbook.set_region_code(&code)?;
            println!("{}", exchange_line(&tr, &logbook.sent_exchange()));
        }
        LogCommand::Exchange { text } => {
            logbook.set_free_text_exchange(&text)?;
            println!("{}", exchange_line(&tr, &logbook.sent_exchange()));
        }
        LogCommand::Category {
            operator,
            band,
            mode,
            power,
        } => {
            let mut category = logbook.selections().category.clone();
            let upper = |v: Option<String>, current: &mut String| {
                if let Some(v) = v {
                    *current = v.trim().to_uppercase();
                }
            };
            upper(operator, &mut category.operator);
            upper(band, &mut category.band);
            upper(mode, &mut category.mode);
            upper(power, &mut category.power);
            logbook.set_category(category)?;
            show_form(&logbook, &tr);
        }
        LogCommand::Info(InfoArgs { name, address, soapbox }) => {
            let mut info = logbook.contest_info().clone();
            if let Some(name) = name {
                info.name = name;
            }
            if let Some(address) = address {
                info.address = address;
            }
            if let Some(soapbox) = soapbox {
                info.soapbox = soapbox;
            }
            logbook.set_contest_info(info)?;
            println!("{}", tr.get("settings.saved"));
        }
        LogCommand::Show => show_form(&logbook, &tr),
    }

    Ok(())
}

pub async fn run_export(args: ExportCommand, session: &Session) -> Result<()> {
    let logbook = session.open_logbook()?;
    let tr = session.translations(logbook.locale()).await;
    let now = Utc::now();

    let result = match args.format {
        ExportFormat::Cabrillo => logbook.export_cabrillo(now),
        ExportFormat::Adif => logbook.export_adif(now),
    };

    let ExportFile { file_name, content } = match result {
        Ok(file) => file,
        Err(LogbookError::Export(ExportError::NothingToExport)) => {
            println!("{}", tr.get("export.nothing"));
            return Ok(());
        }
        Err(LogbookError::Export(ExportError::MissingContestInfo)) => {
            println!("{}", tr.get("export.missing_info"));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.stdout {
        print!("{}", content);
        return Ok(());
    }

    let dir = args.output.unwrap_or_else(|| session.config.export_dir.clone());
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(&file_name);
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Exported {} contacts to {}", logbook.contacts().len(), path.display());
    println!("{}", tr.format("export.written", &[("file", path.display().to_string().as_str())]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shack_common::Locale;

    #[test]
    fn test_contact_row() {
        let contact = ContactRecord {
            date: "2024-06-01".to_string(),
            time: "12:34".to_string(),
            call: "OH2ABC".to_string(),
            band: "20m".to_string(),
            mode: "CW".to_string(),
            rst_sent: "599".to_string(),
            rst_rcvd: "599".to_string(),
            exch_sent: "001".to_string(),
            exch_rcvd: "012".to_string(),
            ..Default::default()
        };
        let row = contact_row(3, &contact);
        assert!(row.starts_with("   3  2024-06-01 12:34  OH2ABC"));
        assert!(row.ends_with("012"));
    }

    #[test]
    fn test_exchange_line_uses_placeholder_when_empty() {
        let tr = Translations::empty(Locale::En);
        let exchange = SentExchange {
            value: String::new(),
            editable: true,
            placeholder: Some("name + QTH"),
        };
        // empty table renders the key
        assert_eq!(exchange_line(&tr, &exchange), "log.next_exchange");

        let tr = Translations::from_json(Locale::En, r#"{"log":{"next_exchange":"Sent: {exchange}"}}"#).unwrap();
        assert_eq!(exchange_line(&tr, &exchange), "Sent: name + QTH");
    }

    #[test]
    fn test_policy_summary() {
        assert_eq!(policy_summary(ContestPolicy::SerialOnly), "serial");
        assert_eq!(policy_summary(ContestPolicy::Fixed("TT")), "fixed \"TT\"");
    }
}
