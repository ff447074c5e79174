//! Places search and source status

use anyhow::Result;
use serde::Serialize;
use shack_core::module::i18n::Translations;
use shack_core::module::places::{
    MIN_OBSERVER_GRID_LEN, PlaceCatalog, PlaceRecord, SourceOutcome, bearing_to, filter_places, load_places,
    observer_position,
};

use super::Session;
use crate::cli::{PlacesCommand, SearchArgs};

#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    #[serde(flatten)]
    place: &'a PlaceRecord,
    bearing: Option<u16>,
}

fn place_row(hit: &SearchHit<'_>) -> String {
    let position = match (&hit.place.position, &hit.place.locator) {
        (Some(pos), _) => pos.to_string(),
        (None, Some(locator)) => locator.clone(),
        (None, None) => "-".to_string(),
    };
    let bearing = hit.bearing.map(|b| format!("{:>3}°", b)).unwrap_or_default();
    format!(
        "{:<12} {:<5} {:<40} {:<22} {}",
        hit.place.reference,
        hit.place.program.as_str(),
        hit.place.name,
        position,
        bearing
    )
    .trim_end()
    .to_string()
}

fn status_lines(catalog: &PlaceCatalog, tr: &Translations) -> Vec<String> {
    catalog
        .statuses()
        .iter()
        .map(|status| match &status.outcome {
            SourceOutcome::Loaded { records } => tr.format(
                "places.status.loaded",
                &[("name", status.name.as_str()), ("count", records.to_string().as_str())],
            ),
            SourceOutcome::Failed { reason } => tr.format(
                "places.status.failed",
                &[("name", status.name.as_str()), ("reason", reason.as_str())],
            ),
        })
        .collect()
}

fn search(args: SearchArgs, catalog: &PlaceCatalog, session: &Session, tr: &Translations) -> Result<()> {
    let grid = args.grid.as_deref().or(session.config.home_grid.as_deref()).unwrap_or("");
    let observer = observer_position(grid);
    if observer.is_none() && !grid.is_empty() {
        tracing::debug!("No usable observer locator '{}'", grid);
    }

    let matches = filter_places(catalog.places(), args.program, &args.query);
    let hits: Vec<SearchHit<'_>> = matches
        .into_iter()
        .take(args.limit)
        .map(|place| SearchHit {
            place,
            bearing: bearing_to(observer, place),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if catalog.has_failures() {
        println!("{}", tr.get("places.incomplete"));
    }
    if hits.is_empty() {
        println!("{}", tr.get("places.no_results"));
        return Ok(());
    }
    for hit in &hits {
        println!("{}", place_row(hit));
    }
    if observer.is_none() {
        println!(
            "{}",
            tr.format("places.bearing_hint", &[("min", MIN_OBSERVER_GRID_LEN.to_string().as_str())])
        );
    }
    Ok(())
}

pub async fn run_places(command: PlacesCommand, session: &Session) -> Result<()> {
    let logbook = session.open_logbook()?;
    let tr = session.translations(logbook.locale()).await;
    let catalog = load_places(&session.config.place_sources(), &session.fetcher).await;

    match command {
        PlacesCommand::Search(args) => search(args, &catalog, session, &tr)?,
        PlacesCommand::Status => {
            for line in status_lines(&catalog, &tr) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
