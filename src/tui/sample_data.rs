use chrono::NaiveDate;
use workday_calendar::{
    app::AppState,
    document::{ColorToken, Document, Hue, PersonDraft, Shade},
};

/// Seeds a demo household into an empty document. Nothing is written to disk
/// until the first real edit.
pub fn add_sample_data(app: &mut AppState) {
    if !app.document.persons().is_empty() || !app.document.workdays().is_empty() {
        tracing::info!("Document not empty, skipping sample data");
        return;
    }

    let mut document = Document { colors: app.document.colors.clone(), ..Document::default() };
    for (name, hue) in [("Christian", Hue::Green), ("Dennis", Hue::Blue)] {
        if let Err(e) = document.upsert_person(PersonDraft::new(name, Some(ColorToken::new(hue, Shade::S300))), None) {
            tracing::warn!("Skipping sample person {}: {}", name, e);
        }
    }

    let dennis = Some(1);
    let christian = Some(0);
    let workdays = [
        ((2025, 1, 1), dennis, true),
        ((2025, 1, 11), dennis, false),
        ((2025, 1, 12), dennis, false),
        ((2025, 1, 18), christian, false),
        ((2025, 1, 19), christian, false),
        ((2025, 1, 25), dennis, false),
        ((2025, 1, 26), dennis, false),
        ((2025, 2, 1), dennis, true),
        ((2025, 2, 2), christian, false),
    ];

    for ((year, month, day), person, special) in workdays {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else { continue };
        if document.assign_date(date, person).is_err() {
            continue;
        }
        if special {
            document.toggle_special(date);
        }
    }

    app.replace_document(document);
    app.selected_person = Some(0);
    app.info("Loaded sample data");
}
