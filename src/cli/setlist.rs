use tabled::Table;

use crate::{
    assembly::{AssemblyReport, PlaylistAssembler, PlaylistPreview},
    error, info, success,
    types::SongTableRow,
    warning,
};

pub(super) fn print_preview(preview: &PlaylistPreview) {
    info!("{}", preview.name);
    info!("{}", preview.description);
    info!(
        "Venue: {} | Date: {} | Location: {} | Tour: {}",
        preview.venue_name, preview.event_date, preview.venue_location, preview.tour_name
    );
    if let Some(duration) = &preview.duration {
        info!("Duration: {}", duration);
    }

    let rows: Vec<SongTableRow> = preview
        .songs
        .iter()
        .enumerate()
        .map(|(i, title)| SongTableRow {
            position: i + 1,
            title: title.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));

    if preview.saved {
        info!("Already saved, creating it again reuses these songs.");
    }
}

pub(super) fn print_report(report: &AssemblyReport) {
    success!(
        "Created '{}' with {} tracks ({})",
        report.playlist.name,
        report.uris.len(),
        report.playlist.duration
    );
    if let Some(url) = &report.spotify_playlist_url {
        info!("{}", url);
    }
    if report.reused {
        info!("Reused the stored playlist, no songs were searched again.");
    }
    if !report.not_included.is_empty() {
        warning!(
            "{} songs could not be found on Spotify:",
            report.not_included.len()
        );
        for title in &report.not_included {
            warning!("  {}", title);
        }
    }
}

pub async fn show_setlist(spotify_artist_id: String, setlist_id: String) {
    let catalog = super::user_client().await;
    let archive = super::archive_client();
    let mut library = super::load_library().await;
    let assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let pb = super::spinner("Loading setlist...");
    let result = assembler
        .preview_setlist(&spotify_artist_id, &setlist_id)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(preview) => print_preview(&preview),
        Err(e) => error!("Failed to load setlist {}: {}", setlist_id, e),
    }
}

pub async fn create_setlist(spotify_artist_id: String, setlist_id: String) {
    let user_id = super::current_user().await;
    let catalog = super::user_client().await;
    let archive = super::archive_client();
    let mut library = super::load_library().await;
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let pb = super::spinner("Resolving songs and creating playlist...");
    let result = assembler
        .create_setlist_playlist(&user_id, &spotify_artist_id, &setlist_id)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(report) => print_report(&report),
        Err(e) => error!("Failed to create playlist: {}", e),
    }
}
