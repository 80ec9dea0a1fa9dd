use tabled::Table;

use crate::{
    assembly::PlaylistAssembler,
    bandsintown::BandsintownClient,
    error, info,
    management::ProfileManager,
    reconcile,
    types::{EventTableRow, SetlistTableRow},
    warning,
};

/// Shows an artist with a page of past setlists and upcoming shows.
pub async fn band(spotify_artist_id: String, page: u32) {
    let catalog = super::user_client().await;
    let archive = super::archive_client();
    let mut library = super::load_library().await;
    let assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let pb = super::spinner("Looking up artist and setlists...");
    let result = assembler.band_overview(&spotify_artist_id, page).await;
    pb.finish_and_clear();

    let overview = match result {
        Ok(overview) => overview,
        Err(e) => error!("Failed to load artist {}: {}", spotify_artist_id, e),
    };

    info!("{}", overview.artist.name);
    if !overview.artist.genres.is_empty() {
        info!("Genres: {}", overview.artist.genres.join(", "));
    }
    if let Some(photo) = reconcile::first_image(&overview.artist) {
        info!("Photo: {}", photo);
    }

    if let (Ok(profile), Some(band)) = (ProfileManager::load().await, &overview.stored_band) {
        if library.is_favorite(profile.user_id(), band.id) {
            info!("One of your favorites");
        }
    }

    match &overview.setlistfm_artist_id {
        None => warning!("No setlist.fm artist matches {}", overview.artist.name),
        Some(_) if overview.setlists.setlist.is_empty() => {
            warning!("No setlists on page {}", page)
        }
        Some(_) => {
            let rows: Vec<SetlistTableRow> = overview
                .setlists
                .setlist
                .iter()
                .map(|s| SetlistTableRow {
                    id: s.id.clone(),
                    show: reconcile::format_setlist_display(s),
                    songs: reconcile::setlist_songs(s).len(),
                })
                .collect();
            println!("{}", Table::new(rows));

            let pages = overview
                .setlists
                .total
                .div_ceil(overview.setlists.items_per_page.max(1));
            info!("Page {} of {}", overview.setlists.page.max(1), pages.max(1));
        }
    }

    let Some(bandsintown) = BandsintownClient::from_env() else {
        return;
    };

    match bandsintown.upcoming_events(&overview.artist.name).await {
        Ok(events) if events.is_empty() => info!("No upcoming shows"),
        Ok(events) => {
            let rows: Vec<EventTableRow> = events
                .into_iter()
                .map(|e| EventTableRow {
                    date: e.datetime,
                    venue: e.venue.name,
                    location: [e.venue.city, e.venue.region, e.venue.country]
                        .into_iter()
                        .filter(|p| !p.is_empty())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();
            info!("Upcoming shows");
            println!("{}", Table::new(rows));
        }
        Err(e) => warning!("Failed to load upcoming shows: {}", e),
    }
}
