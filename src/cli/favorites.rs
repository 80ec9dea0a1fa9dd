use tabled::Table;

use crate::{assembly::PlaylistAssembler, error, info, success, types::ArtistTableRow};

pub async fn toggle_favorite(spotify_artist_id: String) {
    let user_id = super::current_user().await;
    let catalog = super::user_client().await;
    let archive = super::archive_client();
    let mut library = super::load_library().await;
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    match assembler.toggle_favorite(&user_id, &spotify_artist_id).await {
        Ok((band, true)) => success!("Added {} to favorites", band.name),
        Ok((band, false)) => success!("Removed {} from favorites", band.name),
        Err(e) => error!("Failed to update favorites: {}", e),
    }
}

pub async fn list_favorites() {
    let user_id = super::current_user().await;
    let library = super::load_library().await;

    let mut bands = library.favorites(&user_id);
    if bands.is_empty() {
        info!("No favorites yet. Add one with setplaylist favorite <artist-id>.");
        return;
    }

    bands.sort_by_key(|b| b.name.to_lowercase());
    let rows: Vec<ArtistTableRow> = bands
        .into_iter()
        .map(|b| ArtistTableRow {
            id: b.spotify_artist_id.clone(),
            name: b.name.clone(),
            genres: String::new(),
        })
        .collect();

    println!("{}", Table::new(rows));
}
