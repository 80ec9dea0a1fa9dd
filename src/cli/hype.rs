use crate::{assembly::PlaylistAssembler, error};

use super::setlist::{print_preview, print_report};

pub async fn show_hype(spotify_artist_id: String) {
    let catalog = super::user_client().await;
    let archive = super::optional_archive_client();
    let mut library = super::load_library().await;
    let assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let pb = super::spinner("Loading top tracks...");
    let result = assembler.preview_hype(&spotify_artist_id).await;
    pb.finish_and_clear();

    match result {
        Ok(preview) => print_preview(&preview),
        Err(e) => error!("Failed to load top tracks: {}", e),
    }
}

pub async fn create_hype(spotify_artist_id: String) {
    let user_id = super::current_user().await;
    let catalog = super::user_client().await;
    let archive = super::optional_archive_client();
    let mut library = super::load_library().await;
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let pb = super::spinner("Creating hype playlist...");
    let result = assembler
        .create_hype_playlist(&user_id, &spotify_artist_id)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(report) => print_report(&report),
        Err(e) => error!("Failed to create hype playlist: {}", e),
    }
}
