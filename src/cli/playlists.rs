use tabled::Table;

use crate::{info, types::PlaylistTableRow};

const RECENT_PLAYLISTS: usize = 10;

/// Lists the most recently assembled playlists, or the ones the current
/// user materialized.
pub async fn list_playlists(mine: bool) {
    let library = super::load_library().await;

    let rows: Vec<PlaylistTableRow> = if mine {
        let user_id = super::current_user().await;
        library
            .user_playlists(&user_id)
            .into_iter()
            .map(|(p, _)| PlaylistTableRow {
                id: p.id,
                name: p.name.clone(),
                songs: p.length,
                duration: p.duration.clone(),
            })
            .collect()
    } else {
        library
            .recent_playlists(RECENT_PLAYLISTS)
            .into_iter()
            .map(|p| PlaylistTableRow {
                id: p.id,
                name: p.name.clone(),
                songs: p.length,
                duration: p.duration.clone(),
            })
            .collect()
    };

    if rows.is_empty() {
        info!("No playlists yet.");
        return;
    }

    println!("{}", Table::new(rows));
    info!(
        "{} bands and {} songs in the library",
        library.count_bands(),
        library.count_songs()
    );
}
