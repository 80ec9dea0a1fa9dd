use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use setplaylist::{
    assembly::PlaylistAssembler,
    catalog::{Catalog, SetlistArchive},
    errors::{Error, Result},
    management::Library,
    types::{Artist, CreatePlaylistResponse, ExternalUrls, FmArtist, Setlist, SetlistPage, Track},
};

fn track(id: &str, name: &str, duration_ms: u64) -> Track {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "duration_ms": duration_ms,
        "album": { "name": "Punisher" },
        "artists": [{ "name": "Phoebe Bridgers" }]
    }))
    .unwrap()
}

fn red_rocks() -> Setlist {
    serde_json::from_value(json!({
        "id": "63de4613",
        "eventDate": "23-08-2019",
        "artist": { "mbid": "mbid-phoebe", "name": "Phoebe Bridgers" },
        "venue": {
            "name": "Red Rocks Amphitheatre",
            "city": {
                "name": "Morrison",
                "state": "Colorado",
                "country": { "code": "US", "name": "United States" }
            }
        },
        "tour": { "name": "Punisher Tour" },
        "sets": { "set": [
            { "song": [
                { "name": "Motion Sickness" },
                { "name": "Unknown Demo" },
                { "name": "" },
                { "name": "Kyoto" }
            ]},
            { "encore": 1, "song": [
                { "name": "Boom" },
                { "name": "Motion Sickness" }
            ]}
        ]}
    }))
    .unwrap()
}

/// In-memory streaming catalog that records every call.
#[derive(Default)]
struct FakeCatalog {
    tracks: HashMap<String, Track>,
    top: Vec<Track>,
    calls: Mutex<Vec<String>>,
    added: Mutex<Vec<Vec<String>>>,
    unauthorized: bool,
    /// Title whose search answers 401, as if the token expired mid-run.
    expires_at: Option<&'static str>,
}

impl FakeCatalog {
    fn new() -> Self {
        let mut tracks = HashMap::new();
        tracks.insert(
            "Motion Sickness".to_string(),
            track("t-motion", "Motion Sickness", 229_000),
        );
        tracks.insert("Kyoto".to_string(), track("t-kyoto", "Kyoto", 184_400));
        Self {
            tracks,
            ..Self::default()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls_starting_with(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
        self.record(format!("search_artists:{}", query));
        Ok(Vec::new())
    }

    async fn artist(&self, artist_id: &str) -> Result<Artist> {
        self.record(format!("artist:{}", artist_id));
        Ok(serde_json::from_value(json!({
            "id": artist_id,
            "name": "Phoebe Bridgers",
            "images": [{ "url": "https://i.scdn.co/image/phoebe", "height": 640, "width": 640 }]
        }))
        .unwrap())
    }

    async fn search_track(&self, title: &str, artist_name: &str) -> Result<Option<Track>> {
        self.record(format!("search_track:{}:{}", title, artist_name));
        if self.unauthorized || self.expires_at == Some(title) {
            return Err(Error::Api {
                service: "Spotify",
                status: StatusCode::UNAUTHORIZED,
                body: String::new(),
            });
        }
        if title == "Boom" {
            return Err(Error::Api {
                service: "Spotify",
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            });
        }
        Ok(self.tracks.get(title).cloned())
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        self.record(format!("top_tracks:{}", artist_id));
        Ok(self.top.clone())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        _description: &str,
    ) -> Result<CreatePlaylistResponse> {
        self.record(format!("create_playlist:{}", user_id));
        let n = self.calls_starting_with("create_playlist");
        let id = format!("remote-{}", n);
        Ok(CreatePlaylistResponse {
            external_urls: ExternalUrls {
                spotify: Some(format!("https://open.spotify.com/playlist/{}", id)),
            },
            id,
            name: name.to_string(),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.record(format!("add_tracks:{}", playlist_id));
        self.added.lock().unwrap().push(uris.to_vec());
        Ok(())
    }
}

#[derive(Default)]
struct FakeArchive {
    artists: Vec<FmArtist>,
    calls: Mutex<Vec<String>>,
}

impl FakeArchive {
    fn with_artists(names: &[(&str, &str)]) -> Self {
        Self {
            artists: names
                .iter()
                .map(|(mbid, name)| {
                    serde_json::from_value(json!({ "mbid": mbid, "name": name })).unwrap()
                })
                .collect(),
            ..Self::default()
        }
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl SetlistArchive for FakeArchive {
    async fn search_artists(&self, name: &str) -> Result<Vec<FmArtist>> {
        self.calls.lock().unwrap().push(format!("search_artists:{}", name));
        Ok(self.artists.clone())
    }

    async fn artist_setlists(&self, mbid: &str, page: u32) -> Result<SetlistPage> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("artist_setlists:{}:{}", mbid, page));
        Ok(SetlistPage {
            setlist: vec![red_rocks()],
            total: 1,
            page,
            items_per_page: 20,
        })
    }

    async fn setlist(&self, setlist_id: &str) -> Result<Setlist> {
        self.calls.lock().unwrap().push(format!("setlist:{}", setlist_id));
        if setlist_id == "63de4613" {
            Ok(red_rocks())
        } else {
            Err(Error::NotFound(format!("Setlist {}", setlist_id)))
        }
    }
}

async fn library() -> (tempfile::TempDir, Library) {
    let dir = tempfile::tempdir().unwrap();
    let library = Library::load_from(&dir.path().join("library.json"))
        .await
        .unwrap();
    (dir, library)
}

#[tokio::test]
async fn resolve_band_uses_the_setlist_hint_without_searching() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let band = assembler
        .resolve_band("sp-phoebe", Some("mbid-phoebe"))
        .await
        .unwrap();

    assert_eq!(band.name, "Phoebe Bridgers");
    assert_eq!(band.setlistfm_artist_id.as_deref(), Some("mbid-phoebe"));
    assert_eq!(band.photo.as_deref(), Some("https://i.scdn.co/image/phoebe"));
    assert_eq!(archive.count("search_artists"), 0);
}

#[tokio::test]
async fn resolve_band_matches_archive_artist_by_name() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::with_artists(&[
        ("mbid-tribute", "Phoebe Bridgers Tribute"),
        ("mbid-phoebe", "phoebe  bridgers"),
    ]);
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let band = assembler.resolve_band("sp-phoebe", None).await.unwrap();
    assert_eq!(band.setlistfm_artist_id.as_deref(), Some("mbid-phoebe"));

    // Second lookup is served from the library
    assembler.resolve_band("sp-phoebe", None).await.unwrap();
    assert_eq!(catalog.calls_starting_with("artist:"), 1);
    assert_eq!(archive.count("search_artists"), 1);
}

#[tokio::test]
async fn resolve_band_without_archive_match_keeps_band() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::with_artists(&[("mbid-other", "Someone Else")]);
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let band = assembler.resolve_band("sp-phoebe", None).await.unwrap();
    assert_eq!(band.setlistfm_artist_id, None);
}

#[tokio::test]
async fn band_overview_pages_setlists_without_storing() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::with_artists(&[("mbid-phoebe", "Phoebe Bridgers")]);

    {
        let assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);
        let overview = assembler.band_overview("sp-phoebe", 0).await.unwrap();

        assert_eq!(overview.artist.name, "Phoebe Bridgers");
        assert_eq!(overview.setlistfm_artist_id.as_deref(), Some("mbid-phoebe"));
        assert_eq!(overview.setlists.page, 1);
        assert_eq!(overview.setlists.setlist.len(), 1);
        assert!(overview.stored_band.is_none());
    }

    assert_eq!(library.count_bands(), 0);
    assert_eq!(archive.count("artist_setlists:mbid-phoebe:1"), 1);
}

#[tokio::test]
async fn preview_setlist_lists_songs_without_storing() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::default();

    {
        let assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);
        let preview = assembler
            .preview_setlist("sp-phoebe", "63de4613")
            .await
            .unwrap();

        assert!(!preview.saved);
        assert_eq!(preview.duration, None);
        assert_eq!(preview.tour_name, "Punisher Tour");
        assert_eq!(preview.venue_location, "Morrison, Colorado");
        assert_eq!(
            preview.songs,
            vec!["Motion Sickness", "Unknown Demo", "Kyoto", "Boom", "Motion Sickness"]
        );
    }

    assert_eq!(library.count_bands(), 0);
    assert_eq!(catalog.calls_starting_with("search_track"), 0);
}

#[tokio::test]
async fn create_setlist_playlist_reports_misses_and_keeps_order() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let report = assembler
        .create_setlist_playlist("user-1", "sp-phoebe", "63de4613")
        .await
        .unwrap();

    assert!(!report.reused);
    assert_eq!(report.spotify_playlist_id, "remote-1");
    assert_eq!(
        report.uris,
        vec![
            "spotify:track:t-motion",
            "spotify:track:t-kyoto",
            "spotify:track:t-motion"
        ]
    );
    assert_eq!(report.not_included, vec!["Unknown Demo", "Boom"]);
    assert_eq!(
        catalog.calls_starting_with("search_track:Kyoto:Phoebe Bridgers"),
        1
    );
    assert_eq!(catalog.added.lock().unwrap().clone(), vec![report.uris.clone()]);

    let playlist = library.find_playlist("63de4613", 1).unwrap().clone();
    assert_eq!(playlist.length, 3);
    assert_eq!(playlist.duration, "0hrs. 10min. 42sec.");
    assert_eq!(library.count_songs(), 2);
    assert_eq!(library.user_playlists("user-1").len(), 1);
}

#[tokio::test]
async fn second_create_reuses_stored_songs() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let first = assembler
        .create_setlist_playlist("user-1", "sp-phoebe", "63de4613")
        .await
        .unwrap();
    let searches = catalog.calls_starting_with("search_track");

    let second = assembler
        .create_setlist_playlist("user-2", "sp-phoebe", "63de4613")
        .await
        .unwrap();

    assert!(second.reused);
    assert_eq!(second.uris, first.uris);
    assert!(second.not_included.is_empty());
    assert_eq!(second.spotify_playlist_id, "remote-2");
    assert_eq!(catalog.calls_starting_with("search_track"), searches);
    assert_eq!(archive.count("setlist:"), 1);

    let preview = assembler
        .preview_setlist("sp-phoebe", "63de4613")
        .await
        .unwrap();
    assert!(preview.saved);
    assert_eq!(preview.songs, vec!["Motion Sickness", "Kyoto", "Motion Sickness"]);
}

#[tokio::test]
async fn unauthorized_search_aborts_creation() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog {
        unauthorized: true,
        ..FakeCatalog::new()
    };
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let err = assembler
        .create_setlist_playlist("user-1", "sp-phoebe", "63de4613")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status, .. } if status == StatusCode::UNAUTHORIZED));
    assert_eq!(catalog.calls_starting_with("search_track"), 1);
    assert_eq!(catalog.calls_starting_with("create_playlist"), 0);
}

#[tokio::test]
async fn unauthorized_create_leaves_no_playlist_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let mut library = Library::load_from(&path).await.unwrap();
    let archive = FakeArchive::default();

    let expired = FakeCatalog {
        expires_at: Some("Kyoto"),
        ..FakeCatalog::new()
    };
    PlaylistAssembler::new(&expired, &archive, &mut library)
        .create_setlist_playlist("user-1", "sp-phoebe", "63de4613")
        .await
        .unwrap_err();
    assert_eq!(expired.calls_starting_with("search_track"), 3);
    assert!(library.recent_playlists(10).is_empty());
    assert_eq!(library.count_songs(), 0);

    // Persisting for another reason must not leak a half-built playlist
    PlaylistAssembler::new(&expired, &archive, &mut library)
        .toggle_favorite("user-1", "sp-phoebe")
        .await
        .unwrap();
    let mut reloaded = Library::load_from(&path).await.unwrap();
    assert!(reloaded.recent_playlists(10).is_empty());

    let catalog = FakeCatalog::new();
    let report = PlaylistAssembler::new(&catalog, &archive, &mut reloaded)
        .create_setlist_playlist("user-1", "sp-phoebe", "63de4613")
        .await
        .unwrap();

    assert!(!report.reused);
    assert_eq!(catalog.calls_starting_with("search_track"), 5);
    assert_eq!(report.uris.len(), 3);
    assert_eq!(report.not_included, vec!["Unknown Demo", "Boom"]);
}

#[tokio::test]
async fn hype_playlist_without_setlist_archive() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog {
        top: vec![track("top0", "Song 0", 200_000), track("top1", "Song 1", 200_000)],
        ..FakeCatalog::new()
    };
    let archive: Option<FakeArchive> = None;
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let report = assembler
        .create_hype_playlist("user-1", "sp-phoebe")
        .await
        .unwrap();
    assert_eq!(report.uris, vec!["spotify:track:top1", "spotify:track:top0"]);

    let band = assembler.resolve_band("sp-phoebe", None).await.unwrap();
    assert_eq!(band.setlistfm_artist_id, None);

    let err = assembler
        .preview_setlist("sp-phoebe", "63de4613")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn track_without_uri_gets_one_from_its_id() {
    let (_dir, mut library) = library().await;
    let bare: Track = serde_json::from_value(json!({
        "id": "t-bare",
        "name": "Garden Song",
        "duration_ms": 219_000
    }))
    .unwrap();
    let catalog = FakeCatalog {
        top: vec![bare],
        ..FakeCatalog::new()
    };
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let report = assembler
        .create_hype_playlist("user-1", "sp-phoebe")
        .await
        .unwrap();
    assert_eq!(report.uris, vec!["spotify:track:t-bare"]);
}

#[tokio::test]
async fn missing_setlist_is_not_found() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let err = assembler
        .create_setlist_playlist("user-1", "sp-phoebe", "nope")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(catalog.calls_starting_with("create_playlist"), 0);
}

#[tokio::test]
async fn hype_playlist_follows_hype_order() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog {
        top: (0..10)
            .map(|i| track(&format!("top{}", i), &format!("Song {}", i), 200_000))
            .collect(),
        ..FakeCatalog::new()
    };
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let preview = assembler.preview_hype("sp-phoebe").await.unwrap();
    assert_eq!(preview.name, "Phoebe Bridgers Hype-Up");
    assert_eq!(
        preview.songs,
        vec![
            "Song 1", "Song 3", "Song 5", "Song 7", "Song 9", "Song 8", "Song 6", "Song 4",
            "Song 2", "Song 0"
        ]
    );

    let report = assembler
        .create_hype_playlist("user-1", "sp-phoebe")
        .await
        .unwrap();
    assert_eq!(report.uris.len(), 10);
    assert_eq!(report.uris[0], "spotify:track:top1");
    assert_eq!(report.uris[9], "spotify:track:top0");
    assert_eq!(report.playlist.setlistfm_setlist_id, "Hype");

    let again = assembler
        .create_hype_playlist("user-1", "sp-phoebe")
        .await
        .unwrap();
    assert!(again.reused);
    assert_eq!(catalog.calls_starting_with("top_tracks"), 2);
}

#[tokio::test]
async fn hype_playlist_with_few_top_tracks_skips_missing_positions() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog {
        top: (0..3)
            .map(|i| track(&format!("top{}", i), &format!("Song {}", i), 60_000))
            .collect(),
        ..FakeCatalog::new()
    };
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let report = assembler
        .create_hype_playlist("user-1", "sp-phoebe")
        .await
        .unwrap();
    assert_eq!(
        report.uris,
        vec!["spotify:track:top1", "spotify:track:top2", "spotify:track:top0"]
    );
}

#[tokio::test]
async fn empty_playlist_is_created_without_adding_tracks() {
    let (_dir, mut library) = library().await;
    let catalog = FakeCatalog::default();
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let report = assembler
        .create_hype_playlist("user-1", "sp-phoebe")
        .await
        .unwrap();

    assert!(report.uris.is_empty());
    assert_eq!(catalog.calls_starting_with("create_playlist"), 1);
    assert_eq!(catalog.calls_starting_with("add_tracks"), 0);
}

#[tokio::test]
async fn toggle_favorite_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let mut library = Library::load_from(&path).await.unwrap();
    let catalog = FakeCatalog::new();
    let archive = FakeArchive::default();
    let mut assembler = PlaylistAssembler::new(&catalog, &archive, &mut library);

    let (band, favorite) = assembler
        .toggle_favorite("user-1", "sp-phoebe")
        .await
        .unwrap();
    assert!(favorite);

    let reloaded = Library::load_from(&path).await.unwrap();
    assert!(reloaded.is_favorite("user-1", band.id));

    let (_, favorite) = assembler
        .toggle_favorite("user-1", "sp-phoebe")
        .await
        .unwrap();
    assert!(!favorite);
}
