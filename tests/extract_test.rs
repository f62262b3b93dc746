use xmsync::extract::{dedupe_track_uris, extract_track_uris, first_spotify_uri, uri_from_share_url};
use xmsync::types::{StationTrack, TrackLink, TrackMeta, TrackUri};

// Helper function to create a station track with the given (site, url) links
fn create_station_track(name: &str, links: &[(&str, &str)]) -> StationTrack {
    StationTrack {
        track: Some(TrackMeta {
            name: name.to_string(),
            artists: vec![format!("{} Artist", name)],
        }),
        links: links
            .iter()
            .map(|(site, url)| TrackLink {
                site: site.to_string(),
                url: url.to_string(),
            })
            .collect(),
    }
}

#[test]
fn test_uri_from_share_url_strips_query_string() {
    let uri = uri_from_share_url("https://open.spotify.com/track/ABC123?si=zzz").unwrap();
    assert_eq!(uri.as_str(), "spotify:track:ABC123");
}

#[test]
fn test_uri_from_share_url_accepts_bare_suffix() {
    // Both known URL shapes must normalize to the same URI
    let bare = uri_from_share_url("https://open.spotify.com/track/ABC123").unwrap();
    let with_query = uri_from_share_url("https://open.spotify.com/track/ABC123?si=zzz").unwrap();
    assert_eq!(bare, with_query);
}

#[test]
fn test_uri_from_share_url_rejects_invalid_ids() {
    // Empty id after the last slash
    assert!(uri_from_share_url("https://open.spotify.com/track/").is_none());
    // Query string only
    assert!(uri_from_share_url("https://open.spotify.com/track/?si=zzz").is_none());
    // Non-alphanumeric id
    assert!(uri_from_share_url("https://open.spotify.com/track/ab%20cd").is_none());
    assert!(uri_from_share_url("").is_none());
}

#[test]
fn test_first_spotify_uri_first_match_wins() {
    // A non-matching site first, then the qualifying Spotify link
    let record = create_station_track(
        "Song",
        &[
            ("youtube", "https://youtu.be/xyz"),
            ("spotify", "https://open.spotify.com/track/ABC123?si=zzz"),
            ("spotify", "https://open.spotify.com/track/LATER999"),
        ],
    );

    let uri = first_spotify_uri(&record).unwrap();
    assert_eq!(uri.as_str(), "spotify:track:ABC123");
}

#[test]
fn test_first_spotify_uri_skips_unparseable_spotify_links() {
    let record = create_station_track(
        "Song",
        &[
            ("spotify", "https://open.spotify.com/track/"),
            ("spotify", "https://open.spotify.com/track/GOOD42"),
        ],
    );

    let uri = first_spotify_uri(&record).unwrap();
    assert_eq!(uri.as_str(), "spotify:track:GOOD42");
}

#[test]
fn test_record_without_qualifying_link_contributes_nothing() {
    let no_links = create_station_track("Silent", &[]);
    let wrong_site = create_station_track("Elsewhere", &[("youtube", "https://youtu.be/xyz")]);

    assert!(first_spotify_uri(&no_links).is_none());
    assert!(first_spotify_uri(&wrong_site).is_none());
    assert!(extract_track_uris(&[no_links, wrong_site]).is_empty());
}

#[test]
fn test_extract_track_uris_preserves_order_and_bounds_length() {
    let records = vec![
        create_station_track("First", &[("spotify", "https://open.spotify.com/track/AAA1")]),
        create_station_track("NoLink", &[("youtube", "https://youtu.be/xyz")]),
        create_station_track(
            "Second",
            &[
                ("youtube", "https://youtu.be/abc"),
                ("spotify", "https://open.spotify.com/track/BBB2?si=q"),
            ],
        ),
        create_station_track("Third", &[("spotify", "https://open.spotify.com/track/CCC3")]),
    ];

    let total_links: usize = records.iter().map(|r| r.links.len()).sum();
    let uris = extract_track_uris(&records);

    // At most one URI per record, never more than the total number of links
    assert!(uris.len() <= total_links);
    assert_eq!(
        uris,
        vec![
            TrackUri::new("AAA1"),
            TrackUri::new("BBB2"),
            TrackUri::new("CCC3"),
        ]
    );
}

#[test]
fn test_extract_track_uris_passes_duplicates_through() {
    // Rotations repeat tracks; without opting in, duplicates survive
    let records = vec![
        create_station_track("Hit", &[("spotify", "https://open.spotify.com/track/HIT1")]),
        create_station_track("Other", &[("spotify", "https://open.spotify.com/track/OTH2")]),
        create_station_track("Hit", &[("spotify", "https://open.spotify.com/track/HIT1")]),
    ];

    let uris = extract_track_uris(&records);
    assert_eq!(uris.len(), 3);
    assert_eq!(uris[0], uris[2]);
}

#[test]
fn test_dedupe_track_uris_keeps_first_occurrence() {
    let mut uris = vec![
        TrackUri::new("HIT1"),
        TrackUri::new("OTH2"),
        TrackUri::new("HIT1"),
        TrackUri::new("NEW3"),
    ];

    dedupe_track_uris(&mut uris);

    assert_eq!(
        uris,
        vec![
            TrackUri::new("HIT1"),
            TrackUri::new("OTH2"),
            TrackUri::new("NEW3"),
        ]
    );
}
