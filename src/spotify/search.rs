use crate::{
    Res, info,
    spotify::SpotifyClient,
    types::{ChartEntry, ResolvedTrack, SearchResponse, Track},
    utils, warning,
};

impl SpotifyClient {
    /// Searches the catalog for tracks matching `query`.
    pub async fn search_tracks(&self, query: &str) -> Res<Vec<Track>> {
        let response = self
            .http
            .get(self.url("search"))
            .bearer_auth(&self.access_token)
            .query(&[("q", query), ("type", "track")])
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await?;
        Ok(response.tracks.items)
    }

    /// URI of the first search hit, if there is any.
    pub async fn first_track_uri(&self, query: &str) -> Res<Option<String>> {
        let tracks = self.search_tracks(query).await?;
        Ok(tracks.into_iter().next().map(|track| track.uri))
    }
}

/// Matches one chart entry to a track.
///
/// The field query on title and primary artist is tried first. Only when it
/// has no hits at all, the free-text query with the full artist credit is
/// tried, which finds collaborations the catalog lists under a guest artist.
pub async fn resolve_track(client: &SpotifyClient, entry: &ChartEntry) -> Res<ResolvedTrack> {
    let mut uri = client
        .first_track_uri(&utils::track_query(&entry.title, &entry.primary_artist))
        .await?;

    if uri.is_none() {
        uri = client
            .first_track_uri(&utils::free_text_query(&entry.title, &entry.artist))
            .await?;
    }

    if uri.is_none() {
        warning!("Could not find track: {} by {}", entry.title, entry.artist);
    }

    Ok(ResolvedTrack {
        entry: entry.clone(),
        uri,
    })
}

/// Resolves all entries sequentially, keeping chart order.
///
/// The result has one [`ResolvedTrack`] per entry; misses carry no URI and are
/// skipped later by the playlist builder. Search request failures end the run.
pub async fn resolve_tracks(
    client: &SpotifyClient,
    entries: &[ChartEntry],
) -> Res<Vec<ResolvedTrack>> {
    let mut resolved = Vec::with_capacity(entries.len());
    for entry in entries {
        resolved.push(resolve_track(client, entry).await?);
    }

    let found = resolved.iter().filter(|r| r.uri.is_some()).count();
    info!("Resolved {}/{} chart entries", found, entries.len());
    Ok(resolved)
}
