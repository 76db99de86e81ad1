use crate::{
    Res, info,
    spotify::SpotifyClient,
    success,
    types::{
        AddTrackToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse, PlaylistSession,
        ResolvedTrack, User,
    },
    warning,
};

impl SpotifyClient {
    /// Creates a private, non-collaborative playlist owned by `user_id`.
    pub async fn create_playlist(&self, user_id: &str, name: &str) -> Res<CreatePlaylistResponse> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: String::new(),
            public: false,
            collaborative: false,
        };

        let playlist = self
            .http
            .post(self.url(&format!("users/{}/playlists", user_id)))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<CreatePlaylistResponse>()
            .await?;
        Ok(playlist)
    }

    /// Appends a single track to a playlist.
    ///
    /// A non-success response is returned as an error carrying the status and
    /// the response body.
    pub async fn add_track(&self, playlist_id: &str, uri: &str) -> Res<()> {
        let body = AddTrackToPlaylistRequest {
            uris: vec![uri.to_string()],
        };

        let response = self
            .http
            .post(self.url(&format!("playlists/{}/tracks", playlist_id)))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{} {}", status, body).into());
        }
        Ok(())
    }
}

/// Creates the playlist and adds every resolved track in chart order.
///
/// Each addition is its own request. A failed addition is logged and skipped;
/// it neither stops the remaining additions nor undoes earlier ones. The
/// session is returned once every addition has been attempted.
pub async fn build_playlist(
    client: &SpotifyClient,
    owner: &User,
    name: &str,
    tracks: &[ResolvedTrack],
) -> Res<PlaylistSession> {
    let playlist = client.create_playlist(&owner.id, name).await?;
    success!("Playlist {} created", playlist.name);

    let uris: Vec<&str> = tracks.iter().filter_map(|t| t.uri.as_deref()).collect();
    info!("Add {} tracks to playlist {}", uris.len(), playlist.name);

    let mut added = 0;
    for uri in &uris {
        match client.add_track(&playlist.id, uri).await {
            Ok(()) => added += 1,
            Err(e) => warning!("Failed to add track URI {}: {}", uri, e),
        }
    }
    success!("Added {}/{} tracks to {}", added, uris.len(), playlist.name);

    Ok(PlaylistSession {
        access_token: client.access_token().to_string(),
        playlist_id: playlist.id,
        playlist_url: playlist.external_urls.spotify,
        owner_user_id: owner.id.clone(),
    })
}
