use std::{io, path::Path};

use rand::{Rng, distr::Alphanumeric};

use crate::{Res, types::Token};

/// On-disk cache for the Spotify token.
///
/// The `auth` command writes the first token here, and every job seeds its
/// in-memory [`Credentials`](crate::spotify::Credentials) from it and writes
/// back whatever token it ends up using.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load(path: &Path) -> Res<Self> {
        let content = async_fs::read_to_string(path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token })
    }

    /// Like [`load`](Self::load), but a missing cache file yields `None`.
    /// Unreadable or malformed files are still errors.
    pub async fn load_if_present(path: &Path) -> Res<Option<Self>> {
        let content = match async_fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let token: Token = serde_json::from_str(&content)?;
        Ok(Some(Self { token }))
    }

    /// Writes the token to a sibling temp file and renames it over `path`, so
    /// readers see either the old or the new token and never a partial file.
    pub async fn persist(&self, path: &Path) -> Res<()> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(format!(".{}.tmp", suffix));

        let json = serde_json::to_string_pretty(&self.token)?;
        if let Err(e) = async_fs::write(&tmp, json).await {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = async_fs::rename(&tmp, path).await {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    pub fn into_token(self) -> Token {
        self.token
    }
}
