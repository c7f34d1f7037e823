use crate::api::HttpApi;
use crate::paths;
use crate::session::Session;

pub mod admin;
pub mod label;
pub mod login;
pub mod note;
pub mod profile;
pub mod settings;

pub fn load_session() -> anyhow::Result<Session> {
    Session::from_path(&paths::session_path())?
        .ok_or_else(|| anyhow::anyhow!("not logged in; run `slate login` first"))
}

/// Gateway bound to the stored session token
pub fn authed_api(base_url: &str) -> anyhow::Result<(HttpApi, Session)> {
    let session = load_session()?;
    let api = HttpApi::new(base_url, Some(session.token.clone()));
    Ok((api, session))
}
