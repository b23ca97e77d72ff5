use std::future::Future;

use models::User;
use reqwest::{Response, Url};

use crate::error::ClientError;

/// The four calls the client makes against the directory service.
pub trait DirectoryApi {
    fn list(&self) -> impl Future<Output = Result<Vec<User>, ClientError>> + Send;
    fn create(&self, user: &User) -> impl Future<Output = Result<User, ClientError>> + Send;
    fn update(
        &self,
        id: &str,
        user: &User,
    ) -> impl Future<Output = Result<User, ClientError>> + Send;
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// `DirectoryApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    http: reqwest::Client,
    users_url: Url,
}

impl HttpDirectoryApi {
    pub fn new(users_url: &str) -> Result<Self, ClientError> {
        let users_url = Url::parse(users_url)
            .map_err(|e| ClientError::Other(format!("invalid directory url {users_url}: {e}")))?;
        if users_url.cannot_be_a_base() {
            return Err(ClientError::Other(format!(
                "invalid directory url {users_url}"
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            users_url,
        })
    }

    fn user_url(&self, id: &str) -> Url {
        let mut url = self.users_url.clone();
        // checked in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }
}

/// Turn a non-success status into `ClientError::Response`, keeping the body text.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, %body, "directory request rejected");
    Err(ClientError::Response {
        status: status.as_u16(),
        body,
    })
}

impl DirectoryApi for HttpDirectoryApi {
    async fn list(&self) -> Result<Vec<User>, ClientError> {
        let response = self.http.get(self.users_url.clone()).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create(&self, user: &User) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.users_url.clone())
            .json(user)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update(&self, id: &str, user: &User) -> Result<User, ClientError> {
        let response = self.http.put(self.user_url(id)).json(user).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.user_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }
}
