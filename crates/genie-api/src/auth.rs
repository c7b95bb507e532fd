// Account login
//
// The login endpoint returns an `account_hash` that acts as the session
// token. It is not a bearer token: later calls carry it in the URL path.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::GenieClient;
use crate::error::Error;
use crate::models::LoginResponse;

impl GenieClient {
    /// Exchange email/password for an account hash.
    ///
    /// `POST /ocapi/login` with a form body. A `200` is returned as-is, even
    /// when `account_hash` is missing; deciding whether that counts as a
    /// session is the caller's job.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        let url = self.endpoint(&["ocapi", "login"])?;

        debug!(email, "logging in");

        let form = [("email", email), ("password", password.expose_secret())];
        self.post_form_json(url, &form).await
    }
}
