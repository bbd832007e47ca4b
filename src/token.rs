use crate::error::{Result, ResultExt};
use crate::query::{Params, USER_FIELDS};
use crate::response::DataResponse;
use crate::rest::GraphClient;
use crate::types::{TokenInfo, User};

impl GraphClient {
    /// Check the credential against the identity endpoint.
    ///
    /// Every failure, whatever its cause, is reported as an invalid access token.
    pub fn validate_access_token(&self) -> Result<()> {
        let _me: User = self.get("me", Params::new()).context("invalid access token")?;
        Ok(())
    }

    /// The user (or page) the credential belongs to
    pub fn get_user_info(&self) -> Result<User> {
        let params = Params::new().with("fields", USER_FIELDS.join(","));
        self.get("me", params).context("getting user info")
    }

    /// Debug information about the credential itself
    pub fn get_token_info(&self) -> Result<TokenInfo> {
        let params = Params::new().with("input_token", self.access_token());
        let info: DataResponse<TokenInfo> = self
            .get("debug_token", params)
            .context("getting token info")?;
        Ok(info.data)
    }
}
