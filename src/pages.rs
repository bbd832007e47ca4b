use crate::error::{Result, ResultExt};
use crate::query::{
    CommentOptions, Fields, ListOptions, Params, COMMENT_DETAIL_FIELDS, COMMENT_FIELDS,
    MANAGED_PAGE_FIELDS, PAGE_FIELDS, POST_FIELDS,
};
use crate::response::Collection;
use crate::rest::GraphClient;
use crate::types::{Comment, CommentsResponse, Page, PostsResponse};

impl GraphClient {
    /// Get a page. An empty selection requests `PAGE_FIELDS`.
    pub fn get_page(&self, page_id: &str, fields: &Fields) -> Result<Page> {
        let params = Params::new().with("fields", fields.resolve(PAGE_FIELDS));
        self.get(page_id, params).context("getting page")
    }

    /// List the pages managed by the credential's user.
    ///
    /// Needs a user-scoped credential; with a page credential the API error is returned as is.
    pub fn get_managed_pages(&self) -> Result<Vec<Page>> {
        let params = Params::new().with("fields", MANAGED_PAGE_FIELDS.join(","));
        let pages: Collection<Page> = self
            .get("me/accounts", params)
            .context("getting pages (requires user access token)")?;
        Ok(pages.data)
    }

    /// List page posts
    pub fn get_posts(&self, page_id: &str, options: &ListOptions) -> Result<PostsResponse> {
        let mut params = Params::new();
        params.set_limit(options.limit);
        params.set("fields", options.fields.resolve(POST_FIELDS));
        self.get(&format!("{}/posts", page_id), params)
            .context("getting posts")
    }

    /// List comments on a post, always with the count summary
    pub fn get_post_comments(&self, post_id: &str, options: &CommentOptions) -> Result<CommentsResponse> {
        let mut params = Params::new();
        params.set_limit(options.limit);
        params.set("order", options.order.as_str());
        params.set("summary", "true");
        params.set("fields", options.fields.resolve(COMMENT_FIELDS));
        self.get(&format!("{}/comments", post_id), params)
            .context("getting comments")
    }

    /// List replies to a comment
    pub fn get_comment_replies(&self, comment_id: &str, options: &ListOptions) -> Result<CommentsResponse> {
        let mut params = Params::new();
        params.set_limit(options.limit);
        params.set("fields", options.fields.resolve(COMMENT_FIELDS));
        self.get(&format!("{}/comments", comment_id), params)
            .context("getting comment replies")
    }

    /// Get a single comment, including its parent reference by default
    pub fn get_comment(&self, comment_id: &str, fields: &Fields) -> Result<Comment> {
        let params = Params::new().with("fields", fields.resolve(COMMENT_DETAIL_FIELDS));
        self.get(comment_id, params).context("getting comment")
    }
}
