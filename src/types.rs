//! Graph API records.
//!
//! Every field is optional on the wire; absent values decode to their
//! defaults and are skipped again on serialization.

use crate::response::{Collection, Paging};
use crate::time::GraphTime;
use serde::{Deserialize, Serialize};

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// A Facebook page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_list: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub fan_count: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub followers_count: i64,
    #[serde(rename = "checkins", skip_serializing_if = "is_zero")]
    pub checkins_count: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub talking_about_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<Picture>,
    #[serde(rename = "cover", skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<CoverPhoto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<Hours>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_published: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_verified: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub can_post: bool,
    /// Page-scoped credential, only present for managers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Page category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Profile picture wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Picture {
    pub data: PictureData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PictureData {
    pub height: i64,
    pub width: i64,
    pub is_silhouette: bool,
    pub url: String,
}

/// Page cover photo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverPhoto {
    pub id: String,
    pub source: String,
    pub offset_y: i64,
    pub offset_x: i64,
}

/// Page address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Opening hours, keyed the way the API reports the first slot of each day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hours {
    #[serde(rename = "mon_1_open", skip_serializing_if = "Option::is_none")]
    pub monday: Option<String>,
    #[serde(rename = "tue_1_open", skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<String>,
    #[serde(rename = "wed_1_open", skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<String>,
    #[serde(rename = "thu_1_open", skip_serializing_if = "Option::is_none")]
    pub thursday: Option<String>,
    #[serde(rename = "fri_1_open", skip_serializing_if = "Option::is_none")]
    pub friday: Option<String>,
    #[serde(rename = "sat_1_open", skip_serializing_if = "Option::is_none")]
    pub saturday: Option<String>,
    #[serde(rename = "sun_1_open", skip_serializing_if = "Option::is_none")]
    pub sunday: Option<String>,
}

/// A page post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_type: Option<String>,
    pub created_time: GraphTime,
    #[serde(skip_serializing_if = "GraphTime::is_zero")]
    pub updated_time: GraphTime,
    #[serde(rename = "permalink_url", skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_published: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

/// Post privacy settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Privacy {
    pub value: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friends: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub name: String,
    pub link: String,
}

/// A comment or reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_time: GraphTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Author>,
    #[serde(skip_serializing_if = "is_zero")]
    pub like_count: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub comment_count: i64,
    #[serde(skip_serializing_if = "is_false")]
    pub user_likes: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub can_like: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub can_comment: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub can_remove: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub can_hide: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentComment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub message_tags: Vec<MessageTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink_url: Option<String>,
}

/// Comment author as selected by `from{id,name,picture}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<Picture>,
}

/// Parent reference of a reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParentComment {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "GraphTime::is_zero")]
    pub created_time: GraphTime,
}

/// Media or link attached to a comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub image: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub height: i64,
    pub width: i64,
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Profile or page mention inside a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTag {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: i64,
    pub length: i64,
}

/// Comment listing: collection plus the requested count summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsResponse {
    pub data: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<CommentSummary>,
}

impl CommentsResponse {
    /// Total reported by the summary, zero when absent
    pub fn total_count(&self) -> i64 {
        self.summary.as_ref().map_or(0, |s| s.total_count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    pub total_count: i64,
    #[serde(skip_serializing_if = "is_false")]
    pub can_comment: bool,
}

/// Result of a photo upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

/// A page photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub created_time: GraphTime,
    #[serde(skip_serializing_if = "GraphTime::is_zero")]
    pub updated_time: GraphTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<Album>,
    #[serde(skip_serializing_if = "is_zero")]
    pub width: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub height: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub id: String,
    pub name: String,
}

/// One insight metric series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insight {
    pub name: String,
    pub period: String,
    pub values: Vec<InsightValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A data point. `value` is a number for most metrics and an object for
/// breakdown metrics such as `post_reactions_by_type_total`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightValue {
    pub value: serde_json::Value,
    pub end_time: GraphTime,
}

pub type InsightsResponse = Collection<Insight>;

pub type PostsResponse = Collection<Post>;

/// Access token debug information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenInfo {
    pub app_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub application: String,
    pub data_access_expires_at: i64,
    pub expires_at: i64,
    pub is_valid: bool,
    pub scopes: Vec<String>,
    pub user_id: String,
}

/// The user (or page) behind the credential
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
