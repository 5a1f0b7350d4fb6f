use crate::model::{Id, ModelValidationError};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error as _, Unexpected},
};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use time::OffsetDateTime;

pub const DEFAULT_AUTHOR: &str = "AI Creator";
pub const EXCERPT_LEN: usize = 150;
pub const EXCERPT_ELLIPSIS: &str = "...";

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct BlogPostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Id<BlogPostMarker>,
    pub title: String,
    pub topic: Topic,
    pub author: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub published: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub published_at: Option<OffsetDateTime>,
}

/// Listing projection of a [`BlogPost`].
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSummary {
    pub id: Id<BlogPostMarker>,
    pub title: String,
    pub topic: Topic,
    pub author: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub published: bool,
    pub excerpt: String,
}

/// What publishing a [`BlogPost`] reports back. Content and creation time are left out.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedBlogPost {
    pub id: Id<BlogPostMarker>,
    pub title: String,
    pub topic: Topic,
    pub author: String,
    pub published: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
}

impl BlogPost {
    #[must_use]
    pub fn new(
        id: Id<BlogPostMarker>,
        post: NewBlogPost,
        content: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            title: post.title,
            topic: post.topic,
            author: post.author,
            content,
            created_at,
            published: false,
            published_at: None,
        }
    }

    /// The first [`EXCERPT_LEN`] characters of the content, always followed by [`EXCERPT_ELLIPSIS`].
    #[must_use]
    pub fn excerpt(&self) -> String {
        let mut excerpt: String = self.content.chars().take(EXCERPT_LEN).collect();
        excerpt.push_str(EXCERPT_ELLIPSIS);
        excerpt
    }

    #[must_use]
    pub fn summary(&self) -> BlogPostSummary {
        BlogPostSummary {
            id: self.id,
            title: self.title.clone(),
            topic: self.topic.clone(),
            author: self.author.clone(),
            created_at: self.created_at,
            published: self.published,
            excerpt: self.excerpt(),
        }
    }

    /// Marks the post as published at `at`. Publishing again moves `published_at` forward.
    pub fn publish(&mut self, at: OffsetDateTime) -> PublishedBlogPost {
        self.published = true;
        self.published_at = Some(at);

        PublishedBlogPost {
            id: self.id,
            title: self.title.clone(),
            topic: self.topic.clone(),
            author: self.author.clone(),
            published: self.published,
            published_at: at,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct Topic(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Topic is required")]
pub struct EmptyTopicError;

impl Topic {
    pub fn new(topic: String) -> Result<Self, EmptyTopicError> {
        if topic.is_empty() {
            Err(EmptyTopicError)
        } else {
            Ok(Self(topic))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Topic::new(inner).map_err(|_| D::Error::invalid_value(Unexpected::Str(""), &"a topic"))
    }
}

/// Body of a creation request. Missing and empty fields are treated alike.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct CreateBlogPost {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

/// A [`CreateBlogPost`] that passed validation, with the author defaulted.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct NewBlogPost {
    pub title: String,
    pub topic: Topic,
    pub author: String,
    pub content: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl CreateBlogPost {
    pub fn validate(self) -> Result<NewBlogPost, ModelValidationError> {
        let title = non_empty(self.title).ok_or(ModelValidationError::MissingTitleOrTopic)?;
        let topic = self
            .topic
            .and_then(|topic| Topic::new(topic).ok())
            .ok_or(ModelValidationError::MissingTitleOrTopic)?;

        Ok(NewBlogPost {
            title,
            topic,
            author: non_empty(self.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_owned()),
            content: non_empty(self.content),
        })
    }
}

/// Body of a publish request.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct PublishBlogPost {
    pub id: Option<RequestedId>,
}

/// A blog id as clients send it. Any JSON scalar is accepted and read the way
/// `parseInt` reads it: strings by their leading decimal digits, numbers truncated.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RequestedId {
    Integer(u64),
    Float(f64),
    Flag(bool),
    Text(String),
}

impl RequestedId {
    /// Falsy ids (`0`, `-0`, `false`, `""`) count as missing.
    fn is_missing(&self) -> bool {
        match self {
            RequestedId::Integer(id) => *id == 0,
            RequestedId::Float(id) => *id == 0.0 || id.is_nan(),
            RequestedId::Flag(flag) => !flag,
            RequestedId::Text(text) => text.is_empty(),
        }
    }

    /// `None` when the id cannot name a post: no leading digits, negative, or out of range.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn resolve(&self) -> Option<u64> {
        match self {
            RequestedId::Integer(id) => Some(*id),
            RequestedId::Float(id) => {
                let id = id.trunc();
                (id >= 0.0 && id < u64::MAX as f64).then_some(id as u64)
            }
            RequestedId::Flag(_) => None,
            RequestedId::Text(text) => leading_integer(text),
        }
    }
}

fn leading_integer(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);

    let value = digits.parse::<u64>().ok()?;
    (!negative || value == 0).then_some(value)
}

impl PublishBlogPost {
    /// Resolves the requested id. `Ok(None)` means an id was given but no post can carry it.
    pub fn id(&self) -> Result<Option<Id<BlogPostMarker>>, ModelValidationError> {
        match &self.id {
            None => Err(ModelValidationError::MissingBlogId),
            Some(id) if id.is_missing() => Err(ModelValidationError::MissingBlogId),
            Some(id) => Ok(id.resolve().map(Id::new)),
        }
    }
}

/// Body of a content generation request.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct GenerateBlogContent {
    pub topic: Option<String>,
}

impl GenerateBlogContent {
    pub fn topic(self) -> Result<Topic, EmptyTopicError> {
        Topic::new(self.topic.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        Id, ModelValidationError,
        blog::{
            BlogPost, CreateBlogPost, DEFAULT_AUTHOR, EmptyTopicError, GenerateBlogContent,
            PublishBlogPost, RequestedId, Topic,
        },
    };
    use time::{
        Duration, OffsetDateTime, format_description::well_known::Rfc3339, macros::datetime,
    };

    fn create(title: &str, topic: &str) -> CreateBlogPost {
        CreateBlogPost {
            title: Some(title.to_owned()),
            topic: Some(topic.to_owned()),
            ..CreateBlogPost::default()
        }
    }

    fn post_with_content(content: &str) -> BlogPost {
        let new_post = create("Title", "Rust").validate().unwrap();
        BlogPost::new(
            Id::new(1),
            new_post,
            content.to_owned(),
            datetime!(2025-10-24 10:00 UTC),
        )
    }

    #[test]
    fn topic_must_not_be_empty() {
        assert_eq!(Topic::new(String::new()), Err(EmptyTopicError));
        assert_eq!(Topic::new("Rust".to_owned()).unwrap().get(), "Rust");
        assert!(serde_json::from_str::<Topic>("\"\"").is_err());
        assert_eq!(
            serde_json::from_str::<Topic>("\"Rust\"").unwrap().into_inner(),
            "Rust"
        );
    }

    #[test]
    fn validate_requires_title_and_topic() {
        let missing = [
            CreateBlogPost::default(),
            CreateBlogPost {
                title: Some("T".to_owned()),
                ..CreateBlogPost::default()
            },
            CreateBlogPost {
                topic: Some("X".to_owned()),
                ..CreateBlogPost::default()
            },
            create("", "X"),
            create("T", ""),
        ];

        for request in missing {
            assert_eq!(
                request.validate(),
                Err(ModelValidationError::MissingTitleOrTopic)
            );
        }
    }

    #[test]
    fn validate_defaults_author_and_drops_empty_content() {
        let new_post = CreateBlogPost {
            author: Some(String::new()),
            content: Some(String::new()),
            ..create("T", "X")
        }
        .validate()
        .unwrap();

        assert_eq!(new_post.title, "T");
        assert_eq!(new_post.topic.get(), "X");
        assert_eq!(new_post.author, DEFAULT_AUTHOR);
        assert_eq!(new_post.content, None);

        let new_post = CreateBlogPost {
            author: Some("Ferris".to_owned()),
            content: Some("Hand written".to_owned()),
            ..create("T", "X")
        }
        .validate()
        .unwrap();

        assert_eq!(new_post.author, "Ferris");
        assert_eq!(new_post.content.as_deref(), Some("Hand written"));
    }

    #[test]
    fn excerpt_is_character_prefix_with_ellipsis() {
        let long = "é".repeat(200);
        let post = post_with_content(&long);
        assert_eq!(post.excerpt(), format!("{}...", "é".repeat(150)));

        let short = post_with_content("Short");
        assert_eq!(short.excerpt(), "Short...");
    }

    #[test]
    fn publish_sets_flag_and_timestamp() {
        let mut post = post_with_content("Body");
        let first = datetime!(2025-10-24 11:00 UTC);
        let second = first + Duration::minutes(5);

        let publication = post.publish(first);
        assert!(post.published);
        assert_eq!(post.published_at, Some(first));
        assert_eq!(publication.published_at, first);
        assert_eq!(publication.id, post.id);

        let publication = post.publish(second);
        assert!(publication.published);
        assert_eq!(post.published_at, Some(second));
    }

    #[test]
    fn serializes_camel_case_without_unpublished_timestamp() {
        let post = post_with_content("Body");
        let json = serde_json::to_value(&post).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["topic"], "Rust");
        let created_at = json["createdAt"].as_str().unwrap();
        assert_eq!(
            OffsetDateTime::parse(created_at, &Rfc3339).unwrap(),
            post.created_at
        );
        assert_eq!(json["published"], false);
        assert!(json.get("publishedAt").is_none());

        let summary = serde_json::to_value(post.summary()).unwrap();
        assert_eq!(summary["excerpt"], "Body...");
        assert!(summary.get("content").is_none());
    }

    #[test]
    fn publish_request_missing_ids() {
        let missing = [
            None,
            Some(RequestedId::Integer(0)),
            Some(RequestedId::Float(-0.0)),
            Some(RequestedId::Flag(false)),
            Some(RequestedId::Text(String::new())),
        ];

        for id in missing {
            assert_eq!(
                PublishBlogPost { id }.id(),
                Err(ModelValidationError::MissingBlogId)
            );
        }
    }

    #[test]
    fn publish_request_reads_ids_like_parse_int() {
        let resolve = |json: &str| {
            serde_json::from_str::<PublishBlogPost>(json)
                .unwrap()
                .id()
                .unwrap()
                .map(Id::get)
        };

        assert_eq!(resolve(r#"{"id": 12}"#), Some(12));
        assert_eq!(resolve(r#"{"id": "12"}"#), Some(12));
        assert_eq!(resolve(r#"{"id": "  7"}"#), Some(7));
        assert_eq!(resolve(r#"{"id": "+3"}"#), Some(3));
        assert_eq!(resolve(r#"{"id": "1abc"}"#), Some(1));
        assert_eq!(resolve(r#"{"id": 1.5}"#), Some(1));
        assert_eq!(resolve(r#"{"id": "0"}"#), Some(0));
        assert_eq!(resolve(r#"{"id": 0.5}"#), Some(0));

        assert_eq!(resolve(r#"{"id": "abc"}"#), None);
        assert_eq!(resolve(r#"{"id": "-1"}"#), None);
        assert_eq!(resolve(r#"{"id": -1}"#), None);
        assert_eq!(resolve(r#"{"id": true}"#), None);
        assert_eq!(resolve(r#"{"id": "99999999999999999999999"}"#), None);

        let parsed: PublishBlogPost = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.id(), Err(ModelValidationError::MissingBlogId));
        let parsed: PublishBlogPost = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(parsed.id(), Err(ModelValidationError::MissingBlogId));
    }

    #[test]
    fn generate_request_requires_topic() {
        assert_eq!(GenerateBlogContent::default().topic(), Err(EmptyTopicError));
        assert_eq!(
            GenerateBlogContent {
                topic: Some("AI".to_owned())
            }
            .topic()
            .unwrap()
            .get(),
            "AI"
        );
    }
}
