use ai_creator_common::{
    generator::ContentGenerator,
    model::{
        Id, ModelValidationError,
        blog::{BlogPost, BlogPostMarker, BlogPostSummary, CreateBlogPost, PublishedBlogPost},
    },
    sequence::IdSequence,
};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ModelValidationError),
    #[error("Blog post with id {0} was not found.")]
    NotFound(Id<BlogPostMarker>),
    #[error("The blog store lock was poisoned by a panicking thread")]
    Poisoned,
}

#[derive(Debug, Default)]
struct Collection {
    posts: Vec<BlogPost>,
    ids: IdSequence<BlogPostMarker>,
}

impl Collection {
    fn find_mut(&mut self, id: Id<BlogPostMarker>) -> Option<&mut BlogPost> {
        self.posts.iter_mut().find(|post| post.id == id)
    }
}

/// In-memory, insertion-ordered blog posts that live as long as the process.
#[derive(Debug)]
pub struct BlogStore {
    collection: Mutex<Collection>,
    generator: Arc<ContentGenerator>,
}

impl BlogStore {
    #[must_use]
    pub fn new(generator: Arc<ContentGenerator>) -> Self {
        Self {
            collection: Mutex::new(Collection::default()),
            generator,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collection>> {
        self.collection.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Validates and stores a new post, generating its content if none was given.
    ///
    /// Rejected requests never consume an id.
    pub fn create(&self, post: CreateBlogPost) -> Result<BlogPost> {
        let mut new_post = post.validate()?;
        let content = match new_post.content.take() {
            Some(content) => content,
            None => self
                .generator
                .generate(&new_post.topic, Some(&new_post.author)),
        };

        let mut collection = self.lock()?;
        let id = collection.ids.generate();
        let post = BlogPost::new(id, new_post, content, OffsetDateTime::now_utc());
        collection.posts.push(post.clone());

        debug!(%id, total = collection.posts.len(), "Stored blog post");
        Ok(post)
    }

    /// Runs `f` over all posts in insertion order while holding the store lock.
    ///
    /// A panic inside `f` poisons the store.
    pub fn read<R>(&self, f: impl FnOnce(&[BlogPost]) -> R) -> Result<R> {
        Ok(f(&self.lock()?.posts))
    }

    pub fn list(&self, published_only: bool) -> Result<Vec<BlogPostSummary>> {
        self.read(|posts| {
            posts
                .iter()
                .filter(|post| !published_only || post.published)
                .map(BlogPost::summary)
                .collect()
        })
    }

    pub fn get(&self, id: Id<BlogPostMarker>) -> Result<BlogPost> {
        self.read(|posts| posts.iter().find(|post| post.id == id).cloned())?
            .ok_or(StoreError::NotFound(id))
    }

    pub fn publish(&self, id: Id<BlogPostMarker>) -> Result<PublishedBlogPost> {
        let mut collection = self.lock()?;
        let post = collection.find_mut(id).ok_or(StoreError::NotFound(id))?;

        let republished = post.published;
        let publication = post.publish(OffsetDateTime::now_utc());

        info!(%id, republished, "Published blog post");
        Ok(publication)
    }

    pub fn len(&self) -> Result<usize> {
        self.read(<[BlogPost]>::len)
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.read(<[BlogPost]>::is_empty)
    }
}
