//! Community posts: list, create, comment, like.

use safehaven_types::error::StoreError;
use safehaven_types::post::{Comment, Post};

use super::{StoreFacade, log_fallback, seed};
use crate::cache::{Collection, LocalCache};
use crate::remote::RemoteClient;

pub(crate) const POSTS_PATH: &str = "/posts/";

fn comments_path(post_id: &str) -> String {
    format!("/posts/{post_id}/comments/")
}

fn like_path(post_id: &str) -> String {
    format!("/posts/{post_id}/like/")
}

const SEED: Option<fn() -> Vec<Post>> = Some(seed::initial_posts);

impl<R: RemoteClient, L: LocalCache> StoreFacade<R, L> {
    /// List all posts, newest first as stored.
    pub async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        match self.remote_get::<Vec<Post>>(POSTS_PATH).await {
            Ok(posts) => Ok(posts),
            Err(err) => {
                log_fallback("list_posts", &err);
                self.read_local(Collection::Posts, SEED).await
            }
        }
    }

    /// Publish a post. Returns the updated list with the new post first.
    pub async fn create_post(&self, post: Post) -> Result<Vec<Post>, StoreError> {
        match self.remote_post::<_, Vec<Post>>(POSTS_PATH, Some(&post)).await {
            Ok(posts) => Ok(posts),
            Err(err) => {
                log_fallback("create_post", &err);
                self.mutate_local(Collection::Posts, SEED, |posts| {
                    posts.insert(0, post);
                    Ok(posts.clone())
                })
                .await
            }
        }
    }

    /// Append a comment to a post. Returns the updated list.
    ///
    /// An unknown `post_id` leaves every post unchanged.
    pub async fn add_comment(
        &self,
        post_id: &str,
        comment: Comment,
    ) -> Result<Vec<Post>, StoreError> {
        match self
            .remote_post::<_, Vec<Post>>(&comments_path(post_id), Some(&comment))
            .await
        {
            Ok(posts) => Ok(posts),
            Err(err) => {
                log_fallback("add_comment", &err);
                self.mutate_local(Collection::Posts, SEED, |posts| {
                    if let Some(post) = posts.iter_mut().find(|p| p.id == post_id) {
                        post.comments.push(comment);
                    }
                    Ok(posts.clone())
                })
                .await
            }
        }
    }

    /// Add one like to a post. Returns the updated list.
    ///
    /// Increment-only: calling it again adds another like, it never removes one.
    pub async fn toggle_like(&self, post_id: &str) -> Result<Vec<Post>, StoreError> {
        match self
            .remote_post::<serde_json::Value, Vec<Post>>(&like_path(post_id), None)
            .await
        {
            Ok(posts) => Ok(posts),
            Err(err) => {
                log_fallback("toggle_like", &err);
                self.mutate_local(Collection::Posts, SEED, |posts| {
                    if let Some(post) = posts.iter_mut().find(|p| p.id == post_id) {
                        post.likes = post.likes.saturating_add(1);
                    }
                    Ok(posts.clone())
                })
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::cache::memory::InMemoryCache;
    use crate::store::StoreOptions;
    use crate::store::testing::{OfflineRemote, ScriptedRemote};
    use safehaven_types::error::RemoteError;

    fn offline_store() -> (StoreFacade<OfflineRemote, InMemoryCache>, InMemoryCache) {
        let cache = InMemoryCache::new();
        let store = StoreFacade::new(OfflineRemote::default(), cache.clone(), StoreOptions::default());
        (store, cache)
    }

    #[tokio::test]
    async fn test_offline_list_returns_seed_and_persists_it() {
        let (store, cache) = offline_store();

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[1].id, "2");
        assert!(cache.get(Collection::Posts.key()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_offline_created_post_is_first_on_next_list() {
        let (store, _cache) = offline_store();
        store.list_posts().await.unwrap();

        let post = Post::new("Jo", "Finding my feet again.");
        let returned = store.create_post(post.clone()).await.unwrap();
        assert_eq!(returned[0], post);
        assert_eq!(returned.len(), 3);

        let listed = store.list_posts().await.unwrap();
        assert_eq!(listed[0].id, post.id);
        assert_eq!(listed.len(), 3);
    }

    #[tokio::test]
    async fn test_create_on_empty_cache_seeds_first() {
        let (store, _cache) = offline_store();
        let post = Post::new("Jo", "First!");
        let returned = store.create_post(post.clone()).await.unwrap();
        assert_eq!(returned.len(), 3);
        assert_eq!(returned[0].id, post.id);
    }

    #[tokio::test]
    async fn test_toggle_like_increments_n_times() {
        let (store, _cache) = offline_store();
        let before = store.list_posts().await.unwrap()[1].likes;

        for _ in 0..5 {
            store.toggle_like("2").await.unwrap();
        }

        let after = store.list_posts().await.unwrap();
        assert_eq!(after[1].likes, before + 5);
        assert_eq!(after[0].likes, 24);
    }

    #[tokio::test]
    async fn test_add_comment_appends_in_order() {
        let (store, _cache) = offline_store();
        let first = Comment::new("A", "first");
        let second = Comment::new("B", "second");

        store.add_comment("1", first.clone()).await.unwrap();
        let posts = store.add_comment("1", second.clone()).await.unwrap();

        let comments = &posts[0].comments;
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[1], first);
        assert_eq!(comments[2], second);
    }

    #[tokio::test]
    async fn test_mutations_on_unknown_post_change_nothing() {
        let (store, _cache) = offline_store();
        let original = store.list_posts().await.unwrap();

        store.toggle_like("missing").await.unwrap();
        let posts = store.add_comment("missing", Comment::new("A", "x")).await.unwrap();
        assert_eq!(posts, original);
    }

    #[tokio::test]
    async fn test_remote_success_is_returned_verbatim_without_caching() {
        let remote_posts = vec![Post::new("Remote", "from server")];
        let remote = ScriptedRemote::default()
            .respond(Ok(serde_json::to_value(&remote_posts).unwrap()));
        let cache = InMemoryCache::new();
        let store = StoreFacade::new(remote, cache.clone(), StoreOptions::default());

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts, remote_posts);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_remote_application_error_falls_back_for_posts() {
        let remote = ScriptedRemote::default().respond(Err(RemoteError::Application {
            status: 500,
            message: "boom".to_string(),
        }));
        let store = StoreFacade::new(remote, InMemoryCache::new(), StoreOptions::default());

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_remote_body_falls_back() {
        let remote = ScriptedRemote::default().respond(Ok(serde_json::json!({"unexpected": true})));
        let store = StoreFacade::new(remote, InMemoryCache::new(), StoreOptions::default());

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts[0].author, "Sarah Jenkins");
    }

    #[tokio::test]
    async fn test_remote_paths_and_bodies() {
        let remote = ScriptedRemote::default()
            .respond(Ok(serde_json::json!([])))
            .respond(Ok(serde_json::json!([])));
        let store = StoreFacade::new(remote, InMemoryCache::new(), StoreOptions::default());

        let comment = Comment::new("A", "hi");
        store.add_comment("7", comment.clone()).await.unwrap();
        store.toggle_like("7").await.unwrap();

        let recorded = store.remote().recorded();
        assert_eq!(recorded[0].1, "/posts/7/comments/");
        assert_eq!(recorded[0].2.as_ref().unwrap()["content"], "hi");
        assert_eq!(recorded[1], ("POST".to_string(), "/posts/7/like/".to_string(), None));
    }

    #[tokio::test]
    async fn test_every_offline_call_tries_remote_first() {
        let (store, _cache) = offline_store();
        store.list_posts().await.unwrap();
        store.toggle_like("1").await.unwrap();
        assert_eq!(store.remote().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_likes_are_not_lost() {
        let (store, _cache) = offline_store();
        let store = std::sync::Arc::new(store);
        store.list_posts().await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.toggle_like("1").await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts[0].likes, 24 + 20);
    }
}
