use std::time::Duration;

use moka::future::Cache;

use crate::domain::repository::UserCache;
use crate::domain::types::User;

/// In-process read-through cache for the user directory.
///
/// Keys are lookup identifiers (a user id string or a nick name), so one
/// user may occupy two entries; invalidation removes both.
#[derive(Clone)]
pub struct MokaUserCache {
    cache: Cache<String, User>,
}

impl MokaUserCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl UserCache for MokaUserCache {
    async fn get(&self, key: &str) -> Option<User> {
        self.cache.get(key).await
    }

    async fn put(&self, key: &str, user: &User) {
        self.cache.insert(key.to_owned(), user.clone()).await;
    }

    async fn invalidate(&self, user: &User) {
        self.cache.invalidate(&user.id.to_string()).await;
        if let Some(nick_name) = &user.nick_name {
            self.cache.invalidate(nick_name).await;
        }
    }
}
