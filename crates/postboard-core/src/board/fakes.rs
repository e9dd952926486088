//! Recording fakes of the ports for board tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{BoardSettings, PostBoard};
use crate::domain::{Post, PostDraft, PostFields, PostId, PostPatch};
use crate::error::{RepoError, StorageError};
use crate::ports::{BaseRepository, Clock, MediaUrls, ObjectStore, PostRepository, StoredObject};

/// Clock that advances one millisecond per reading.
pub struct SteppingClock(AtomicI64);

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.0.fetch_add(1, Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

/// Call log shared between both fakes, to observe cross-store ordering.
pub type Journal = Arc<Mutex<Vec<&'static str>>>;

fn note(journal: &Mutex<Option<Journal>>, call: &'static str) {
    if let Some(journal) = journal.lock().unwrap().as_ref() {
        journal.lock().unwrap().push(call);
    }
}

pub fn board_with(repo: Arc<FakeRepo>, media: Arc<FakeMedia>) -> PostBoard {
    PostBoard::with_clock(
        repo,
        media,
        BoardSettings::default(),
        Arc::new(SteppingClock(AtomicI64::new(1_700_000_000_000))),
    )
}

#[derive(Default)]
pub struct FakeRepo {
    docs: Mutex<Vec<Post>>,
    calls: Mutex<Vec<&'static str>>,
    journal: Mutex<Option<Journal>>,
    next_id: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeRepo {
    pub fn seeded(posts: &[(&str, &str, i64)]) -> Arc<Self> {
        let docs = posts
            .iter()
            .map(|(id, title, created_at)| {
                Post::from_draft(
                    PostId::new(*id),
                    PostDraft {
                        fields: PostFields {
                            title: title.to_string(),
                            excerpt: String::new(),
                            content: format!("<p>{title}</p>"),
                            category: None,
                            read_time: None,
                        },
                        image: None,
                        date: "1/1/2026".to_string(),
                        created_at: *created_at,
                        updated_at: *created_at,
                    },
                )
            })
            .collect();

        Arc::new(Self {
            docs: Mutex::new(docs),
            ..Self::default()
        })
    }

    pub fn set_image(&self, id: &str, url: &str) {
        let mut docs = self.docs.lock().unwrap();
        if let Some(post) = docs.iter_mut().find(|p| p.id.as_str() == id) {
            post.image = Some(url.to_string());
        }
    }

    /// Also log writes into `journal`.
    pub fn share_journal(&self, journal: &Journal) {
        *self.journal.lock().unwrap() = Some(Arc::clone(journal));
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stored ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self
            .docs
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        ids.sort();
        ids
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str, write: bool) -> Result<(), RepoError> {
        self.calls.lock().unwrap().push(call);
        if write {
            note(&self.journal, call);
        }
        let failing = if write {
            &self.fail_writes
        } else {
            &self.fail_reads
        };
        if failing.load(Ordering::SeqCst) {
            return Err(RepoError::Connection("store unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for FakeRepo {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        self.record("find_by_id", false)?;
        Ok(self.docs.lock().unwrap().iter().find(|p| &p.id == id).cloned())
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepoError> {
        self.record("delete", true)?;
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|p| &p.id != id);
        if docs.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for FakeRepo {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        self.record("list_recent", false)?;
        let mut posts = self.docs.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        self.record("insert", true)?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let post = Post::from_draft(PostId::new(format!("doc-{n}")), draft);
        self.docs.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: &PostId, patch: PostPatch) -> Result<Post, RepoError> {
        self.record("update", true)?;
        let mut docs = self.docs.lock().unwrap();
        let post = docs
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.apply_patch(patch);
        Ok(post.clone())
    }
}

pub struct FakeMedia {
    objects: Mutex<HashMap<String, StoredObject>>,
    puts: AtomicUsize,
    fail_puts: AtomicBool,
    journal: Mutex<Option<Journal>>,
    urls: MediaUrls,
}

impl FakeMedia {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            objects: Mutex::new(HashMap::new()),
            puts: AtomicUsize::new(0),
            fail_puts: AtomicBool::new(false),
            journal: Mutex::new(None),
            urls: MediaUrls::new("https://media.test"),
        })
    }

    pub fn seed(&self, key: &str) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bytes: vec![1],
                content_type: "image/png".to_string(),
            },
        );
    }

    /// Also log puts into `journal`.
    pub fn share_journal(&self, journal: &Journal) {
        *self.journal.lock().unwrap() = Some(Arc::clone(journal));
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ObjectStore for FakeMedia {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        note(&self.journal, "put");
        // Give a concurrent submit the chance to interleave
        tokio::task::yield_now().await;
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    fn urls(&self) -> &MediaUrls {
        &self.urls
    }
}
