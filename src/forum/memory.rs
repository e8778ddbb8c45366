//! In-memory forum store.
//!
//! Stands in for the relational database. Records live behind a single
//! `RwLock`; every write commits before its method returns.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::models::{
    Category, CategorySummary, Paginated, Post, PostRemoval, RemovedThread, Thread, ThreadDetail,
    ThreadSummary, UserProfile,
};
use super::ForumStore;
use crate::error::{AppError, Result};

const RECENT_THREADS: usize = 5;

#[derive(Debug, Default)]
struct ForumData {
    categories: Vec<Category>,
    threads: Vec<Thread>,
    posts: Vec<Post>,
    /// Username -> join time
    users: HashMap<String, DateTime<Utc>>,
    next_id: u64,
}

impl ForumData {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn category(&self, slug: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| AppError::NotFound(format!("category '{slug}'")))
    }

    fn thread_index(&self, slug: &str) -> Result<usize> {
        self.threads
            .iter()
            .position(|t| t.slug == slug)
            .ok_or_else(|| AppError::NotFound(format!("thread '{slug}'")))
    }

    fn post_index(&self, id: u64) -> Result<usize> {
        self.posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("post {id}")))
    }

    fn thread_by_id(&self, id: u64) -> Result<&Thread> {
        self.threads
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::Internal(format!("post references missing thread {id}")))
    }

    fn posts_of(&self, thread_id: u64) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(move |p| p.thread_id == thread_id)
    }

    fn register(&mut self, username: &str, now: DateTime<Utc>) {
        self.users.entry(username.to_string()).or_insert(now);
    }

    /// Slugifies `title`, appending `-1`, `-2`, ... until unused.
    fn unique_thread_slug(&self, title: &str) -> String {
        let base = match slug::slugify(title) {
            s if s.is_empty() => "thread".to_string(),
            s => s,
        };
        let taken = |candidate: &str| self.threads.iter().any(|t| t.slug == candidate);

        if !taken(&base) {
            return base;
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !taken(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn push_category(&mut self, slug: String, name: &str, description: &str) -> Category {
        let category = Category {
            id: self.next_id(),
            slug,
            name: name.to_string(),
            description: description.to_string(),
            display_order: self.categories.len() as u32,
        };
        self.categories.push(category.clone());
        category
    }

    fn remove_thread(&mut self, index: usize) -> RemovedThread {
        let thread = self.threads.remove(index);
        let mut authors = vec![thread.author.clone()];
        authors.extend(self.posts_of(thread.id).map(|p| p.author.clone()));
        authors.sort();
        authors.dedup();

        self.posts.retain(|p| p.thread_id != thread.id);
        RemovedThread { thread, authors }
    }
}

/// Forum records held in process memory.
#[derive(Debug)]
pub struct InMemoryForum {
    data: RwLock<ForumData>,
    page_size: usize,
}

impl InMemoryForum {
    /// Creates an empty forum paginating listings by `page_size`.
    pub fn new(page_size: usize) -> Self {
        Self {
            data: RwLock::new(ForumData::default()),
            page_size: page_size.max(1),
        }
    }

    /// Creates a forum with the default categories and a welcome thread.
    pub async fn seeded(page_size: usize) -> Result<Self> {
        let forum = Self::new(page_size);
        let categories = [
            ("announcements", "Announcements", "Important announcements and updates"),
            ("general-discussion", "General Discussion", "General topics and conversations"),
            ("questions-answers", "Questions & Answers", "Ask questions and get help from the community"),
            ("study-groups", "Study Groups", "Find and organize study groups"),
            ("resources", "Resources", "Share and discover useful resources"),
            ("off-topic", "Off-Topic", "Casual conversations about anything else"),
        ];
        for (slug, name, description) in categories {
            forum.add_category(slug, name, description).await;
        }
        forum
            .create_thread(
                "announcements",
                "admin",
                "Welcome to the forum",
                "Introduce yourself and read the guidelines before posting.",
            )
            .await?;
        Ok(forum)
    }

    /// Adds a category after the existing ones.
    pub async fn add_category(&self, slug: &str, name: &str, description: &str) -> Category {
        self.data
            .write()
            .await
            .push_category(slug.to_string(), name, description)
    }

    /// Pins or unpins a thread.
    pub async fn set_pinned(&self, slug: &str, pinned: bool) -> Result<Thread> {
        let mut data = self.data.write().await;
        let index = data.thread_index(slug)?;
        data.threads[index].pinned = pinned;
        Ok(data.threads[index].clone())
    }
}

#[async_trait]
impl ForumStore for InMemoryForum {
    async fn categories(&self) -> Result<Vec<CategorySummary>> {
        let data = self.data.read().await;
        let mut categories: Vec<&Category> = data.categories.iter().collect();
        categories.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(categories
            .into_iter()
            .map(|category| {
                let threads: Vec<&Thread> = data
                    .threads
                    .iter()
                    .filter(|t| t.category_slug == category.slug)
                    .collect();
                let post_count: usize = threads.iter().map(|t| data.posts_of(t.id).count()).sum();
                CategorySummary {
                    category: category.clone(),
                    thread_count: threads.len(),
                    post_count,
                }
            })
            .collect())
    }

    async fn create_category(&self, name: &str, description: &str) -> Result<Category> {
        let slug = slug::slugify(name);
        if slug.is_empty() {
            return Err(AppError::InvalidRequest(format!(
                "Category name '{name}' has no usable characters"
            )));
        }

        let mut data = self.data.write().await;
        if data.categories.iter().any(|c| c.slug == slug) {
            return Err(AppError::InvalidRequest(format!(
                "Category '{slug}' already exists"
            )));
        }
        Ok(data.push_category(slug, name, description))
    }

    async fn category_threads(
        &self,
        category_slug: &str,
        page: u32,
    ) -> Result<(Category, Paginated<ThreadSummary>)> {
        let data = self.data.read().await;
        let category = data.category(category_slug)?.clone();

        let mut threads: Vec<ThreadSummary> = data
            .threads
            .iter()
            .filter(|t| t.category_slug == category_slug)
            .map(|t| ThreadSummary {
                thread: t.clone(),
                reply_count: data.posts_of(t.id).count().saturating_sub(1),
            })
            .collect();
        threads.sort_by(|a, b| {
            b.thread
                .pinned
                .cmp(&a.thread.pinned)
                .then_with(|| b.thread.last_activity_at.cmp(&a.thread.last_activity_at))
                .then_with(|| b.thread.id.cmp(&a.thread.id))
        });

        Ok((category, Paginated::from_vec(threads, page, self.page_size)))
    }

    async fn thread(&self, slug: &str) -> Result<ThreadDetail> {
        let data = self.data.read().await;
        let thread = data.threads[data.thread_index(slug)?].clone();
        let category = data.category(&thread.category_slug)?.clone();
        let posts = data.posts_of(thread.id).cloned().collect();

        Ok(ThreadDetail {
            thread,
            category,
            posts,
        })
    }

    async fn user_profile(&self, username: &str) -> Result<UserProfile> {
        let data = self.data.read().await;
        let joined_at = *data
            .users
            .get(username)
            .ok_or_else(|| AppError::NotFound(format!("user '{username}'")))?;

        let mut threads: Vec<Thread> = data
            .threads
            .iter()
            .filter(|t| t.author == username)
            .cloned()
            .collect();
        threads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        let thread_count = threads.len();
        threads.truncate(RECENT_THREADS);

        Ok(UserProfile {
            username: username.to_string(),
            joined_at,
            thread_count,
            post_count: data.posts.iter().filter(|p| p.author == username).count(),
            recent_threads: threads,
        })
    }

    async fn search(&self, query: &str, page: u32) -> Result<Paginated<Thread>> {
        let data = self.data.read().await;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Paginated::from_vec(Vec::new(), page, self.page_size));
        }

        let mut hits: Vec<Thread> = data
            .threads
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || data
                        .posts_of(t.id)
                        .any(|p| p.body.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            b.last_activity_at
                .cmp(&a.last_activity_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(Paginated::from_vec(hits, page, self.page_size))
    }

    async fn create_thread(
        &self,
        category_slug: &str,
        author: &str,
        title: &str,
        body: &str,
    ) -> Result<Thread> {
        let mut data = self.data.write().await;
        data.category(category_slug)?;

        let now = Utc::now();
        data.register(author, now);
        let thread = Thread {
            id: data.next_id(),
            slug: data.unique_thread_slug(title),
            title: title.to_string(),
            category_slug: category_slug.to_string(),
            author: author.to_string(),
            pinned: false,
            created_at: now,
            last_activity_at: now,
        };
        let post = Post {
            id: data.next_id(),
            thread_id: thread.id,
            author: author.to_string(),
            body: body.to_string(),
            is_first: true,
            created_at: now,
            edited_at: None,
        };
        data.threads.push(thread.clone());
        data.posts.push(post);

        Ok(thread)
    }

    async fn create_reply(
        &self,
        thread_slug: &str,
        author: &str,
        body: &str,
    ) -> Result<(Thread, Post)> {
        let mut data = self.data.write().await;
        let index = data.thread_index(thread_slug)?;

        let now = Utc::now();
        data.register(author, now);
        let post = Post {
            id: data.next_id(),
            thread_id: data.threads[index].id,
            author: author.to_string(),
            body: body.to_string(),
            is_first: false,
            created_at: now,
            edited_at: None,
        };
        data.threads[index].last_activity_at = now;
        data.posts.push(post.clone());

        Ok((data.threads[index].clone(), post))
    }

    async fn edit_post(&self, post_id: u64, body: &str) -> Result<(Thread, Post)> {
        let mut data = self.data.write().await;
        let index = data.post_index(post_id)?;

        let post = &mut data.posts[index];
        post.body = body.to_string();
        post.edited_at = Some(Utc::now());
        let post = post.clone();

        let thread = data.thread_by_id(post.thread_id)?.clone();
        Ok((thread, post))
    }

    async fn delete_post(&self, post_id: u64) -> Result<PostRemoval> {
        let mut data = self.data.write().await;
        let index = data.post_index(post_id)?;
        let post = data.posts[index].clone();
        let thread = data.thread_by_id(post.thread_id)?.clone();

        if post.is_first {
            let thread_index = data.thread_index(&thread.slug)?;
            return Ok(PostRemoval::Thread(data.remove_thread(thread_index)));
        }

        data.posts.remove(index);
        Ok(PostRemoval::Reply {
            thread,
            author: post.author,
        })
    }

    async fn delete_thread(&self, slug: &str) -> Result<RemovedThread> {
        let mut data = self.data.write().await;
        let index = data.thread_index(slug)?;
        Ok(data.remove_thread(index))
    }
}
