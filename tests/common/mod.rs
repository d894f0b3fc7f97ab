//! In-memory backend shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use abtube::api::{LikeStatus, LoginResponse, MessageResponse, UploadResponse};
use abtube::app::{drive, AppState, Event};
use abtube::domain::{
    ClientError, Comment, CommentId, Credentials, ForgotPassword, PasswordReset, Registration,
    Result, UploadForm, UserId, Video, VideoId,
};
use abtube::storage::{LocalStore, MemoryStore};
use abtube::ui::Theme;
use abtube::worker::Dispatcher;
use abtube::VideoApi;

/// Reset code accepted by [`FakeApi::reset_password`].
pub const RESET_CODE: &str = "reset-code";

pub fn timestamp(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap().and_hms_opt(10, 0, 0).unwrap()
}

#[derive(Default)]
struct Backend {
    users: HashMap<String, (String, UserId)>,
    sessions: HashMap<String, UserId>,
    videos: Vec<Video>,
    comments: Vec<Comment>,
    next_id: i64,
    fail_catalog: bool,
    catalog_requests: usize,
    like_checks: usize,
}

impl Backend {
    fn user_for(&self, token: &str) -> Result<(UserId, String)> {
        let id = self
            .sessions
            .get(token)
            .copied()
            .ok_or_else(|| ClientError::from_status(401, "Invalid token".to_string()))?;
        let name = self
            .users
            .iter()
            .find(|(_, (_, uid))| *uid == id)
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        Ok((id, name))
    }

    fn video_mut(&mut self, id: VideoId) -> Result<&mut Video> {
        self.videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| ClientError::from_status(404, "Video not found".to_string()))
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Backend double with two users, three videos and one comment.
///
/// | user  | password | id |
/// |-------|----------|----|
/// | alice | secret1  | 1  |
/// | bob   | hunter22 | 2  |
pub struct FakeApi {
    backend: Mutex<Backend>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        let mut backend = Backend {
            next_id: 100,
            ..Backend::default()
        };
        backend.users.insert("alice".to_string(), ("secret1".to_string(), 1));
        backend.users.insert("bob".to_string(), ("hunter22".to_string(), 2));
        backend.videos = vec![
            video(1, "Cat Facts", "All about cats", "Other", "alice", 1, vec![2]),
            video(2, "Dog Tricks", "Teaching old dogs", "Other", "bob", 2, vec![]),
            video(3, "Rust in 10 minutes", "Learn Rust fast", "Programming", "alice", 1, vec![1, 2]),
        ];
        backend.comments = vec![Comment {
            id: 10,
            video_id: 1,
            user_id: 2,
            username: "bob".to_string(),
            text: "great video".to_string(),
            created_at: timestamp(2),
        }];
        Arc::new(Self {
            backend: Mutex::new(backend),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }

    pub fn set_fail_catalog(&self, fail: bool) {
        self.lock().fail_catalog = fail;
    }

    pub fn catalog_requests(&self) -> usize {
        self.lock().catalog_requests
    }

    pub fn like_checks(&self) -> usize {
        self.lock().like_checks
    }

    pub fn video(&self, id: VideoId) -> Option<Video> {
        self.lock().videos.iter().find(|v| v.id == id).cloned()
    }

    pub fn comment_texts(&self, video_id: VideoId) -> Vec<String> {
        self.lock()
            .comments
            .iter()
            .filter(|c| c.video_id == video_id)
            .map(|c| c.text.clone())
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
pub fn video(
    id: VideoId,
    title: &str,
    description: &str,
    category: &str,
    uploader: &str,
    uploader_id: UserId,
    likes: Vec<UserId>,
) -> Video {
    Video {
        id,
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        duration: "3:10".to_string(),
        uploader: uploader.to_string(),
        uploader_id,
        likes,
        created_at: timestamp(1),
    }
}

fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: text.to_string(),
    }
}

#[async_trait]
impl VideoApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let mut backend = self.lock();
        let user = backend
            .users
            .get(&credentials.username)
            .filter(|(password, _)| *password == credentials.password)
            .map(|(_, id)| *id);

        match user {
            Some(id) => {
                let token = format!("token-{}", credentials.username);
                backend.sessions.insert(token.clone(), id);
                Ok(LoginResponse {
                    access_token: token,
                    token_type: Some("bearer".to_string()),
                })
            }
            None => Err(ClientError::from_status(401, "Invalid username or password".to_string())),
        }
    }

    async fn register(&self, form: &Registration) -> Result<MessageResponse> {
        let mut backend = self.lock();
        if backend.users.contains_key(&form.username) {
            return Err(ClientError::from_status(400, "Username already registered".to_string()));
        }
        let id = backend.next_id();
        backend.users.insert(form.username.clone(), (form.password.clone(), id));
        Ok(message("User registered successfully"))
    }

    async fn forgot_password(&self, _form: &ForgotPassword) -> Result<MessageResponse> {
        Ok(message("Password reset email sent"))
    }

    async fn reset_password(&self, form: &PasswordReset) -> Result<MessageResponse> {
        if form.token != RESET_CODE {
            return Err(ClientError::from_status(400, "Invalid or expired token".to_string()));
        }
        Ok(message("Password has been reset"))
    }

    async fn list_videos(&self) -> Result<Vec<Video>> {
        let mut backend = self.lock();
        backend.catalog_requests += 1;
        if backend.fail_catalog {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        Ok(backend.videos.clone())
    }

    async fn upload(&self, form: &UploadForm, token: &str) -> Result<UploadResponse> {
        let mut backend = self.lock();
        let (user_id, username) = backend.user_for(token)?;
        let id = backend.next_id();
        let mut uploaded = video(id, &form.title, &form.description, &form.category, &username, user_id, vec![]);
        uploaded.duration = form.duration.clone();
        backend.videos.push(uploaded);
        Ok(UploadResponse {
            message: "Video uploaded successfully".to_string(),
            video_id: id,
        })
    }

    async fn delete_video(&self, id: VideoId, token: &str) -> Result<MessageResponse> {
        let mut backend = self.lock();
        let (user_id, _) = backend.user_for(token)?;
        if backend.video_mut(id)?.uploader_id != user_id {
            return Err(ClientError::from_status(403, "Not authorized to delete this video".to_string()));
        }
        backend.videos.retain(|v| v.id != id);
        backend.comments.retain(|c| c.video_id != id);
        Ok(message("Video deleted successfully"))
    }

    async fn toggle_like(&self, id: VideoId, token: &str) -> Result<LikeStatus> {
        let mut backend = self.lock();
        let (user_id, _) = backend.user_for(token)?;
        let video = backend.video_mut(id)?;
        let liked = if video.likes.contains(&user_id) {
            video.likes.retain(|u| *u != user_id);
            false
        } else {
            video.likes.push(user_id);
            true
        };
        Ok(LikeStatus {
            liked,
            likes: video.likes.len() as u64,
        })
    }

    async fn check_liked(&self, id: VideoId, token: &str) -> Result<bool> {
        let mut backend = self.lock();
        backend.like_checks += 1;
        let (user_id, _) = backend.user_for(token)?;
        Ok(backend.video_mut(id)?.likes.contains(&user_id))
    }

    async fn list_comments(&self, video: VideoId) -> Result<Vec<Comment>> {
        let backend = self.lock();
        Ok(backend.comments.iter().filter(|c| c.video_id == video).cloned().collect())
    }

    async fn post_comment(&self, video: VideoId, text: &str, token: &str) -> Result<MessageResponse> {
        let mut backend = self.lock();
        let (user_id, username) = backend.user_for(token)?;
        backend.video_mut(video)?;
        let id = backend.next_id();
        backend.comments.push(Comment {
            id,
            video_id: video,
            user_id,
            username,
            text: text.to_string(),
            created_at: timestamp(3),
        });
        Ok(message("Comment added successfully"))
    }

    async fn delete_comment(&self, comment: CommentId, token: &str) -> Result<MessageResponse> {
        let mut backend = self.lock();
        let (user_id, _) = backend.user_for(token)?;
        let owner = backend
            .comments
            .iter()
            .find(|c| c.id == comment)
            .map(|c| c.user_id)
            .ok_or_else(|| ClientError::from_status(404, "Comment not found".to_string()))?;
        if owner != user_id {
            return Err(ClientError::from_status(403, "Not authorized to delete this comment".to_string()));
        }
        backend.comments.retain(|c| c.id != comment);
        Ok(message("Comment deleted successfully"))
    }

    fn stream_url(&self, id: VideoId) -> String {
        format!("http://fake.test/api/video/{id}")
    }
}

/// Fresh guest state plus a dispatcher over `api`.
pub fn harness(api: &Arc<FakeApi>) -> (AppState, Dispatcher) {
    harness_with_store(api, Box::new(MemoryStore::new()))
}

pub fn harness_with_store(api: &Arc<FakeApi>, store: Box<dyn LocalStore>) -> (AppState, Dispatcher) {
    let api: Arc<dyn VideoApi> = api.clone();
    (AppState::new(store, Theme::dark()), Dispatcher::new(api))
}

/// Logs in through the event loop and asserts it worked.
pub async fn log_in(state: &mut AppState, dispatcher: &mut Dispatcher, username: &str, password: &str) {
    drive(state, dispatcher, [Event::LoginSubmitted(Credentials::new(username, password))])
        .await
        .unwrap();
    assert!(state.session.is_authenticated(), "login as {username} failed: {:?}", state.alert);
}
