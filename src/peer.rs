//! Peer study room. There is no signaling server: the partner "connects"
//! after a timer and greets the learner with a canned message.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, warn};
use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::delay::DelayedTasks;

const CONNECTION_ID_LEN: usize = 6;
const CONNECTION_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DEMO_PARTNER: &str = "Demo Partner";
const WELCOME_MESSAGE: &str = "Hello! I'm ready to learn together. What would you like to study?";

#[derive(Error, Debug)]
pub enum PeerError {
    #[error("Please enter your name before connecting")]
    NameRequired,
    #[error("Already connected or connecting to a peer")]
    AlreadyConnected,
}

pub type Result<T> = std::result::Result<T, PeerError>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PeerStatus {
    Connecting,
    Connected,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PeerConnection {
    pub id: String,
    pub name: String,
    pub skill_level: u8,
    pub status: PeerStatus,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Local,
    Remote,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub sender_name: String,
}

impl ChatMessage {
    fn new(text: &str, sender: Sender, sender_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            timestamp: Utc::now(),
            sender,
            sender_name: sender_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PeerTiming {
    pub connect_delay: Duration,
    pub welcome_delay: Duration,
}

impl Default for PeerTiming {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_millis(2000),
            welcome_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Default)]
struct RoomState {
    peer: Option<PeerConnection>,
    messages: Vec<ChatMessage>,
}

pub struct PeerRoom<R: Rng> {
    rng: R,
    timing: PeerTiming,
    connection_id: String,
    user_name: String,
    video_enabled: bool,
    audio_enabled: bool,
    state: Arc<Mutex<RoomState>>,
    timers: DelayedTasks,
}

impl<R: Rng> PeerRoom<R> {
    pub fn new(mut rng: R, timing: PeerTiming) -> Self {
        let connection_id = generate_connection_id(&mut rng);
        Self {
            rng,
            timing,
            connection_id,
            user_name: String::new(),
            video_enabled: false,
            audio_enabled: false,
            state: Arc::new(Mutex::new(RoomState::default())),
            timers: DelayedTasks::new(),
        }
    }

    /// Code another learner would use to reach this room.
    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn peer(&self) -> Option<PeerConnection> {
        self.state.lock().peer.clone()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().messages.clone()
    }

    pub fn is_connecting(&self) -> bool {
        matches!(
            self.state.lock().peer.as_ref().map(|p| p.status),
            Some(PeerStatus::Connecting)
        )
    }

    pub fn is_connected(&self) -> bool {
        matches!(
            self.state.lock().peer.as_ref().map(|p| p.status),
            Some(PeerStatus::Connected)
        )
    }

    /// Starts a simulated connection. Must be called inside a Tokio runtime.
    pub fn connect(&mut self, user_name: &str, remote_id: Option<&str>) -> Result<()> {
        if user_name.trim().is_empty() {
            return Err(PeerError::NameRequired);
        }
        if self.state.lock().peer.is_some() {
            return Err(PeerError::AlreadyConnected);
        }

        self.user_name = user_name.trim().to_string();

        let remote_id = remote_id.map(str::trim).filter(|id| !id.is_empty());
        let (peer_id, peer_name) = match remote_id {
            Some(id) => (id.to_uppercase(), format!("User {}", id.to_uppercase())),
            None => ("DEMO_PEER".to_string(), DEMO_PARTNER.to_string()),
        };

        self.state.lock().peer = Some(PeerConnection {
            id: peer_id.clone(),
            name: peer_name.clone(),
            skill_level: self.rng.gen_range(1..=10),
            status: PeerStatus::Connecting,
        });

        info!("🔌 Connecting {} to peer {}", self.user_name, peer_id);

        let state = self.state.clone();
        self.timers.schedule(self.timing.connect_delay, move || {
            if let Some(peer) = state.lock().peer.as_mut() {
                peer.status = PeerStatus::Connected;
                info!("✅ Connected to {}", peer.name);
            }
        });

        let state = self.state.clone();
        self.timers.schedule(
            self.timing.connect_delay + self.timing.welcome_delay,
            move || {
                let mut state = state.lock();
                if state.peer.is_some() {
                    state
                        .messages
                        .push(ChatMessage::new(WELCOME_MESSAGE, Sender::Remote, &peer_name));
                }
            },
        );

        Ok(())
    }

    /// Appends a local message. Ignored when blank or when no peer is connected.
    pub fn send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let mut state = self.state.lock();
        let connected = matches!(
            state.peer.as_ref().map(|p| p.status),
            Some(PeerStatus::Connected)
        );
        if !connected {
            warn!("⚠️ Message dropped: no connected peer");
            return false;
        }

        state
            .messages
            .push(ChatMessage::new(text, Sender::Local, &self.user_name));
        true
    }

    pub fn disconnect(&mut self) {
        self.timers.cancel_all();

        let mut state = self.state.lock();
        if let Some(peer) = state.peer.take() {
            info!("🔌 Disconnected from {}", peer.name);
        }
        state.messages.clear();
    }

    pub fn toggle_video(&mut self) -> bool {
        self.video_enabled = !self.video_enabled;
        self.video_enabled
    }

    pub fn toggle_audio(&mut self) -> bool {
        self.audio_enabled = !self.audio_enabled;
        self.audio_enabled
    }

    pub fn is_video_enabled(&self) -> bool {
        self.video_enabled
    }

    pub fn is_audio_enabled(&self) -> bool {
        self.audio_enabled
    }
}

fn generate_connection_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CONNECTION_ID_LEN)
        .map(|_| CONNECTION_ID_CHARSET[rng.gen_range(0..CONNECTION_ID_CHARSET.len())] as char)
        .collect()
}
