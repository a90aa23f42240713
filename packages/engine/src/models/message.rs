use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// 送信先。チャンネル全体か、特定のプレイヤーへの個別メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recipient {
    Channel,
    Player(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub recipient: Recipient,
    pub text: String,
}

impl Message {
    pub fn channel(text: impl Into<String>) -> Self {
        Message {
            recipient: Recipient::Channel,
            text: text.into(),
        }
    }

    pub fn player(id: &str, text: impl Into<String>) -> Self {
        Message {
            recipient: Recipient::Player(id.to_string()),
            text: text.into(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.recipient == Recipient::Channel
    }

    pub fn is_for(&self, id: &str) -> bool {
        matches!(&self.recipient, Recipient::Player(p) if p == id)
    }
}

/// 同じ宛先・同じ本文の重複を、最初の出現順を保って取り除く
pub fn dedup_messages(messages: Vec<Message>) -> Vec<Message> {
    let mut seen = std::collections::HashSet::new();
    messages
        .into_iter()
        .filter(|m| seen.insert(m.clone()))
        .collect()
}
