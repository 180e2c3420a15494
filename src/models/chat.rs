use serde::{ Serialize, Deserialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Position of a message in its conversation, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
}

/// Append-only, insertion-ordered list of messages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        self.push(Sender::User, text.into())
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> MessageId {
        self.push(Sender::Bot, text.into())
    }

    fn push(&mut self, sender: Sender, text: String) -> MessageId {
        self.next_id += 1;
        let id = MessageId(self.next_id);
        self.messages.push(Message {
            id,
            text,
            sender,
        });
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_stay_unique_under_rapid_appends() {
        let mut conversation = Conversation::new();
        for i in 0..1000 {
            if i % 2 == 0 {
                conversation.push_user("ping");
            } else {
                conversation.push_bot("pong");
            }
        }

        let ids: HashSet<MessageId> = conversation.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn keeps_insertion_order_and_sender() {
        let mut conversation = Conversation::new();
        let first = conversation.push_user("hi");
        let second = conversation.push_bot("hello");

        assert!(first < second);
        let senders: Vec<Sender> = conversation.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot]);
        assert_eq!(conversation.messages()[1].text, "hello");
    }

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn message_serializes_id_text_and_sender_only() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");

        let value = serde_json::to_value(&conversation.messages()[0]).unwrap();
        assert_eq!(value, serde_json::json!({ "id": 1, "text": "hi", "sender": "user" }));
    }
}
