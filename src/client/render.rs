use crate::models::chat::{ Message, Sender };

pub const BOT_PREFIX: &str = "bot> ";
pub const TYPING_LINE: &str = "bot> ...";

const MIN_WIDTH: usize = 16;

/// Lays out the conversation as terminal lines.
///
/// User messages are right-aligned within `width` and wrapped to three
/// quarters of it, bot messages are left-aligned behind [`BOT_PREFIX`]. While
/// `loading` the typing indicator is the last line. Only the newest `height`
/// lines are returned, so the view always follows the latest message; a
/// `height` of zero keeps everything.
pub fn render_transcript(
    messages: &[Message],
    loading: bool,
    width: usize,
    height: usize
) -> Vec<String> {
    let width = width.max(MIN_WIDTH);
    let mut lines = Vec::new();

    for message in messages {
        match message.sender {
            Sender::User => {
                for line in wrap(&message.text, width * 3 / 4) {
                    lines.push(format!("{:>width$}", line, width = width));
                }
            }
            Sender::Bot => {
                let indent = " ".repeat(BOT_PREFIX.len());
                let wrapped = wrap(&message.text, width - BOT_PREFIX.len());
                for (i, line) in wrapped.into_iter().enumerate() {
                    let prefix = if i == 0 { BOT_PREFIX } else { indent.as_str() };
                    lines.push(format!("{}{}", prefix, line));
                }
            }
        }
    }

    if loading {
        lines.push(TYPING_LINE.to_string());
    }

    if height > 0 && lines.len() > height {
        lines.drain(..lines.len() - height);
    }
    lines
}

fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut out = Vec::new();

    for raw in text.lines() {
        let mut current = String::new();
        let mut len = 0;

        for word in raw.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > max {
                if len > 0 {
                    out.push(std::mem::take(&mut current));
                    len = 0;
                }
                out.push(chars.drain(..max).collect());
            }
            if chars.is_empty() {
                continue;
            }

            if len > 0 && len + 1 + chars.len() > max {
                out.push(std::mem::take(&mut current));
                len = 0;
            }
            if len > 0 {
                current.push(' ');
                len += 1;
            }
            len += chars.len();
            current.extend(chars);
        }
        out.push(current);
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}
