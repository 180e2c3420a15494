use crate::cli::ChatArgs;
use super::{ ChatBackend, ChatSession, HttpBackend };

use std::error::Error;
use std::future::Future;
use std::io::BufRead;
use tokio::io::{ AsyncWrite, AsyncWriteExt };
use tokio::sync::mpsc;
use log::{ info, debug, warn };

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const TITLE: &str = "ChatBot Demo";
const PLACEHOLDER: &str = "Type your message...";
const PROMPT: &str = "> ";
const QUIT: &str = "/quit";

pub async fn run(args: ChatArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let backend = HttpBackend::new(&args.proxy_url)?;
    info!("Chatting through {}", backend.endpoint());

    let session = ChatSession::new(backend);
    let mut out = tokio::io::stdout();
    let mut lines = stdin_lines();

    draw(&mut out, &session, &args).await?;
    while let Some(line) = lines.recv().await {
        if line.trim() == QUIT {
            break;
        }

        session.set_input(line).await;
        // join! polls the submission first, so by the time the view is drawn
        // the user message and typing indicator are already in place.
        let ((outcome, dropped), drawn) = tokio::join!(
            discard_while(session.submit(), &mut lines),
            draw(&mut out, &session, &args)
        );
        drawn?;
        debug!("Submission settled: {:?} ({} lines dropped)", outcome, dropped);
        draw(&mut out, &session, &args).await?;
    }

    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

/// Reads stdin on a plain thread so a blocked read never holds up runtime
/// shutdown after `/quit`.
fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Could not read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Drives `pending` to completion, throwing away every line that arrives in
/// the meantime. Input is disabled while a reply is pending, so nothing typed
/// then may be submitted later.
async fn discard_while<F: Future>(pending: F, lines: &mut mpsc::Receiver<String>) -> (F::Output, usize) {
    tokio::pin!(pending);
    let mut dropped = 0;
    let output = loop {
        tokio::select! {
            biased;
            output = &mut pending => break output,
            Some(line) = lines.recv() => {
                debug!("Ignoring {} chars typed while waiting for a reply", line.chars().count());
                dropped += 1;
            }
        }
    };
    // Lines that landed in the same tick as the reply.
    while let Ok(line) = lines.try_recv() {
        debug!("Ignoring {} chars typed while waiting for a reply", line.chars().count());
        dropped += 1;
    }
    (output, dropped)
}

async fn draw<B, W>(out: &mut W, session: &ChatSession<B>, args: &ChatArgs) -> std::io::Result<()>
    where B: ChatBackend, W: AsyncWrite + Unpin
{
    let mut frame = String::from(CLEAR_SCREEN);
    frame.push_str(TITLE);
    frame.push('\n');

    let view = session.view(args.width, args.height).await;
    if view.is_empty() {
        frame.push_str(PLACEHOLDER);
        frame.push('\n');
    }
    for line in view {
        frame.push_str(&line);
        frame.push('\n');
    }
    // No prompt while a reply is pending: input is disabled until it settles.
    if !session.is_loading() {
        frame.push_str(PROMPT);
    }
    out.write_all(frame.as_bytes()).await?;
    out.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BackendError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct Echo;

    #[async_trait]
    impl ChatBackend for Echo {
        async fn send(&self, text: &str) -> Result<String, BackendError> {
            Ok(format!("you said {}", text))
        }
    }

    fn chat_args() -> ChatArgs {
        ChatArgs { proxy_url: "http://127.0.0.1:3000".into(), width: 30, height: 10 }
    }

    async fn frame_of(session: &ChatSession<Echo>) -> String {
        let mut out: Vec<u8> = Vec::new();
        draw(&mut out, session, &chat_args()).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn draws_transcript_then_prompt() {
        let session = ChatSession::new(Echo);
        session.set_input("ping").await;
        session.submit().await;

        let frame = frame_of(&session).await;

        assert!(frame.starts_with(&format!("{}{}\n", CLEAR_SCREEN, TITLE)));
        assert!(frame.contains("bot> you said ping\n"));
        assert!(!frame.contains(PLACEHOLDER));
        assert!(frame.ends_with(PROMPT));
    }

    #[tokio::test]
    async fn empty_conversation_shows_title_and_hint() {
        let session = ChatSession::new(Echo);

        let frame = frame_of(&session).await;

        assert_eq!(frame, format!("{}{}\n{}\n{}", CLEAR_SCREEN, TITLE, PLACEHOLDER, PROMPT));
    }

    #[tokio::test]
    async fn lines_typed_while_pending_are_dropped() {
        let (tx, mut lines) = mpsc::channel(8);
        let release = Arc::new(Notify::new());

        let reply = {
            let release = release.clone();
            async move {
                release.notified().await;
                "settled"
            }
        };
        let typist = tokio::spawn(async move {
            tx.send("one".to_string()).await.unwrap();
            tx.send("two".to_string()).await.unwrap();
            release.notify_one();
            tx
        });

        let (output, dropped) = discard_while(reply, &mut lines).await;
        assert_eq!(output, "settled");
        assert_eq!(dropped, 2);
        assert!(lines.try_recv().is_err());

        // Input typed after the reply is delivered as usual.
        let tx = typist.await.unwrap();
        tx.send("three".to_string()).await.unwrap();
        assert_eq!(lines.recv().await.as_deref(), Some("three"));
    }
}
