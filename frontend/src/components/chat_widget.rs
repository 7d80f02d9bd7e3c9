use gloo_timers::callback::Timeout;
use shared::{ChatResponse, ChatRole, ChatTurn};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api;

const WELCOME_DELAY_MS: u32 = 500;
const WELCOME_MESSAGE: &str = "Hello! I'm your AI-powered healthcare assistant. I can help you \
    with skin condition information, finding dermatologists, and understanding your symptoms. \
    How can I assist you today?";
const CONNECTION_APOLOGY: &str =
    "I apologize, but I'm having trouble connecting to my AI. Please try again.";
const STARTER_REPLIES: [&str; 4] = [
    "Tell me about skin conditions",
    "Find a dermatologist",
    "Check my symptoms",
    "Skincare advice",
];

pub enum ChatMsg {
    Toggle,
    InputChanged(String),
    Send,
    QuickReply(String),
    ReplyReceived(Result<ChatResponse, ()>),
    Welcome,
}

/// Floating chat assistant, independent of the wizard. Keeps the running
/// transcript and echoes it to the backend as conversation context.
pub struct ChatWidget {
    open: bool,
    input: String,
    transcript: Vec<ChatTurn>,
    quick_replies: Vec<String>,
    awaiting_reply: bool,
    messages_ref: NodeRef,
    input_ref: NodeRef,
    welcome_timer: Option<Timeout>,
}

impl Component for ChatWidget {
    type Message = ChatMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let welcome_timer = Timeout::new(WELCOME_DELAY_MS, move || {
            link.send_message(ChatMsg::Welcome);
        });

        Self {
            open: false,
            input: String::new(),
            transcript: Vec::new(),
            quick_replies: Vec::new(),
            awaiting_reply: false,
            messages_ref: NodeRef::default(),
            input_ref: NodeRef::default(),
            welcome_timer: Some(welcome_timer),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ChatMsg::Toggle => {
                self.open = !self.open;
                true
            }
            ChatMsg::InputChanged(value) => {
                self.input = value;
                true
            }
            ChatMsg::Send => {
                let message = self.input.trim().to_string();
                if message.is_empty() || self.awaiting_reply {
                    return false;
                }
                self.input.clear();
                self.send_message(ctx, message);
                true
            }
            ChatMsg::QuickReply(reply) => {
                if self.awaiting_reply {
                    return false;
                }
                self.send_message(ctx, reply);
                true
            }
            ChatMsg::ReplyReceived(outcome) => {
                self.awaiting_reply = false;
                match outcome {
                    Ok(reply) => {
                        self.push_turn(ChatRole::Bot, reply.response);
                        self.quick_replies = reply.quick_replies;
                    }
                    Err(()) => self.push_turn(ChatRole::Bot, CONNECTION_APOLOGY.to_string()),
                }
                true
            }
            ChatMsg::Welcome => {
                self.welcome_timer.take();
                self.push_turn(ChatRole::Bot, WELCOME_MESSAGE.to_string());
                self.quick_replies = STARTER_REPLIES.iter().map(|s| s.to_string()).collect();
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        // Keep the transcript pinned to the newest message.
        if let Some(messages) = self.messages_ref.cast::<web_sys::Element>() {
            messages.set_scroll_top(messages.scroll_height());
        }
        if self.open && !self.awaiting_reply {
            if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="chatbot-container">
                <div class="chat-bubble" id="chat-bubble" onclick={link.callback(|_| ChatMsg::Toggle)}>
                    <i class="fa-solid fa-comments"></i>
                </div>
                <div class={classes!("chat-window", self.open.then_some("active"))}>
                    <div class="chat-header">
                        <h3><i class="fa-solid fa-robot"></i>{" AI Healthcare Assistant"}</h3>
                        <span class="close-chat" onclick={link.callback(|_| ChatMsg::Toggle)}>{"×"}</span>
                    </div>
                    <div class="chat-messages" ref={self.messages_ref.clone()}>
                        { for self.transcript.iter().map(render_turn) }
                        { self.render_typing_indicator() }
                        { self.render_quick_replies(ctx) }
                    </div>
                    <div class="chat-input">
                        <input
                            type="text"
                            placeholder="Type your message..."
                            ref={self.input_ref.clone()}
                            value={self.input.clone()}
                            disabled={self.awaiting_reply}
                            oninput={link.callback(|e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                ChatMsg::InputChanged(input.value())
                            })}
                            onkeypress={link.batch_callback(|e: KeyboardEvent| {
                                (e.key() == "Enter").then_some(ChatMsg::Send)
                            })}
                        />
                        <button
                            disabled={self.awaiting_reply || self.input.trim().is_empty()}
                            onclick={link.callback(|_| ChatMsg::Send)}
                        >
                            <i class="fa-solid fa-paper-plane"></i>
                        </button>
                    </div>
                </div>
            </div>
        }
    }
}

impl ChatWidget {
    fn send_message(&mut self, ctx: &Context<Self>, message: String) {
        self.push_turn(ChatRole::User, message.clone());
        self.quick_replies.clear();
        self.awaiting_reply = true;

        let history = self.transcript.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = api::request_chat_reply(message, history).await;
            link.send_message(ChatMsg::ReplyReceived(outcome));
        });
    }

    fn push_turn(&mut self, role: ChatRole, content: String) {
        self.transcript.push(ChatTurn { role, content });
    }

    fn render_typing_indicator(&self) -> Html {
        if !self.awaiting_reply {
            return html! {};
        }
        html! {
            <div class="typing-indicator">
                <div class="typing-dot"></div>
                <div class="typing-dot"></div>
                <div class="typing-dot"></div>
            </div>
        }
    }

    fn render_quick_replies(&self, ctx: &Context<Self>) -> Html {
        if self.quick_replies.is_empty() || self.awaiting_reply {
            return html! {};
        }
        html! {
            <div class="quick-replies">
                { for self.quick_replies.iter().map(|reply| {
                    let reply_text = reply.clone();
                    let onclick = ctx.link().callback(move |_| ChatMsg::QuickReply(reply_text.clone()));
                    html! { <button class="quick-reply" {onclick}>{ reply }</button> }
                })}
            </div>
        }
    }
}

fn render_turn(turn: &ChatTurn) -> Html {
    let role_class = match turn.role {
        ChatRole::User => "user-message",
        ChatRole::Bot => "bot-message",
    };
    html! {
        <div class={classes!("message", role_class)}>
            { for message_segments(&turn.content).into_iter().map(|segment| match segment {
                MessageSegment::Text(text) => html! { <span>{ text }</span> },
                MessageSegment::Link(url) => html! {
                    <a href={url.clone()} target="_blank" rel="noopener noreferrer">{ url }</a>
                },
            })}
        </div>
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageSegment {
    Text(String),
    Link(String),
}

/// Splits a message so URLs render as anchors without injecting raw HTML.
pub fn message_segments(text: &str) -> Vec<MessageSegment> {
    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(start) = next_url_start(rest) {
        if start > 0 {
            segments.push(MessageSegment::Text(rest[..start].to_string()));
        }
        let tail = &rest[start..];
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        segments.push(MessageSegment::Link(tail[..end].to_string()));
        rest = &tail[end..];
    }
    if !rest.is_empty() {
        segments.push(MessageSegment::Text(rest.to_string()));
    }
    segments
}

fn next_url_start(text: &str) -> Option<usize> {
    match (text.find("http://"), text.find("https://")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::{message_segments, MessageSegment};

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(
            message_segments("hello there"),
            vec![MessageSegment::Text("hello there".to_string())]
        );
    }

    #[test]
    fn embedded_url_becomes_a_link() {
        assert_eq!(
            message_segments("see https://example.com/derm for details"),
            vec![
                MessageSegment::Text("see ".to_string()),
                MessageSegment::Link("https://example.com/derm".to_string()),
                MessageSegment::Text(" for details".to_string()),
            ]
        );
    }

    #[test]
    fn trailing_url_has_no_empty_tail() {
        assert_eq!(
            message_segments("read http://example.org"),
            vec![
                MessageSegment::Text("read ".to_string()),
                MessageSegment::Link("http://example.org".to_string()),
            ]
        );
    }

    #[test]
    fn multiple_urls_are_all_linked() {
        let segments = message_segments("http://a.example and https://b.example");
        assert_eq!(
            segments,
            vec![
                MessageSegment::Link("http://a.example".to_string()),
                MessageSegment::Text(" and ".to_string()),
                MessageSegment::Link("https://b.example".to_string()),
            ]
        );
    }
}
