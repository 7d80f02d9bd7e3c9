use yew::prelude::*;

use crate::Model;

/// Delay before the `show` class lands, so the enter transition plays.
pub const NOTICE_ENTER_MS: u32 = 10;
/// How long a notice stays on screen.
pub const NOTICE_VISIBLE_MS: u32 = 3000;
/// Matches the CSS exit transition before the node is removed.
pub const NOTICE_EXIT_MS: u32 = 400;

/// The transient failure banner. Mounted hidden, shown, dismissed, removed;
/// each move is driven by a timer in the update loop.
pub struct Notice {
    pub text: String,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticePhase {
    Shown,
    Dismissing,
    Cleared,
}

pub fn render_notice(model: &Model) -> Html {
    match &model.notice {
        Some(notice) => html! {
            <div
                class={classes!("error-message", notice.visible.then_some("show"))}
                role="alert"
            >
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ &notice.text }</p>
            </div>
        },
        None => html! {},
    }
}
