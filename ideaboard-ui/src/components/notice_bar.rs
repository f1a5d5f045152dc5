use crate::NoticeState;
use ideaboard_app::application::NoticeLevel;
use leptos::prelude::*;

/// Shows the most recent notification until it is dismissed or replaced.
#[component]
pub fn NoticeBar() -> impl IntoView {
    let notices = expect_context::<NoticeState>();

    move || {
        notices.current().map(|notice| {
            let class = match notice.level {
                NoticeLevel::Success => "notice notice--success",
                NoticeLevel::Info => "notice notice--info",
                NoticeLevel::Error => "notice notice--error",
            };
            view! {
                <div class=class role="status">
                    <span class="notice__message">{notice.message}</span>
                    <button
                        class="notice__close"
                        aria-label="Dismiss"
                        on:click=move |_| notices.clear()
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
