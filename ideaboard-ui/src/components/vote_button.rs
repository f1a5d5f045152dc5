use crate::{AuthState, NoticeState};
use ideaboard_app::application::{VoteAttempt, VoteOutcome};
use ideaboard_app::domain::Idea;
use ideaboard_app::infrastructure::api::VoteBackend;
use ideaboard_app::ClientContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Optimistic vote button. Clicks while a request is in flight are dropped and
/// the button comes back enabled whatever the server answers.
#[component]
pub fn VoteButton(
    idea: Idea,
    /// Called when the server no longer knows the idea.
    #[prop(optional)]
    on_stale: Option<Callback<()>>,
) -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let notices = expect_context::<NoticeState>();
    let auth = expect_context::<AuthState>();

    let attempt = RwSignal::new(VoteAttempt::new(idea.id.clone(), idea.votes, false));

    // The ledger lives in the browser, so the voted flag is read after hydration
    // and again whenever someone logs in or out.
    Effect::new({
        let ledger = ctx.ledger().clone();
        let mut latest = idea.clone();
        move |_| {
            let user = auth.subject_id();
            tracing::debug!("Refreshing vote state of idea {} for {:?}", latest.id, user);
            latest.votes = attempt.with_untracked(|a| a.votes());
            attempt.update(|a| a.refresh(&latest, &ledger));
        }
    });

    let on_click = move |_| {
        let mut current = attempt.get_untracked();

        if let Err(outcome) = current.begin(&ctx.session) {
            attempt.set(current);
            if let Some(notice) = outcome.notice() {
                notices.show(notice);
            }
            return;
        }
        attempt.set(current.clone());

        let ctx = ctx.clone();
        spawn_local(async move {
            let result = ctx.api.vote(current.idea_id()).await;
            let outcome = current.resolve(result, ctx.ledger());
            attempt.try_set(current);

            if let Some(notice) = outcome.notice() {
                notices.show(notice);
            }
            if let VoteOutcome::Failed { needs_refresh: true, .. } = outcome {
                if let Some(refresh) = on_stale {
                    refresh.run(());
                }
            }
        });
    };

    let voted = move || attempt.with(|a| a.has_voted());

    view! {
        <button
            class=move || if voted() { "vote-button vote-button--voted" } else { "vote-button" }
            prop:disabled=move || attempt.with(|a| a.is_pending())
            on:click=on_click
        >
            <span class="vote-button__count">{move || attempt.with(|a| a.votes())}</span>
            <span class="vote-button__label">{move || if voted() { "Voted" } else { "Vote" }}</span>
        </button>
    }
}
