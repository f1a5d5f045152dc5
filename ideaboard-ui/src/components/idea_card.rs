use super::VoteButton;
use crate::{AuthState, NoticeState};
use ideaboard_app::application::Notice;
use ideaboard_app::domain::Idea;
use ideaboard_app::ClientContext;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn IdeaCard(idea: Idea, #[prop(into)] on_changed: Callback<()>) -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let creator_id = idea.creator.id.clone();
    let editable = move || auth.can_modify(&creator_id);

    let title = idea.title.clone();
    let author = idea.creator.username.clone();
    let report_href = format!("/ideas/{}", idea.id);
    let actions_for = idea.clone();

    view! {
        <li class="idea-card">
            <div class="idea-card__body">
                <p class="idea-card__title">{title}</p>
                <span class="idea-card__author">"by " {author}</span>
                <a class="idea-card__report" href=report_href>"Voters"</a>
            </div>
            <VoteButton idea=idea on_stale=on_changed/>
            {move || editable().then(|| view! {
                <IdeaActions idea=actions_for.clone() on_changed=on_changed/>
            })}
        </li>
    }
}

/// Rename and delete, offered to the idea's creator and to admins.
#[component]
fn IdeaActions(idea: Idea, on_changed: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let notices = expect_context::<NoticeState>();

    let editing = RwSignal::new(false);
    let draft = RwSignal::new(idea.title.clone());

    let on_rename = {
        let ctx = ctx.clone();
        let idea = idea.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let ideas = ctx.ideas();
            let idea = idea.clone();
            let title = draft.get_untracked();
            spawn_local(async move {
                match ideas.rename(&idea, &title).await {
                    Ok(_) => {
                        editing.try_set(false);
                        notices.show(Notice::success("Idea renamed."));
                        on_changed.run(());
                    }
                    Err(e) => notices.show(Notice::from(&e)),
                }
            });
        }
    };

    let on_delete = move |_| {
        let ideas = ctx.ideas();
        let idea = idea.clone();
        spawn_local(async move {
            match ideas.delete(&idea).await {
                Ok(()) => {
                    notices.show(Notice::success("Idea deleted."));
                    on_changed.run(());
                }
                Err(e) => notices.show(Notice::from(&e)),
            }
        });
    };

    view! {
        <div class="idea-card__actions">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <button class="idea-card__edit" on:click=move |_| editing.set(true)>"Rename"</button>
                }
            >
                <form class="idea-card__rename" on:submit=on_rename.clone()>
                    <input
                        type="text"
                        class="idea-card__input"
                        maxlength="255"
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| editing.set(false)>"Cancel"</button>
                </form>
            </Show>
            <button class="idea-card__delete" on:click=on_delete>"Delete"</button>
        </div>
    }
}
