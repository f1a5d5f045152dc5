use crate::components::{ErrorDisplay, IdeaCard, LoadingSpinner};
use crate::{AuthState, NoticeState};
use ideaboard_app::application::{search, top_voted, Notice, MAX_IDEA_TITLE};
use ideaboard_app::domain::Idea;
use ideaboard_app::ClientContext;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TRENDING_LIMIT: usize = 5;

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let auth = expect_context::<AuthState>();

    let version = RwSignal::new(0u32);
    let ideas = LocalResource::new(move || {
        version.track();
        let manage = ctx.ideas();
        async move { manage.list().await }
    });
    let reload = Callback::new(move |_: ()| version.update(|v| *v += 1));

    let term = RwSignal::new(String::new());

    view! {
        <div class="hero">
            <h1 class="hero__title">"Idea Board"</h1>
            <p class="hero__subtitle">"Share what you want built and vote for the ideas you like."</p>
        </div>

        <Show when=move || auth.is_logged_in()>
            <CreateIdeaForm on_created=reload/>
        </Show>

        <input
            type="search"
            class="search__input"
            placeholder="Search by title or author"
            prop:value=move || term.get()
            on:input=move |ev| term.set(event_target_value(&ev))
        />

        <Suspense fallback=move || view! { <LoadingSpinner label="Loading ideas..."/> }>
            {move || {
                ideas.get().map(|result| match result {
                    Ok(all) => {
                        let trending = top_voted(all.clone(), TRENDING_LIMIT);
                        let matching: Vec<Idea> = search(&all, &term.get()).into_iter().cloned().collect();
                        view! {
                            <section class="trending">
                                <h2 class="section__title">"Trending"</h2>
                                <IdeaList ideas=trending on_changed=reload/>
                            </section>
                            <section class="all-ideas">
                                <h2 class="section__title">"All ideas"</h2>
                                <IdeaList ideas=matching on_changed=reload/>
                            </section>
                        }
                        .into_any()
                    }
                    Err(e) => view! {
                        <ErrorDisplay message=e.user_message().to_string() on_retry=reload/>
                    }
                    .into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
pub(crate) fn IdeaList(ideas: Vec<Idea>, on_changed: Callback<()>) -> impl IntoView {
    if ideas.is_empty() {
        return view! { <p class="ideas__empty">"No ideas here yet."</p> }.into_any();
    }

    view! {
        <ul class="ideas">
            {ideas
                .into_iter()
                .map(|idea| view! { <IdeaCard idea=idea on_changed=on_changed/> })
                .collect::<Vec<_>>()}
        </ul>
    }
    .into_any()
}

#[component]
fn CreateIdeaForm(on_created: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let notices = expect_context::<NoticeState>();

    let title = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        let ideas = ctx.ideas();
        let draft = title.get_untracked();
        spawn_local(async move {
            match ideas.create(&draft).await {
                Ok(_) => {
                    title.try_set(String::new());
                    notices.show(Notice::success("Idea published!"));
                    on_created.run(());
                }
                Err(e) => notices.show(Notice::from(&e)),
            }
            busy.try_set(false);
        });
    };

    view! {
        <form class="idea-form" on:submit=on_submit>
            <textarea
                class="idea-form__input"
                placeholder="What should we build next?"
                maxlength=MAX_IDEA_TITLE.to_string()
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            ></textarea>
            <button type="submit" class="idea-form__button" prop:disabled=move || busy.get()>
                {move || if busy.get() { "Publishing..." } else { "Publish idea" }}
            </button>
        </form>
    }
}
