use super::home::IdeaList;
use crate::components::{ErrorDisplay, LoadingSpinner};
use crate::AuthState;
use ideaboard_app::domain::VoteStats;
use ideaboard_app::ClientContext;
use ideaboard_errors::AppError;
use leptos::prelude::*;

#[component]
pub fn MyVotesPage() -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let auth = expect_context::<AuthState>();

    let version = RwSignal::new(0u32);
    let voted = LocalResource::new(move || {
        version.track();
        let logged_in = auth.is_logged_in();
        let manage = ctx.ideas();
        async move {
            if !logged_in {
                return Err(AppError::Unauthorized);
            }
            manage.my_votes().await
        }
    });
    let reload = Callback::new(move |_: ()| version.update(|v| *v += 1));

    view! {
        <h1 class="page__title">"My votes"</h1>
        <Suspense fallback=move || view! { <LoadingSpinner/> }>
            {move || {
                voted.get().map(|result| match result {
                    Ok(ideas) => {
                        let stats = VoteStats::from_ideas(&ideas);
                        view! {
                            <dl class="stats">
                                <dt>"Ideas voted"</dt>
                                <dd>{stats.count}</dd>
                                <dt>"Average votes"</dt>
                                <dd>{stats.average_votes}</dd>
                                <dt>"Most votes"</dt>
                                <dd>{stats.max_votes}</dd>
                            </dl>
                            <IdeaList ideas=ideas on_changed=reload/>
                        }
                        .into_any()
                    }
                    Err(AppError::Unauthorized) => view! {
                        <p class="page__hint">"Log in to see the ideas you voted for."</p>
                    }
                    .into_any(),
                    Err(e) => view! {
                        <ErrorDisplay message=e.user_message().to_string() on_retry=reload/>
                    }
                    .into_any(),
                })
            }}
        </Suspense>
    }
}
