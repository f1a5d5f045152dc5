use crate::components::{ErrorDisplay, LoadingSpinner};
use ideaboard_app::domain::IdeaReport;
use ideaboard_app::ClientContext;
use ideaboard_errors::AppError;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

#[component]
pub fn IdeaReportPage() -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let params = use_params_map();

    let version = RwSignal::new(0u32);
    let report = LocalResource::new(move || {
        version.track();
        let id = params.read().get("id");
        let manage = ctx.ideas();
        async move {
            match id {
                Some(id) => manage.report(&id).await,
                None => Err(AppError::NotFound),
            }
        }
    });
    let reload = Callback::new(move |_: ()| version.update(|v| *v += 1));

    view! {
        <Suspense fallback=move || view! { <LoadingSpinner label="Loading report..."/> }>
            {move || {
                report.get().map(|result| match result {
                    Ok(report) => view! { <ReportView report=report/> }.into_any(),
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
fn ReportView(report: IdeaReport) -> impl IntoView {
    let voters = if report.voters.is_empty() {
        view! { <p class="page__hint">"Nobody has voted for this idea yet."</p> }.into_any()
    } else {
        view! {
            <ul class="report__voters">
                {report
                    .voters
                    .into_iter()
                    .map(|name| view! { <li>{name}</li> })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <h1 class="page__title">{report.title}</h1>
        <dl class="stats">
            <dt>"Created by"</dt>
            <dd>{report.creator}</dd>
            <dt>"Votes"</dt>
            <dd>{report.votes_count}</dd>
        </dl>
        <h2 class="section__title">"Voters"</h2>
        {voters}
    }
}
